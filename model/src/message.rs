use crate::user::User;
use crate::Snowflake;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub content: Box<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}
