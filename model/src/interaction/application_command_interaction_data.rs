use crate::interaction::{
    ApplicationCommandInteractionDataOption, ApplicationCommandInteractionDataResolved,
};
use crate::Snowflake;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ApplicationCommandInteractionData {
    pub id: Snowflake,
    pub name: Box<str>,
    #[serde(default)]
    pub resolved: ApplicationCommandInteractionDataResolved,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandInteractionDataOption>,
}

impl ApplicationCommandInteractionData {
    /// By-name lookup among the top-level options; first match wins.
    pub fn get_option(&self, name: &str) -> Option<&ApplicationCommandInteractionDataOption> {
        self.options.iter().find(|option| &*option.name == name)
    }
}
