use crate::util;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message sent through the webhook followup endpoints after the initial
/// interaction response.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FollowupMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "util::is_false")]
    pub tts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<Value>,
    #[serde(default, skip_serializing_if = "util::is_zero")]
    pub flags: u32,
}

impl FollowupMessage {
    pub fn from_content(content: impl Into<Box<str>>) -> Self {
        FollowupMessage {
            content: Some(content.into()),
            ..Default::default()
        }
    }
}
