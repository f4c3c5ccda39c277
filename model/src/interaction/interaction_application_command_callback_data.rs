use crate::util;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message flag marking a response as visible to the invoking user only.
pub const EPHEMERAL: u32 = 1 << 6;

/// Payload of a message-shaped interaction response. Embeds and allowed
/// mentions are passed through as opaque JSON values.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct InteractionApplicationCommandCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<Value>,
    #[serde(default, skip_serializing_if = "util::is_zero")]
    pub flags: u32,
}

impl InteractionApplicationCommandCallbackData {
    pub fn from_content(content: impl Into<Box<str>>) -> Self {
        InteractionApplicationCommandCallbackData {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.flags |= EPHEMERAL;
        self
    }
}
