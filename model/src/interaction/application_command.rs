use crate::interaction::ApplicationCommandOption;
use crate::Snowflake;
use serde::{Deserialize, Serialize};

/// Structural description of a slash command, both as fetched from Discord
/// (`id` set) and as the creation payload used when publishing (`id` unset).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApplicationCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    pub name: Box<str>,
    pub description: Box<str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
    #[serde(default = "returns_true")]
    pub default_permission: bool,
}

fn returns_true() -> bool {
    true
}

impl ApplicationCommand {
    pub fn new(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> Self {
        ApplicationCommand {
            id: None,
            application_id: None,
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            default_permission: true,
        }
    }

    pub fn option(mut self, option: ApplicationCommandOption) -> Self {
        self.options.push(option);
        self
    }
}
