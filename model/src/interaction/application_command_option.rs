use crate::interaction::ApplicationCommandOptionChoice;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApplicationCommandOption {
    pub r#type: ApplicationCommandOptionType,
    pub name: Box<str>,
    pub description: Box<str>,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ApplicationCommandOptionChoice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
}

impl ApplicationCommandOption {
    pub fn new(
        r#type: ApplicationCommandOptionType,
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
        required: bool,
    ) -> Self {
        ApplicationCommandOption {
            r#type,
            name: name.into(),
            description: description.into(),
            default: false,
            required,
            choices: Vec::new(),
            options: Vec::new(),
        }
    }
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ApplicationCommandOptionType {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
}

impl ApplicationCommandOptionType {
    pub fn is_sub_command(self) -> bool {
        matches!(
            self,
            ApplicationCommandOptionType::SubCommand | ApplicationCommandOptionType::SubCommandGroup
        )
    }
}
