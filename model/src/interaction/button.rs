use super::ComponentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Button {
    pub r#type: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<Box<str>>,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Box<str>>,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
}

impl Button {
    pub fn new(custom_id: impl Into<Box<str>>, label: impl Into<Box<str>>, style: ButtonStyle) -> Self {
        Button {
            r#type: ComponentType::Button,
            label: Some(label.into()),
            custom_id: Some(custom_id.into()),
            style,
            emoji: None,
            url: None,
            disabled: false,
        }
    }
}
