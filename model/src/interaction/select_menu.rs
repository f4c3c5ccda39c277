use super::ComponentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SelectMenu {
    pub r#type: ComponentType,
    pub custom_id: Box<str>,
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Box<str>>,
    /// 0-25
    #[serde(default = "one")]
    pub min_values: u8,
    /// 1-25
    #[serde(default = "one")]
    pub max_values: u8,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SelectOption {
    pub label: Box<str>,
    pub value: Box<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Value>,
    #[serde(default)]
    pub default: bool,
}

fn one() -> u8 {
    1
}
