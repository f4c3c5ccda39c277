use super::{Component, ComponentType};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ActionRow {
    pub r#type: ComponentType,
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> Self {
        ActionRow {
            r#type: ComponentType::ActionRow,
            components,
        }
    }
}
