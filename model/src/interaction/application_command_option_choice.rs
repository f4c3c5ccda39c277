use crate::interaction::OptionValue;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApplicationCommandOptionChoice {
    pub name: Box<str>,
    pub value: OptionValue, // string or int
}

impl ApplicationCommandOptionChoice {
    pub fn new(name: impl Into<Box<str>>, value: impl Into<OptionValue>) -> Self {
        ApplicationCommandOptionChoice {
            name: name.into(),
            value: value.into(),
        }
    }
}
