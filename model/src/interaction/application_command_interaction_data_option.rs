use crate::interaction::{ApplicationCommandOptionType, OptionValue};
use serde::{Deserialize, Serialize};

/// One node of the received argument/subcommand tree: either a scalar leaf
/// (`value` set, `options` empty) or a subcommand branch (`value` unset,
/// `options` holding the matched branch's own tree).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApplicationCommandInteractionDataOption {
    pub name: Box<str>,
    pub r#type: ApplicationCommandOptionType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<OptionValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandInteractionDataOption>,
}

impl ApplicationCommandInteractionDataOption {
    pub fn is_sub_command(&self) -> bool {
        self.r#type.is_sub_command()
    }

    /// By-name lookup among this node's children; first match wins.
    pub fn get_option(&self, name: &str) -> Option<&ApplicationCommandInteractionDataOption> {
        self.options.iter().find(|option| &*option.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_leaf() {
        let option: ApplicationCommandInteractionDataOption =
            serde_json::from_str(r#"{"name": "message", "type": 3, "value": "hi"}"#).unwrap();

        assert!(!option.is_sub_command());
        assert_eq!(option.value, Some(OptionValue::from("hi")));
        assert!(option.options.is_empty());
    }

    #[test]
    fn test_sub_command_branch() {
        let option: ApplicationCommandInteractionDataOption = serde_json::from_str(
            r#"{
                "name": "sha1",
                "type": 1,
                "options": [{"name": "text", "type": 3, "value": "abc"}]
            }"#,
        )
        .unwrap();

        assert!(option.is_sub_command());
        assert!(option.value.is_none());
        assert_eq!(
            option.get_option("text").and_then(|o| o.value.clone()),
            Some(OptionValue::from("abc"))
        );
        assert!(option.get_option("missing").is_none());
    }
}
