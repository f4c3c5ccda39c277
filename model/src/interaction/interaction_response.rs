use crate::interaction::{
    ApplicationCommandOptionChoice, Component, InteractionApplicationCommandCallbackData, EPHEMERAL,
};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum InteractionResponse {
    Pong(SimpleInteractionResponse),
    ChannelMessageWithSource(CallbackResponse),
    DeferredChannelMessageWithSource(DeferredResponse),
    DeferredMessageUpdate(SimpleInteractionResponse),
    UpdateMessage(CallbackResponse),
    ApplicationCommandAutoCompleteResult(AutoCompleteResultResponse),
    Modal(ModalResponse),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimpleInteractionResponse {
    r#type: InteractionResponseType,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CallbackResponse {
    r#type: InteractionResponseType,
    pub data: InteractionApplicationCommandCallbackData,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeferredResponse {
    r#type: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionApplicationCommandCallbackData>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AutoCompleteResultResponse {
    r#type: InteractionResponseType,
    pub data: AutoCompleteResultResponseData,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AutoCompleteResultResponseData {
    pub choices: Vec<ApplicationCommandOptionChoice>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ModalResponse {
    r#type: InteractionResponseType,
    pub data: ModalResponseData,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ModalResponseData {
    pub custom_id: Box<str>,
    pub title: Box<str>,
    pub components: Vec<Component>,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[non_exhaustive]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredMessageUpdate = 6,
    UpdateMessage = 7,
    ApplicationCommandAutoCompleteResult = 8,
    Modal = 9,
}

impl TryFrom<u64> for InteractionResponseType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Pong,
            4 => Self::ChannelMessageWithSource,
            5 => Self::DeferredChannelMessageWithSource,
            6 => Self::DeferredMessageUpdate,
            7 => Self::UpdateMessage,
            8 => Self::ApplicationCommandAutoCompleteResult,
            9 => Self::Modal,
            _ => {
                return Err(
                    format!("invalid interaction response type \"{}\"", value).into_boxed_str()
                )
            }
        })
    }
}

impl InteractionResponse {
    pub fn new_pong() -> InteractionResponse {
        InteractionResponse::Pong(SimpleInteractionResponse {
            r#type: InteractionResponseType::Pong,
        })
    }

    pub fn new_channel_message_with_source(
        data: InteractionApplicationCommandCallbackData,
    ) -> InteractionResponse {
        InteractionResponse::ChannelMessageWithSource(CallbackResponse {
            r#type: InteractionResponseType::ChannelMessageWithSource,
            data,
        })
    }

    pub fn new_deferred_channel_message_with_source(ephemeral: bool) -> InteractionResponse {
        let data = if ephemeral {
            Some(InteractionApplicationCommandCallbackData {
                flags: EPHEMERAL,
                ..Default::default()
            })
        } else {
            None
        };

        InteractionResponse::DeferredChannelMessageWithSource(DeferredResponse {
            r#type: InteractionResponseType::DeferredChannelMessageWithSource,
            data,
        })
    }

    pub fn new_deferred_message_update() -> InteractionResponse {
        InteractionResponse::DeferredMessageUpdate(SimpleInteractionResponse {
            r#type: InteractionResponseType::DeferredMessageUpdate,
        })
    }

    pub fn new_update_message(
        data: InteractionApplicationCommandCallbackData,
    ) -> InteractionResponse {
        InteractionResponse::UpdateMessage(CallbackResponse {
            r#type: InteractionResponseType::UpdateMessage,
            data,
        })
    }

    pub fn new_auto_complete_result(
        choices: Vec<ApplicationCommandOptionChoice>,
    ) -> InteractionResponse {
        InteractionResponse::ApplicationCommandAutoCompleteResult(AutoCompleteResultResponse {
            r#type: InteractionResponseType::ApplicationCommandAutoCompleteResult,
            data: AutoCompleteResultResponseData { choices },
        })
    }

    pub fn new_modal(
        custom_id: impl Into<Box<str>>,
        title: impl Into<Box<str>>,
        components: Vec<Component>,
    ) -> InteractionResponse {
        InteractionResponse::Modal(ModalResponse {
            r#type: InteractionResponseType::Modal,
            data: ModalResponseData {
                custom_id: custom_id.into(),
                title: title.into(),
                components,
            },
        })
    }

    pub fn kind(&self) -> InteractionResponseType {
        match self {
            InteractionResponse::Pong(r) => r.r#type,
            InteractionResponse::ChannelMessageWithSource(r) => r.r#type,
            InteractionResponse::DeferredChannelMessageWithSource(r) => r.r#type,
            InteractionResponse::DeferredMessageUpdate(r) => r.r#type,
            InteractionResponse::UpdateMessage(r) => r.r#type,
            InteractionResponse::ApplicationCommandAutoCompleteResult(r) => r.r#type,
            InteractionResponse::Modal(r) => r.r#type,
        }
    }

    /// Canonical `{"type": <int>, "data": {...}?}` wire shape.
    pub fn to_wire(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl<'de> Deserialize<'de> for InteractionResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let response_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| Box::from("interaction response type was not an integer"))
            .and_then(InteractionResponseType::try_from)
            .map_err(D::Error::custom)?;

        let response = match response_type {
            InteractionResponseType::Pong => {
                serde_json::from_value(value).map(InteractionResponse::Pong)
            }
            InteractionResponseType::ChannelMessageWithSource => {
                serde_json::from_value(value).map(InteractionResponse::ChannelMessageWithSource)
            }
            InteractionResponseType::DeferredChannelMessageWithSource => {
                serde_json::from_value(value)
                    .map(InteractionResponse::DeferredChannelMessageWithSource)
            }
            InteractionResponseType::DeferredMessageUpdate => {
                serde_json::from_value(value).map(InteractionResponse::DeferredMessageUpdate)
            }
            InteractionResponseType::UpdateMessage => {
                serde_json::from_value(value).map(InteractionResponse::UpdateMessage)
            }
            InteractionResponseType::ApplicationCommandAutoCompleteResult => {
                serde_json::from_value(value)
                    .map(InteractionResponse::ApplicationCommandAutoCompleteResult)
            }
            InteractionResponseType::Modal => {
                serde_json::from_value(value).map(InteractionResponse::Modal)
            }
        }
        .map_err(D::Error::custom)?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pong_has_no_data_key() {
        let wire = InteractionResponse::new_pong().to_wire().unwrap();
        assert_eq!(wire, serde_json::json!({"type": 1}));
    }

    #[test]
    fn test_channel_message_wire_shape() {
        let response = InteractionResponse::new_channel_message_with_source(
            InteractionApplicationCommandCallbackData::from_content("hi"),
        );

        assert_eq!(
            response.to_wire().unwrap(),
            serde_json::json!({"type": 4, "data": {"content": "hi"}})
        );
    }

    #[test]
    fn test_ephemeral_message_sets_flag_only() {
        let response = InteractionResponse::new_channel_message_with_source(
            InteractionApplicationCommandCallbackData::from_content("secret").ephemeral(),
        );

        assert_eq!(
            response.to_wire().unwrap(),
            serde_json::json!({"type": 4, "data": {"content": "secret", "flags": 64}})
        );
    }

    #[test]
    fn test_deferred_wire_shapes() {
        assert_eq!(
            InteractionResponse::new_deferred_channel_message_with_source(false)
                .to_wire()
                .unwrap(),
            serde_json::json!({"type": 5})
        );

        assert_eq!(
            InteractionResponse::new_deferred_channel_message_with_source(true)
                .to_wire()
                .unwrap(),
            serde_json::json!({"type": 5, "data": {"flags": 64}})
        );

        assert_eq!(
            InteractionResponse::new_deferred_message_update()
                .to_wire()
                .unwrap(),
            serde_json::json!({"type": 6})
        );
    }

    #[test]
    fn test_update_message_wire_shape() {
        let response = InteractionResponse::new_update_message(
            InteractionApplicationCommandCallbackData::from_content("done"),
        );

        assert_eq!(
            response.to_wire().unwrap(),
            serde_json::json!({"type": 7, "data": {"content": "done"}})
        );
    }

    #[test]
    fn test_auto_complete_wire_shape() {
        let response = InteractionResponse::new_auto_complete_result(vec![
            ApplicationCommandOptionChoice::new("one", 1),
        ]);

        assert_eq!(
            response.to_wire().unwrap(),
            serde_json::json!({"type": 8, "data": {"choices": [{"name": "one", "value": 1}]}})
        );
    }

    #[test]
    fn test_modal_wire_shape() {
        let response = InteractionResponse::new_modal("feedback", "Feedback", Vec::new());

        assert_eq!(
            response.to_wire().unwrap(),
            serde_json::json!({
                "type": 9,
                "data": {"custom_id": "feedback", "title": "Feedback", "components": []}
            })
        );
    }
}
