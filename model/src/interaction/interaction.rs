use crate::interaction::{
    ApplicationCommandInteractionData, ApplicationCommandInteractionDataOption,
    ApplicationCommandType, ComponentType,
};
use crate::member::Member;
use crate::message::Message;
use crate::user::User;
use crate::Snowflake;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Interaction {
    Ping(Box<PingInteraction>),
    ApplicationCommand(Box<ApplicationCommandInteraction>),
    MessageComponent(Box<MessageComponentInteraction>),
    ApplicationCommandAutoComplete(Box<ApplicationCommandAutoCompleteInteraction>),
    ModalSubmit(Box<ModalSubmitInteraction>),
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutoComplete = 4,
    ModalSubmit = 5,
}

impl TryFrom<u64> for InteractionType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutoComplete,
            5 => Self::ModalSubmit,
            _ => return Err(format!("invalid interaction type \"{}\"", value).into_boxed_str()),
        })
    }
}

/// The acting principal: a guild member view or a plain user view. A decoded
/// non-ping interaction always carries at least one of the two.
#[derive(Debug)]
pub enum Invoker<'a> {
    Member(&'a Member),
    User(&'a User),
}

impl Invoker<'_> {
    /// The invoking user's id, whichever view was delivered.
    pub fn user_id(&self) -> Option<Snowflake> {
        match self {
            Invoker::Member(member) => member.user.as_ref().map(|u| u.id),
            Invoker::User(user) => Some(user.id),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Invoker::Member(member) => member.user.as_ref(),
            Invoker::User(user) => Some(user),
        }
    }
}

fn invoker<'a>(member: &'a Option<Member>, user: &'a Option<User>) -> Option<Invoker<'a>> {
    match (member, user) {
        (Some(member), _) => Some(Invoker::Member(member)),
        (None, Some(user)) => Some(Invoker::User(user)),
        (None, None) => None,
    }
}

impl Interaction {
    pub fn kind(&self) -> InteractionType {
        match self {
            Interaction::Ping(_) => InteractionType::Ping,
            Interaction::ApplicationCommand(_) => InteractionType::ApplicationCommand,
            Interaction::MessageComponent(_) => InteractionType::MessageComponent,
            Interaction::ApplicationCommandAutoComplete(_) => {
                InteractionType::ApplicationCommandAutoComplete
            }
            Interaction::ModalSubmit(_) => InteractionType::ModalSubmit,
        }
    }

    pub fn id(&self) -> Snowflake {
        match self {
            Interaction::Ping(i) => i.id,
            Interaction::ApplicationCommand(i) => i.id,
            Interaction::MessageComponent(i) => i.id,
            Interaction::ApplicationCommandAutoComplete(i) => i.id,
            Interaction::ModalSubmit(i) => i.id,
        }
    }

    pub fn application_id(&self) -> Snowflake {
        match self {
            Interaction::Ping(i) => i.application_id,
            Interaction::ApplicationCommand(i) => i.application_id,
            Interaction::MessageComponent(i) => i.application_id,
            Interaction::ApplicationCommandAutoComplete(i) => i.application_id,
            Interaction::ModalSubmit(i) => i.application_id,
        }
    }

    /// Correlation token for follow-up operations; absent on pings.
    pub fn token(&self) -> Option<&str> {
        match self {
            Interaction::Ping(_) => None,
            Interaction::ApplicationCommand(i) => Some(&i.token),
            Interaction::MessageComponent(i) => Some(&i.token),
            Interaction::ApplicationCommandAutoComplete(i) => Some(&i.token),
            Interaction::ModalSubmit(i) => Some(&i.token),
        }
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        match self {
            Interaction::Ping(_) => None,
            Interaction::ApplicationCommand(i) => i.guild_id,
            Interaction::MessageComponent(i) => i.guild_id,
            Interaction::ApplicationCommandAutoComplete(i) => i.guild_id,
            Interaction::ModalSubmit(i) => i.guild_id,
        }
    }

    pub fn channel_id(&self) -> Option<Snowflake> {
        match self {
            Interaction::Ping(_) => None,
            Interaction::ApplicationCommand(i) => Some(i.channel_id),
            Interaction::MessageComponent(i) => Some(i.channel_id),
            Interaction::ApplicationCommandAutoComplete(i) => Some(i.channel_id),
            Interaction::ModalSubmit(i) => Some(i.channel_id),
        }
    }

    /// The acting principal. Decode validation rejects non-ping interactions
    /// with neither view, so this is only `None` for pings.
    pub fn invoker(&self) -> Option<Invoker<'_>> {
        match self {
            Interaction::Ping(_) => None,
            Interaction::ApplicationCommand(i) => invoker(&i.member, &i.user),
            Interaction::MessageComponent(i) => invoker(&i.member, &i.user),
            Interaction::ApplicationCommandAutoComplete(i) => invoker(&i.member, &i.user),
            Interaction::ModalSubmit(i) => invoker(&i.member, &i.user),
        }
    }
}

// ============================================================================
// Ping Interaction
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct PingInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
}

// ============================================================================
// Application Command Interaction
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct ApplicationCommandInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    pub data: ApplicationCommandInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
    pub version: u8,
}

// ============================================================================
// Message Component Interaction
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageComponentInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    pub message: Message,
    pub data: MessageComponentInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageComponentInteractionData {
    pub custom_id: Box<str>,
    pub component_type: ComponentType,
    /// Selected values when the component is a select menu.
    #[serde(default)]
    pub values: Vec<Box<str>>,
}

// ============================================================================
// Auto Complete Interaction
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct ApplicationCommandAutoCompleteInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    pub data: ApplicationCommandAutoCompleteInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApplicationCommandAutoCompleteInteractionData {
    pub id: Snowflake,
    pub name: Box<str>,
    #[serde(default)]
    pub options: Vec<ApplicationCommandInteractionDataOption>,
    pub r#type: ApplicationCommandType,
}

// ============================================================================
// Modal Submit Interaction
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct ModalSubmitInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    pub data: ModalInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModalInteractionData {
    pub custom_id: Box<str>,
    pub components: Vec<ModalInteractionActionRowData>,
}

impl ModalInteractionData {
    /// Find a submitted input by its own custom id, searching across rows.
    pub fn get_input(&self, custom_id: &str) -> Option<&ModalInteractionComponentData> {
        self.components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|component| &*component.custom_id == custom_id)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModalInteractionActionRowData {
    pub r#type: ComponentType,
    pub components: Vec<ModalInteractionComponentData>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModalInteractionComponentData {
    pub r#type: ComponentType,
    pub custom_id: Box<str>,
    pub value: Box<str>,
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let interaction_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| Box::from("interaction type was not an integer"))
            .and_then(InteractionType::try_from)
            .map_err(D::Error::custom)?;

        let interaction = match interaction_type {
            InteractionType::Ping => serde_json::from_value(value).map(Interaction::Ping),
            InteractionType::ApplicationCommand => {
                serde_json::from_value(value).map(Interaction::ApplicationCommand)
            }
            InteractionType::MessageComponent => {
                serde_json::from_value(value).map(Interaction::MessageComponent)
            }
            InteractionType::ApplicationCommandAutoComplete => {
                serde_json::from_value(value).map(Interaction::ApplicationCommandAutoComplete)
            }
            InteractionType::ModalSubmit => {
                serde_json::from_value(value).map(Interaction::ModalSubmit)
            }
        }
        .map_err(D::Error::custom)?;

        if !matches!(interaction, Interaction::Ping(_)) && interaction.invoker_absent() {
            return Err(D::Error::custom(
                "interaction carries neither a member nor a user",
            ));
        }

        Ok(interaction)
    }
}

impl Interaction {
    fn invoker_absent(&self) -> bool {
        match self {
            Interaction::Ping(_) => false,
            Interaction::ApplicationCommand(i) => i.member.is_none() && i.user.is_none(),
            Interaction::MessageComponent(i) => i.member.is_none() && i.user.is_none(),
            Interaction::ApplicationCommandAutoComplete(i) => {
                i.member.is_none() && i.user.is_none()
            }
            Interaction::ModalSubmit(i) => i.member.is_none() && i.user.is_none(),
        }
    }
}
