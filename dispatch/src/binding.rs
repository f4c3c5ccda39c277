use crate::ocm::CommandSchema;
use model::interaction::{
    ApplicationCommandInteractionDataOption, ApplicationCommandInteractionDataResolved, OptionValue,
};
use model::{Channel, Member, Role, Snowflake, User};
use std::sync::Arc;

/// How a registration wants its handler called. Built once at registration
/// time; dispatch only consults the finished plan.
#[derive(Debug, Clone)]
pub enum BindingPlan {
    /// No arguments beyond the context.
    Empty,
    /// Pass the raw decoded interaction.
    Interaction,
    /// Bind each slot to the option (or custom-id segment) of the same
    /// name/position, coerced to the slot's declared type.
    Options(Vec<ParamSlot>),
    /// Bind the declarative schema against the payload.
    Model(Arc<CommandSchema>),
}

#[derive(Debug, Clone)]
pub struct ParamSlot {
    pub name: Box<str>,
    pub coerce: Coercion,
    pub required: bool,
    pub default: Option<ArgValue>,
}

impl ParamSlot {
    pub fn new(name: impl Into<Box<str>>, coerce: Coercion) -> ParamSlot {
        ParamSlot {
            name: name.into(),
            coerce,
            required: false,
            default: None,
        }
    }

    pub fn string(name: impl Into<Box<str>>) -> ParamSlot {
        ParamSlot::new(name, Coercion::String)
    }

    pub fn integer(name: impl Into<Box<str>>) -> ParamSlot {
        ParamSlot::new(name, Coercion::Integer)
    }

    pub fn boolean(name: impl Into<Box<str>>) -> ParamSlot {
        ParamSlot::new(name, Coercion::Boolean)
    }

    pub fn number(name: impl Into<Box<str>>) -> ParamSlot {
        ParamSlot::new(name, Coercion::Number)
    }

    pub fn snowflake(name: impl Into<Box<str>>) -> ParamSlot {
        ParamSlot::new(name, Coercion::Snowflake)
    }

    pub fn user(name: impl Into<Box<str>>) -> ParamSlot {
        ParamSlot::new(name, Coercion::User)
    }

    pub fn channel(name: impl Into<Box<str>>) -> ParamSlot {
        ParamSlot::new(name, Coercion::Channel)
    }

    pub fn role(name: impl Into<Box<str>>) -> ParamSlot {
        ParamSlot::new(name, Coercion::Role)
    }

    pub fn required(mut self) -> ParamSlot {
        self.required = true;
        self
    }

    pub fn default(mut self, value: impl Into<ArgValue>) -> ParamSlot {
        self.default = Some(value.into());
        self
    }
}

/// Target type a bound value is coerced to before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    String,
    Integer,
    Boolean,
    Number,
    Snowflake,
    User,
    Channel,
    Role,
}

impl Coercion {
    fn expected(self) -> &'static str {
        match self {
            Coercion::String => "a string",
            Coercion::Integer => "an integer",
            Coercion::Boolean => "a boolean",
            Coercion::Number => "a number",
            Coercion::Snowflake => "a snowflake id",
            Coercion::User => "a user id",
            Coercion::Channel => "a channel id",
            Coercion::Role => "a role id",
        }
    }
}

/// A value after coercion, ready for the handler.
#[derive(Debug, Clone)]
pub enum ArgValue {
    String(Box<str>),
    Integer(i64),
    Boolean(bool),
    Number(f64),
    Snowflake(Snowflake),
    /// A validated member of a declared choice list.
    Choice {
        name: Box<str>,
        value: Box<ArgValue>,
    },
    User(ResolvedUser),
    Channel(Channel),
    Role(Role),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            ArgValue::Choice { value, .. } => value.as_str(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Integer(i) => Some(*i),
            ArgValue::Choice { value, .. } => value.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Number(n) => Some(*n),
            ArgValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_snowflake(&self) -> Option<Snowflake> {
        match self {
            ArgValue::Snowflake(s) => Some(*s),
            ArgValue::User(u) => Some(u.id),
            ArgValue::Channel(c) => Some(c.id),
            ArgValue::Role(r) => Some(r.id),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&ResolvedUser> {
        match self {
            ArgValue::User(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            ArgValue::Channel(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_role(&self) -> Option<&Role> {
        match self {
            ArgValue::Role(r) => Some(r),
            _ => None,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(Box::from(s))
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Integer(i)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Boolean(b)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Number(n)
    }
}

/// A user option dereferenced through the resolved-objects table. Guild
/// payloads may deliver only the member view, DM payloads only the user view.
#[derive(Debug, Clone)]
pub struct ResolvedUser {
    pub id: Snowflake,
    pub user: Option<User>,
    pub member: Option<Member>,
}

impl ResolvedUser {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Bound arguments, in slot order, addressable by name or position.
#[derive(Debug, Default)]
pub struct ArgValues {
    values: Vec<(Box<str>, Option<ArgValue>)>,
}

impl ArgValues {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(slot, _)| &**slot == name)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn pos(&self, index: usize) -> Option<&ArgValue> {
        self.values.get(index).and_then(|(_, value)| value.as_ref())
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ArgValue::as_i64)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ArgValue::as_bool)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ArgValue::as_f64)
    }

    pub fn snowflake(&self, name: &str) -> Option<Snowflake> {
        self.get(name).and_then(ArgValue::as_snowflake)
    }

    pub fn user(&self, name: &str) -> Option<&ResolvedUser> {
        self.get(name).and_then(ArgValue::as_user)
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.get(name).and_then(ArgValue::as_channel)
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.get(name).and_then(ArgValue::as_role)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BindError {
    #[error("missing required option \"{0}\"")]
    MissingOption(Box<str>),

    #[error("option \"{name}\" cannot be read as {expected}")]
    TypeMismatch {
        name: Box<str>,
        expected: &'static str,
    },

    #[error("option \"{name}\" references entity {id} missing from the resolved table")]
    Unresolved { name: Box<str>, id: Snowflake },

    #[error("option \"{name}\" value \"{value}\" is not a declared choice")]
    InvalidChoice { name: Box<str>, value: OptionValue },

    #[error("declarative binding is not available for ui elements")]
    ModelOnElement,
}

/// Bind a slot plan against a command's sibling options, by name.
pub fn bind_options(
    slots: &[ParamSlot],
    options: &[ApplicationCommandInteractionDataOption],
    resolved: &ApplicationCommandInteractionDataResolved,
) -> Result<ArgValues, BindError> {
    let mut values = Vec::with_capacity(slots.len());

    for slot in slots {
        let option = options
            .iter()
            .find(|option| option.name == slot.name)
            .and_then(|option| option.value.as_ref());

        let value = match option {
            Some(value) => Some(coerce_option(&slot.name, slot.coerce, value, resolved)?),
            None => missing(slot)?,
        };

        values.push((slot.name.clone(), value));
    }

    Ok(ArgValues { values })
}

/// Bind a slot plan against the `:`-delimited suffix of a custom id, by
/// position. Surplus segments are ignored.
pub fn bind_custom_id_args(slots: &[ParamSlot], segments: &[&str]) -> Result<ArgValues, BindError> {
    let mut values = Vec::with_capacity(slots.len());

    for (index, slot) in slots.iter().enumerate() {
        let value = match segments.get(index) {
            Some(segment) => Some(coerce_segment(&slot.name, slot.coerce, segment)?),
            None => missing(slot)?,
        };

        values.push((slot.name.clone(), value));
    }

    Ok(ArgValues { values })
}

fn missing(slot: &ParamSlot) -> Result<Option<ArgValue>, BindError> {
    if let Some(default) = &slot.default {
        return Ok(Some(default.clone()));
    }

    if slot.required {
        return Err(BindError::MissingOption(slot.name.clone()));
    }

    Ok(None)
}

pub(crate) fn coerce_option(
    name: &str,
    coerce: Coercion,
    value: &OptionValue,
    resolved: &ApplicationCommandInteractionDataResolved,
) -> Result<ArgValue, BindError> {
    let mismatch = || BindError::TypeMismatch {
        name: Box::from(name),
        expected: coerce.expected(),
    };

    Ok(match coerce {
        Coercion::String => ArgValue::String(value.to_string().into_boxed_str()),
        Coercion::Integer => ArgValue::Integer(
            value
                .as_i64()
                .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
                .ok_or_else(mismatch)?,
        ),
        Coercion::Boolean => ArgValue::Boolean(
            value
                .as_bool()
                .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
                .ok_or_else(mismatch)?,
        ),
        Coercion::Number => ArgValue::Number(
            value
                .as_f64()
                .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
                .ok_or_else(mismatch)?,
        ),
        Coercion::Snowflake => ArgValue::Snowflake(snowflake_of(value).ok_or_else(mismatch)?),
        Coercion::User => {
            let id = snowflake_of(value).ok_or_else(mismatch)?;
            let user = resolved.users.get(&id).cloned();
            let member = resolved.members.get(&id).cloned();

            if user.is_none() && member.is_none() {
                return Err(BindError::Unresolved {
                    name: Box::from(name),
                    id,
                });
            }

            ArgValue::User(ResolvedUser { id, user, member })
        }
        Coercion::Channel => {
            let id = snowflake_of(value).ok_or_else(mismatch)?;
            let channel = resolved.channels.get(&id).cloned().ok_or_else(|| {
                BindError::Unresolved {
                    name: Box::from(name),
                    id,
                }
            })?;
            ArgValue::Channel(channel)
        }
        Coercion::Role => {
            let id = snowflake_of(value).ok_or_else(mismatch)?;
            let role = resolved.roles.get(&id).cloned().ok_or_else(|| {
                BindError::Unresolved {
                    name: Box::from(name),
                    id,
                }
            })?;
            ArgValue::Role(role)
        }
    })
}

fn coerce_segment(name: &str, coerce: Coercion, segment: &str) -> Result<ArgValue, BindError> {
    let mismatch = || BindError::TypeMismatch {
        name: Box::from(name),
        expected: coerce.expected(),
    };

    Ok(match coerce {
        Coercion::String => ArgValue::String(Box::from(segment)),
        Coercion::Integer => ArgValue::Integer(segment.parse().map_err(|_| mismatch())?),
        Coercion::Boolean => ArgValue::Boolean(segment.parse().map_err(|_| mismatch())?),
        Coercion::Number => ArgValue::Number(segment.parse().map_err(|_| mismatch())?),
        Coercion::Snowflake => ArgValue::Snowflake(segment.parse().map_err(|_| mismatch())?),
        // entity options carry no resolved table through a custom id
        Coercion::User | Coercion::Channel | Coercion::Role => {
            return Err(BindError::TypeMismatch {
                name: Box::from(name),
                expected: "a value bindable from a custom id",
            })
        }
    })
}

fn snowflake_of(value: &OptionValue) -> Option<Snowflake> {
    if let Some(s) = value.as_str() {
        return s.parse().ok();
    }

    match value.as_i64() {
        Some(i) if i >= 0 => Some(Snowflake(i as u64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::interaction::ApplicationCommandOptionType;

    fn option(name: &str, value: OptionValue) -> ApplicationCommandInteractionDataOption {
        ApplicationCommandInteractionDataOption {
            name: Box::from(name),
            r#type: match value {
                OptionValue::Integer(_) => ApplicationCommandOptionType::Integer,
                OptionValue::Boolean(_) => ApplicationCommandOptionType::Boolean,
                OptionValue::Number(_) => ApplicationCommandOptionType::Number,
                OptionValue::String(_) => ApplicationCommandOptionType::String,
            },
            value: Some(value),
            options: Vec::new(),
        }
    }

    #[test]
    fn test_bind_by_name_with_defaults() {
        let slots = vec![
            ParamSlot::integer("number").required(),
            ParamSlot::integer("min_num").default(0),
            ParamSlot::integer("max_num").default(10),
        ];
        let options = vec![option("number", OptionValue::Integer(7))];
        let resolved = ApplicationCommandInteractionDataResolved::default();

        let args = bind_options(&slots, &options, &resolved).unwrap();

        assert_eq!(args.int("number"), Some(7));
        assert_eq!(args.int("min_num"), Some(0));
        assert_eq!(args.int("max_num"), Some(10));
    }

    #[test]
    fn test_optional_slot_binds_nothing() {
        let slots = vec![ParamSlot::string("message")];
        let resolved = ApplicationCommandInteractionDataResolved::default();

        let args = bind_options(&slots, &[], &resolved).unwrap();

        assert_eq!(args.len(), 1);
        assert!(args.get("message").is_none());
    }

    #[test]
    fn test_missing_required_option() {
        let slots = vec![ParamSlot::string("text").required()];
        let resolved = ApplicationCommandInteractionDataResolved::default();

        let err = bind_options(&slots, &[], &resolved).unwrap_err();
        assert!(matches!(err, BindError::MissingOption(name) if &*name == "text"));
    }

    #[test]
    fn test_integer_coercion_from_string() {
        let slots = vec![ParamSlot::integer("count")];
        let options = vec![option("count", OptionValue::from("42"))];
        let resolved = ApplicationCommandInteractionDataResolved::default();

        let args = bind_options(&slots, &options, &resolved).unwrap();
        assert_eq!(args.int("count"), Some(42));
    }

    #[test]
    fn test_unresolved_user_fails() {
        let slots = vec![ParamSlot::user("target")];
        let options = vec![option("target", OptionValue::from("123456789"))];
        let resolved = ApplicationCommandInteractionDataResolved::default();

        let err = bind_options(&slots, &options, &resolved).unwrap_err();
        assert!(matches!(err, BindError::Unresolved { id, .. } if id == Snowflake(123456789)));
    }

    #[test]
    fn test_custom_id_args_coerced_positionally() {
        let slots = vec![ParamSlot::integer("id"), ParamSlot::string("action")];

        let args = bind_custom_id_args(&slots, &["42", "approve", "surplus"]).unwrap();

        assert_eq!(args.pos(0).and_then(ArgValue::as_i64), Some(42));
        assert_eq!(args.str("action"), Some("approve"));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_custom_id_arg_parse_failure() {
        let slots = vec![ParamSlot::integer("id")];

        let err = bind_custom_id_args(&slots, &["not-a-number"]).unwrap_err();
        assert!(matches!(err, BindError::TypeMismatch { .. }));
    }
}
