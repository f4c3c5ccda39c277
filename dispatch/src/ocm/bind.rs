use crate::binding::{coerce_option, ArgValue, BindError, Coercion};
use crate::ocm::{CommandSchema, FieldSpec};
use model::interaction::{
    ApplicationCommandInteractionDataOption, ApplicationCommandInteractionDataResolved,
    ApplicationCommandOptionType, OptionValue,
};
use model::{Channel, Role};
use std::collections::HashMap;

/// Result of binding a schema against a live payload: every present field
/// resolved exactly once, plus the single matched subcommand branch bound
/// recursively. Handlers read it through plain accessors.
#[derive(Debug, Default)]
pub struct BoundCommand {
    values: HashMap<Box<str>, ArgValue>,
    subcommand: Option<(Box<str>, Box<BoundCommand>)>,
}

impl BoundCommand {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
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

    pub fn user(&self, name: &str) -> Option<&crate::binding::ResolvedUser> {
        self.get(name).and_then(ArgValue::as_user)
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.get(name).and_then(ArgValue::as_channel)
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.get(name).and_then(ArgValue::as_role)
    }

    /// The matched choice member (name and value) for an enumerated field.
    pub fn choice(&self, name: &str) -> Option<(&str, &ArgValue)> {
        match self.get(name) {
            Some(ArgValue::Choice { name, value }) => Some((name, value)),
            _ => None,
        }
    }

    /// The single subcommand branch present in the payload, if any.
    pub fn subcommand(&self) -> Option<(&str, &BoundCommand)> {
        self.subcommand
            .as_ref()
            .map(|(name, bound)| (&**name, &**bound))
    }
}

/// Bind a declarative schema against a payload's option tree.
pub fn bind(
    schema: &CommandSchema,
    options: &[ApplicationCommandInteractionDataOption],
    resolved: &ApplicationCommandInteractionDataResolved,
) -> Result<BoundCommand, BindError> {
    bind_fields(&schema.fields, options, resolved)
}

fn bind_fields(
    fields: &[FieldSpec],
    options: &[ApplicationCommandInteractionDataOption],
    resolved: &ApplicationCommandInteractionDataResolved,
) -> Result<BoundCommand, BindError> {
    let mut values = HashMap::new();
    let mut subcommand = None;

    for field in fields {
        let option = options.iter().find(|option| option.name == field.name);

        if field.is_sub_command() {
            // only the matched branch is delivered; absent siblings are fine
            if subcommand.is_none() {
                if let Some(option) = option.filter(|option| option.is_sub_command()) {
                    let child = bind_fields(&field.fields, &option.options, resolved)?;
                    subcommand = Some((field.name.clone(), Box::new(child)));
                }
            }
            continue;
        }

        match option.and_then(|option| option.value.as_ref()) {
            Some(value) => {
                let bound = if field.choices.is_empty() {
                    coerce_option(&field.name, field_coercion(field.kind), value, resolved)?
                } else {
                    bind_choice(field, value, resolved)?
                };
                values.insert(field.name.clone(), bound);
            }
            None if field.required => return Err(BindError::MissingOption(field.name.clone())),
            None => {}
        }
    }

    Ok(BoundCommand {
        values,
        subcommand,
    })
}

fn bind_choice(
    field: &FieldSpec,
    value: &OptionValue,
    resolved: &ApplicationCommandInteractionDataResolved,
) -> Result<ArgValue, BindError> {
    let choice = field
        .choices
        .iter()
        .find(|choice| &choice.value == value)
        .ok_or_else(|| BindError::InvalidChoice {
            name: field.name.clone(),
            value: value.clone(),
        })?;

    let scalar = coerce_option(&field.name, field_coercion(field.kind), value, resolved)?;

    Ok(ArgValue::Choice {
        name: choice.name.clone(),
        value: Box::new(scalar),
    })
}

fn field_coercion(kind: ApplicationCommandOptionType) -> Coercion {
    match kind {
        ApplicationCommandOptionType::Integer => Coercion::Integer,
        ApplicationCommandOptionType::Boolean => Coercion::Boolean,
        ApplicationCommandOptionType::Number => Coercion::Number,
        ApplicationCommandOptionType::User => Coercion::User,
        ApplicationCommandOptionType::Channel => Coercion::Channel,
        ApplicationCommandOptionType::Role => Coercion::Role,
        // ids of kinds without a dedicated resolved map bind as plain snowflakes
        ApplicationCommandOptionType::Mentionable | ApplicationCommandOptionType::Attachment => {
            Coercion::Snowflake
        }
        _ => Coercion::String,
    }
}
