use model::interaction::{
    ApplicationCommand, ApplicationCommandOption, ApplicationCommandOptionChoice,
    ApplicationCommandOptionType, OptionValue,
};

/// Static description of a declarative command: built once, at registration
/// time, and shared by schema export and payload binding.
#[derive(Debug, Clone)]
pub struct CommandSchema {
    pub name: Box<str>,
    pub description: Box<str>,
    pub fields: Vec<FieldSpec>,
}

impl CommandSchema {
    pub fn new(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> CommandSchema {
        CommandSchema {
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSpec) -> CommandSchema {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| &*field.name == name)
    }

    /// Full nested option schema in the shape expected when publishing the
    /// command to the remote service.
    pub fn to_wire_schema(&self) -> ApplicationCommand {
        let mut command = ApplicationCommand::new(self.name.clone(), self.description.clone());
        command.options = self.fields.iter().map(FieldSpec::to_wire_option).collect();
        command
    }
}

/// One declared field: a scalar/reference option, or a nested subcommand
/// (group) carrying its own fields.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: Box<str>,
    pub kind: ApplicationCommandOptionType,
    pub description: Box<str>,
    pub required: bool,
    pub choices: Vec<ApplicationCommandOptionChoice>,
    pub fields: Vec<FieldSpec>,
}

impl FieldSpec {
    fn new(
        kind: ApplicationCommandOptionType,
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
    ) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
            choices: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn string(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::String, name, description)
    }

    pub fn integer(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::Integer, name, description)
    }

    pub fn boolean(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::Boolean, name, description)
    }

    pub fn number(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::Number, name, description)
    }

    pub fn user(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::User, name, description)
    }

    pub fn channel(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::Channel, name, description)
    }

    pub fn role(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::Role, name, description)
    }

    pub fn mentionable(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::Mentionable, name, description)
    }

    pub fn attachment(name: impl Into<Box<str>>, description: impl Into<Box<str>>) -> FieldSpec {
        FieldSpec::new(ApplicationCommandOptionType::Attachment, name, description)
    }

    pub fn sub_command(
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
        fields: Vec<FieldSpec>,
    ) -> FieldSpec {
        let mut spec = FieldSpec::new(ApplicationCommandOptionType::SubCommand, name, description);
        spec.fields = fields;
        spec
    }

    pub fn sub_command_group(
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
        fields: Vec<FieldSpec>,
    ) -> FieldSpec {
        let mut spec = FieldSpec::new(
            ApplicationCommandOptionType::SubCommandGroup,
            name,
            description,
        );
        spec.fields = fields;
        spec
    }

    pub fn required(mut self) -> FieldSpec {
        self.required = true;
        self
    }

    pub fn choice(mut self, name: impl Into<Box<str>>, value: impl Into<OptionValue>) -> FieldSpec {
        self.choices
            .push(ApplicationCommandOptionChoice::new(name, value));
        self
    }

    pub fn is_sub_command(&self) -> bool {
        self.kind.is_sub_command()
    }

    fn to_wire_option(&self) -> ApplicationCommandOption {
        let mut option =
            ApplicationCommandOption::new(self.kind, self.name.clone(), self.description.clone(), self.required);
        option.choices = self.choices.clone();
        option.options = self.fields.iter().map(FieldSpec::to_wire_option).collect();
        option
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_schema() -> CommandSchema {
        CommandSchema::new("generate", "Generate a hash digest")
            .field(FieldSpec::sub_command(
                "sha1",
                "SHA-1 digest",
                vec![FieldSpec::string("text", "Text to hash").required()],
            ))
            .field(FieldSpec::sub_command(
                "md5",
                "MD5 digest",
                vec![FieldSpec::string("text", "Text to hash").required()],
            ))
    }

    #[test]
    fn test_wire_schema_nests_sub_commands() {
        let wire = hash_schema().to_wire_schema();

        assert_eq!(&*wire.name, "generate");
        assert_eq!(wire.options.len(), 2);
        assert_eq!(
            wire.options[0].r#type,
            ApplicationCommandOptionType::SubCommand
        );
        assert_eq!(&*wire.options[0].options[0].name, "text");
        assert!(wire.options[0].options[0].required);
    }

    #[test]
    fn test_wire_schema_carries_choices() {
        let schema = CommandSchema::new("rps", "Play rock paper scissors").field(
            FieldSpec::string("symbol", "Your symbol")
                .required()
                .choice("Rock", "rock")
                .choice("Paper", "paper")
                .choice("Scissors", "scissors"),
        );

        let wire = schema.to_wire_schema();

        assert_eq!(wire.options[0].choices.len(), 3);
        assert_eq!(&*wire.options[0].choices[1].name, "Paper");
    }
}
