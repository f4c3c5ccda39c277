use crate::binding::BindingPlan;
use crate::handler::{AfterHandler, ErrorHandler, Handler};
use crate::ocm::CommandSchema;
use model::interaction::ApplicationCommand;
use std::collections::HashMap;
use std::sync::Arc;

/// Dispatch metadata for one command node: the top level of a command, or a
/// subcommand (group) nested below it. Fully built before registration and
/// read-only afterwards.
#[derive(Debug)]
pub struct CommandRegistration {
    pub(crate) name: Box<str>,
    pub(crate) spec: Option<ApplicationCommand>,
    pub(crate) handler: Handler,
    pub(crate) plan: BindingPlan,
    pub(crate) after_handler: Option<AfterHandler>,
    pub(crate) error_handler: Option<ErrorHandler>,
    pub(crate) fallback_handler: Option<Handler>,
    pub(crate) children: HashMap<Box<str>, CommandRegistration>,
}

impl CommandRegistration {
    /// Register by bare name: dispatchable, but carries no publishable schema.
    pub fn new(name: impl Into<Box<str>>, handler: Handler) -> CommandRegistration {
        CommandRegistration {
            name: name.into(),
            spec: None,
            handler,
            plan: BindingPlan::Empty,
            after_handler: None,
            error_handler: None,
            fallback_handler: None,
            children: HashMap::new(),
        }
    }

    /// Register with the full command structure needed for publishing.
    pub fn from_spec(spec: ApplicationCommand, handler: Handler) -> CommandRegistration {
        let mut registration = CommandRegistration::new(spec.name.clone(), handler);
        registration.spec = Some(spec);
        registration
    }

    /// Register a declarative command: the schema supplies the name, the
    /// publishable structure and a `Model` binding plan in one go.
    pub fn from_schema(schema: CommandSchema, handler: Handler) -> CommandRegistration {
        let mut registration = CommandRegistration::new(schema.name.clone(), handler);
        registration.spec = Some(schema.to_wire_schema());
        registration.plan = BindingPlan::Model(Arc::new(schema));
        registration
    }

    pub fn plan(mut self, plan: BindingPlan) -> CommandRegistration {
        self.plan = plan;
        self
    }

    /// Nest a subcommand (group) registration. Depth is not limited here; the
    /// protocol's own cap is enforced at publish time by the remote service.
    pub fn subcommand(mut self, child: CommandRegistration) -> CommandRegistration {
        self.children.insert(child.name.clone(), child);
        self
    }

    /// Called when the payload names a subcommand nobody registered.
    pub fn fallback(mut self, handler: Handler) -> CommandRegistration {
        self.fallback_handler = Some(handler);
        self
    }

    pub fn after(mut self, handler: AfterHandler) -> CommandRegistration {
        self.after_handler = Some(handler);
        self
    }

    pub fn on_error(mut self, handler: ErrorHandler) -> CommandRegistration {
        self.error_handler = Some(handler);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> Option<&ApplicationCommand> {
        self.spec.as_ref()
    }
}

/// Which keyspace a UI element callback lives in. A component and a modal may
/// legitimately share a literal custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Component,
    Modal,
}

/// Callback binding for a message component or modal, selected by the part of
/// the wire custom id before the first `:`.
#[derive(Debug)]
pub struct ElementRegistration {
    pub(crate) custom_id: Box<str>,
    pub(crate) handler: Handler,
    pub(crate) plan: BindingPlan,
    pub(crate) after_handler: Option<AfterHandler>,
    pub(crate) error_handler: Option<ErrorHandler>,
}

impl ElementRegistration {
    pub fn new(custom_id: impl Into<Box<str>>, handler: Handler) -> ElementRegistration {
        ElementRegistration {
            custom_id: custom_id.into(),
            handler,
            plan: BindingPlan::Empty,
            after_handler: None,
            error_handler: None,
        }
    }

    /// Slots for the `:`-delimited argument suffix, bound positionally.
    pub fn plan(mut self, plan: BindingPlan) -> ElementRegistration {
        self.plan = plan;
        self
    }

    pub fn after(mut self, handler: AfterHandler) -> ElementRegistration {
        self.after_handler = Some(handler);
        self
    }

    pub fn on_error(mut self, handler: ErrorHandler) -> ElementRegistration {
        self.error_handler = Some(handler);
        self
    }

    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Reply;

    fn noop() -> Handler {
        Handler::sync(|_| Ok(Some(Reply::message("ok"))))
    }

    #[test]
    fn test_subcommand_nesting() {
        let registration = CommandRegistration::new("generate", noop())
            .subcommand(CommandRegistration::new("sha1", noop()))
            .subcommand(
                CommandRegistration::new("hmac", noop())
                    .subcommand(CommandRegistration::new("sha256", noop())),
            );

        assert!(registration.children.contains_key("sha1"));
        let group = registration.children.get("hmac").unwrap();
        assert!(group.children.contains_key("sha256"));
    }

    #[test]
    fn test_from_spec_takes_name_from_spec() {
        let spec = ApplicationCommand::new("echo", "Echo a message");
        let registration = CommandRegistration::from_spec(spec, noop());

        assert_eq!(registration.name(), "echo");
        assert!(registration.spec().is_some());
    }
}
