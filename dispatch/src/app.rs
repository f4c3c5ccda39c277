use crate::api::{ApiError, InteractionApi};
use crate::engine;
use crate::error::DispatchError;
use crate::handler::ErrorHandler;
use crate::registry::{CommandRegistration, ElementKind, ElementRegistration};
use model::interaction::{ApplicationCommand, Interaction, InteractionResponse};
use model::Snowflake;
use std::collections::HashMap;
use std::sync::Arc;

/// The interaction dispatcher: registries, the global error handler and the
/// outbound capability. Populate it at start-up, then share it immutably;
/// `handle` takes `&self`, so concurrent requests need no locking.
pub struct App {
    pub(crate) commands: HashMap<Box<str>, CommandRegistration>,
    pub(crate) components: HashMap<Box<str>, ElementRegistration>,
    pub(crate) modals: HashMap<Box<str>, ElementRegistration>,
    pub(crate) error_handler: Option<ErrorHandler>,
    pub(crate) api: Option<Arc<dyn InteractionApi>>,
}

impl App {
    pub fn new() -> App {
        App {
            commands: HashMap::new(),
            components: HashMap::new(),
            modals: HashMap::new(),
            error_handler: None,
            api: None,
        }
    }

    /// Outbound capability used by `publish_commands` and the after-response
    /// phase. Without one, after-contexts cannot send followups.
    pub fn set_api(&mut self, api: Arc<dyn InteractionApi>) {
        self.api = Some(api);
    }

    /// Register a top-level command. A later registration under the same name
    /// silently shadows the earlier one.
    pub fn register_command(&mut self, registration: CommandRegistration) {
        self.commands
            .insert(registration.name.clone(), registration);
    }

    /// Register a component or modal callback under its custom-id prefix.
    /// The two kinds are keyed separately; shadowing works per kind.
    pub fn register_element(&mut self, kind: ElementKind, registration: ElementRegistration) {
        let map = match kind {
            ElementKind::Component => &mut self.components,
            ElementKind::Modal => &mut self.modals,
        };

        map.insert(registration.custom_id.clone(), registration);
    }

    /// Last-resort error handler, consulted after the per-node chain.
    pub fn on_error(&mut self, handler: ErrorHandler) {
        self.error_handler = Some(handler);
    }

    /// All registered commands that carry a publishable structure.
    pub fn commands(&self) -> Vec<&ApplicationCommand> {
        self.commands
            .values()
            .filter_map(|registration| registration.spec.as_ref())
            .collect()
    }

    /// Bulk-overwrite the application's commands at the remote service,
    /// globally or for one guild.
    pub async fn publish_commands(&self, guild: Option<Snowflake>) -> Result<(), ApiError> {
        let api = self
            .api
            .as_deref()
            .ok_or_else(|| ApiError::from("no interaction api configured"))?;

        let commands: Vec<ApplicationCommand> = self
            .commands
            .values()
            .filter_map(|registration| registration.spec.clone())
            .collect();

        api.publish_commands(&commands, guild).await
    }

    pub(crate) fn elements(&self, kind: ElementKind) -> &HashMap<Box<str>, ElementRegistration> {
        match kind {
            ElementKind::Component => &self.components,
            ElementKind::Modal => &self.modals,
        }
    }

    /// Dispatch one verified, decoded interaction to its registered handler
    /// and produce the response to send back. `Ok(None)` means no applicable
    /// route exists (stale element id, unsupported interaction kind); the
    /// transport decides what that maps to.
    pub async fn handle(
        &self,
        interaction: Interaction,
    ) -> Result<Option<InteractionResponse>, DispatchError> {
        engine::handle(self, interaction).await
    }
}

impl Default for App {
    fn default() -> App {
        App::new()
    }
}
