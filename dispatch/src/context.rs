use crate::api::{ApiError, InteractionApi, MessageTarget};
use model::interaction::{
    FollowupMessage, Interaction, InteractionResponse, InteractionType, Invoker,
};
use model::Snowflake;
use std::fmt;
use std::sync::Arc;

/// Request context handed to every handler alongside its bound arguments.
/// One context is built per request and shared (extended with the resolved
/// path) across subcommand recursion levels.
#[derive(Clone)]
pub struct Context {
    interaction: Arc<Interaction>,
    path: Vec<Box<str>>,
}

impl Context {
    pub(crate) fn new(interaction: Arc<Interaction>, path: Vec<Box<str>>) -> Context {
        Context { interaction, path }
    }

    pub(crate) fn push_path(&mut self, name: Box<str>) {
        self.path.push(name);
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn kind(&self) -> InteractionType {
        self.interaction.kind()
    }

    pub fn interaction_id(&self) -> Snowflake {
        self.interaction.id()
    }

    pub fn application_id(&self) -> Snowflake {
        self.interaction.application_id()
    }

    pub fn token(&self) -> Option<&str> {
        self.interaction.token()
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.interaction.guild_id()
    }

    pub fn channel_id(&self) -> Option<Snowflake> {
        self.interaction.channel_id()
    }

    pub fn invoker(&self) -> Option<Invoker<'_>> {
        self.interaction.invoker()
    }

    /// Registry-resolved command path: top-level name, then each matched
    /// subcommand level. Empty for element interactions.
    pub fn command_path(&self) -> &[Box<str>] {
        &self.path
    }

    /// Wire custom id of a component or modal interaction.
    pub fn custom_id(&self) -> Option<&str> {
        match &*self.interaction {
            Interaction::MessageComponent(i) => Some(&i.data.custom_id),
            Interaction::ModalSubmit(i) => Some(&i.data.custom_id),
            _ => None,
        }
    }

    /// Selected values of a select-menu component.
    pub fn values(&self) -> Option<&[Box<str>]> {
        match &*self.interaction {
            Interaction::MessageComponent(i) => Some(&i.data.values),
            _ => None,
        }
    }

    /// Value of a submitted modal input, looked up by its own custom id.
    pub fn input(&self, custom_id: &str) -> Option<&str> {
        match &*self.interaction {
            Interaction::ModalSubmit(i) => {
                i.data.get_input(custom_id).map(|input| &*input.value)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("interaction_id", &self.interaction.id())
            .field("path", &self.path)
            .finish()
    }
}

/// Context of the detached after-response phase: the original interaction,
/// the response that was produced for it, and followup messaging bound to the
/// interaction's token.
pub struct AfterContext {
    interaction: Arc<Interaction>,
    response: InteractionResponse,
    api: Option<Arc<dyn InteractionApi>>,
}

impl AfterContext {
    pub(crate) fn new(
        interaction: Arc<Interaction>,
        response: InteractionResponse,
        api: Option<Arc<dyn InteractionApi>>,
    ) -> AfterContext {
        AfterContext {
            interaction,
            response,
            api,
        }
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn response(&self) -> &InteractionResponse {
        &self.response
    }

    /// Send a followup message for the original interaction.
    pub async fn send(&self, message: FollowupMessage) -> Result<(), ApiError> {
        let (api, token) = self.api_and_token()?;
        api.create_followup(token, &message).await
    }

    /// Edit the initial interaction response.
    pub async fn edit_original(&self, message: FollowupMessage) -> Result<(), ApiError> {
        let (api, token) = self.api_and_token()?;
        api.edit_followup(token, MessageTarget::Original, &message)
            .await
    }

    /// Delete the initial interaction response.
    pub async fn delete_original(&self) -> Result<(), ApiError> {
        let (api, token) = self.api_and_token()?;
        api.delete_followup(token, MessageTarget::Original).await
    }

    fn api_and_token(&self) -> Result<(&dyn InteractionApi, &str), ApiError> {
        let api = self
            .api
            .as_deref()
            .ok_or_else(|| ApiError::from("no interaction api configured"))?;
        let token = self
            .interaction
            .token()
            .ok_or_else(|| ApiError::from("interaction carries no followup token"))?;

        Ok((api, token))
    }
}

impl fmt::Debug for AfterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AfterContext")
            .field("interaction_id", &self.interaction.id())
            .finish()
    }
}
