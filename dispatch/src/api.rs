use async_trait::async_trait;
use model::interaction::{ApplicationCommand, FollowupMessage};
use model::Snowflake;
use std::error::Error;

pub type ApiError = Box<dyn Error + Send + Sync>;

/// Which followup message an edit or delete addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    /// The initial interaction response.
    Original,
    Message(Snowflake),
}

/// Outbound operations the dispatcher consumes: publishing command schemas
/// and messaging through an interaction's followup token. Implemented by the
/// REST client; mocked in tests.
#[async_trait]
pub trait InteractionApi: Send + Sync {
    async fn publish_commands(
        &self,
        commands: &[ApplicationCommand],
        guild: Option<Snowflake>,
    ) -> Result<(), ApiError>;

    async fn create_followup(
        &self,
        token: &str,
        message: &FollowupMessage,
    ) -> Result<(), ApiError>;

    async fn edit_followup(
        &self,
        token: &str,
        target: MessageTarget,
        message: &FollowupMessage,
    ) -> Result<(), ApiError>;

    async fn delete_followup(&self, token: &str, target: MessageTarget) -> Result<(), ApiError>;
}
