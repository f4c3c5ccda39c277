use crate::ClientError;
use async_trait::async_trait;
use dispatch::api::{ApiError, InteractionApi, MessageTarget};
use model::interaction::{ApplicationCommand, FollowupMessage};
use model::Snowflake;
use std::time::Duration;

const API_BASE_URL: &str = "https://discord.com/api/v8";

/// Discord REST client for the application-command and interaction-followup
/// endpoints. Command endpoints authenticate with the bot token; followup
/// endpoints authenticate through the interaction token in the URL.
pub struct RestClient {
    http: reqwest::Client,
    application_id: Snowflake,
    token: Box<str>,
}

impl RestClient {
    pub fn new(application_id: Snowflake, token: impl Into<Box<str>>) -> RestClient {
        RestClient {
            http: RestClient::build_http_client(),
            application_id,
            token: token.into(),
        }
    }

    fn build_http_client() -> reqwest::Client {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .gzip(true)
            .build()
            .expect("build_http_client")
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    fn command_url(&self, command_id: Option<Snowflake>, guild: Option<Snowflake>) -> String {
        let base = match guild {
            Some(guild) => format!(
                "{}/applications/{}/guilds/{}/commands",
                API_BASE_URL, self.application_id, guild
            ),
            None => format!("{}/applications/{}/commands", API_BASE_URL, self.application_id),
        };

        match command_id {
            Some(command_id) => format!("{}/{}", base, command_id),
            None => base,
        }
    }

    fn webhook_url(&self, token: &str, target: Option<MessageTarget>) -> String {
        let base = format!("{}/webhooks/{}/{}", API_BASE_URL, self.application_id, token);

        match target {
            None => base,
            Some(MessageTarget::Original) => format!("{}/messages/@original", base),
            Some(MessageTarget::Message(message_id)) => {
                format!("{}/messages/{}", base, message_id)
            }
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status,
            body: body.into_boxed_str(),
        })
    }

    /// Get all global or guild application commands.
    pub async fn get_commands(
        &self,
        guild: Option<Snowflake>,
    ) -> Result<Vec<ApplicationCommand>, ClientError> {
        let response = self
            .http
            .get(self.command_url(None, guild))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        Ok(RestClient::check(response).await?.json().await?)
    }

    /// Create a global or guild application command.
    pub async fn create_command(
        &self,
        command: &ApplicationCommand,
        guild: Option<Snowflake>,
    ) -> Result<ApplicationCommand, ClientError> {
        let response = self
            .http
            .post(self.command_url(None, guild))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(command)
            .send()
            .await?;

        Ok(RestClient::check(response).await?.json().await?)
    }

    /// Edit a global or guild application command. A command without an id
    /// falls back to creation, which overwrites any command of the same name.
    pub async fn edit_command(
        &self,
        command: &ApplicationCommand,
        guild: Option<Snowflake>,
    ) -> Result<ApplicationCommand, ClientError> {
        let command_id = match command.id {
            Some(command_id) => command_id,
            None => return self.create_command(command, guild).await,
        };

        let response = self
            .http
            .patch(self.command_url(Some(command_id), guild))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(command)
            .send()
            .await?;

        Ok(RestClient::check(response).await?.json().await?)
    }

    /// Delete a global or guild application command.
    pub async fn delete_command(
        &self,
        command_id: Snowflake,
        guild: Option<Snowflake>,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.command_url(Some(command_id), guild))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        RestClient::check(response).await?;
        Ok(())
    }

    /// Overwrite all existing global or guild commands in one request.
    pub async fn bulk_overwrite_commands(
        &self,
        commands: &[ApplicationCommand],
        guild: Option<Snowflake>,
    ) -> Result<Vec<ApplicationCommand>, ClientError> {
        tracing::debug!("bulk overwriting {} application commands", commands.len());

        let response = self
            .http
            .put(self.command_url(None, guild))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(commands)
            .send()
            .await?;

        Ok(RestClient::check(response).await?.json().await?)
    }
}

#[async_trait]
impl InteractionApi for RestClient {
    async fn publish_commands(
        &self,
        commands: &[ApplicationCommand],
        guild: Option<Snowflake>,
    ) -> Result<(), ApiError> {
        self.bulk_overwrite_commands(commands, guild).await?;
        Ok(())
    }

    async fn create_followup(
        &self,
        token: &str,
        message: &FollowupMessage,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.webhook_url(token, None))
            .json(message)
            .send()
            .await
            .map_err(ClientError::Reqwest)?;

        RestClient::check(response).await?;
        Ok(())
    }

    async fn edit_followup(
        &self,
        token: &str,
        target: MessageTarget,
        message: &FollowupMessage,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .patch(self.webhook_url(token, Some(target)))
            .json(message)
            .send()
            .await
            .map_err(ClientError::Reqwest)?;

        RestClient::check(response).await?;
        Ok(())
    }

    async fn delete_followup(&self, token: &str, target: MessageTarget) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.webhook_url(token, Some(target)))
            .send()
            .await
            .map_err(ClientError::Reqwest)?;

        RestClient::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestClient {
        RestClient::new(Snowflake(55555), "bot-token")
    }

    #[test]
    fn test_command_urls() {
        let client = client();

        assert_eq!(
            client.command_url(None, None),
            "https://discord.com/api/v8/applications/55555/commands"
        );
        assert_eq!(
            client.command_url(Some(Snowflake(1)), Some(Snowflake(22222))),
            "https://discord.com/api/v8/applications/55555/guilds/22222/commands/1"
        );
    }

    #[test]
    fn test_webhook_urls() {
        let client = client();

        assert_eq!(
            client.webhook_url("tok", None),
            "https://discord.com/api/v8/webhooks/55555/tok"
        );
        assert_eq!(
            client.webhook_url("tok", Some(MessageTarget::Original)),
            "https://discord.com/api/v8/webhooks/55555/tok/messages/@original"
        );
        assert_eq!(
            client.webhook_url("tok", Some(MessageTarget::Message(Snowflake(9)))),
            "https://discord.com/api/v8/webhooks/55555/tok/messages/9"
        );
    }
}
