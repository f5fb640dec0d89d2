//! OAuth refresh-token exchange against Google's token endpoint.

use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::GmailSettings;
use crate::error::MailError;

/// A short-lived send-capable access token.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

/// Client for the credential provider's token endpoint.
pub struct TokenClient {
    http: reqwest::Client,
    settings: GmailSettings,
}

impl TokenClient {
    pub fn new(http: reqwest::Client, settings: GmailSettings) -> Self {
        Self { http, settings }
    }

    /// Exchange the configured refresh token for an access token.
    ///
    /// No caching: the workflow sends one email per session, so each send
    /// fetches a fresh token.
    pub async fn fetch(&self) -> Result<AccessToken, MailError> {
        let params = [
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.expose_secret()),
            ("refresh_token", self.settings.refresh_token.expose_secret()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(&self.settings.token_uri)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::TokenExchange {
                reason: format!("{status}: {body}"),
            });
        }

        let token: AccessToken =
            response
                .json()
                .await
                .map_err(|e| MailError::TokenExchange {
                    reason: format!("unreadable token response: {e}"),
                })?;

        tracing::debug!(expires_in = token.expires_in, "Access token refreshed");
        Ok(token)
    }
}
