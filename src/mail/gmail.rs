//! Gmail REST mailer.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use lettre::Message;
use lettre::message::Mailbox;
use serde::Deserialize;

use super::Mailer;
use super::oauth::TokenClient;
use crate::config::GmailSettings;
use crate::error::MailError;

/// Gmail's reply to `users/me/messages/send`.
#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Sends mail through Gmail's REST send endpoint using a bearer token from
/// the credential provider.
pub struct GmailMailer {
    http: reqwest::Client,
    tokens: TokenClient,
    settings: GmailSettings,
}

impl GmailMailer {
    pub fn new(settings: GmailSettings) -> Self {
        let http = reqwest::Client::new();
        Self {
            tokens: TokenClient::new(http.clone(), settings.clone()),
            http,
            settings,
        }
    }

    /// Build the RFC 2822 message and encode it the way Gmail expects:
    /// URL-safe base64 of the formatted bytes.
    fn build_raw(&self, to: &str, subject: &str, body: &str) -> Result<String, MailError> {
        let from: Mailbox =
            self.settings
                .from_address
                .parse()
                .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
                    field: "from",
                    reason: e.to_string(),
                })?;
        let to: Mailbox = to
            .parse()
            .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
                field: "to",
                reason: e.to_string(),
            })?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| MailError::BuildFailed {
                reason: e.to_string(),
            })?;

        Ok(URL_SAFE.encode(message.formatted()))
    }
}

#[async_trait]
impl Mailer for GmailMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, MailError> {
        let raw = self.build_raw(to, subject, body)?;
        let token = self.tokens.fetch().await?;

        let response = self
            .http
            .post(&self.settings.send_uri)
            .bearer_auth(&token.access_token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(MailError::SendFailed {
                status: status.as_u16(),
                reason,
            });
        }

        let sent: SendResponse = response.json().await.map_err(|e| MailError::SendFailed {
            status: status.as_u16(),
            reason: format!("unreadable send response: {e}"),
        })?;

        tracing::info!(message_id = %sent.id, to, "Summary email sent");
        Ok(sent.id)
    }
}
