//! Mail delivery through Gmail's authenticated REST API.
//!
//! The credential provider (Google's token endpoint) exchanges a long-lived
//! refresh token for a short-lived send-capable access token; the mailer then
//! submits one RFC 2822 message per send and returns the provider-assigned
//! message id.

pub mod gmail;
pub mod oauth;

pub use gmail::GmailMailer;
pub use oauth::{AccessToken, TokenClient};

use async_trait::async_trait;

use crate::error::MailError;

/// Sends one plain-text email and returns the provider message id.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, MailError>;
}
