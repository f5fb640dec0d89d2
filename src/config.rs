//! Configuration types, built from environment variables.

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::LlmBackend;

/// Default Anthropic model when `LAB_COACH_MODEL` is not set.
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
/// Default OpenAI model when `LAB_COACH_MODEL` is not set.
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Google OAuth token endpoint.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Gmail send endpoint for the authenticated user.
pub const GMAIL_SEND_URI: &str =
    "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// Subject line for the transcript email.
pub const SUMMARY_SUBJECT: &str = "Lab Investigation Summary";

/// LLM settings: which backend to call and with what credentials.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub backend: LlmBackend,
    pub api_key: SecretString,
    pub model: String,
}

impl LlmSettings {
    /// Build from `LAB_COACH_LLM_BACKEND` (default `anthropic`),
    /// `ANTHROPIC_API_KEY`/`OPENAI_API_KEY`, and `LAB_COACH_MODEL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match std::env::var("LAB_COACH_LLM_BACKEND")
            .unwrap_or_else(|_| "anthropic".to_string())
            .to_lowercase()
            .as_str()
        {
            "anthropic" => LlmBackend::Anthropic,
            "openai" => LlmBackend::OpenAi,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "LAB_COACH_LLM_BACKEND".to_string(),
                    message: format!("unknown backend {other:?} (expected anthropic or openai)"),
                });
            }
        };

        let key_var = match backend {
            LlmBackend::Anthropic => "ANTHROPIC_API_KEY",
            LlmBackend::OpenAi => "OPENAI_API_KEY",
        };
        let api_key = std::env::var(key_var)
            .map_err(|_| ConfigError::MissingEnvVar(key_var.to_string()))?;

        let model = std::env::var("LAB_COACH_MODEL").unwrap_or_else(|_| {
            match backend {
                LlmBackend::Anthropic => DEFAULT_ANTHROPIC_MODEL,
                LlmBackend::OpenAi => DEFAULT_OPENAI_MODEL,
            }
            .to_string()
        });

        Ok(Self {
            backend,
            api_key: SecretString::from(api_key),
            model,
        })
    }
}

/// Gmail settings: OAuth client plus the long-lived refresh token that the
/// token endpoint exchanges for a short-lived send-capable access token.
#[derive(Debug, Clone)]
pub struct GmailSettings {
    pub client_id: String,
    pub client_secret: SecretString,
    pub refresh_token: SecretString,
    /// Address placed in the `From` header of outgoing mail.
    pub from_address: String,
    pub token_uri: String,
    pub send_uri: String,
}

impl GmailSettings {
    /// Build from `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`,
    /// `GOOGLE_REFRESH_TOKEN`, and `LAB_COACH_FROM_ADDRESS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let require = |var: &str| {
            std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
        };

        Ok(Self {
            client_id: require("GOOGLE_CLIENT_ID")?,
            client_secret: SecretString::from(require("GOOGLE_CLIENT_SECRET")?),
            refresh_token: SecretString::from(require("GOOGLE_REFRESH_TOKEN")?),
            from_address: require("LAB_COACH_FROM_ADDRESS")?,
            token_uri: GOOGLE_TOKEN_URI.to_string(),
            send_uri: GMAIL_SEND_URI.to_string(),
        })
    }

    /// Override the Google endpoints (used by tests against a local server).
    pub fn with_endpoints(mut self, token_uri: &str, send_uri: &str) -> Self {
        self.token_uri = token_uri.to_string();
        self.send_uri = send_uri.to_string();
        self
    }
}
