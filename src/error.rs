//! Error types for Lab Coach.

/// Top-level error type for the workflow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Assessor error: {0}")]
    Assessor(#[from] AssessorError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },
}

/// Rubric assessment errors.
#[derive(Debug, thiserror::Error)]
pub enum AssessorError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The model reply did not follow the fixed layout. Recoverable: the
    /// caller may re-run the assessment.
    #[error("Malformed assessor reply: {reason}")]
    MalformedReply { reason: String },
}

/// Name rotation errors.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Activity requires at least 2 participants, found {found}")]
    NotEnoughParticipants { found: usize },
}

/// Session workflow validation errors. These never transition the state
/// machine; the user may retry immediately.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Required field is empty: {field}")]
    EmptyField { field: &'static str },

    #[error("Action {action} is not valid in mode {mode}")]
    WrongMode { action: &'static str, mode: String },

    #[error("No pending follow-up round to answer")]
    NoPendingRound,
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Token exchange failed: {reason}")]
    TokenExchange { reason: String },

    #[error("Invalid {field} address: {reason}")]
    InvalidAddress { field: &'static str, reason: String },

    #[error("Failed to build message: {reason}")]
    BuildFailed { reason: String },

    #[error("Send failed with status {status}: {reason}")]
    SendFailed { status: u16, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for the workflow.
pub type Result<T> = std::result::Result<T, Error>;
