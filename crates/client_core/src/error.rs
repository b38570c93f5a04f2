use shared::error::{ProtocolError, ValidationError};
use thiserror::Error;

/// Network-level failure: connect/timeout/HTTP status or an undecodable body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::new(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Application(String),
    #[error("An error occurred while checking plagiarism: {0}")]
    Transport(#[from] TransportError),
    #[error("a submission is already in flight")]
    InFlight,
}

impl SubmitError {
    pub fn reached_network(&self) -> bool {
        matches!(self, SubmitError::Application(_) | SubmitError::Transport(_))
    }
}

/// Terminal failure of a poll chain. Transport errors never end up here; they
/// are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollFailure {
    #[error("{message}")]
    ServiceReported { status: String, message: String },
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl PollFailure {
    pub fn service_reported(status: impl Into<String>, message: Option<String>) -> Self {
        let status = status.into();
        let message = message.unwrap_or_else(|| format!("unknown job status '{status}'"));
        Self::ServiceReported { status, message }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
