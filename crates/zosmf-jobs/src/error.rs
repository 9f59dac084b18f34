//! Error types for zosmf-jobs.

use zosmf_client::ErrorKind as ClientErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(reason.into()))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout(_))
    }

    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Profile store failure behind a `Config` error, if any.
    pub fn config_error(&self) -> Option<&zosmf_config::Error> {
        self.source.as_ref()?.downcast_ref()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Client error: {0}")]
    Client(String),
}

impl From<zosmf_client::Error> for Error {
    fn from(err: zosmf_client::Error) -> Self {
        let kind = match &err.kind {
            ClientErrorKind::Validation(reason) => ErrorKind::Validation(reason.clone()),
            ClientErrorKind::Api { status, body } => ErrorKind::Api {
                status: *status,
                body: body.clone(),
            },
            ClientErrorKind::Transport(msg) => ErrorKind::Transport(msg.clone()),
            ClientErrorKind::Json(msg) => ErrorKind::Decode(msg.clone()),
            ClientErrorKind::Config(msg) | ClientErrorKind::InvalidUrl(msg) => {
                ErrorKind::Config(msg.clone())
            }
            ClientErrorKind::Other(msg) => ErrorKind::Client(msg.clone()),
        };
        Error {
            kind,
            source: Some(Box::new(err)),
        }
    }
}

impl From<zosmf_config::Error> for Error {
    fn from(err: zosmf_config::Error) -> Self {
        Error {
            kind: ErrorKind::Config(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
