//! Error types for zosmf-config.
//!
//! Messages name profiles and paths but never attribute values.

/// Result type alias for zosmf-config operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for zosmf-config operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The configuration file itself does not exist.
    pub fn is_config_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::ConfigNotFound(_))
    }

    /// The file exists but holds no profile of the requested name.
    pub fn is_profile_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::ProfileNotFound(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Configuration file not found at {0}")]
    ConfigNotFound(String),

    #[error("z/OSMF profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("No default z/OSMF profile set")]
    NoDefaultProfile,

    /// Stored entry exists but is not an attribute mapping.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// Session construction failed for a loaded profile.
    #[error("Client error: {0}")]
    Client(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<zosmf_client::Error> for Error {
    fn from(err: zosmf_client::Error) -> Self {
        Error::with_source(ErrorKind::Client(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_distinction() {
        let err = Error::new(ErrorKind::ConfigNotFound("/tmp/zowe.config.json".into()));
        assert!(err.is_config_not_found());
        assert!(!err.is_profile_not_found());

        let err = Error::new(ErrorKind::ProfileNotFound("dev".into()));
        assert!(err.is_profile_not_found());
        assert_eq!(err.to_string(), "z/OSMF profile 'dev' not found");
    }

    #[test]
    fn test_client_error_keeps_source() {
        let err: Error = zosmf_client::Error::validation("bad").into();
        assert!(matches!(err.kind, ErrorKind::Client(_)));
        assert!(err.source.is_some());
    }
}
