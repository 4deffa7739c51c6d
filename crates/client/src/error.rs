use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Backend responded with {status}: {message}")]
    BackendError { status: u16, message: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Sign in to continue")]
    Unauthenticated,

    #[error("No competition form is open")]
    NotEditing,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// How a failure is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reported inline next to the offending fields
    Validation,
    /// Reported as a dismissible notification
    Transport,
    /// The action needs a signed-in user
    Unauthenticated,
    /// The caller used the controller out of order
    Usage,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::RequestError(_)
            | Self::BackendError { .. }
            | Self::StorageError(_)
            | Self::ParseError(_) => ErrorKind::Transport,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::NotEditing | Self::ConfigError(_) => ErrorKind::Usage,
        }
    }

    /// Per-field messages of a validation failure, `field: message`
    pub fn field_messages(&self) -> Vec<String> {
        let Self::ValidationError(errors) = self else {
            return Vec::new();
        };

        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    )
                })
            })
            .collect();
        messages.sort();
        messages
    }
}
