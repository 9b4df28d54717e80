use thiserror::Error;

/// Errors that can occur when using the genchat library.
///
/// Every error is scoped to a single request: a failing generation never
/// leaves the request tracker in a state that affects other requests.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Too many pending image generations (limit {ceiling}). Please wait.")]
    CapacityExceeded { ceiling: usize },

    #[error("Request failed with status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("Unexpected response from {provider}: {message}")]
    Protocol { provider: String, message: String },

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn protocol(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Protocol {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn invalid_provider(name: impl Into<String>) -> Self {
        Error::InvalidProvider(name.into())
    }

    /// HTTP status of a non-success provider response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
