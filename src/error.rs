use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed IP address, domain, or command line
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or empty credential
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Zone lookup returned zero or several matches
    #[error("Not found: {0}")]
    NotFound(String),

    /// The DNS provider rejected a request
    #[error("Provider error ({provider}): {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// The DNS provider could not be reached or answered garbage
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing the outcome log failed. Never fatal.
    #[error("Log file error: {0}")]
    LogIo(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    /// Whether the error came from talking to the DNS provider.
    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::Http(_))
    }
}
