use std::error::Error;

/// Base trait for all application errors
pub trait KdsError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type KdsResult<T> = Result<T, Box<dyn KdsError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl KdsError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}

/// Failure to load the order queue.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Queue request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },

    #[error("Queue endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to decode queue response: {message}")]
    Decode { message: String },
}

impl KdsError for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            FetchError::Request { .. } => "FETCH_REQUEST_FAILED",
            FetchError::Status { .. } => "FETCH_BAD_STATUS",
            FetchError::Decode { .. } => "FETCH_DECODE_FAILED",
        }
    }
}

/// Failure to mark an order ready.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },

    #[error("Completion of order '{order_id}' returned HTTP {status}")]
    Status { order_id: String, status: u16 },

    #[error("Order '{order_id}' is already being completed")]
    AlreadyInFlight { order_id: String },
}

impl KdsError for CompletionError {
    fn error_code(&self) -> &'static str {
        match self {
            CompletionError::Request { .. } => "COMPLETION_REQUEST_FAILED",
            CompletionError::Status { .. } => "COMPLETION_BAD_STATUS",
            CompletionError::AlreadyInFlight { .. } => "COMPLETION_IN_FLIGHT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, CompletionError::AlreadyInFlight { .. })
    }
}
