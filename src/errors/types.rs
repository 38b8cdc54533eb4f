//! Error types for the spush client and CLI
//!
//! `PushError` is the closed taxonomy returned by every Pushbullet call.
//! `AppError` covers everything around it: configuration, argument
//! validation and local I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Broad kind of a [`PushError`], useful for matching without caring
/// about the message or status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushErrorKind {
    Runtime,
    Network,
    Auth,
}

/// Outcome of a failed Pushbullet call
///
/// Every failure of a single request is reported as one of these values;
/// none of them leave the client in a state that prevents the next call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PushError {
    /// Local failure before any network activity
    #[error("runtime error: {message}")]
    Runtime { message: String },

    /// Transport failure, missing response, or an unrecognised status
    #[error("network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    /// Rejected credential (401/403) or throttled request (429)
    #[error("auth error: {message}")]
    Auth { message: String, status: u16 },
}

impl PushError {
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }

    /// Network failure that never produced a status code
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status: None,
        }
    }

    pub fn network_status(status: u16) -> Self {
        Self::Network {
            message: format!("network error, code {status}"),
            status: Some(status),
        }
    }

    pub fn invalid_api_key(status: u16) -> Self {
        Self::Auth {
            message: format!("invalid API key, code {status}"),
            status,
        }
    }

    // 429 is reported as an auth failure rather than a distinct kind.
    pub fn too_many_requests() -> Self {
        Self::Auth {
            message: "too many requests".to_string(),
            status: 429,
        }
    }

    pub fn kind(&self) -> PushErrorKind {
        match self {
            Self::Runtime { .. } => PushErrorKind::Runtime,
            Self::Network { .. } => PushErrorKind::Network,
            Self::Auth { .. } => PushErrorKind::Auth,
        }
    }

    /// HTTP status that caused this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Runtime { .. } => None,
            Self::Network { status, .. } => *status,
            Self::Auth { status, .. } => Some(*status),
        }
    }

    /// Error category for logging
    pub fn category(&self) -> &'static str {
        match self.kind() {
            PushErrorKind::Runtime => "runtime",
            PushErrorKind::Network => "network",
            PushErrorKind::Auth => "auth",
        }
    }
}

/// Application error type for the CLI layer
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("TOML parsing error: {context}")]
    TomlParsing {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("Missing required argument: {argument}")]
    MissingArgument { argument: String },

    #[error(transparent)]
    Push(#[from] PushError),

    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_argument(argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            argument: argument.into(),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } | Self::ConfigNotFound { .. } | Self::TomlParsing { .. } => "config",
            Self::Io { .. } => "io",
            Self::InvalidArgument { .. } | Self::MissingArgument { .. } => "cli",
            Self::Push(err) => err.category(),
            Self::Other { .. } => "internal",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let operation = match err.kind() {
            std::io::ErrorKind::NotFound => "file not found",
            std::io::ErrorKind::PermissionDenied => "permission denied",
            _ => "I/O operation",
        }
        .to_string();

        Self::Io {
            path: PathBuf::from("unknown"),
            operation,
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::TomlParsing {
            context: err.message().to_string(),
            source: Some(Box::new(err)),
        }
    }
}
