use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Access check `{check}` rejected with HTTP {status}")]
    Rejected {
        check: String,
        status: u16,
        body: String,
    },

    #[error("Access check `{check}` cannot address identifier `{value}`")]
    InvalidIdentifier { check: String, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in `{field}`: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value `{value}` for `{field}`: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Denied,
    InvalidInput,
    Network,
    Configuration,
    Internal,
}

impl AccessError {
    /// HTTP status of a rejected check, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AccessError::Rejected { status, .. } => Some(*status),
            AccessError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessError::Rejected { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AccessError::Rejected { .. } => ErrorCategory::Denied,
            AccessError::InvalidIdentifier { .. } => ErrorCategory::InvalidInput,
            AccessError::Transport(_) => ErrorCategory::Network,
            AccessError::ConfigError { .. }
            | AccessError::ConfigValidationError { .. }
            | AccessError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AccessError::IoError(_)
            | AccessError::SerializationError(_)
            | AccessError::TaskError(_) => ErrorCategory::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AccessError::Rejected { check, status, .. } => match status {
                401 => format!("Access denied for `{}`", check),
                404 => format!("`{}` refers to something that does not exist", check),
                _ => format!("`{}` was refused by the server (HTTP {})", check, status),
            },
            AccessError::Transport(_) => "Could not reach the access validation server".to_string(),
            AccessError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid `{}`: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Denied => "Sign in with an account that may view this page",
            ErrorCategory::InvalidInput => "Pass a non-empty identifier other than `.` or `..`",
            ErrorCategory::Network => "Check --base-url and that the server is running",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Internal => "Re-run with --verbose and inspect the logs",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Denied => 1,
            ErrorCategory::Network | ErrorCategory::Internal => 2,
            ErrorCategory::Configuration | ErrorCategory::InvalidInput => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AccessError>;
