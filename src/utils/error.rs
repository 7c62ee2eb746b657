use thiserror::Error;

/// 呼叫端看到的通用錯誤訊息，內部細節只寫入日誌
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Authentication error: {message}")]
    AuthError { message: String },

    #[error("Not found: {message}")]
    NotFoundError { message: String },

    #[error("Store connection failed: {message}")]
    ConnectionError { message: String },

    #[error("Store operation failed: {message}")]
    QueryError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Auth,
    NotFound,
    Infrastructure,
    Configuration,
}

impl IntakeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthError {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFoundError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::AuthError { .. } => ErrorCategory::Auth,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::ConnectionError { .. }
            | Self::QueryError { .. }
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorCategory::Infrastructure,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            ErrorCategory::Auth => 401,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Infrastructure | ErrorCategory::Configuration => 500,
        }
    }

    /// Text that is safe to hand back to the caller.
    pub fn client_message(&self) -> String {
        match self {
            Self::ValidationError { message }
            | Self::AuthError { message }
            | Self::NotFoundError { message } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Check the request fields and try again",
            ErrorCategory::Auth => "Obtain a fresh token signed with the configured key",
            ErrorCategory::NotFound => "Make sure the region mappings contain this ZIP code",
            ErrorCategory::Infrastructure => "Check that the data store is reachable",
            ErrorCategory::Configuration => "Check the environment variables and CLI flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
