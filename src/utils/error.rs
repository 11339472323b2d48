use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input stream closed")]
    InputClosed,

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for {field} '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed operator input, handled by re-prompting.
    Input,
    /// The backing store refused or failed a statement.
    Store,
    /// Reading from or writing to the terminal.
    Console,
    /// Configuration and connection bootstrap.
    Startup,
}

impl From<rusqlite::Error> for ShopError {
    fn from(err: rusqlite::Error) -> Self {
        // 約束違反（外鍵、唯一鍵）屬於可恢復錯誤
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ShopError::Constraint {
                    message: message.unwrap_or_else(|| code.to_string()),
                }
            }
            other => ShopError::Database(other),
        }
    }
}

impl ShopError {
    pub fn invalid_input(field: &str, value: &str, reason: impl Into<String>) -> Self {
        ShopError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ShopError::InvalidInput { .. } => ErrorCategory::Input,
            ShopError::Database(_) | ShopError::Constraint { .. } => ErrorCategory::Store,
            ShopError::IoError(_) | ShopError::InputClosed => ErrorCategory::Console,
            ShopError::ConfigError { .. }
            | ShopError::ConfigValidationError { .. }
            | ShopError::InvalidConfigValueError { .. } => ErrorCategory::Startup,
        }
    }

    /// Whether the menu loop may carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Input | ErrorCategory::Store)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ShopError::InvalidInput { reason, .. } => reason.clone(),
            ShopError::Constraint { message } => {
                format!("The database rejected the change: {}", message)
            }
            ShopError::Database(e) => format!("Database operation failed: {}", e),
            ShopError::IoError(e) => format!("Terminal I/O failed: {}", e),
            ShopError::InputClosed => "No more input, leaving".to_string(),
            ShopError::ConfigError { message } => format!("Configuration problem: {}", message),
            ShopError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            ShopError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ShopError::InvalidInput { .. } => "Enter the value again in the expected format",
            ShopError::Constraint { .. } => {
                "Check that every referenced customer, car, mechanic and request exists"
            }
            ShopError::Database(_) => "Make sure the database file is reachable and not locked",
            ShopError::IoError(_) | ShopError::InputClosed => "Restart the program from a terminal",
            ShopError::ConfigError { .. }
            | ShopError::ConfigValidationError { .. }
            | ShopError::InvalidConfigValueError { .. } => {
                "Fix the command-line arguments or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
