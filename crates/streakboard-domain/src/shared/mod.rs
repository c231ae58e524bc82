use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(UserId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    UserNotFound = 2001,
    NotFound = 2002,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DataIntegrityError = 4003,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::UserNotFound
            | ErrorCode::NotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::DataIntegrityError | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            ErrorCode::RepositoryError | ErrorCode::SerializationError => ErrorSeverity::Warning,
        }
    }

    /// Check if error is recoverable
    ///
    /// Persistence failures are recoverable by re-running the whole computation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::RepositoryError | ErrorCode::InfrastructureError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::NotFound(_) => ErrorCode::NotFound,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::UserNotFound(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::NotFound(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
