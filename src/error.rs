// Client Error Types
use serde_json::{json, Value};
use thiserror::Error;

/// Backend response codes, as carried in the `status_code` field of failed responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // 0000 series
    Success,
    BasicError,

    // 0400 series - authentication and authorization
    Unauthorized,
    Forbidden,

    // 0410 series - token errors
    InvalidToken,
    ExpiredToken,
    RevokedToken,
    MissingToken,

    // 0420 series - request errors
    InvalidRequestFormat,
    ValidationError,
    MethodNotAllowed,

    // 0430 series - resource errors
    NotFound,
    Conflict,

    // 0500 series - persistence
    DatabaseError,
    DatabaseConnectionError,

    // 0510/0520 - service
    ServiceUnavailable,
    InternalServerError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Success,
    Authentication,
    Authorization,
    Validation,
    Resource,
    Server,
    Network,
    Unknown,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 17] = [
        ErrorCode::Success,
        ErrorCode::BasicError,
        ErrorCode::Unauthorized,
        ErrorCode::Forbidden,
        ErrorCode::InvalidToken,
        ErrorCode::ExpiredToken,
        ErrorCode::RevokedToken,
        ErrorCode::MissingToken,
        ErrorCode::InvalidRequestFormat,
        ErrorCode::ValidationError,
        ErrorCode::MethodNotAllowed,
        ErrorCode::NotFound,
        ErrorCode::Conflict,
        ErrorCode::DatabaseError,
        ErrorCode::DatabaseConnectionError,
        ErrorCode::ServiceUnavailable,
        ErrorCode::InternalServerError,
    ];

    /// Wire representation, e.g. `"0411"`
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Success => "0000",
            ErrorCode::BasicError => "0001",
            ErrorCode::Unauthorized => "0401",
            ErrorCode::Forbidden => "0403",
            ErrorCode::InvalidToken => "0410",
            ErrorCode::ExpiredToken => "0411",
            ErrorCode::RevokedToken => "0412",
            ErrorCode::MissingToken => "0413",
            ErrorCode::InvalidRequestFormat => "0420",
            ErrorCode::ValidationError => "0421",
            ErrorCode::MethodNotAllowed => "0422",
            ErrorCode::NotFound => "0430",
            ErrorCode::Conflict => "0431",
            ErrorCode::DatabaseError => "0500",
            ErrorCode::DatabaseConnectionError => "0501",
            ErrorCode::ServiceUnavailable => "0510",
            ErrorCode::InternalServerError => "0520",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Map an HTTP status onto the closest backend code
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200..=299 => ErrorCode::Success,
            400 => ErrorCode::InvalidRequestFormat,
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            405 => ErrorCode::MethodNotAllowed,
            409 => ErrorCode::Conflict,
            500 => ErrorCode::InternalServerError,
            503 => ErrorCode::ServiceUnavailable,
            _ => ErrorCode::BasicError,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::Success => ErrorCategory::Success,
            ErrorCode::Unauthorized
            | ErrorCode::InvalidToken
            | ErrorCode::ExpiredToken
            | ErrorCode::RevokedToken
            | ErrorCode::MissingToken => ErrorCategory::Authentication,
            ErrorCode::Forbidden => ErrorCategory::Authorization,
            ErrorCode::InvalidRequestFormat
            | ErrorCode::ValidationError
            | ErrorCode::MethodNotAllowed => ErrorCategory::Validation,
            ErrorCode::NotFound | ErrorCode::Conflict => ErrorCategory::Resource,
            ErrorCode::BasicError
            | ErrorCode::DatabaseError
            | ErrorCode::DatabaseConnectionError
            | ErrorCode::ServiceUnavailable
            | ErrorCode::InternalServerError => ErrorCategory::Server,
        }
    }

    /// Human readable message for display in notifications
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::BasicError => "An error occurred while processing your request",
            ErrorCode::Unauthorized => "Authentication required. Please log in",
            ErrorCode::Forbidden => "You do not have permission to access this resource",
            ErrorCode::InvalidToken => "Your session has expired. Please log in again",
            ErrorCode::ExpiredToken => "Your session has expired. Please log in again",
            ErrorCode::RevokedToken => "Your session has been terminated. Please log in again",
            ErrorCode::MissingToken => "Authentication required. Please log in",
            ErrorCode::InvalidRequestFormat => "Invalid request format. Please check your input",
            ErrorCode::ValidationError => "Validation failed. Please check your input",
            ErrorCode::MethodNotAllowed => "This action is not allowed",
            ErrorCode::NotFound => "The requested resource was not found",
            ErrorCode::Conflict => "A conflict occurred with your request",
            ErrorCode::DatabaseError => "A database error occurred",
            ErrorCode::DatabaseConnectionError => "Database connection failed",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCode::InternalServerError => "An unexpected server error occurred",
        }
    }

    pub fn requires_login_redirect(&self) -> bool {
        self.category() == ErrorCategory::Authentication
    }
}

/// Errors surfaced by the API client and everything built on it
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message} (status {status}, code {})", .code.code())]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("No access token available")]
    MissingToken,
}

impl ClientError {
    pub fn api(status: u16, code: ErrorCode, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        ClientError::InvalidResponse(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Network(_) => ErrorCategory::Network,
            ClientError::Api { code, .. } => code.category(),
            ClientError::MissingToken => ErrorCategory::Authentication,
            ClientError::InvalidResponse(_) | ClientError::Json(_) | ClientError::Url(_) => {
                ErrorCategory::Unknown
            }
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Api { code, .. } => code.code(),
            ClientError::InvalidResponse(_) => "INVALID_RESPONSE",
            ClientError::Json(_) => "INVALID_JSON",
            ClientError::Url(_) => "INVALID_URL",
            ClientError::MissingToken => "MISSING_TOKEN",
        }
    }

    pub fn requires_login_redirect(&self) -> bool {
        self.category() == ErrorCategory::Authentication
    }

    /// Convert to JSON body for CLI output
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.to_string(),
            "code": self.error_code()
        })
    }
}
