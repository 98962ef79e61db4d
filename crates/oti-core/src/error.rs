use thiserror::Error;

use crate::codes;

/// Result type alias for OTI operations
pub type Result<T> = std::result::Result<T, OtiError>;

/// Errors that can occur when using the OTI API
#[derive(Error, Debug)]
pub enum OtiError {
    /// Authentication failed at the HTTP layer
    #[error("authentication failed: invalid API key")]
    Unauthorized,

    /// The service refused the request outright (authentication or account state)
    #[error("request rejected ({code}): {message}")]
    Rejected {
        /// Service `errorNo`
        code: i64,
        /// Service `errorMsg`
        message: String,
    },

    /// The subscription quota is exhausted
    #[error("API quota exhausted ({code}): {message}")]
    QuotaExceeded {
        /// Service `errorNo`
        code: i64,
        /// Service `errorMsg`
        message: String,
    },

    /// The service answered with a non-zero `errorNo`
    #[error("service error ({code}): {message}")]
    Service {
        /// Service `errorNo`
        code: i64,
        /// Service `errorMsg`
        message: String,
    },

    /// Non-2xx HTTP response
    #[error("HTTP Response Code {code}: {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Body or reason phrase
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body was not a JSON object
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Local I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OtiError {
    /// Build the error matching a non-zero service `errorNo`.
    #[must_use]
    pub fn from_service(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        if codes::is_quota(code) {
            Self::QuotaExceeded { code, message }
        } else if codes::is_fatal(code) {
            Self::Rejected { code, message }
        } else {
            Self::Service { code, message }
        }
    }

    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Rejected { .. })
    }

    /// Returns true if the error means no further requests will be served
    #[must_use]
    pub const fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }

    /// Returns the HTTP status code if this is an HTTP-level error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the service `errorNo` if the service produced this error
    #[must_use]
    pub const fn service_code(&self) -> Option<i64> {
        match self {
            Self::Rejected { code, .. }
            | Self::QuotaExceeded { code, .. }
            | Self::Service { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_service_picks_variant() {
        assert!(OtiError::from_service(7066, "quota").is_quota());
        assert!(OtiError::from_service(7002, "bad key").is_auth_error());
        assert!(matches!(
            OtiError::from_service(7040, "other"),
            OtiError::Service { code: 7040, .. }
        ));
    }

    #[test]
    fn test_codes_exposed() {
        let err = OtiError::from_service(7058, "quota");
        assert_eq!(err.service_code(), Some(7058));
        assert_eq!(err.status_code(), None);
        assert_eq!(OtiError::Unauthorized.status_code(), Some(401));
    }
}
