//! Errors that end a bulk run.

use oti_core::OtiError;
use thiserror::Error;

/// Result type alias for bulk scan operations
pub type BulkResult<T> = std::result::Result<T, BulkError>;

/// Conditions that stop a bulk scan
#[derive(Error, Debug)]
pub enum BulkError {
    /// Input file missing, unreadable or empty
    #[error("{0}")]
    Input(String),

    /// Output path is not a usable directory
    #[error("{0}")]
    OutputDir(String),

    /// The gateway failed to produce a response
    #[error("{0}")]
    Transport(#[from] OtiError),

    /// The service refused the key or account
    #[error("{message}")]
    Fatal {
        /// Service `errorNo`
        code: i64,
        /// Service `errorMsg`
        message: String,
    },

    /// Subscription quota exhausted
    #[error("quota exceeded (error code {code})")]
    QuotaExceeded {
        /// Service `errorNo`
        code: i64,
    },

    /// Writing a run artifact failed
    #[error("failed to write scan artifacts: {0}")]
    Io(#[from] std::io::Error),
}

impl BulkError {
    pub(crate) fn empty_input() -> Self {
        Self::Input("The provided file is either invalid or empty.".to_string())
    }

    pub(crate) fn bad_output_dir() -> Self {
        Self::OutputDir("Please provide a valid output directory.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            BulkError::empty_input().to_string(),
            "The provided file is either invalid or empty."
        );
        assert_eq!(
            BulkError::bad_output_dir().to_string(),
            "Please provide a valid output directory."
        );
        let fatal = BulkError::Fatal {
            code: 7002,
            message: "invalid API key".to_string(),
        };
        assert_eq!(fatal.to_string(), "invalid API key");
        assert_eq!(
            BulkError::Transport(OtiError::Timeout(300)).to_string(),
            OtiError::Timeout(300).to_string()
        );
    }
}
