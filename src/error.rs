//! Error types for jira_md.
//!
//! Malformed input is a caller error: validation stops at the first missing or mistyped
//! field and reports where it happened instead of filling in defaults.

use thiserror::Error;

/// Result type alias for jira_md operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jira_md
#[derive(Debug, Error)]
pub enum Error {
    /// The `issues` list of a search export is empty
    #[error("document contains no issues")]
    NoIssues,

    /// An issue is missing a required field or has a field of the wrong type
    #[error("invalid issue at index {index}: {source}")]
    InvalidIssue {
        /// Position of the issue inside the `issues` list
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The input is not JSON or does not have the search export shape
    #[error("invalid input document: {0}")]
    InvalidInput(#[source] serde_json::Error),

    /// Metadata could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_issue_message() {
        let source = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let err = Error::InvalidIssue { index: 3, source };
        assert!(err.to_string().starts_with("invalid issue at index 3: "));
    }

    #[test]
    fn test_no_issues_message() {
        assert_eq!(Error::NoIssues.to_string(), "document contains no issues");
    }
}
