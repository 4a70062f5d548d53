//! Error types for store operations

/// Errors raised by the store and its codec
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required argument was missing or a value cannot be persisted
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Lookup, delete or pop on an absent key
    #[error("key '{key}' not found")]
    NotFound { key: String },

    /// Data operation attempted in a persistence mode other than keyvalue
    #[error("mode '{mode}' is not implemented, only keyvalue is supported")]
    NotImplemented { mode: String },

    /// Storage content cannot be parsed, or a record lacks required fields
    #[error("corrupt storage: {0}")]
    Corrupt(String),

    /// I/O error from the underlying file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a not-found error for a key
    pub fn not_found(key: impl Into<String>) -> Self {
        StoreError::NotFound { key: key.into() }
    }

    /// Create a corruption error
    pub fn corrupt(reason: impl Into<String>) -> Self {
        StoreError::Corrupt(reason.into())
    }
}

impl From<quick_xml::Error> for StoreError {
    fn from(err: quick_xml::Error) -> Self {
        StoreError::Corrupt(format!("malformed XML: {}", err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for StoreError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        StoreError::Corrupt(format!("malformed attribute: {}", err))
    }
}

impl From<quick_xml::escape::EscapeError> for StoreError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        StoreError::Corrupt(format!("malformed escape: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(format!("malformed payload: {}", err))
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_key() {
        let err = StoreError::not_found("nonexistent");
        assert_eq!(err.to_string(), "key 'nonexistent' not found");
    }

    #[test]
    fn test_json_error_is_corrupt() {
        let err: StoreError = serde_json::from_str::<serde_json::Value>("[1,")
            .unwrap_err()
            .into();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
