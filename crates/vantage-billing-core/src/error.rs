//! Billing dashboard errors

use thiserror::Error;
use vantage_types::SnapshotError;

/// Billing dashboard errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// The billing backend could not be reached or returned a failure
    #[error("failed to fetch billing state: {message}")]
    Fetch {
        /// HTTP status, if the backend answered at all
        status: Option<u16>,
        /// Backend or transport error message
        message: String,
    },

    /// The backend returned a snapshot that violates billing invariants
    #[error("invalid billing snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl BillingError {
    /// Convenience constructor for fetch failures without a status code
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            status: None,
            message: message.into(),
        }
    }

    /// Check if this is a fetch error
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = BillingError::Fetch {
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "failed to fetch billing state: bad gateway");
        assert!(err.is_fetch());
    }

    #[test]
    fn test_snapshot_error_converts() {
        let err: BillingError = SnapshotError::ConflictingAdjustments.into();
        assert!(matches!(err, BillingError::InvalidSnapshot(_)));
        assert!(!err.is_fetch());
    }
}
