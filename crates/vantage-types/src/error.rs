//! Snapshot validation errors

use thiserror::Error;

/// Errors raised when validating a billing snapshot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A percent discount and a credit balance were both present.
    /// The billing backend never grants both at once.
    #[error("snapshot carries both a discount percent and a credit balance")]
    ConflictingAdjustments,

    /// The billing period bounds are inverted
    #[error("billing period ends ({end}) before it starts ({start})")]
    InvertedPeriod {
        /// Period start (RFC 3339)
        start: String,
        /// Period end (RFC 3339)
        end: String,
    },

    /// A monetary amount was negative
    #[error("negative amount in field `{0}`")]
    NegativeAmount(&'static str),
}
