//! Failure modes of the inference pipeline.
//!
//! Both variants abort the whole inference call; there is nothing to retry
//! since every step is deterministic.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferError {
    /// A sample (or a value nested in one) has no structural type mapping.
    #[error("unsupported value kind at {path}: {found}")]
    UnsupportedValueKind { path: String, found: String },

    /// The unifier lost track of a key it had partitioned as shared.
    /// Always a bug in this crate.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

pub type Result<T, E = InferError> = std::result::Result<T, E>;
