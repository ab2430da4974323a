//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers deterministic failures of the barcode codec and the product
/// catalog. IO failures belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A barcode was not exactly 7 ASCII digits.
    #[error("invalid barcode format: {0}")]
    InvalidFormat(String),

    /// A segment passed to the encoder had the wrong width or a non-digit.
    #[error("invalid barcode segment: {0}")]
    InvalidSegment(String),

    /// A product with this barcode already exists.
    #[error("duplicate barcode: {0}")]
    DuplicateKey(String),

    /// No product is stored under the requested barcode.
    #[error("not found")]
    NotFound,

    /// A product field failed validation (e.g. blank name, negative price).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn invalid_segment(msg: impl Into<String>) -> Self {
        Self::InvalidSegment(msg.into())
    }

    pub fn duplicate_key(code: impl Into<String>) -> Self {
        Self::DuplicateKey(code.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
