//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user identifier is not a positive integer.
    #[error("invalid user id {0}, expected a positive integer")]
    InvalidUserId(i64),

    /// The passport does not consist of a 4-character series and a
    /// 6-character number.
    #[error("invalid passport format '{0}', expected 'SSSS NNNNNN'")]
    InvalidPassportFormat(String),

    /// The passport series is not numeric.
    #[error("invalid passport series '{0}'")]
    InvalidPassportSeries(String),

    /// The passport number is not numeric.
    #[error("invalid passport number '{0}'")]
    InvalidPassportNumber(String),

    /// A mandatory identity field is empty after trimming.
    #[error("{0} must not be empty")]
    BlankField(&'static str),

    /// A partial update carried no fields.
    #[error("no fields to update")]
    EmptyPatch,

    /// The page number is zero.
    #[error("page number must be at least 1")]
    InvalidPageNumber,

    /// The page size is zero.
    #[error("page size must be at least 1")]
    InvalidPageSize,
}
