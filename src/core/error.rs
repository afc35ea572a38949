use thiserror::Error;

/// Failures raised by this layer itself, as opposed to storage errors which
/// propagate as [`sqlx::Error`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("page should be >= 1")]
    InvalidPage,
    #[error("page_size should be >= 1")]
    InvalidPageSize,
    #[error("page offset is out of range")]
    PageOutOfRange,
    #[error("unknown profile type: {0}")]
    UnknownProfileType(String),
}
