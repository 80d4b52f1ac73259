use thiserror::Error;

/// The error taxonomy every repository and use case speaks.
///
/// The transport layer translates these one-to-one into responses:
/// `NotFound` -> not-found, `ValueError` -> bad-request,
/// `DataError` -> internal-error.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// No entity at that id, or a delete affected zero rows.
    #[error("not found")]
    NotFound,
    /// Caller-supplied data violates a domain rule.
    #[error("value error: {0}")]
    ValueError(String),
    /// The storage layer failed for reasons outside the caller's control.
    #[error("data error: {0}")]
    DataError(#[source] anyhow::Error),
}

pub type CalendarResult<T> = Result<T, CalendarError>;
