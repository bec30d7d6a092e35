//! Scheduler errors

/// Errors surfaced by the scheduler API.
///
/// Malformed progress records are not errors: they are reset by
/// [`crate::sanitize`] and scheduling continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("invalid grade {0}: expected one of 0, 3, 4, 5")]
    InvalidGrade(i64),
    #[error("unknown grade label: {0}")]
    UnknownGradeLabel(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
