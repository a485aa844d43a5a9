//! Errors raised by the grading engine.

use thiserror::Error;

/// Failures detected by [`GradingTable`](crate::grading::GradingTable) and the
/// aggregation functions.
///
/// These are returned at the point of detection. A zero total weight is not an
/// error; see [`Diagnostic`](crate::aggregate::Diagnostic).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradeError {
    #[error("invalid grading scale: {reason}")]
    InvalidScale { reason: String },

    #[error("mark {mark} is outside the grading range {min}..={max}")]
    OutOfRange { mark: f64, min: f64, max: f64 },

    #[error("invalid credit hours {credits} at position {index}")]
    InvalidCredit { index: usize, credits: f64 },

    #[error("invalid GPA {gpa} at position {index}")]
    InvalidGpa { index: usize, gpa: f64 },
}

impl GradeError {
    pub(crate) fn scale(reason: impl Into<String>) -> Self {
        GradeError::InvalidScale {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;
