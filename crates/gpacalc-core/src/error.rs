//! Engine error types.
//!
//! These errors represent rejected session operations. File and parse
//! failures are reported through `anyhow` by the layers that do I/O.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::PeriodId;

/// The course form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseField {
    Name,
    Credits,
    Grade,
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseField::Name => write!(f, "name"),
            CourseField::Credits => write!(f, "credits"),
            CourseField::Grade => write!(f, "grade"),
        }
    }
}

/// Errors that can occur when updating a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GpaError {
    /// A course field was missing or could not be parsed.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: CourseField, reason: String },

    /// No period with this id exists in the roster.
    #[error("period not found: {0}")]
    PeriodNotFound(PeriodId),

    /// No nested-layout period matches this level and semester.
    #[error("unknown period: {level} / {semester}")]
    UnknownPeriod { level: String, semester: String },

    /// The roster layout has a fixed set of periods.
    #[error("the nested layout has a fixed set of semesters")]
    FixedLayout,
}

impl GpaError {
    pub(crate) fn invalid(field: CourseField, reason: impl Into<String>) -> Self {
        GpaError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the offending field for `InvalidInput` errors.
    pub fn field(&self) -> Option<CourseField> {
        match self {
            GpaError::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_names_field() {
        let err = GpaError::invalid(CourseField::Credits, "must be greater than zero");
        assert_eq!(err.to_string(), "invalid credits: must be greater than zero");
        assert_eq!(err.field(), Some(CourseField::Credits));
    }

    #[test]
    fn other_errors_have_no_field() {
        assert_eq!(GpaError::FixedLayout.field(), None);
        assert_eq!(
            GpaError::PeriodNotFound(PeriodId(7)).to_string(),
            "period not found: #7"
        );
    }
}
