//! Error types for the Fitplan engine core

use thiserror::Error;

/// A stored document could not be turned into a typed record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Missing field `{field}` in {document}")]
    MissingField { document: String, field: String },

    #[error("Invalid field `{field}` in {document}: {reason}")]
    InvalidField {
        document: String,
        field: String,
        reason: String,
    },

    #[error("Malformed document {document}: {reason}")]
    Malformed { document: String, reason: String },
}

impl DocumentError {
    pub fn missing(document: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            document: document.into(),
            field: field.into(),
        }
    }

    pub fn invalid(
        document: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            document: document.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// User supplied values rejected before they reach the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Weight must be a valid number")]
    NonFiniteWeight,

    #[error("Weight must be between {min} and {max} lbs")]
    WeightOutOfRange { min: f64, max: f64 },

    #[error("Weekly goal must be between -{limit} and {limit} lbs/week")]
    WeeklyGoalOutOfRange { limit: f64 },

    #[error("Program must define at least one day")]
    EmptyProgram,

    #[error("Days per week must be between 1 and 7")]
    DaysPerWeekOutOfRange,
}
