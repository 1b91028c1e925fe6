//! Evaluation error types.
//!
//! Every way an evaluation can be rejected. Validation stops at the first
//! violation, so an evaluation carries exactly one of these.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The reason an evaluation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Passing grade is blank or zero.
    #[error("passing grade was left empty")]
    EmptyPassGrade,

    /// Passing grade is not a number, or is outside 0..=100.
    #[error("passing grade must be a percent between 0 and 100")]
    InvalidPassGrade,

    /// An assignment grade is not a number, or is outside 0..=100.
    #[error("grades must be a percent between 0 and 100")]
    InvalidGrade,

    /// An assignment weight is blank or zero.
    #[error("a weight was left empty")]
    EmptyWeight,

    /// An assignment weight is not a number, or is outside 0..=100.
    #[error("weights must be a percent between 0 and 100")]
    InvalidWeight,

    /// Final exam weight is blank or zero.
    #[error("final exam weight was left empty")]
    EmptyFinalWeight,

    /// Final exam weight is not a number, or is outside 0..=100.
    #[error("final exam weight must be a percent between 0 and 100")]
    InvalidFinalWeight,

    /// Assignment weights plus the final exam weight are not exactly 100.
    #[error("weights must add up to 100%")]
    WeightsNotFull,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ErrorKind::EmptyPassGrade.to_string(),
            "passing grade was left empty"
        );
        assert_eq!(
            ErrorKind::WeightsNotFull.to_string(),
            "weights must add up to 100%"
        );
        assert_eq!(
            ErrorKind::InvalidFinalWeight.to_string(),
            "final exam weight must be a percent between 0 and 100"
        );
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::EmptyFinalWeight).unwrap();
        assert_eq!(json, "\"empty_final_weight\"");
    }
}
