//! Evaluation results and how they are rendered for the user.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::commentary::Commentary;
use crate::error::ErrorKind;

/// Default number of decimals shown for percentages.
pub const DEFAULT_PRECISION: usize = 1;

/// A successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Average needed on the remaining work (final exam plus any ungraded
    /// assignments). Not clamped: may be negative or above 100.
    pub required_final_percent: f64,
    /// Assignments with no grade yet.
    pub missing_count: usize,
    /// Combined weight of the ungraded assignments.
    pub missing_weight: f64,
    /// Course points already earned.
    pub total_weighted_grade: f64,
    /// Commentary tier for `required_final_percent`.
    pub commentary: Commentary,
}

impl Evaluation {
    /// The full sentence shown to the user.
    pub fn message(&self, precision: usize) -> String {
        let needed = format!("{:.*}%", precision, self.required_final_percent);
        let sentence = match self.missing_count {
            0 => format!("You will need {needed} on the final exam in order to pass this course."),
            1 => format!(
                "You will need an average of {needed} both on the remaining assignment \
                 and on the final exam in order to pass this course."
            ),
            n => format!(
                "You will need an average of {needed} on the remaining {n} assignments \
                 and on the final exam in order to pass this course."
            ),
        };
        format!("{sentence} {}", self.commentary.message())
    }
}

/// Outcome of a single evaluation, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationResult {
    Success(Evaluation),
    Failure { reason: ErrorKind },
}

impl From<Result<Evaluation, ErrorKind>> for EvaluationResult {
    fn from(result: Result<Evaluation, ErrorKind>) -> Self {
        match result {
            Ok(evaluation) => EvaluationResult::Success(evaluation),
            Err(reason) => EvaluationResult::Failure { reason },
        }
    }
}

impl EvaluationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EvaluationResult::Success(_))
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            EvaluationResult::Success(evaluation) => Some(evaluation),
            EvaluationResult::Failure { .. } => None,
        }
    }

    /// Single human-readable line. Failures are prefixed with `Error: `.
    pub fn message(&self, precision: usize) -> String {
        match self {
            EvaluationResult::Success(evaluation) => evaluation.message(precision),
            EvaluationResult::Failure { reason } => format!("Error: {reason}"),
        }
    }

    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat, precision: usize) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.message(precision)),
            OutputFormat::Json => {
                let mut value =
                    serde_json::to_value(self).context("failed to serialize evaluation")?;
                if let Some(map) = value.as_object_mut() {
                    map.insert("message".into(), self.message(precision).into());
                }
                serde_json::to_string_pretty(&value).context("failed to serialize evaluation")
            }
        }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
