//! Grade evaluator.
//!
//! Validates a course's assignments and exam parameters, then works out the
//! percentage still needed on the final exam (and on any assignments that
//! have not been graded yet) to reach the passing grade.

use serde::{Deserialize, Serialize};

use crate::commentary::Commentary;
use crate::error::ErrorKind;
use crate::model::{AssignmentRecord, Course, CourseTarget, Entry};
use crate::report::Evaluation;

/// Options for the grade evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorOptions {
    /// Treat a grade of exactly 0 as "not yet received". When false only a
    /// blank grade counts as missing and 0 is a real score.
    pub zero_grade_is_missing: bool,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            zero_grade_is_missing: true,
        }
    }
}

/// Computes the required final-exam percentage for a course.
#[derive(Debug, Clone, Default)]
pub struct GradeEvaluator {
    options: EvaluatorOptions,
}

impl GradeEvaluator {
    pub fn new(options: EvaluatorOptions) -> Self {
        Self { options }
    }

    /// Evaluate a list of assignments against a target.
    ///
    /// Validation runs in a fixed order and stops at the first problem:
    /// pass grade, then each assignment in order (grade, then weight), then
    /// the final exam weight, then the weight total.
    pub fn evaluate(
        &self,
        records: &[AssignmentRecord],
        target: &CourseTarget,
    ) -> Result<Evaluation, ErrorKind> {
        tracing::debug!(records = records.len(), "evaluating course");

        let outcome = self.compute(records, target);
        match &outcome {
            Ok(evaluation) => tracing::debug!(
                required = evaluation.required_final_percent,
                missing = evaluation.missing_count,
                commentary = ?evaluation.commentary,
                "evaluation succeeded"
            ),
            Err(reason) => tracing::debug!(%reason, "evaluation rejected"),
        }
        outcome
    }

    /// Evaluate a course loaded from a course file.
    pub fn evaluate_course(&self, course: &Course) -> Result<Evaluation, ErrorKind> {
        self.evaluate(&course.records, &course.target)
    }

    fn compute(
        &self,
        records: &[AssignmentRecord],
        target: &CourseTarget,
    ) -> Result<Evaluation, ErrorKind> {
        let pass_grade = required_percent(
            &target.pass_grade,
            ErrorKind::EmptyPassGrade,
            ErrorKind::InvalidPassGrade,
        )?;

        let mut total_weighted_grade = 0.0;
        let mut total_weight = 0.0;
        let mut missing_count = 0usize;
        let mut missing_weight = 0.0;

        for record in records {
            let grade = if self.is_missing(&record.grade) {
                None
            } else {
                Some(record.grade.percent().ok_or(ErrorKind::InvalidGrade)?)
            };
            let weight = required_percent(
                &record.weight,
                ErrorKind::EmptyWeight,
                ErrorKind::InvalidWeight,
            )?;

            match grade {
                Some(grade) => total_weighted_grade += grade * weight / 100.0,
                None => {
                    missing_count += 1;
                    missing_weight += weight;
                }
            }
            total_weight += weight;
        }

        let final_exam_weight = required_percent(
            &target.final_exam_weight,
            ErrorKind::EmptyFinalWeight,
            ErrorKind::InvalidFinalWeight,
        )?;

        // Exact comparison on the summed percentages, no tolerance.
        if total_weight + final_exam_weight != 100.0 {
            tracing::trace!(total_weight, final_exam_weight, "weights not full");
            return Err(ErrorKind::WeightsNotFull);
        }

        let remaining = pass_grade - total_weighted_grade;
        let required_final_percent = if missing_count == 0 {
            remaining / final_exam_weight * 100.0
        } else {
            remaining / (missing_weight + final_exam_weight) * 100.0
        };

        Ok(Evaluation {
            required_final_percent,
            missing_count,
            missing_weight,
            total_weighted_grade,
            commentary: Commentary::classify(required_final_percent),
        })
    }

    /// Whether an assignment grade counts as not yet received.
    pub(crate) fn is_missing(&self, grade: &Entry) -> bool {
        match grade {
            Entry::Blank => true,
            Entry::Number(_) => self.options.zero_grade_is_missing && grade.is_blank(),
            Entry::Invalid(_) => false,
        }
    }
}

/// A field that must be filled in with a percentage.
///
/// Text that is not a number (and NaN) reads as an empty field here, the
/// same as blank or zero. Only out-of-range numbers are invalid.
fn required_percent(entry: &Entry, empty: ErrorKind, invalid: ErrorKind) -> Result<f64, ErrorKind> {
    let unfilled = match entry {
        Entry::Blank | Entry::Invalid(_) => true,
        Entry::Number(v) => *v == 0.0 || v.is_nan(),
    };
    if unfilled {
        return Err(empty);
    }
    entry.percent().ok_or(invalid)
}

/// Evaluate with the default options.
pub fn evaluate(records: &[AssignmentRecord], target: &CourseTarget) -> Result<Evaluation, ErrorKind> {
    GradeEvaluator::default().evaluate(records, target)
}
