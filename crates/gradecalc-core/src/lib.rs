//! gradecalc-core: what do I need on the final?
//!
//! This crate defines the course data model, the validation rules, and the
//! arithmetic that turns a list of graded (and not yet graded) assignments
//! into the percentage still needed to pass.

pub mod commentary;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod report;

pub use commentary::Commentary;
pub use error::ErrorKind;
pub use evaluator::{evaluate, EvaluatorOptions, GradeEvaluator};
pub use model::{AssignmentRecord, Course, CourseTarget, Entry};
pub use report::{Evaluation, EvaluationResult, OutputFormat};
