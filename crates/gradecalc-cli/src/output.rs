//! Resolving output settings and printing evaluation results.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradecalc_core::config::{check_precision, load_config_from};
use gradecalc_core::evaluator::GradeEvaluator;
use gradecalc_core::model::{AssignmentRecord, Course, Entry};
use gradecalc_core::report::{EvaluationResult, OutputFormat};

use crate::OutputArgs;

/// Config file values with command-line overrides applied.
pub struct OutputSettings {
    pub format: OutputFormat,
    pub precision: usize,
    pub breakdown: bool,
    pub evaluator: GradeEvaluator,
}

impl OutputSettings {
    pub fn resolve(args: &OutputArgs) -> Result<Self> {
        let config = load_config_from(args.config.as_deref())?;

        let format = match &args.format {
            Some(f) => f.parse::<OutputFormat>().map_err(|e: String| anyhow::anyhow!("{e}"))?,
            None => config.format,
        };
        let precision = args.precision.unwrap_or(config.precision);
        check_precision(precision)?;

        Ok(Self {
            format,
            precision,
            breakdown: args.breakdown,
            evaluator: GradeEvaluator::new(config.evaluator_options()),
        })
    }

    /// Evaluate a course and print the result. Returns whether the course
    /// passed validation.
    pub fn evaluate_and_print(&self, course: &Course) -> Result<bool> {
        let result = EvaluationResult::from(self.evaluator.evaluate_course(course));

        match self.format {
            OutputFormat::Text => {
                if let Some(name) = &course.name {
                    println!("{name}");
                }
                if self.breakdown {
                    println!("{}", breakdown_table(&course.records, self.precision));
                }
                println!("{}", result.render(OutputFormat::Text, self.precision)?);
            }
            OutputFormat::Json => {
                println!("{}", result.render(OutputFormat::Json, self.precision)?);
            }
        }

        Ok(result.is_success())
    }
}

/// Table of assignments with each one's contribution to the course grade.
pub fn breakdown_table(records: &[AssignmentRecord], precision: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Assignment", "Grade", "Weight", "Weighted"]);

    for (i, record) in records.iter().enumerate() {
        let grade = match &record.grade {
            Entry::Blank => "not graded".to_string(),
            other => format_entry(other, precision),
        };
        let weighted = match (record.grade.value(), record.weight.value()) {
            (Some(g), Some(w)) => format!("{:.*}", precision, g * w / 100.0),
            _ => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(record.name.as_deref().unwrap_or("")),
            Cell::new(grade),
            Cell::new(format_entry(&record.weight, precision)),
            Cell::new(weighted),
        ]);
    }

    table
}

fn format_entry(entry: &Entry, precision: usize) -> String {
    match entry {
        Entry::Blank => "-".to_string(),
        Entry::Number(v) => format!("{:.*}%", precision, v),
        Entry::Invalid(s) => format!("{s:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_lists_every_assignment() {
        let records = vec![
            AssignmentRecord::new(90.0, 50.0).with_name("Midterm"),
            AssignmentRecord::missing(20.0),
            AssignmentRecord::new(Entry::parse("A+"), 10.0),
        ];
        let rendered = breakdown_table(&records, 1).to_string();
        assert!(rendered.contains("Midterm"));
        assert!(rendered.contains("45.0"));
        assert!(rendered.contains("not graded"));
        assert!(rendered.contains("\"A+\""));
    }
}
