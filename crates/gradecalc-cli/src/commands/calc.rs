//! The `gradecalc calc` command.

use anyhow::Result;

use gradecalc_core::model::{AssignmentRecord, Course, CourseTarget, Entry};

use crate::output::OutputSettings;
use crate::OutputArgs;

pub fn execute(
    pass_grade: Option<String>,
    final_weight: Option<String>,
    assignments: Vec<AssignmentRecord>,
    output: OutputArgs,
) -> Result<bool> {
    let settings = OutputSettings::resolve(&output)?;

    let parse = |field: Option<String>| field.as_deref().map_or(Entry::Blank, Entry::parse);
    let course = Course {
        name: None,
        records: assignments,
        target: CourseTarget {
            pass_grade: parse(pass_grade),
            final_exam_weight: parse(final_weight),
        },
    };

    settings.evaluate_and_print(&course)
}
