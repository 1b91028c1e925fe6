//! The `gradecalc validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use gradecalc_core::config::load_config_from;
use gradecalc_core::evaluator::GradeEvaluator;
use gradecalc_core::model::Course;
use gradecalc_core::parser::{self, ValidationWarning};

/// Lint every course and dry-run its evaluation. Problems are reported on
/// stdout; only unreadable files or config are errors.
pub fn execute(course_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let options = config.evaluator_options();
    let evaluator = GradeEvaluator::new(options);

    let courses = if course_path.is_dir() {
        parser::load_course_directory(&course_path)?
    } else {
        vec![(course_path.clone(), parser::parse_course(&course_path)?)]
    };
    if courses.is_empty() {
        anyhow::bail!("no course files found in {}", course_path.display());
    }

    let mut warning_count = 0;
    let mut rejected = 0;

    for (path, course) in &courses {
        println!("Course: {} ({} assignments)", display_name(course, path), course.records.len());

        let warnings = parser::validate_course(course, &options);
        for w in &warnings {
            println!("  {} WARNING: {}", location(course, w), w.message);
        }
        warning_count += warnings.len();

        if let Err(reason) = evaluator.evaluate_course(course) {
            println!("  REJECTED: {reason}");
            rejected += 1;
        }
    }

    if warning_count == 0 && rejected == 0 {
        println!("All course files valid.");
        return Ok(());
    }

    println!();
    if warning_count > 0 {
        println!("{warning_count} warning(s) found.");
    }
    if rejected > 0 {
        println!("{rejected} course(s) would be rejected by eval.");
    }
    Ok(())
}

fn display_name(course: &Course, path: &Path) -> String {
    course
        .name
        .clone()
        .unwrap_or_else(|| path.display().to_string())
}

/// `[Midterm]` when the assignment is named, `[assignment 2]` otherwise.
fn location(course: &Course, warning: &ValidationWarning) -> String {
    match warning.assignment {
        Some(i) => match course.records.get(i).and_then(|r| r.name.as_deref()) {
            Some(name) => format!("[{name}]"),
            None => format!("[assignment {}]", i + 1),
        },
        None => "[course]".to_string(),
    }
}
