//! The `gradecalc init` command.

use std::path::Path;

use anyhow::{Context, Result};

use gradecalc_core::evaluator::GradeEvaluator;
use gradecalc_core::parser;
use gradecalc_core::report::{EvaluationResult, DEFAULT_PRECISION};

const CONFIG_PATH: &str = "gradecalc.toml";
const EXAMPLE_PATH: &str = "courses/example.toml";

pub fn execute() -> Result<()> {
    write_starter(Path::new(CONFIG_PATH), SAMPLE_CONFIG)?;
    write_starter(Path::new(EXAMPLE_PATH), EXAMPLE_COURSE)?;

    // Show what the example works out to, so the numbers in the file make sense.
    let example = parser::parse_course_str(EXAMPLE_COURSE, Path::new(EXAMPLE_PATH))?;
    let result = EvaluationResult::from(GradeEvaluator::default().evaluate_course(&example));
    println!("\nWith the example grades:");
    println!("  {}", result.message(DEFAULT_PRECISION));

    println!("\nNext steps:");
    println!("  1. Replace the example grades and weights with your own");
    println!("  2. Run: gradecalc validate --course {EXAMPLE_PATH}");
    println!("  3. Run: gradecalc eval --course {EXAMPLE_PATH} --breakdown");

    Ok(())
}

/// Write `contents` to `path` unless a file is already there.
fn write_starter(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradecalc configuration

# Output format: "text" or "json"
format = "text"

# Decimals shown for the required percentage
precision = 1

# A grade of 0 means "not graded yet". Set to false if you really got a 0.
zero_grade_is_missing = true
"#;

// Weights: 20 + 30 + 10 + final 40 = 100.
const EXAMPLE_COURSE: &str = r#"[course]
name = "Example Course"
pass_grade = 70
final_exam_weight = 40

[[assignments]]
name = "Homework"
grade = 92
weight = 20

[[assignments]]
name = "Midterm"
grade = 74
weight = 30

# Not graded yet: leave out the grade
[[assignments]]
name = "Project"
weight = 10
"#;
