//! The `gradecalc eval` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_core::parser;

use crate::output::OutputSettings;
use crate::OutputArgs;

pub fn execute(course_path: PathBuf, output: OutputArgs) -> Result<bool> {
    let settings = OutputSettings::resolve(&output)?;

    if !course_path.is_dir() {
        let course = parser::parse_course(&course_path)?;
        return settings.evaluate_and_print(&course);
    }

    let courses = parser::load_course_directory(&course_path)?;
    if courses.is_empty() {
        anyhow::bail!("no course files found in {}", course_path.display());
    }

    let mut all_ok = true;
    for (i, (path, course)) in courses.iter().enumerate() {
        tracing::debug!("evaluating {}", path.display());
        if i > 0 {
            println!();
        }
        all_ok &= settings.evaluate_and_print(course)?;
    }

    Ok(all_ok)
}
