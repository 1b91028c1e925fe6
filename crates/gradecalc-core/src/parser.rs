//! TOML course file parser.
//!
//! Loads courses from TOML files and directories, and lints them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::evaluator::{EvaluatorOptions, GradeEvaluator};
use crate::model::{AssignmentRecord, Course, CourseTarget, Entry};

/// Intermediate TOML structure for parsing course files.
#[derive(Debug, Deserialize)]
struct TomlCourseFile {
    course: TomlCourseHeader,
    #[serde(default)]
    assignments: Vec<TomlAssignment>,
}

#[derive(Debug, Deserialize)]
struct TomlCourseHeader {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    pass_grade: Entry,
    #[serde(default)]
    final_exam_weight: Entry,
}

#[derive(Debug, Deserialize)]
struct TomlAssignment {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    grade: Entry,
    #[serde(default)]
    weight: Entry,
}

/// Parse a single TOML file into a `Course`.
pub fn parse_course(path: &Path) -> Result<Course> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course file: {}", path.display()))?;

    parse_course_str(&content, path)
}

/// Parse a TOML string into a `Course` (useful for testing).
pub fn parse_course_str(content: &str, source_path: &Path) -> Result<Course> {
    let parsed: TomlCourseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let records = parsed
        .assignments
        .into_iter()
        .map(|a| AssignmentRecord {
            name: a.name,
            grade: a.grade,
            weight: a.weight,
        })
        .collect();

    Ok(Course {
        name: parsed.course.name,
        records,
        target: CourseTarget {
            pass_grade: parsed.course.pass_grade,
            final_exam_weight: parsed.course.final_exam_weight,
        },
    })
}

/// Recursively load all `.toml` course files from a directory.
///
/// Files that fail to parse are skipped with a warning. Results are sorted
/// by path so output order is stable.
pub fn load_course_directory(dir: &Path) -> Result<Vec<(PathBuf, Course)>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    collect_toml_files(dir, &mut paths)?;
    paths.sort();

    let mut courses = Vec::new();
    for path in paths {
        match parse_course(&path) {
            Ok(course) => courses.push((path, course)),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(courses)
}

fn collect_toml_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            collect_toml_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            out.push(path);
        }
    }
    Ok(())
}

/// A warning from course file validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based assignment index (if applicable).
    pub assignment: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Lint a course for issues that do not stop an evaluation but probably
/// are not what the user meant.
///
/// Missing grades are counted the way an evaluator built from `options`
/// would count them.
pub fn validate_course(course: &Course, options: &EvaluatorOptions) -> Vec<ValidationWarning> {
    let evaluator = GradeEvaluator::new(*options);
    let mut warnings = Vec::new();

    // Duplicate assignment names
    let mut seen = std::collections::HashSet::new();
    for (i, record) in course.records.iter().enumerate() {
        if let Some(name) = &record.name {
            if !seen.insert(name.as_str()) {
                warnings.push(ValidationWarning {
                    assignment: Some(i),
                    message: format!("duplicate assignment name: {name}"),
                });
            }
        }
    }

    // A literal 0 grade reads as "not graded yet"
    for (i, record) in course.records.iter().enumerate() {
        if options.zero_grade_is_missing && record.grade == Entry::Number(0.0) {
            warnings.push(ValidationWarning {
                assignment: Some(i),
                message: "grade of 0 is treated as not yet received".into(),
            });
        }
    }

    let missing = course
        .records
        .iter()
        .filter(|r| evaluator.is_missing(&r.grade))
        .count();
    if missing > 1 {
        warnings.push(ValidationWarning {
            assignment: None,
            message: format!(
                "{missing} assignments have no grade; the result is an average over all of them"
            ),
        });
    }

    // Weight total, only when every weight is a number
    let weights: Option<Vec<f64>> = course
        .records
        .iter()
        .map(|r| r.weight.value())
        .chain(std::iter::once(course.target.final_exam_weight.value()))
        .collect();
    if let Some(weights) = weights {
        let total: f64 = weights.iter().sum();
        if total != 100.0 {
            warnings.push(ValidationWarning {
                assignment: None,
                message: format!("weights add up to {total}%, not 100%"),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TOML: &str = r#"
[course]
name = "Intro to Chemistry"
pass_grade = 70
final_exam_weight = 50

[[assignments]]
name = "Midterm"
grade = 90
weight = 30

[[assignments]]
name = "Lab report"
weight = 20
"#;

    #[test]
    fn parse_valid_toml() {
        let course = parse_course_str(VALID_TOML, &PathBuf::from("chem.toml")).unwrap();
        assert_eq!(course.name.as_deref(), Some("Intro to Chemistry"));
        assert_eq!(course.records.len(), 2);
        assert_eq!(course.records[0].grade, Entry::Number(90.0));
        assert_eq!(course.records[1].grade, Entry::Blank);
        assert_eq!(course.target.pass_grade, Entry::Number(70.0));
        assert_eq!(course.target.final_exam_weight, Entry::Number(50.0));
        assert!(validate_course(&course, &EvaluatorOptions::default()).is_empty());
    }

    #[test]
    fn parse_string_fields() {
        let toml = r#"
[course]
pass_grade = "65.5"
final_exam_weight = ""

[[assignments]]
grade = "B+"
weight = "40"

[[assignments]]
grade = "90%"
weight = "10%"
"#;
        let course = parse_course_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(course.name, None);
        assert_eq!(course.target.pass_grade, Entry::Number(65.5));
        assert_eq!(course.target.final_exam_weight, Entry::Blank);
        assert_eq!(course.records[0].grade, Entry::Invalid("B+".into()));
        assert_eq!(course.records[0].weight, Entry::Number(40.0));
        assert_eq!(course.records[1].grade, Entry::Invalid("90%".into()));
        assert_eq!(course.records[1].weight, Entry::Invalid("10%".into()));
    }

    #[test]
    fn parse_nan_and_inf_floats() {
        let toml = r#"
[course]
pass_grade = 60
final_exam_weight = 50

[[assignments]]
grade = nan
weight = 25

[[assignments]]
grade = 80
weight = inf
"#;
        let course = parse_course_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert!(matches!(course.records[0].grade, Entry::Number(v) if v.is_nan()));
        assert_eq!(course.records[1].weight, Entry::Number(f64::INFINITY));
        assert_eq!(
            crate::evaluator::evaluate(&course.records, &course.target),
            Err(crate::error::ErrorKind::InvalidGrade)
        );
        assert_eq!(
            crate::evaluator::evaluate(&course.records[1..], &course.target),
            Err(crate::error::ErrorKind::InvalidWeight)
        );
    }

    #[test]
    fn parse_missing_target_fields() {
        let toml = r#"
[course]
name = "Empty"
"#;
        let course = parse_course_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(course.target.pass_grade, Entry::Blank);
        assert!(course.records.is_empty());
    }

    #[test]
    fn validate_duplicates_and_zero_grades() {
        let toml = r#"
[course]
pass_grade = 60
final_exam_weight = 40

[[assignments]]
name = "Quiz"
grade = 0
weight = 30

[[assignments]]
name = "Quiz"
grade = 75
weight = 30
"#;
        let course = parse_course_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_course(&course, &EvaluatorOptions::default());
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate") && w.assignment == Some(1)));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("grade of 0") && w.assignment == Some(0)));
    }

    #[test]
    fn validate_weight_total_and_missing() {
        let toml = r#"
[course]
pass_grade = 60
final_exam_weight = 10

[[assignments]]
weight = 40

[[assignments]]
weight = 45
"#;
        let course = parse_course_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_course(&course, &EvaluatorOptions::default());
        assert!(warnings.iter().any(|w| w.message.contains("add up to 95%")));
        assert!(warnings.iter().any(|w| w.message.contains("2 assignments have no grade")));
    }

    #[test]
    fn validate_follows_zero_grade_option() {
        let toml = r#"
[course]
pass_grade = 60
final_exam_weight = 40

[[assignments]]
grade = 0
weight = 30

[[assignments]]
grade = 0
weight = 30
"#;
        let course = parse_course_str(toml, &PathBuf::from("test.toml")).unwrap();

        let warnings = validate_course(&course, &EvaluatorOptions::default());
        assert_eq!(
            warnings
                .iter()
                .filter(|w| w.message.contains("grade of 0"))
                .count(),
            2
        );
        assert!(warnings.iter().any(|w| w.message.contains("2 assignments have no grade")));

        let explicit = EvaluatorOptions {
            zero_grade_is_missing: false,
        };
        assert!(validate_course(&course, &explicit).is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_course_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_course_table_is_an_error() {
        let result = parse_course_str("[[assignments]]\nweight = 50\n", &PathBuf::from("x.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml {").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let courses = load_course_directory(dir.path()).unwrap();
        assert_eq!(courses.len(), 2);
        assert!(courses[0].0.ends_with("b.toml"));
        assert!(courses[1].0.ends_with("nested/a.toml"));
    }

    #[test]
    fn load_directory_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("c.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_course_directory(&file).is_err());
    }
}
