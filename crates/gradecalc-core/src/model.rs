//! Core data model types for gradecalc.
//!
//! Percentages arrive the way a user types them into a form: possibly blank,
//! possibly not a number at all. [`Entry`] keeps that raw shape so the
//! evaluator can tell "left empty" apart from "filled in wrong".

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single percentage field as entered by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Entry {
    /// Nothing was entered.
    #[default]
    Blank,
    /// A parsed number. Not yet range-checked.
    Number(f64),
    /// Text that does not parse as a number.
    Invalid(String),
}

impl Entry {
    /// Parse a form field. Surrounding whitespace is ignored; an empty field
    /// is [`Entry::Blank`]. Anything else must be a plain number, so `"90%"`
    /// is invalid text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Entry::Blank;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Entry::Number(v),
            Err(_) => Entry::Invalid(raw.to_string()),
        }
    }

    /// Blank, or exactly zero. The two cannot be told apart in a form field.
    pub fn is_blank(&self) -> bool {
        match self {
            Entry::Blank => true,
            Entry::Number(v) => *v == 0.0,
            Entry::Invalid(_) => false,
        }
    }

    /// The numeric value, if one was entered.
    pub fn value(&self) -> Option<f64> {
        match self {
            Entry::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The value if it is a number within `0..=100`.
    pub fn percent(&self) -> Option<f64> {
        self.value().filter(|v| (0.0..=100.0).contains(v))
    }
}

impl From<f64> for Entry {
    fn from(v: f64) -> Self {
        Entry::Number(v)
    }
}

impl From<Option<f64>> for Entry {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Entry::Blank, Entry::Number)
    }
}

impl FromStr for Entry {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Entry::parse(s))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Blank => Ok(()),
            Entry::Number(v) => write!(f, "{v}"),
            Entry::Invalid(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Blank => serializer.serialize_none(),
            Entry::Number(v) => serializer.serialize_f64(*v),
            Entry::Invalid(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawEntry {
            Number(f64),
            Text(String),
        }

        Ok(match Option::<RawEntry>::deserialize(deserializer)? {
            None => Entry::Blank,
            Some(RawEntry::Number(v)) => Entry::Number(v),
            Some(RawEntry::Text(s)) => Entry::parse(&s),
        })
    }
}

/// One completed (or not yet graded) piece of coursework.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Optional label, only used for display and lint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Score received. Blank (or zero) means not yet received.
    #[serde(default)]
    pub grade: Entry,
    /// Share of the course grade, in percent.
    #[serde(default)]
    pub weight: Entry,
}

impl AssignmentRecord {
    pub fn new(grade: impl Into<Entry>, weight: impl Into<Entry>) -> Self {
        Self {
            name: None,
            grade: grade.into(),
            weight: weight.into(),
        }
    }

    /// An assignment that has not been graded yet.
    pub fn missing(weight: impl Into<Entry>) -> Self {
        Self::new(Entry::Blank, weight)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Parses `GRADE:WEIGHT`, e.g. `90:25`. An empty grade or `-` marks the
/// assignment as not yet graded (`:25`, `-:25`).
impl FromStr for AssignmentRecord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (grade, weight) = s
            .split_once(':')
            .ok_or_else(|| format!("expected GRADE:WEIGHT, got `{s}`"))?;
        let grade = match grade.trim() {
            "-" => Entry::Blank,
            other => Entry::parse(other),
        };
        Ok(Self::new(grade, Entry::parse(weight)))
    }
}

/// What the student is aiming for, and how much the final exam counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseTarget {
    /// Overall course grade needed to pass, in percent.
    #[serde(default)]
    pub pass_grade: Entry,
    /// Share of the course grade carried by the final exam, in percent.
    #[serde(default)]
    pub final_exam_weight: Entry,
}

impl CourseTarget {
    pub fn new(pass_grade: impl Into<Entry>, final_exam_weight: impl Into<Entry>) -> Self {
        Self {
            pass_grade: pass_grade.into(),
            final_exam_weight: final_exam_weight.into(),
        }
    }
}

/// A course as loaded from a course file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Human-readable course name.
    #[serde(default)]
    pub name: Option<String>,
    /// Assignments in the order they were listed.
    #[serde(default)]
    pub records: Vec<AssignmentRecord>,
    /// Pass grade and final exam weight.
    pub target: CourseTarget,
}
