//! Plan and rule-book loading
//!
//! Both inputs are TOML files. A plan file declares the student's programs,
//! the catalog records it references and the ordered enrollments; a rule-book
//! file holds requirement rule sets and substitution rules.

pub mod plan_file;

pub use plan_file::{EnrollmentRecord, PlanFile};

use crate::core::rules::RuleBook;
use crate::core::simulator::StudentPlan;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a plan or a rule book
#[derive(Debug, Error)]
pub enum PlanLoadError {
    /// The file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for its schema
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// An enrollment names a code missing from the catalog
    #[error("Enrollment references unknown course '{code}'")]
    UnknownCourse {
        /// Offending code
        code: String,
    },

    /// The catalog lists the same code twice
    #[error("Duplicate catalog entry '{code}'")]
    DuplicateCourse {
        /// Offending code
        code: String,
    },
}

fn read(path: &Path) -> Result<String, PlanLoadError> {
    fs::read_to_string(path).map_err(|source| PlanLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a plan from TOML text
///
/// # Errors
/// Returns an error if the TOML is invalid, a catalog code repeats, or an
/// enrollment references a code the catalog lacks
pub fn parse_plan(toml_str: &str) -> Result<StudentPlan, PlanLoadError> {
    let file: PlanFile = toml::from_str(toml_str)?;
    file.into_plan()
}

/// Load a plan file
///
/// # Arguments
/// * `path` - Path to the plan TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or fails [`parse_plan`]
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<StudentPlan, PlanLoadError> {
    let path = path.as_ref();
    let plan = parse_plan(&read(path)?)?;
    crate::info!(
        "Loaded plan {}: major {}, {} enrollment(s)",
        path.display(),
        plan.programs.major,
        plan.courses.len()
    );
    Ok(plan)
}

/// Parse a rule book from TOML text
///
/// # Errors
/// Returns an error if the TOML is invalid
pub fn parse_rule_book(toml_str: &str) -> Result<RuleBook, PlanLoadError> {
    Ok(toml::from_str(toml_str)?)
}

/// Load a rule-book file
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid rule book
pub fn load_rule_book<P: AsRef<Path>>(path: P) -> Result<RuleBook, PlanLoadError> {
    let path = path.as_ref();
    let book = parse_rule_book(&read(path)?)?;
    crate::info!(
        "Loaded rule book {}: {} rule set(s), {} substitution(s)",
        path.display(),
        book.rule_sets.len(),
        book.substitutions.len()
    );
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Classification, RequirementKind, RequirementType, Term};

    const PLAN: &str = r#"
[programs]
major = "CS"
double_majors = ["EE"]
reference_year = 2022

[[catalog]]
code = "CS.330"
title = "Operating Systems"
department = "CS"
category = "major-elective"
credit = 3.0

[[catalog]]
code = "HSS.101"
department = "HSS"
credit = 3.0
tags = ["social"]

[[enrollments]]
code = "HSS.101"
year = 2021
term = "fall"
grade = "B+"

[[enrollments]]
code = "CS.330"
year = 2022
term = "spring"
grade = "A"
specified_classification = { kind = "double_major", department = "EE" }
"#;

    #[test]
    fn test_parse_plan_keeps_enrollment_order() {
        let plan = parse_plan(PLAN).expect("plan parses");

        assert_eq!(plan.programs.double_majors, vec!["EE".to_string()]);
        assert_eq!(plan.courses.len(), 2);
        assert_eq!(plan.courses[0].course.code, "HSS.101");
        assert_eq!(plan.courses[1].term, Term::Spring);
        assert_eq!(
            plan.courses[1].specified_classification,
            Some(Classification::DoubleMajor("EE".into()))
        );
        assert!(plan.courses[0].course.tags.contains("social"));
    }

    #[test]
    fn test_unknown_course() {
        let text = PLAN.replace("code = \"HSS.101\"\nyear", "code = \"XX.1\"\nyear");
        let err = parse_plan(&text).expect_err("unknown code rejected");
        assert!(matches!(err, PlanLoadError::UnknownCourse { ref code } if code == "XX.1"));
    }

    #[test]
    fn test_duplicate_catalog_entry() {
        let text = PLAN.replace("code = \"HSS.101\"\ndepartment", "code = \"CS.330\"\ndepartment");
        let err = parse_plan(&text).expect_err("duplicate rejected");
        assert!(matches!(err, PlanLoadError::DuplicateCourse { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_plan("[programs").expect_err("invalid toml");
        assert!(matches!(err, PlanLoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_plan("/nonexistent/plan.toml").expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/plan.toml"));
    }

    #[test]
    fn test_parse_rule_book() {
        let book = parse_rule_book(
            r#"
[[rule_sets]]
year = 2016
requirement_type = "major"
department = "CS"

[[rule_sets.requirements]]
description = "Major credits"
kind = "min_credits"
threshold = 40.0
is_key = true

[[rule_sets.requirements.conditions]]
departments = ["$DEPARTMENT"]

[[substitutions]]
original = "CS.101"
substitute = "CS.102"
start_year = 2010
"#,
        )
        .expect("rule book parses");

        assert_eq!(book.rule_sets.len(), 1);
        assert_eq!(book.rule_sets[0].requirement_type, RequirementType::Major);
        assert_eq!(book.rule_sets[0].requirements[0].kind, RequirementKind::MinCredits);
        assert!(book.rule_sets[0].requirements[0].is_key);
        assert_eq!(book.substitutions[0].end_year, None);
    }
}
