//! Integration tests for plan and rule-book loading

use grad_planner::core::graduation::{FailedCheck, GraduationPolicy};
use grad_planner::core::models::Classification;
use grad_planner::core::planner::{load_plan, load_rule_book, PlanLoadError};
use grad_planner::core::simulator::simulate;
use std::fs;
use tempfile::TempDir;

const PLAN_PATH: &str = "samples/plan.toml";
const RULES_PATH: &str = "samples/rules.toml";

#[test]
fn test_load_sample_plan() {
    let plan = load_plan(PLAN_PATH).expect("sample plan loads");

    assert_eq!(plan.programs.major, "CS");
    assert_eq!(plan.programs.minors, vec!["MAS".to_string()]);
    assert_eq!(plan.programs.reference_year, 2022);
    assert_eq!(plan.courses.len(), 15);
    assert_eq!(plan.courses[0].course.code, "MAS.101");
    assert_eq!(plan.courses[0].course.title, "Calculus I");
}

#[test]
fn test_load_sample_rule_book() {
    let book = load_rule_book(RULES_PATH).expect("sample rules load");

    assert_eq!(book.rule_sets.len(), 7);
    assert_eq!(book.substitutions.len(), 1);
}

#[test]
fn test_sample_evaluation() {
    let mut plan = load_plan(PLAN_PATH).expect("sample plan loads");
    let book = load_rule_book(RULES_PATH).expect("sample rules load");

    let outcome = simulate(&mut plan, &book, &GraduationPolicy::default());

    for section in &outcome.sections {
        if section.kind.counts_for_graduation() {
            assert!(section.fulfilled, "{} should be fulfilled", section.id);
        }
    }

    let failed_attempt = plan
        .courses
        .iter()
        .find(|c| c.course.code == "CS.206")
        .expect("CS.206 enrolled");
    assert_eq!(
        failed_attempt.classification,
        Some(Classification::Unrecognized)
    );

    assert_eq!(outcome.summary.totals.au, 4);
    assert_eq!(
        outcome.summary.failed,
        vec![FailedCheck::Credit {
            actual: 36.0,
            required: 138.0
        }]
    );
}

#[test]
fn test_load_plan_from_temp_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("plan.toml");
    fs::write(
        &path,
        r#"
[programs]
major = "EE"
reference_year = 2021

[[catalog]]
code = "EE.201"
department = "EE"
credit = 3.0

[[enrollments]]
code = "EE.201"
year = 2021
term = "winter"
grade = "W"
"#,
    )
    .expect("write plan");

    let plan = load_plan(&path).expect("plan loads");
    assert_eq!(plan.courses.len(), 1);
    assert!(plan.courses[0].is_excluded());
}

#[test]
fn test_unknown_enrollment_code() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("plan.toml");
    fs::write(
        &path,
        r#"
[programs]
major = "EE"
reference_year = 2021

[[enrollments]]
code = "EE.999"
year = 2021
term = "fall"
grade = "A0"
"#,
    )
    .expect("write plan");

    let err = load_plan(&path).expect_err("unknown code");
    assert!(matches!(err, PlanLoadError::UnknownCourse { .. }));
    assert!(err.to_string().contains("EE.999"));
}

#[test]
fn test_unknown_grade_is_a_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("plan.toml");
    fs::write(
        &path,
        r#"
[programs]
major = "EE"
reference_year = 2021

[[catalog]]
code = "EE.201"
department = "EE"

[[enrollments]]
code = "EE.201"
year = 2021
term = "fall"
grade = "Z"
"#,
    )
    .expect("write plan");

    assert!(matches!(load_plan(&path), Err(PlanLoadError::Parse(_))));
}

#[test]
fn test_missing_rule_book() {
    let dir = TempDir::new().expect("temp dir");
    let err = load_rule_book(dir.path().join("absent.toml")).expect_err("missing file");
    assert!(matches!(err, PlanLoadError::Io { .. }));
}
