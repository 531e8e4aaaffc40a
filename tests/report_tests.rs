//! Integration tests for report rendering

use grad_planner::core::graduation::GraduationPolicy;
use grad_planner::core::planner::{load_plan, load_rule_book};
use grad_planner::core::report::{
    HtmlReporter, MarkdownReporter, PdfReporter, ReportContext, ReportGenerator,
};
use grad_planner::core::simulator::{simulate, SimulationOutcome, StudentPlan};
use std::fs;
use tempfile::TempDir;

fn evaluated_sample() -> (StudentPlan, SimulationOutcome) {
    let mut plan = load_plan("samples/plan.toml").expect("sample plan loads");
    let book = load_rule_book("samples/rules.toml").expect("sample rules load");
    let outcome = simulate(&mut plan, &book, &GraduationPolicy::default());
    (plan, outcome)
}

#[test]
fn test_markdown_report() {
    let (plan, outcome) = evaluated_sample();
    let policy = GraduationPolicy::default();
    let ctx = ReportContext::new("plan", &plan, &outcome, &policy);

    let md = MarkdownReporter::new().render(&ctx).expect("markdown renders");

    assert!(md.starts_with("# Graduation Report: plan"));
    assert!(md.contains("Major CS, Minor MAS"));
    assert!(md.contains("Not eligible"));
    assert!(md.contains("### Unmet conditions"));
    assert!(md.contains("credit 36 below 138"));
    assert!(md.contains("`MAJOR_CS`"));
    assert!(md.contains("`UNCLASSIFIED`"));
    assert!(!md.contains("{{"), "every placeholder is replaced");
}

#[test]
fn test_markdown_section_headlines() {
    let (plan, outcome) = evaluated_sample();
    let policy = GraduationPolicy::default();
    let ctx = ReportContext::new("plan", &plan, &outcome, &policy);

    let md = MarkdownReporter::new().render(&ctx).expect("markdown renders");

    let major = md
        .lines()
        .skip_while(|line| !line.contains("`MAJOR_CS`"))
        .find(|line| line.starts_with("**Headline:**"))
        .expect("major section headline");
    assert!(major.starts_with("**Headline:** Major credits "));
    assert!(major.contains(", Major required "));
    assert!(md.contains("**Headline:** Physical education AU 4.0 / 4.0"));
}

#[test]
fn test_empty_sections_are_omitted() {
    let (plan, outcome) = evaluated_sample();
    let policy = GraduationPolicy::default();
    let ctx = ReportContext::new("plan", &plan, &outcome, &policy);

    // No override moves a course into other electives
    let md = MarkdownReporter::new().render(&ctx).expect("markdown renders");
    assert!(!md.contains("`OTHER_ELECTIVE`"));
    assert!(ctx
        .bands()
        .iter()
        .all(|band| !band.sections.is_empty()));
}

#[test]
fn test_html_report() {
    let (plan, outcome) = evaluated_sample();
    let policy = GraduationPolicy::default();
    let ctx = ReportContext::new("plan", &plan, &outcome, &policy);

    let html = HtmlReporter::new().render(&ctx).expect("html renders");

    assert!(html.contains("<title>Graduation Report: plan</title>"));
    assert!(html.contains("MINOR_MAS"));
    assert!(html.contains("verdict-fail"));
    assert!(html.contains("CS.330"));
    assert!(html.contains("<p class=\"headline\">Major credits "));
}

#[test]
fn test_pdf_render_returns_source_html() {
    let (plan, outcome) = evaluated_sample();
    let policy = GraduationPolicy::default();
    let ctx = ReportContext::new("plan", &plan, &outcome, &policy);

    let pdf_source = PdfReporter::new().render(&ctx).expect("renders");
    let html = HtmlReporter::new().render(&ctx).expect("renders");
    assert_eq!(pdf_source, html);
}

#[test]
fn test_generate_writes_file() {
    let (plan, outcome) = evaluated_sample();
    let policy = GraduationPolicy::default();
    let ctx = ReportContext::new("plan", &plan, &outcome, &policy);
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("plan_report.md");

    MarkdownReporter::new()
        .generate(&ctx, &path)
        .expect("report written");

    let written = fs::read_to_string(&path).expect("report readable");
    assert!(written.contains("Graduation Report"));
}
