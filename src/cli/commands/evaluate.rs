//! Evaluate command handler
//!
//! Loads a plan and a rule book, runs the simulation and prints sections by
//! band followed by the graduation verdict.

use grad_planner::config::Config;
use grad_planner::core::models::PlannedCourse;
use grad_planner::core::planner::{load_plan, load_rule_book};
use grad_planner::core::report::{describe_programs, requirement_progress, section_headline};
use grad_planner::core::sections::{group_sections, Section};
use grad_planner::core::simulator::{simulate, SimulationOutcome, StudentPlan};
use grad_planner::{error, info, verbose};
use std::path::{Path, PathBuf};

/// A plan together with its evaluation
pub struct Evaluation {
    /// Plan with final classifications
    pub plan: StudentPlan,
    /// Requirements, sections and verdict
    pub outcome: SimulationOutcome,
}

/// Run the evaluate command.
///
/// # Arguments
/// * `plan_path` - Plan TOML file
/// * `rules` - Rule-book TOML file; falls back to config `rules_file`
/// * `year` - Reference-year override
/// * `config` - Loaded configuration
pub fn run(plan_path: &Path, rules: Option<&Path>, year: Option<u32>, config: &Config) {
    match evaluate_plan(plan_path, rules, year, config) {
        Ok(evaluation) => print_evaluation(&evaluation),
        Err(err) => {
            error!("Evaluation failed for {}: {err}", plan_path.display());
            eprintln!("✗ {err}");
            std::process::exit(1);
        }
    }
}

fn rules_path(rules: Option<&Path>, config: &Config) -> Result<PathBuf, String> {
    match rules {
        Some(path) => Ok(path.to_path_buf()),
        None if !config.paths.rules_file.is_empty() => Ok(PathBuf::from(&config.paths.rules_file)),
        None => Err("No rule book given: pass --rules or set `rules_file` in config".to_string()),
    }
}

/// Load inputs and run the simulation
///
/// # Errors
/// Returns a message if the plan or rule book cannot be loaded
pub fn evaluate_plan(
    plan_path: &Path,
    rules: Option<&Path>,
    year: Option<u32>,
    config: &Config,
) -> Result<Evaluation, String> {
    let rules_path = rules_path(rules, config)?;
    let book = load_rule_book(&rules_path).map_err(|e| e.to_string())?;
    let mut plan = load_plan(plan_path).map_err(|e| e.to_string())?;

    if let Some(year) = year {
        info!(
            "Reference year overridden: {} -> {year}",
            plan.programs.reference_year
        );
        plan.programs.reference_year = year;
    }

    let outcome = simulate(&mut plan, &book, &config.graduation_policy());
    Ok(Evaluation { plan, outcome })
}

fn print_course(course: &PlannedCourse) {
    let classification = course
        .classification
        .as_ref()
        .map_or_else(|| "unassigned".to_string(), ToString::to_string);
    println!(
        "      {:<12} {:<5} {:>4} {:<6} {:>5.1}  {classification}",
        course.course.code,
        course.grade.to_string(),
        course.year,
        course.term.to_string(),
        course.course.credit
    );
    if !course.possible_classifications.is_empty() {
        let possible: Vec<String> = course
            .possible_classifications
            .iter()
            .map(ToString::to_string)
            .collect();
        verbose!("        eligible for: {}", possible.join(", "));
    }
}

fn print_section(section: &Section) {
    let status = if section.fulfilled { "✓" } else { "✗" };
    println!(
        "  {status} {} [{}] ({:.1} credit)",
        section.title,
        section.id,
        section.total_credit()
    );
    if let Some(headline) = section_headline(section) {
        println!("    {headline}");
    }
    for r in &section.requirements {
        let mark = if r.fulfilled() { "✓" } else { "✗" };
        println!("      {mark} {}: {}", r.description, requirement_progress(r));
        if !r.counted_courses.is_empty() {
            let counted: Vec<String> =
                r.counted_courses.iter().map(ToString::to_string).collect();
            verbose!("          counted: {}", counted.join(", "));
        }
    }
    for course in &section.courses {
        print_course(course);
    }
}

fn print_evaluation(evaluation: &Evaluation) {
    let Evaluation { plan, outcome } = evaluation;

    println!("\n=== {} ({}) ===", describe_programs(&plan.programs), plan.programs.reference_year);

    for band in group_sections(&outcome.sections) {
        let visible: Vec<&Section> = band
            .sections
            .into_iter()
            .filter(|s| !s.courses.is_empty() || !s.requirements.is_empty())
            .collect();
        if visible.is_empty() {
            continue;
        }
        println!("\n{}", band.band);
        for section in visible {
            print_section(section);
        }
    }

    let summary = &outcome.summary;
    println!("\n=== Summary ===");
    println!("Credit: {:.1}", summary.totals.credit);
    println!("AU: {}", summary.totals.au);
    println!(
        "GPA: {}",
        summary.gpa.map_or_else(|| "-".to_string(), |g| format!("{g:.2}"))
    );

    if summary.can_graduate() {
        println!("✓ Graduation requirements met");
    } else {
        println!("✗ Graduation requirements not met:");
        for check in &summary.failed {
            println!("    - {check}");
        }
    }
}
