//! Report command handler
//!
//! Evaluates a plan and writes the result as Markdown, HTML or PDF.

use super::evaluate::{evaluate_plan, Evaluation};
use grad_planner::config::Config;
use grad_planner::core::report::{
    HtmlReporter, MarkdownReporter, PdfReporter, ReportContext, ReportFormat, ReportGenerator,
};
use grad_planner::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Options of one report run
pub struct ReportRequest<'a> {
    /// Plan TOML file
    pub plan: &'a Path,
    /// Rule-book TOML file; falls back to config `rules_file`
    pub rules: Option<&'a Path>,
    /// Explicit output path
    pub output: Option<&'a Path>,
    /// Format name (md, markdown, html, htm, pdf)
    pub format: &'a str,
    /// Reference-year override
    pub year: Option<u32>,
}

/// Run the report command.
pub fn run(request: &ReportRequest, config: &Config) {
    match generate_report(request, config) {
        Ok(path) => {
            println!("✓ Report generated: {}", path.display());
            info!("Report exported to: {}", path.display());
        }
        Err(err) => {
            error!("Report generation failed for {}: {err}", request.plan.display());
            eprintln!("✗ {err}");
            std::process::exit(1);
        }
    }
}

fn output_path(
    request: &ReportRequest,
    format: ReportFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    if let Some(output) = request.output {
        return Ok(output.to_path_buf());
    }

    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    let stem = plan_stem(request.plan);
    Ok(reports_dir.join(format!("{stem}_report.{}", format.extension())))
}

fn plan_stem(plan: &Path) -> &str {
    plan.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("plan")
}

fn write_report(
    evaluation: &Evaluation,
    request: &ReportRequest,
    format: ReportFormat,
    config: &Config,
    path: &Path,
) -> Result<(), String> {
    let policy = config.graduation_policy();
    let ctx = ReportContext::new(
        plan_stem(request.plan),
        &evaluation.plan,
        &evaluation.outcome,
        &policy,
    );

    let reporter: Box<dyn ReportGenerator> = match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Pdf => Box::new(PdfReporter::new()),
    };

    reporter
        .generate(&ctx, path)
        .map_err(|e| format!("Failed to generate {format} report: {e}"))
}

/// Evaluate and render
///
/// # Errors
/// Returns a message if the format is unknown, the inputs cannot be loaded,
/// or the report cannot be written
pub fn generate_report(request: &ReportRequest, config: &Config) -> Result<PathBuf, String> {
    let format = ReportFormat::from_str(request.format)
        .map_err(|e| format!("{e}. Use: markdown, html, or pdf"))?;

    let evaluation = evaluate_plan(request.plan, request.rules, request.year, config)?;
    let path = output_path(request, format, config)?;
    write_report(&evaluation, request, format, config, &path)?;

    Ok(path)
}
