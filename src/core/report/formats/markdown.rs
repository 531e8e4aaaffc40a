//! Markdown report generator
//!
//! Produces plain Markdown tables that render in GitHub, GitLab and VS Code.

use crate::core::report::{
    requirement_progress, section_headline, ReportContext, ReportGenerator,
};
use crate::core::sections::Section;
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let summary = &ctx.outcome.summary;
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{plan_name}}", ctx.plan_name);
        output = output.replace("{{programs}}", &ctx.programs_summary());
        output = output.replace(
            "{{reference_year}}",
            &ctx.plan.programs.reference_year.to_string(),
        );
        output = output.replace("{{total_credit}}", &format!("{:.1}", summary.totals.credit));
        output = output.replace("{{min_credit}}", &format!("{:.1}", ctx.policy.min_credit));
        output = output.replace("{{total_au}}", &summary.totals.au.to_string());
        output = output.replace("{{min_au}}", &ctx.policy.min_au.to_string());
        output = output.replace("{{gpa}}", &ctx.gpa_display());
        output = output.replace("{{min_gpa}}", &format!("{:.2}", ctx.gpa_floor()));
        output = output.replace("{{verdict}}", ctx.verdict_label());
        output = output.replace("{{failed_checks}}", &Self::generate_failed_checks(ctx));
        output = output.replace("{{sections}}", &Self::generate_sections(ctx));

        output
    }

    /// Bullet list of unmet conditions (empty when eligible)
    fn generate_failed_checks(ctx: &ReportContext) -> String {
        let mut list = String::new();
        let failed = ctx.failed_checks();
        if failed.is_empty() {
            return list;
        }

        list.push_str("### Unmet conditions\n\n");
        for check in failed {
            let _ = writeln!(list, "- {check}");
        }
        list
    }

    /// Every band, then each of its sections
    fn generate_sections(ctx: &ReportContext) -> String {
        let mut md = String::new();

        for band in ctx.bands() {
            let _ = writeln!(md, "## {}\n", band.band);
            for section in band.sections {
                Self::write_section(&mut md, section);
            }
        }

        md
    }

    fn write_section(md: &mut String, section: &Section) {
        let status = if section.fulfilled { "✓" } else { "✗" };
        let _ = writeln!(md, "### {status} {} (`{}`)\n", section.title, section.id);
        if let Some(headline) = section_headline(section) {
            let _ = writeln!(md, "**Headline:** {headline}\n");
        }

        if !section.requirements.is_empty() {
            md.push_str("| Requirement | Progress | Met |\n|---|---|---|\n");
            for r in &section.requirements {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} |",
                    r.description,
                    requirement_progress(r),
                    if r.fulfilled() { "yes" } else { "no" }
                );
            }
            md.push('\n');
        }

        if !section.courses.is_empty() {
            md.push_str("| Code | Title | Term | Grade | Credit |\n|---|---|---|---|---|\n");
            for c in &section.courses {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} {} | {} | {:.1} |",
                    c.course.code, c.course.title, c.year, c.term, c.grade, c.course.credit
                );
            }
            let _ = writeln!(md, "\nSection credit: {:.1}\n", section.total_credit());
        }
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
