//! HTML report generator
//!
//! Renders a self-contained HTML page (embedded CSS, no scripts) through the
//! askama template `templates/report.html`.

use crate::core::report::{
    requirement_progress, section_headline, ReportContext, ReportGenerator,
};
use crate::core::sections::Section;
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

struct RequirementRow {
    description: String,
    progress: String,
    fulfilled: bool,
    headline: bool,
}

struct CourseRow {
    code: String,
    title: String,
    when: String,
    grade: String,
    credit: String,
    classification: String,
}

struct SectionView {
    id: String,
    title: String,
    fulfilled: bool,
    credit: String,
    headline: String,
    requirements: Vec<RequirementRow>,
    courses: Vec<CourseRow>,
}

struct BandView {
    title: String,
    sections: Vec<SectionView>,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate {
    plan_name: String,
    programs: String,
    reference_year: u32,
    total_credit: String,
    min_credit: String,
    total_au: u32,
    min_au: u32,
    gpa: String,
    min_gpa: String,
    verdict: String,
    can_graduate: bool,
    failed: Vec<String>,
    bands: Vec<BandView>,
}

impl SectionView {
    fn from_section(section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            title: section.title.clone(),
            fulfilled: section.fulfilled,
            credit: format!("{:.1}", section.total_credit()),
            headline: section_headline(section).unwrap_or_default(),
            requirements: section
                .requirements
                .iter()
                .map(|r| RequirementRow {
                    description: r.description.clone(),
                    progress: requirement_progress(r),
                    fulfilled: r.fulfilled(),
                    headline: r.is_key || r.is_secondary_key,
                })
                .collect(),
            courses: section
                .courses
                .iter()
                .map(|c| CourseRow {
                    code: c.course.code.clone(),
                    title: c.course.title.clone(),
                    when: format!("{} {}", c.year, c.term),
                    grade: c.grade.to_string(),
                    credit: format!("{:.1}", c.course.credit),
                    classification: c
                        .classification
                        .as_ref()
                        .map_or_else(|| "unassigned".to_string(), ToString::to_string),
                })
                .collect(),
        }
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn template(ctx: &ReportContext) -> ReportTemplate {
        let summary = &ctx.outcome.summary;
        ReportTemplate {
            plan_name: ctx.plan_name.to_string(),
            programs: ctx.programs_summary(),
            reference_year: ctx.plan.programs.reference_year,
            total_credit: format!("{:.1}", summary.totals.credit),
            min_credit: format!("{:.1}", ctx.policy.min_credit),
            total_au: summary.totals.au,
            min_au: ctx.policy.min_au,
            gpa: ctx.gpa_display(),
            min_gpa: format!("{:.2}", ctx.gpa_floor()),
            verdict: ctx.verdict_label().to_string(),
            can_graduate: summary.can_graduate(),
            failed: ctx.failed_checks(),
            bands: ctx
                .bands()
                .into_iter()
                .map(|band| BandView {
                    title: band.band.title().to_string(),
                    sections: band
                        .sections
                        .into_iter()
                        .map(SectionView::from_section)
                        .collect(),
                })
                .collect(),
        }
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::template(ctx).render()?)
    }
}
