//! Report generation for graduation simulations
//!
//! Renders an evaluated plan in Markdown, HTML or PDF. Every format walks the
//! same section bands from [`group_sections`], so they list identical content.

pub mod formats;

use crate::core::graduation::GraduationPolicy;
use crate::core::models::{DeclaredPrograms, Requirement};
use crate::core::sections::{group_sections, Section, SectionBand};
use crate::core::simulator::{SimulationOutcome, StudentPlan};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, PdfReporter, ReportFormat};

/// Data context for report generation
///
/// Aggregates everything a report needs so templates have one source of truth.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Name shown in the report title (typically the plan file stem)
    pub plan_name: &'a str,
    /// Evaluated plan (courses carry their final classification)
    pub plan: &'a StudentPlan,
    /// Requirements, sections and verdict
    pub outcome: &'a SimulationOutcome,
    /// Thresholds the verdict was computed against
    pub policy: &'a GraduationPolicy,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        plan_name: &'a str,
        plan: &'a StudentPlan,
        outcome: &'a SimulationOutcome,
        policy: &'a GraduationPolicy,
    ) -> Self {
        Self {
            plan_name,
            plan,
            outcome,
            policy,
        }
    }

    /// Section bands with at least one section that has courses or requirements
    #[must_use]
    pub fn bands(&self) -> Vec<SectionBand<'a>> {
        group_sections(&self.outcome.sections)
            .into_iter()
            .map(|mut band| {
                band.sections
                    .retain(|s| !s.courses.is_empty() || !s.requirements.is_empty());
                band
            })
            .filter(|band| !band.sections.is_empty())
            .collect()
    }

    /// One-line summary of the declared programs
    #[must_use]
    pub fn programs_summary(&self) -> String {
        describe_programs(&self.plan.programs)
    }

    /// "Eligible" or "Not eligible"
    #[must_use]
    pub fn verdict_label(&self) -> &'static str {
        if self.outcome.summary.can_graduate() {
            "Eligible"
        } else {
            "Not eligible"
        }
    }

    /// GPA to two decimals, or "-" without graded courses
    #[must_use]
    pub fn gpa_display(&self) -> String {
        self.outcome
            .summary
            .gpa
            .map_or_else(|| "-".to_string(), |g| format!("{g:.2}"))
    }

    /// GPA floor that applies to this plan
    #[must_use]
    pub const fn gpa_floor(&self) -> f32 {
        self.policy.gpa_floor(&self.plan.programs)
    }

    /// Unmet graduation conditions as display strings
    #[must_use]
    pub fn failed_checks(&self) -> Vec<String> {
        self.outcome
            .summary
            .failed
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// One-line description of a program set, e.g. `Major CS, Double major EE, Minor MAS`
#[must_use]
pub fn describe_programs(programs: &DeclaredPrograms) -> String {
    let mut parts = vec![format!("Major {}", programs.major)];
    if programs.advanced_major {
        parts.push("Advanced major".to_string());
    }
    if programs.individually_designed_major {
        parts.push("Individually designed major".to_string());
    }
    parts.extend(programs.double_majors.iter().map(|d| format!("Double major {d}")));
    parts.extend(programs.minors.iter().map(|d| format!("Minor {d}")));
    if programs.early_graduation {
        parts.push("Early graduation".to_string());
    }
    parts.join(", ")
}

/// Achieved value against threshold, e.g. `3.0 / 40.0`
#[must_use]
pub fn requirement_progress(requirement: &Requirement) -> String {
    requirement.threshold.map_or_else(
        || format!("{:.1}", requirement.current_value),
        |t| format!("{:.1} / {t:.1}", requirement.current_value),
    )
}

/// Key and secondary-key requirements of a section with their progress
///
/// `None` when the section flags neither.
#[must_use]
pub fn section_headline(section: &Section) -> Option<String> {
    let parts: Vec<String> = [section.key_requirement(), section.secondary_key_requirement()]
        .into_iter()
        .flatten()
        .map(|r| format!("{} {}", r.description, requirement_progress(r)))
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
