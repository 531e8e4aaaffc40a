//! End-to-end evaluation of a student plan
//!
//! fetch rules -> substitution index -> classification passes -> repeat
//! resolution -> sections -> verdict. Every call starts from a fresh reset, so
//! re-running after an input change is always a full recomputation.

use crate::core::graduation::{resolve_repeats, verdict, GraduationPolicy, GraduationSummary};
use crate::core::models::{DeclaredPrograms, PlannedCourse};
use crate::core::orchestrator::{evaluation_steps, Orchestrator};
use crate::core::rules::{RequirementMap, RequirementSource};
use crate::core::sections::{build_sections, Section};
use crate::core::substitution::SubstitutionIndex;

/// A student's declared programs and ordered course list
#[derive(Debug, Clone, PartialEq)]
pub struct StudentPlan {
    /// Declared programs and reference year
    pub programs: DeclaredPrograms,
    /// Planned courses; order is significant (typically chronological)
    pub courses: Vec<PlannedCourse>,
}

impl StudentPlan {
    /// Create a plan
    #[must_use]
    pub const fn new(programs: DeclaredPrograms, courses: Vec<PlannedCourse>) -> Self {
        Self { programs, courses }
    }
}

/// Everything one evaluation produces besides the mutated course list
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Evaluated requirement lists
    pub requirements: RequirementMap,
    /// Ordered sections
    pub sections: Vec<Section>,
    /// Totals, GPA and verdict
    pub summary: GraduationSummary,
}

/// Fetch the requirement lists every evaluation step needs
///
/// Restricted and inclusive passes of the same program share one list.
#[must_use]
pub fn fetch_requirements(
    programs: &DeclaredPrograms,
    source: &impl RequirementSource,
) -> RequirementMap {
    let mut requirements = RequirementMap::new();
    for step in evaluation_steps(programs) {
        if !requirements.contains_key(&step.key) {
            let list = source.requirements(&step.key, programs.reference_year);
            crate::debug!("{}: {} requirement(s) loaded", step.key, list.len());
            requirements.insert(step.key, list);
        }
    }
    requirements
}

/// Run the full pipeline over `plan`
///
/// The plan's courses are updated in place with their final classification
/// and possible-classifications log.
///
/// # Arguments
/// * `plan` - Programs and courses to evaluate
/// * `source` - Requirement and substitution store
/// * `policy` - Graduation thresholds and the double-count cap
///
/// # Returns
/// Evaluated requirements, sections and the graduation summary
pub fn simulate(
    plan: &mut StudentPlan,
    source: &impl RequirementSource,
    policy: &GraduationPolicy,
) -> SimulationOutcome {
    let programs = &plan.programs;
    let year = programs.reference_year;

    let rules = source.substitution_rules(year, &programs.departments());
    let substitutions = SubstitutionIndex::build(&rules);
    crate::debug!(
        "{} substitution rule(s), {} equivalence group(s)",
        rules.len(),
        substitutions.groups().len()
    );

    let mut requirements = fetch_requirements(programs, source);

    Orchestrator::new(programs, &substitutions)
        .with_double_count_cap(policy.double_count_cap)
        .run(&mut plan.courses, &mut requirements);

    resolve_repeats(&mut plan.courses, &substitutions);

    let sections = build_sections(&plan.courses, &requirements, programs);
    let summary = verdict(&plan.courses, &sections, programs, policy);

    if summary.can_graduate() {
        crate::info!(
            "Graduation possible: {} credit, {} AU",
            summary.totals.credit,
            summary.totals.au
        );
    } else {
        crate::info!("Graduation not possible: {} unmet condition(s)", summary.failed.len());
        for check in &summary.failed {
            crate::debug!("  {check}");
        }
    }

    SimulationOutcome {
        requirements,
        sections,
        summary,
    }
}
