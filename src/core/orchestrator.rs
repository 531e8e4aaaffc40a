//! Classification orchestrator
//!
//! Runs the requirement classifier across every category in a fixed priority
//! order. The order is data ([`evaluation_steps`]), so it can be inspected and
//! enumerated by callers and tests.

use crate::core::classifier::{classify_requirement, PassContext, DOUBLE_COUNT_CREDIT_CAP};
use crate::core::graduation::resolve_repeats;
use crate::core::models::{Classification, DeclaredPrograms, PlannedCourse, RequirementType};
use crate::core::rules::{RequirementMap, RuleKey};
use crate::core::substitution::SubstitutionIndex;
use std::collections::BTreeSet;
use std::fmt;

/// Whether a program pass admits courses claimed by the complementary program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// Only unassigned courses and courses of the same program
    Restricted,
    /// Also complementary major/double-major courses (double counting)
    Inclusive,
}

/// One entry of the fixed evaluation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationStep {
    /// Which requirement list this step evaluates
    pub key: RuleKey,
    /// Restricted or inclusive
    pub mode: PassMode,
}

impl EvaluationStep {
    fn new(requirement_type: RequirementType, department: Option<String>, mode: PassMode) -> Self {
        Self {
            key: RuleKey::new(requirement_type, department),
            mode,
        }
    }

    /// Classification stamped on courses this step claims
    #[must_use]
    pub fn classification(&self) -> Classification {
        let department = self.key.department.clone().unwrap_or_default();
        match self.key.requirement_type {
            RequirementType::BasicRequired => Classification::BasicRequired,
            RequirementType::BasicElective => Classification::BasicElective,
            RequirementType::MandatoryGeneral => Classification::MandatoryGeneral,
            RequirementType::HumanitiesSocietyElective => {
                Classification::HumanitiesSocietyElective
            }
            RequirementType::Major => Classification::Major,
            RequirementType::DoubleMajor => Classification::DoubleMajor(department),
            RequirementType::Minor => Classification::Minor(department),
            RequirementType::AdvancedMajor => Classification::AdvancedMajor,
            RequirementType::IndividuallyDesignedMajor => {
                Classification::IndividuallyDesignedMajor
            }
            RequirementType::Research => Classification::Research,
        }
    }
}

impl fmt::Display for EvaluationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            PassMode::Restricted => write!(f, "{}", self.key),
            PassMode::Inclusive => write!(f, "{} (inclusive)", self.key),
        }
    }
}

/// The fixed evaluation order for a student's declared programs
///
/// research, advanced major, restricted program passes (major, double majors,
/// minors), inclusive program passes in the same order, individually designed
/// major, then the basic and general categories.
#[must_use]
pub fn evaluation_steps(programs: &DeclaredPrograms) -> Vec<EvaluationStep> {
    let major = Some(programs.major.clone());
    let mut steps = vec![EvaluationStep::new(
        RequirementType::Research,
        major.clone(),
        PassMode::Restricted,
    )];

    if programs.advanced_major {
        steps.push(EvaluationStep::new(
            RequirementType::AdvancedMajor,
            major.clone(),
            PassMode::Restricted,
        ));
    }

    for mode in [PassMode::Restricted, PassMode::Inclusive] {
        steps.push(EvaluationStep::new(RequirementType::Major, major.clone(), mode));
        for d in &programs.double_majors {
            steps.push(EvaluationStep::new(
                RequirementType::DoubleMajor,
                Some(d.clone()),
                mode,
            ));
        }
        for d in &programs.minors {
            steps.push(EvaluationStep::new(RequirementType::Minor, Some(d.clone()), mode));
        }
    }

    if programs.individually_designed_major {
        steps.push(EvaluationStep::new(
            RequirementType::IndividuallyDesignedMajor,
            None,
            PassMode::Restricted,
        ));
    }

    for requirement_type in [
        RequirementType::BasicRequired,
        RequirementType::BasicElective,
        RequirementType::MandatoryGeneral,
        RequirementType::HumanitiesSocietyElective,
    ] {
        steps.push(EvaluationStep::new(requirement_type, None, PassMode::Restricted));
    }

    steps
}

/// Reset every course before a run
///
/// Exclusion-grade courses are stamped unrecognized; every other course
/// becomes unassigned with an empty possible-classifications log.
pub fn reset_classifications(courses: &mut [PlannedCourse]) {
    for course in courses {
        course.possible_classifications.clear();
        course.classification = if course.is_excluded() {
            Some(Classification::Unrecognized)
        } else {
            None
        };
    }
}

/// Apply manual overrides on top of the computed classification.
/// Requirements are not recomputed. Exclusion-grade courses stay unrecognized.
pub fn apply_overrides(courses: &mut [PlannedCourse]) {
    for course in courses.iter_mut().filter(|c| !c.is_excluded()) {
        if let Some(specified) = &course.specified_classification {
            course.classification = Some(specified.clone());
        }
    }
}

/// Sequences classifier passes for one evaluation run
#[derive(Debug, Clone)]
pub struct Orchestrator<'a> {
    programs: &'a DeclaredPrograms,
    substitutions: &'a SubstitutionIndex,
    double_count_cap: f32,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator with the default shared-credit cap
    #[must_use]
    pub const fn new(programs: &'a DeclaredPrograms, substitutions: &'a SubstitutionIndex) -> Self {
        Self {
            programs,
            substitutions,
            double_count_cap: DOUBLE_COUNT_CREDIT_CAP,
        }
    }

    /// Override the major/double-major shared-credit cap
    #[must_use]
    pub const fn with_double_count_cap(mut self, cap: f32) -> Self {
        self.double_count_cap = cap;
        self
    }

    /// The evaluation order this orchestrator follows
    #[must_use]
    pub fn steps(&self) -> Vec<EvaluationStep> {
        evaluation_steps(self.programs)
    }

    /// Run a full classification pass over `courses`
    ///
    /// Starts from a fresh reset and marks superseded attempts unrecognized, so
    /// no pass can count them. Then evaluates every step's requirement list
    /// from `requirements` in order (missing lists are skipped) and applies
    /// manual overrides. Inclusive passes overwrite the values of the
    /// restricted pass for the same requirement objects.
    pub fn run(&self, courses: &mut [PlannedCourse], requirements: &mut RequirementMap) {
        reset_classifications(courses);
        resolve_repeats(courses, self.substitutions);

        let program_departments = self.programs.departments();
        let no_exclusions = BTreeSet::new();

        for step in self.steps() {
            let Some(list) = requirements.get_mut(&step.key) else {
                crate::debug!("{step}: no requirements");
                continue;
            };

            let target = step.classification();
            let excluded = if step.key.requirement_type
                == RequirementType::IndividuallyDesignedMajor
            {
                &program_departments
            } else {
                &no_exclusions
            };
            let ctx = PassContext {
                target: &target,
                department: step.key.department.as_deref(),
                cross_department: step.mode == PassMode::Inclusive,
                excluded_departments: excluded,
                program_departments: &program_departments,
                substitutions: self.substitutions,
                early_exit: step.key.requirement_type == RequirementType::AdvancedMajor,
                double_count_cap: self.double_count_cap,
            };

            for requirement in list.iter_mut() {
                let value = classify_requirement(courses, requirement, &ctx);
                crate::debug!(
                    "{step}: '{}' = {value} / {}",
                    requirement.description,
                    requirement
                        .threshold
                        .map_or_else(|| "-".to_string(), |t| t.to_string())
                );
            }
        }

        apply_overrides(courses);
    }
}
