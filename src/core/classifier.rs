//! Requirement classifier
//!
//! Folds one requirement over the planned-course arena: decides which courses
//! count toward it, stamps their classification, and computes the achieved
//! value. Input order is significant and is never rearranged here.

use crate::core::models::{
    Classification, ConditionScope, PlannedCourse, Requirement, RequirementKind,
};
use crate::core::substitution::SubstitutionIndex;
use std::collections::BTreeSet;

/// Maximum credits a major/double-major pair may share
pub const DOUBLE_COUNT_CREDIT_CAP: f32 = 6.0;

const EPSILON: f32 = 1e-4;

/// Evaluation-mode flags for one classifier call
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    /// Classification stamped on newly claimed courses
    pub target: &'a Classification,
    /// Department argument of the pass (resolves `$DEPARTMENT`)
    pub department: Option<&'a str>,
    /// Admit courses claimed by the complementary major/double-major program
    pub cross_department: bool,
    /// Departments whose courses are never eligible in this pass
    pub excluded_departments: &'a BTreeSet<String>,
    /// Every department the student declared a program in
    pub program_departments: &'a BTreeSet<String>,
    /// Substitution lookups for code matching
    pub substitutions: &'a SubstitutionIndex,
    /// Stop scanning once the threshold is reached
    pub early_exit: bool,
    /// Shared-credit cap for major/double-major promotion
    pub double_count_cap: f32,
}

/// How a course relates to the pass's target classification
#[derive(Debug, Clone, PartialEq, Eq)]
enum Claim {
    /// Unassigned; will be stamped
    Fresh,
    /// Already belongs to the target's program
    Owned,
    /// Claimed by the complementary program; may be promoted for this department
    Promote(String),
}

fn claim_for(current: Option<&Classification>, ctx: &PassContext<'_>) -> Option<Claim> {
    let Some(current) = current else {
        return Some(Claim::Fresh);
    };
    if current == ctx.target {
        return Some(Claim::Owned);
    }

    match (ctx.target, current) {
        (Classification::Major, Classification::MajorAndDoubleMajor(_)) => Some(Claim::Owned),
        (Classification::DoubleMajor(d), Classification::MajorAndDoubleMajor(c)) if c == d => {
            Some(Claim::Owned)
        }
        (Classification::Major, Classification::DoubleMajor(d)) if ctx.cross_department => {
            Some(Claim::Promote(d.clone()))
        }
        (Classification::DoubleMajor(d), Classification::Major) if ctx.cross_department => {
            Some(Claim::Promote(d.clone()))
        }
        _ => None,
    }
}

/// Credits already shared between the primary major and the double major of `department`
#[must_use]
pub fn double_counted_credit(courses: &[PlannedCourse], department: &str) -> f32 {
    courses
        .iter()
        .filter(|c| {
            matches!(
                &c.classification,
                Some(Classification::MajorAndDoubleMajor(d)) if d == department
            )
        })
        .map(|c| c.course.credit)
        .sum()
}

fn violates_constraints(
    courses: &[PlannedCourse],
    accepted: &[usize],
    candidate: &PlannedCourse,
    requirement: &Requirement,
    ctx: &PassContext<'_>,
    scope: &ConditionScope<'_>,
) -> bool {
    requirement.constraints.iter().any(|constraint| {
        let candidate_codes = ctx.substitutions.equivalents_of(&candidate.course.code);
        if !constraint
            .condition
            .matches(&candidate.course, &candidate_codes, scope)
        {
            return false;
        }

        // Compared before adding the candidate: the course that crosses the cap is still admitted.
        let subtotal: f32 = accepted
            .iter()
            .map(|&i| &courses[i])
            .filter(|c| {
                let codes = ctx.substitutions.equivalents_of(&c.course.code);
                constraint.condition.matches(&c.course, &codes, scope)
            })
            .map(|c| constraint.kind.measure(&c.course))
            .sum();

        subtotal + EPSILON >= constraint.limit
    })
}

/// Evaluate one requirement against the planned courses.
///
/// Resets the requirement's evaluated state, then scans `courses` in order,
/// stamping newly claimed courses with `ctx.target` and promoting complementary
/// major/double-major courses within the shared-credit cap.
///
/// # Returns
/// The requirement's achieved value (also stored in `current_value`)
#[allow(clippy::cast_precision_loss)]
pub fn classify_requirement(
    courses: &mut [PlannedCourse],
    requirement: &mut Requirement,
    ctx: &PassContext<'_>,
) -> f32 {
    requirement.reset();

    let scope = ConditionScope {
        department: ctx.department,
        program_departments: ctx.program_departments,
    };
    let mut accepted: Vec<usize> = Vec::new();
    let mut matched_tags: BTreeSet<String> = BTreeSet::new();
    let mut value = 0.0_f32;

    for i in 0..courses.len() {
        let candidate = &courses[i];
        if candidate.is_excluded() {
            continue;
        }

        let Some(claim) = claim_for(candidate.classification.as_ref(), ctx) else {
            continue;
        };

        if ctx.excluded_departments.contains(&candidate.course.department) {
            continue;
        }

        let codes = ctx.substitutions.equivalents_of(&candidate.course.code);
        if !requirement.accepts(&candidate.course, &codes, &scope) {
            continue;
        }

        let tag_overlap: Vec<String> = if requirement.kind == RequirementKind::MinTagsAmong {
            let overlap: Vec<String> = candidate
                .course
                .tags
                .intersection(&requirement.target_tags)
                .cloned()
                .collect();
            if overlap.is_empty() {
                continue;
            }
            overlap
        } else {
            Vec::new()
        };

        if ctx.early_exit && requirement.threshold.is_some_and(|t| value + EPSILON >= t) {
            break;
        }

        if violates_constraints(courses, &accepted, candidate, requirement, ctx, &scope) {
            continue;
        }

        match claim {
            Claim::Fresh => {
                let course = &mut courses[i];
                course.classification = Some(ctx.target.clone());
                course.note_possible(ctx.target);
            }
            Claim::Owned => {}
            Claim::Promote(department) => {
                let shared = double_counted_credit(courses, &department);
                let course = &mut courses[i];
                if shared + course.course.credit > ctx.double_count_cap + EPSILON {
                    crate::debug!(
                        "{} not double counted for {department}: {shared} credits already shared",
                        course.course.code
                    );
                    continue;
                }
                let promoted = Classification::MajorAndDoubleMajor(department);
                course.note_possible(ctx.target);
                course.note_possible(&promoted);
                course.classification = Some(promoted);
            }
        }

        let course = &courses[i];
        value = match requirement.kind {
            RequirementKind::MinCourses => value + 1.0,
            RequirementKind::MinCredits => value + course.course.credit,
            RequirementKind::MinAu => value + course.course.au as f32,
            RequirementKind::MinTagsAmong => {
                matched_tags.extend(tag_overlap);
                matched_tags.len() as f32
            }
        };
        requirement.counted_courses.push(course.key());
        accepted.push(i);
    }

    requirement.current_value = value;
    value
}
