//! Graduation aggregator
//!
//! Repeat resolution, credit/AU totals, GPA and the final verdict.

use crate::core::models::{Classification, DeclaredPrograms, PlannedCourse};
use crate::core::sections::Section;
use crate::core::substitution::SubstitutionIndex;
use std::collections::BTreeMap;
use std::fmt;

/// Degree-wide graduation thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraduationPolicy {
    /// Minimum total credit
    pub min_credit: f32,
    /// Minimum total activity units
    pub min_au: u32,
    /// Minimum GPA
    pub min_gpa: f32,
    /// Minimum GPA when early graduation is requested
    pub early_graduation_min_gpa: f32,
    /// Credit cap on major/double-major shared courses
    pub double_count_cap: f32,
}

impl Default for GraduationPolicy {
    fn default() -> Self {
        Self {
            min_credit: 138.0,
            min_au: 4,
            min_gpa: 2.0,
            early_graduation_min_gpa: 3.0,
            double_count_cap: crate::core::classifier::DOUBLE_COUNT_CREDIT_CAP,
        }
    }
}

impl GraduationPolicy {
    /// GPA floor that applies to `programs`
    #[must_use]
    pub const fn gpa_floor(&self, programs: &DeclaredPrograms) -> f32 {
        if programs.early_graduation {
            self.early_graduation_min_gpa
        } else {
            self.min_gpa
        }
    }
}

fn mark_unrecognized(course: &mut PlannedCourse) {
    crate::debug!("{} superseded; marked unrecognized", course.key());
    course.classification = Some(Classification::Unrecognized);
}

/// Resolve repeated attempts
///
/// For each code only the chronologically latest non-excluded attempt stays
/// countable. Then an original taken after a strictly earlier non-excluded
/// attempt of one of its substitutes is treated as a repeat. The reverse
/// order (original first, substitute later) is left alone.
pub fn resolve_repeats(courses: &mut [PlannedCourse], substitutions: &SubstitutionIndex) {
    let mut latest: BTreeMap<&str, usize> = BTreeMap::new();
    for (i, course) in courses.iter().enumerate() {
        if course.is_excluded() {
            continue;
        }
        latest
            .entry(course.course.code.as_str())
            .and_modify(|best| {
                if course.when() > courses[*best].when() {
                    *best = i;
                }
            })
            .or_insert(i);
    }
    let keep: Vec<usize> = latest.into_values().collect();

    let superseded: Vec<usize> = courses
        .iter()
        .enumerate()
        .filter(|(i, c)| !c.is_excluded() && !keep.contains(i))
        .map(|(i, _)| i)
        .collect();

    let repeats_of_substitute: Vec<usize> = courses
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_excluded())
        .filter(|(_, original)| {
            let substitutes = substitutions.substitutes_of(&original.course.code);
            !substitutes.is_empty()
                && courses.iter().any(|s| {
                    !s.is_excluded()
                        && substitutes.contains(&s.course.code)
                        && s.when() < original.when()
                })
        })
        .map(|(i, _)| i)
        .collect();

    for i in superseded.into_iter().chain(repeats_of_substitute) {
        mark_unrecognized(&mut courses[i]);
    }
}

/// Credit and activity-unit sums
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// Total credit
    pub credit: f32,
    /// Total activity units
    pub au: u32,
}

/// Sum credit and AU over countable courses
#[must_use]
pub fn totals(courses: &[PlannedCourse]) -> Totals {
    courses
        .iter()
        .filter(|c| c.is_countable())
        .fold(Totals::default(), |acc, c| Totals {
            credit: acc.credit + c.course.credit,
            au: acc.au + c.course.au,
        })
}

/// Credit-weighted GPA over countable courses with a grade-point value
///
/// Returns `None` when no countable course carries a point value.
#[must_use]
pub fn gpa(courses: &[PlannedCourse]) -> Option<f32> {
    let (points, credit) = courses
        .iter()
        .filter(|c| c.is_countable())
        .filter_map(|c| c.grade.points().map(|p| (p * c.course.credit, c.course.credit)))
        .fold((0.0_f32, 0.0_f32), |(p, w), (cp, cw)| (p + cp, w + cw));

    (credit > 0.0).then(|| points / credit)
}

/// One graduation condition that is not met
#[derive(Debug, Clone, PartialEq)]
pub enum FailedCheck {
    /// A required section is not fulfilled
    Section(String),
    /// Total credit below the minimum
    Credit {
        /// Achieved
        actual: f32,
        /// Required
        required: f32,
    },
    /// Total AU below the minimum
    Au {
        /// Achieved
        actual: u32,
        /// Required
        required: u32,
    },
    /// GPA below the floor, or no graded course
    Gpa {
        /// Achieved
        actual: Option<f32>,
        /// Required
        required: f32,
    },
    /// No advanced major, individually designed major, double major or minor
    Specialization,
}

impl fmt::Display for FailedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section(id) => write!(f, "section {id} not fulfilled"),
            Self::Credit { actual, required } => {
                write!(f, "credit {actual} below {required}")
            }
            Self::Au { actual, required } => write!(f, "AU {actual} below {required}"),
            Self::Gpa {
                actual: Some(actual),
                required,
            } => write!(f, "GPA {actual:.2} below {required:.2}"),
            Self::Gpa {
                actual: None,
                required,
            } => write!(f, "no graded courses (GPA {required:.2} required)"),
            Self::Specialization => f.write_str("no specialization declared"),
        }
    }
}

/// Aggregate figures and the graduation verdict
#[derive(Debug, Clone, PartialEq)]
pub struct GraduationSummary {
    /// Credit and AU totals
    pub totals: Totals,
    /// Credit-weighted GPA
    pub gpa: Option<f32>,
    /// Every unmet condition, in check order
    pub failed: Vec<FailedCheck>,
}

impl GraduationSummary {
    /// Whether every graduation condition holds
    #[must_use]
    pub fn can_graduate(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Combine section fulfillment and degree-wide thresholds into a verdict
///
/// # Arguments
/// * `courses` - Classified courses after repeat resolution
/// * `sections` - Built sections
/// * `programs` - Declared programs
/// * `policy` - Thresholds to apply
///
/// # Returns
/// A summary whose `failed` list is empty iff graduation is possible
#[must_use]
pub fn verdict(
    courses: &[PlannedCourse],
    sections: &[Section],
    programs: &DeclaredPrograms,
    policy: &GraduationPolicy,
) -> GraduationSummary {
    let totals = totals(courses);
    let gpa = gpa(courses);
    let gpa_floor = policy.gpa_floor(programs);

    let mut failed: Vec<FailedCheck> = sections
        .iter()
        .filter(|s| s.kind.counts_for_graduation() && !s.fulfilled)
        .map(|s| FailedCheck::Section(s.id.clone()))
        .collect();

    if totals.credit < policy.min_credit {
        failed.push(FailedCheck::Credit {
            actual: totals.credit,
            required: policy.min_credit,
        });
    }
    if totals.au < policy.min_au {
        failed.push(FailedCheck::Au {
            actual: totals.au,
            required: policy.min_au,
        });
    }
    if gpa.is_none_or(|g| g < gpa_floor) {
        failed.push(FailedCheck::Gpa {
            actual: gpa,
            required: gpa_floor,
        });
    }
    if !programs.has_specialization() {
        failed.push(FailedCheck::Specialization);
    }

    GraduationSummary {
        totals,
        gpa,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Grade, SubstitutionRule, Term};

    fn planned(code: &str, credit: f32, year: u32, term: Term, grade: Grade) -> PlannedCourse {
        let course = Course::new(
            code.to_string(),
            code.to_string(),
            "CS".to_string(),
            String::new(),
            credit,
        );
        PlannedCourse::new(course, year, term, grade)
    }

    fn programs_with_minor() -> DeclaredPrograms {
        let mut p = DeclaredPrograms::new("CS".to_string(), 2022);
        p.minors.push("MAS".to_string());
        p
    }

    #[test]
    fn test_latest_attempt_kept() {
        let mut courses = vec![
            planned("CS.101", 3.0, 2021, Term::Fall, Grade::DZero),
            planned("CS.101", 3.0, 2022, Term::Spring, Grade::AZero),
            planned("CS.102", 3.0, 2021, Term::Fall, Grade::BZero),
        ];

        resolve_repeats(&mut courses, &SubstitutionIndex::default());

        assert_eq!(courses[0].classification, Some(Classification::Unrecognized));
        assert_eq!(courses[1].classification, None);
        assert!((totals(&courses).credit - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_failed_retake_only_later_counts() {
        let mut courses = vec![
            planned("CS.101", 3.0, 2021, Term::Spring, Grade::F),
            planned("CS.101", 3.0, 2021, Term::Fall, Grade::BPlus),
        ];

        resolve_repeats(&mut courses, &SubstitutionIndex::default());

        assert_eq!(courses[1].classification, None);
        assert!((totals(&courses).credit - 3.0).abs() < f32::EPSILON);
        assert!(gpa(&courses).is_some_and(|g| (g - 3.3).abs() < 1e-4));
    }

    #[test]
    fn test_substitute_taken_first_makes_original_a_repeat() {
        let index =
            SubstitutionIndex::build(&[SubstitutionRule::new("CS.A".into(), "CS.B".into(), 2010)]);
        let mut courses = vec![
            planned("CS.B", 3.0, 2021, Term::Spring, Grade::AZero),
            planned("CS.A", 3.0, 2021, Term::Fall, Grade::AZero),
        ];

        resolve_repeats(&mut courses, &index);

        assert_eq!(courses[0].classification, None);
        assert_eq!(courses[1].classification, Some(Classification::Unrecognized));
    }

    #[test]
    fn test_original_first_is_not_a_repeat() {
        let index =
            SubstitutionIndex::build(&[SubstitutionRule::new("CS.A".into(), "CS.B".into(), 2010)]);
        let mut courses = vec![
            planned("CS.A", 3.0, 2021, Term::Spring, Grade::AZero),
            planned("CS.B", 3.0, 2021, Term::Fall, Grade::AZero),
        ];

        resolve_repeats(&mut courses, &index);

        assert!(courses.iter().all(|c| c.classification.is_none()));
    }

    #[test]
    fn test_gpa_skips_pass_fail_but_totals_keep_them() {
        let courses = vec![
            planned("CS.1", 3.0, 2021, Term::Fall, Grade::APlus),
            planned("CS.2", 1.0, 2021, Term::Fall, Grade::S),
            planned("CS.3", 3.0, 2021, Term::Fall, Grade::W),
        ];

        assert!((totals(&courses).credit - 4.0).abs() < f32::EPSILON);
        assert!(gpa(&courses).is_some_and(|g| (g - 4.3).abs() < 1e-4));
        assert_eq!(gpa(&courses[1..]), None);
    }

    #[test]
    fn test_verdict_credit_boundary() {
        let policy = GraduationPolicy::default();
        let programs = programs_with_minor();
        let mut course = planned("CS.1", 137.0, 2021, Term::Fall, Grade::AZero);
        course.course.au = 4;

        let summary = verdict(std::slice::from_ref(&course), &[], &programs, &policy);
        assert!(!summary.can_graduate());
        assert_eq!(
            summary.failed,
            vec![FailedCheck::Credit {
                actual: 137.0,
                required: 138.0
            }]
        );

        course.course.credit = 138.0;
        let summary = verdict(std::slice::from_ref(&course), &[], &programs, &policy);
        assert!(summary.can_graduate());
    }

    #[test]
    fn test_verdict_gpa_and_specialization() {
        let policy = GraduationPolicy::default();
        let mut programs = DeclaredPrograms::new("CS".to_string(), 2022);
        programs.early_graduation = true;
        let mut course = planned("CS.1", 140.0, 2021, Term::Fall, Grade::BMinus);
        course.course.au = 4;

        let summary = verdict(&[course], &[], &programs, &policy);

        assert_eq!(summary.failed.len(), 2);
        assert!(matches!(
            summary.failed[0],
            FailedCheck::Gpa { required, .. } if (required - 3.0).abs() < f32::EPSILON
        ));
        assert_eq!(summary.failed[1], FailedCheck::Specialization);
    }
}
