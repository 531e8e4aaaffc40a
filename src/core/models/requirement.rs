//! Requirement definitions and their evaluated state

use super::{Course, CourseKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Rule-set type tag: which degree-requirement category a rule set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    /// Basic required courses
    BasicRequired,
    /// Basic elective courses
    BasicElective,
    /// Mandatory general courses
    MandatoryGeneral,
    /// Humanities and society electives
    HumanitiesSocietyElective,
    /// Primary major (department-specific)
    Major,
    /// Double major (department-specific)
    DoubleMajor,
    /// Minor (department-specific)
    Minor,
    /// Advanced major (department-specific, keyed by the primary major)
    AdvancedMajor,
    /// Individually designed major
    IndividuallyDesignedMajor,
    /// Research
    Research,
}

impl RequirementType {
    /// Whether rule sets of this type are keyed by department
    #[must_use]
    pub const fn is_department_scoped(self) -> bool {
        matches!(
            self,
            Self::Major | Self::DoubleMajor | Self::Minor | Self::AdvancedMajor | Self::Research
        )
    }
}

impl fmt::Display for RequirementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BasicRequired => "basic_required",
            Self::BasicElective => "basic_elective",
            Self::MandatoryGeneral => "mandatory_general",
            Self::HumanitiesSocietyElective => "humanities_society_elective",
            Self::Major => "major",
            Self::DoubleMajor => "double_major",
            Self::Minor => "minor",
            Self::AdvancedMajor => "advanced_major",
            Self::IndividuallyDesignedMajor => "individually_designed_major",
            Self::Research => "research",
        };
        f.write_str(s)
    }
}

/// How a requirement's achieved value is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Number of counted courses
    MinCourses,
    /// Sum of counted credits
    #[default]
    MinCredits,
    /// Sum of counted activity units
    MinAu,
    /// Number of distinct target tags matched across counted courses
    MinTagsAmong,
}

/// Department reference inside a course condition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepartmentRef {
    /// A literal department code
    Named(String),
    /// The department the current pass evaluates (`$DEPARTMENT`)
    Target,
    /// Any department the student has not declared a program in (`$UNAFFILIATED`)
    Unaffiliated,
}

impl DepartmentRef {
    const TARGET: &'static str = "$DEPARTMENT";
    const UNAFFILIATED: &'static str = "$UNAFFILIATED";
}

impl From<String> for DepartmentRef {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::TARGET => Self::Target,
            Self::UNAFFILIATED => Self::Unaffiliated,
            _ => Self::Named(value),
        }
    }
}

impl From<DepartmentRef> for String {
    fn from(value: DepartmentRef) -> Self {
        match value {
            DepartmentRef::Named(name) => name,
            DepartmentRef::Target => DepartmentRef::TARGET.to_string(),
            DepartmentRef::Unaffiliated => DepartmentRef::UNAFFILIATED.to_string(),
        }
    }
}

/// Pass-level facts a condition may refer to
#[derive(Debug, Clone, Copy)]
pub struct ConditionScope<'a> {
    /// Department argument of the current pass
    pub department: Option<&'a str>,
    /// Every department the student declared a program in
    pub program_departments: &'a BTreeSet<String>,
}

/// One eligibility condition. Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCondition {
    /// Accepted course codes (substitution-aware)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codes: Option<BTreeSet<String>>,
    /// Accepted catalog categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeSet<String>>,
    /// Accepted departments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<DepartmentRef>>,
    /// Tags the course must all carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    /// Accepted first significant digits of the course number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digits: Option<BTreeSet<u8>>,
}

impl CourseCondition {
    /// Condition matching a single department reference
    #[must_use]
    pub fn department(department: DepartmentRef) -> Self {
        Self {
            departments: Some(vec![department]),
            ..Self::default()
        }
    }

    /// Condition matching a set of course codes
    #[must_use]
    pub fn codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: Some(codes.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Check the condition against a course
    ///
    /// # Arguments
    /// * `course` - Catalog record to test
    /// * `equivalent_codes` - The course's code plus every code it is interchangeable with
    /// * `scope` - Pass-level department facts
    #[must_use]
    pub fn matches(
        &self,
        course: &Course,
        equivalent_codes: &BTreeSet<String>,
        scope: &ConditionScope<'_>,
    ) -> bool {
        if let Some(codes) = &self.codes {
            let hit = codes.contains(&course.code) || !codes.is_disjoint(equivalent_codes);
            if !hit {
                return false;
            }
        }

        if let Some(categories) = &self.categories {
            if !categories.contains(&course.category) {
                return false;
            }
        }

        if let Some(departments) = &self.departments {
            let hit = departments.iter().any(|d| match d {
                DepartmentRef::Named(name) => *name == course.department,
                DepartmentRef::Target => scope.department == Some(course.department.as_str()),
                DepartmentRef::Unaffiliated => {
                    !scope.program_departments.contains(&course.department)
                }
            });
            if !hit {
                return false;
            }
        }

        if let Some(tags) = &self.tags {
            if !course.has_all_tags(tags) {
                return false;
            }
        }

        if let Some(digits) = &self.digits {
            if !course.number_digit().is_some_and(|d| digits.contains(&d)) {
                return false;
            }
        }

        true
    }
}

/// Attribute a sub-constraint caps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Cap on credits
    MaxCredits,
    /// Cap on number of courses
    MaxCourses,
    /// Cap on activity units
    MaxAu,
}

impl ConstraintKind {
    /// Contribution of one course to the capped attribute
    #[must_use]
    pub fn measure(self, course: &Course) -> f32 {
        match self {
            Self::MaxCredits => course.credit,
            Self::MaxCourses => 1.0,
            #[allow(clippy::cast_precision_loss)]
            Self::MaxAu => course.au as f32,
        }
    }
}

/// A cap over the courses already accepted into the same requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubConstraint {
    /// Capped attribute
    pub kind: ConstraintKind,
    /// Which accepted courses the cap applies to
    #[serde(default)]
    pub condition: CourseCondition,
    /// Cap value
    pub limit: f32,
}

/// A requirement definition together with its evaluated state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Display text (e.g., "Major credits")
    #[serde(default)]
    pub description: String,

    /// Evaluation kind
    #[serde(default)]
    pub kind: RequirementKind,

    /// Target tags for [`RequirementKind::MinTagsAmong`]
    #[serde(default)]
    pub target_tags: BTreeSet<String>,

    /// Eligibility predicate as a disjunction; empty accepts every course
    #[serde(default)]
    pub conditions: Vec<CourseCondition>,

    /// Caps checked against already accepted courses
    #[serde(default)]
    pub constraints: Vec<SubConstraint>,

    /// Target value; `None` means trivially fulfilled
    #[serde(default)]
    pub threshold: Option<f32>,

    /// Computed achieved value
    #[serde(default)]
    pub current_value: f32,

    /// Headline figure of its section
    #[serde(default)]
    pub is_key: bool,

    /// Secondary headline figure of its section
    #[serde(default)]
    pub is_secondary_key: bool,

    /// Courses that were counted toward this requirement
    #[serde(default)]
    pub counted_courses: Vec<CourseKey>,
}

impl Requirement {
    /// Create a requirement with no predicate and no constraints
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        kind: RequirementKind,
        threshold: Option<f32>,
    ) -> Self {
        Self {
            description: description.into(),
            kind,
            target_tags: BTreeSet::new(),
            conditions: Vec::new(),
            constraints: Vec::new(),
            threshold,
            current_value: 0.0,
            is_key: false,
            is_secondary_key: false,
            counted_courses: Vec::new(),
        }
    }

    /// Builder-style condition setter (appends to the disjunction)
    #[must_use]
    pub fn with_condition(mut self, condition: CourseCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Builder-style sub-constraint setter
    #[must_use]
    pub fn with_constraint(mut self, constraint: SubConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Builder-style target tag setter
    #[must_use]
    pub fn with_target_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the achieved value meets the threshold
    #[must_use]
    pub fn fulfilled(&self) -> bool {
        self.threshold.is_none_or(|t| self.current_value >= t)
    }

    /// Whether the eligibility predicate accepts a course
    #[must_use]
    pub fn accepts(
        &self,
        course: &Course,
        equivalent_codes: &BTreeSet<String>,
        scope: &ConditionScope<'_>,
    ) -> bool {
        self.conditions.is_empty()
            || self
                .conditions
                .iter()
                .any(|c| c.matches(course, equivalent_codes, scope))
    }

    /// Clear evaluated state before a new pass
    pub fn reset(&mut self) {
        self.current_value = 0.0;
        self.counted_courses.clear();
    }
}
