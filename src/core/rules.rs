//! Requirement rule sets and the store interface the engine reads them through

use crate::core::models::{Requirement, RequirementType, SubstitutionRule};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifies the requirement list of one category (and department, for program rules)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleKey {
    /// Category tag
    pub requirement_type: RequirementType,
    /// Program department, for department-scoped categories
    pub department: Option<String>,
}

impl RuleKey {
    /// Create a rule key
    #[must_use]
    pub const fn new(requirement_type: RequirementType, department: Option<String>) -> Self {
        Self {
            requirement_type,
            department,
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.department {
            Some(d) => write!(f, "{}[{d}]", self.requirement_type),
            None => write!(f, "{}", self.requirement_type),
        }
    }
}

/// Requirement lists of one evaluation run, keyed by category/department
pub type RequirementMap = BTreeMap<RuleKey, Vec<Requirement>>;

/// A vintage of requirements for one category (and department)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// First year this vintage applies to
    pub year: u32,
    /// Category tag
    pub requirement_type: RequirementType,
    /// Program department, for department-scoped categories
    #[serde(default)]
    pub department: Option<String>,
    /// Ordered requirement definitions
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

/// Read interface of the requirement and substitution store
pub trait RequirementSource {
    /// Fresh copies of the requirements applying to `key` in `year`.
    /// Missing data yields an empty list.
    fn requirements(&self, key: &RuleKey, year: u32) -> Vec<Requirement>;

    /// Substitution rules valid in `year` for a student with `departments`
    fn substitution_rules(&self, year: u32, departments: &BTreeSet<String>)
        -> Vec<SubstitutionRule>;
}

/// In-memory rule store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleBook {
    /// Every requirement vintage
    #[serde(default)]
    pub rule_sets: Vec<RuleSet>,
    /// Every substitution rule
    #[serde(default)]
    pub substitutions: Vec<SubstitutionRule>,
}

impl RuleBook {
    /// Create an empty rule book
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rule_sets: Vec::new(),
            substitutions: Vec::new(),
        }
    }

    /// Add a rule set
    pub fn add_rule_set(&mut self, rule_set: RuleSet) {
        self.rule_sets.push(rule_set);
    }

    /// Add a substitution rule
    pub fn add_substitution(&mut self, rule: SubstitutionRule) {
        self.substitutions.push(rule);
    }

    /// The latest vintage for `key` whose year does not exceed `year`
    ///
    /// The department only takes part in the match for department-scoped
    /// types. A department written on a basic or general rule set is ignored.
    #[must_use]
    pub fn rule_set_for(&self, key: &RuleKey, year: u32) -> Option<&RuleSet> {
        let scoped = key.requirement_type.is_department_scoped();
        self.rule_sets
            .iter()
            .filter(|rs| {
                rs.requirement_type == key.requirement_type
                    && (!scoped || rs.department == key.department)
                    && rs.year <= year
            })
            .max_by_key(|rs| rs.year)
    }
}

impl RequirementSource for RuleBook {
    fn requirements(&self, key: &RuleKey, year: u32) -> Vec<Requirement> {
        self.rule_set_for(key, year)
            .map(|rs| rs.requirements.clone())
            .unwrap_or_default()
    }

    fn substitution_rules(
        &self,
        year: u32,
        departments: &BTreeSet<String>,
    ) -> Vec<SubstitutionRule> {
        self.substitutions
            .iter()
            .filter(|r| r.applies(year, departments))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RequirementKind;

    fn rule_set(year: u32, department: Option<&str>, threshold: f32) -> RuleSet {
        RuleSet {
            year,
            requirement_type: RequirementType::Major,
            department: department.map(ToString::to_string),
            requirements: vec![Requirement::new(
                "Major credits",
                RequirementKind::MinCredits,
                Some(threshold),
            )],
        }
    }

    #[test]
    fn test_latest_vintage_not_after_year() {
        let mut book = RuleBook::new();
        book.add_rule_set(rule_set(2016, Some("CS"), 40.0));
        book.add_rule_set(rule_set(2020, Some("CS"), 45.0));
        book.add_rule_set(rule_set(2024, Some("CS"), 50.0));

        let key = RuleKey::new(RequirementType::Major, Some("CS".to_string()));

        assert_eq!(book.requirements(&key, 2022)[0].threshold, Some(45.0));
        assert_eq!(book.requirements(&key, 2016)[0].threshold, Some(40.0));
        assert!(book.requirements(&key, 2015).is_empty());
    }

    #[test]
    fn test_department_keyed() {
        let mut book = RuleBook::new();
        book.add_rule_set(rule_set(2016, Some("CS"), 40.0));

        let ee = RuleKey::new(RequirementType::Major, Some("EE".to_string()));
        assert!(book.requirements(&ee, 2022).is_empty());
    }

    #[test]
    fn test_unscoped_type_ignores_department() {
        let mut book = RuleBook::new();
        let mut basic = rule_set(2016, Some("HSS"), 9.0);
        basic.requirement_type = RequirementType::BasicRequired;
        book.add_rule_set(basic);

        let key = RuleKey::new(RequirementType::BasicRequired, None);
        assert_eq!(book.requirements(&key, 2022)[0].threshold, Some(9.0));

        let mut minor = rule_set(2016, Some("MAS"), 18.0);
        minor.requirement_type = RequirementType::Minor;
        book.add_rule_set(minor);
        let unnamed = RuleKey::new(RequirementType::Minor, None);
        assert!(book.requirements(&unnamed, 2022).is_empty());
    }

    #[test]
    fn test_requirements_are_fresh_copies() {
        let mut book = RuleBook::new();
        book.add_rule_set(rule_set(2016, Some("CS"), 40.0));
        let key = RuleKey::new(RequirementType::Major, Some("CS".to_string()));

        let mut first = book.requirements(&key, 2022);
        first[0].current_value = 99.0;

        assert!(book.requirements(&key, 2022)[0].current_value.abs() < f32::EPSILON);
    }

    #[test]
    fn test_substitution_filtering() {
        let mut book = RuleBook::new();
        let mut scoped = SubstitutionRule::new("EE.101".into(), "EE.102".into(), 2010);
        scoped.department = Some("EE".into());
        let mut expired = SubstitutionRule::new("CS.101".into(), "CS.102".into(), 2010);
        expired.end_year = Some(2012);
        book.add_substitution(scoped);
        book.add_substitution(expired);
        book.add_substitution(SubstitutionRule::new("MAS.101".into(), "MAS.102".into(), 2010));

        let cs: BTreeSet<String> = ["CS".to_string()].into_iter().collect();
        let rules = book.substitution_rules(2022, &cs);

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].original, "MAS.101");
    }

    #[test]
    fn test_rule_key_display() {
        let key = RuleKey::new(RequirementType::DoubleMajor, Some("EE".to_string()));
        assert_eq!(key.to_string(), "double_major[EE]");
        let key = RuleKey::new(RequirementType::BasicRequired, None);
        assert_eq!(key.to_string(), "basic_required");
    }
}
