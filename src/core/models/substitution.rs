//! Substitution rule model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Declares that completing `substitute` may stand in for `original`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    /// Code of the course being substituted
    pub original: String,

    /// Code of the course that stands in for it
    pub substitute: String,

    /// First year the rule applies (inclusive)
    pub start_year: u32,

    /// Last year the rule applies (inclusive); `None` means unbounded
    #[serde(default)]
    pub end_year: Option<u32>,

    /// Department the rule is scoped to; `None` applies to everyone
    #[serde(default)]
    pub department: Option<String>,
}

impl SubstitutionRule {
    /// Create an unscoped, open-ended rule
    #[must_use]
    pub const fn new(original: String, substitute: String, start_year: u32) -> Self {
        Self {
            original,
            substitute,
            start_year,
            end_year: None,
            department: None,
        }
    }

    /// Whether the validity window contains `year`
    #[must_use]
    pub fn is_valid_in(&self, year: u32) -> bool {
        year >= self.start_year && self.end_year.is_none_or(|end| year <= end)
    }

    /// Whether the rule applies to a student in `year` with the given program departments
    #[must_use]
    pub fn applies(&self, year: u32, departments: &BTreeSet<String>) -> bool {
        self.is_valid_in(year)
            && self
                .department
                .as_ref()
                .is_none_or(|d| departments.contains(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> SubstitutionRule {
        SubstitutionRule::new("CS.101".to_string(), "CS.102".to_string(), 2015)
    }

    #[test]
    fn test_window_inclusive() {
        let mut r = rule();
        r.end_year = Some(2020);

        assert!(!r.is_valid_in(2014));
        assert!(r.is_valid_in(2015));
        assert!(r.is_valid_in(2020));
        assert!(!r.is_valid_in(2021));
    }

    #[test]
    fn test_unbounded_window() {
        assert!(rule().is_valid_in(2099));
    }

    #[test]
    fn test_department_scope() {
        let mut r = rule();
        r.department = Some("EE".to_string());

        let cs: BTreeSet<String> = ["CS".to_string()].into_iter().collect();
        let cs_ee: BTreeSet<String> = ["CS".to_string(), "EE".to_string()].into_iter().collect();

        assert!(!r.applies(2020, &cs));
        assert!(r.applies(2020, &cs_ee));
        assert!(rule().applies(2020, &cs));
    }
}
