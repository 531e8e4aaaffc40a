//! Declared program set of a student

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Programs a student has declared, plus the reference year selecting the rule vintage
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeclaredPrograms {
    /// Primary major department (e.g., "CS")
    pub major: String,

    /// Double major departments, in declaration order
    #[serde(default)]
    pub double_majors: Vec<String>,

    /// Minor departments, in declaration order
    #[serde(default)]
    pub minors: Vec<String>,

    /// Advanced major declared
    #[serde(default)]
    pub advanced_major: bool,

    /// Individually designed major declared
    #[serde(default)]
    pub individually_designed_major: bool,

    /// Early graduation requested (raises the GPA floor)
    #[serde(default)]
    pub early_graduation: bool,

    /// Year used to pick which vintage of requirement rules applies
    pub reference_year: u32,
}

impl DeclaredPrograms {
    /// Create a program set with only a primary major
    #[must_use]
    pub const fn new(major: String, reference_year: u32) -> Self {
        Self {
            major,
            double_majors: Vec::new(),
            minors: Vec::new(),
            advanced_major: false,
            individually_designed_major: false,
            early_graduation: false,
            reference_year,
        }
    }

    /// Every department the student declared a program in
    #[must_use]
    pub fn departments(&self) -> BTreeSet<String> {
        std::iter::once(&self.major)
            .chain(&self.double_majors)
            .chain(&self.minors)
            .filter(|d| !d.is_empty())
            .cloned()
            .collect()
    }

    /// Whether any specialization beyond the primary major is declared
    #[must_use]
    pub fn has_specialization(&self) -> bool {
        self.advanced_major
            || self.individually_designed_major
            || !self.double_majors.is_empty()
            || !self.minors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_departments_dedup() {
        let mut programs = DeclaredPrograms::new("CS".to_string(), 2022);
        programs.double_majors.push("EE".to_string());
        programs.minors.push("EE".to_string());
        programs.minors.push("MAS".to_string());

        let deps: Vec<String> = programs.departments().into_iter().collect();
        assert_eq!(deps, vec!["CS", "EE", "MAS"]);
    }

    #[test]
    fn test_specialization() {
        let mut programs = DeclaredPrograms::new("CS".to_string(), 2022);
        assert!(!programs.has_specialization());

        programs.minors.push("MAS".to_string());
        assert!(programs.has_specialization());

        let mut advanced = DeclaredPrograms::new("CS".to_string(), 2022);
        advanced.advanced_major = true;
        assert!(advanced.has_specialization());
    }
}
