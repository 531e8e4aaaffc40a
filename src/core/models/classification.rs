//! Degree-requirement classification of a planned course

use serde::{Deserialize, Serialize};
use std::fmt;

/// The degree-requirement bucket a planned course is counted toward.
///
/// An unassigned course is represented as `Option::<Classification>::None`
/// by its owner. Program variants that can be declared more than once carry
/// the department they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "department", rename_all = "snake_case")]
pub enum Classification {
    /// Basic required course
    BasicRequired,
    /// Basic elective course
    BasicElective,
    /// Mandatory general course
    MandatoryGeneral,
    /// Humanities and society elective
    HumanitiesSocietyElective,
    /// Primary major course
    Major,
    /// Double major course of the given department
    DoubleMajor(String),
    /// Course counted for both the primary major and the double major of the given department
    MajorAndDoubleMajor(String),
    /// Minor course of the given department
    Minor(String),
    /// Advanced major course
    AdvancedMajor,
    /// Individually designed major course
    IndividuallyDesignedMajor,
    /// Research course
    Research,
    /// Free elective
    OtherElective,
    /// Not recognized toward graduation (failed, withdrawn, superseded)
    Unrecognized,
}

impl Classification {
    /// Whether this classification counts toward the primary major
    #[must_use]
    pub const fn is_major_family(&self) -> bool {
        matches!(self, Self::Major | Self::MajorAndDoubleMajor(_))
    }

    /// Whether this classification counts toward the double major of `department`
    #[must_use]
    pub fn is_double_major_of(&self, department: &str) -> bool {
        match self {
            Self::DoubleMajor(d) | Self::MajorAndDoubleMajor(d) => d == department,
            _ => false,
        }
    }

    /// Department carried by the variant, if any
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        match self {
            Self::DoubleMajor(d) | Self::MajorAndDoubleMajor(d) | Self::Minor(d) => Some(d),
            _ => None,
        }
    }

    /// Human-readable label used by the CLI and reports
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::BasicRequired => "Basic Required".to_string(),
            Self::BasicElective => "Basic Elective".to_string(),
            Self::MandatoryGeneral => "Mandatory General".to_string(),
            Self::HumanitiesSocietyElective => "Humanities & Society Elective".to_string(),
            Self::Major => "Major".to_string(),
            Self::DoubleMajor(d) => format!("Double Major ({d})"),
            Self::MajorAndDoubleMajor(d) => format!("Major + Double Major ({d})"),
            Self::Minor(d) => format!("Minor ({d})"),
            Self::AdvancedMajor => "Advanced Major".to_string(),
            Self::IndividuallyDesignedMajor => "Individually Designed Major".to_string(),
            Self::Research => "Research".to_string(),
            Self::OtherElective => "Other Elective".to_string(),
            Self::Unrecognized => "Unrecognized".to_string(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_family() {
        assert!(Classification::Major.is_major_family());
        assert!(Classification::MajorAndDoubleMajor("EE".into()).is_major_family());
        assert!(!Classification::DoubleMajor("EE".into()).is_major_family());
        assert!(!Classification::Minor("CS".into()).is_major_family());
    }

    #[test]
    fn test_double_major_of() {
        let both = Classification::MajorAndDoubleMajor("EE".into());
        assert!(both.is_double_major_of("EE"));
        assert!(!both.is_double_major_of("ME"));
        assert!(Classification::DoubleMajor("EE".into()).is_double_major_of("EE"));
        assert!(!Classification::Major.is_double_major_of("EE"));
    }

    #[test]
    fn test_label_carries_department() {
        assert_eq!(
            Classification::MajorAndDoubleMajor("EE".into()).to_string(),
            "Major + Double Major (EE)"
        );
        assert_eq!(Classification::Minor("MAS".into()).department(), Some("MAS"));
        assert_eq!(Classification::Research.department(), None);
    }

    #[test]
    fn test_deserialize_tagged() {
        #[derive(Deserialize)]
        struct Wrapper {
            c: Classification,
        }

        let w: Wrapper = toml::from_str("c = { kind = \"double_major\", department = \"EE\" }")
            .expect("valid classification");
        assert_eq!(w.c, Classification::DoubleMajor("EE".into()));

        let w: Wrapper = toml::from_str("c = { kind = \"research\" }").expect("valid unit variant");
        assert_eq!(w.c, Classification::Research);
    }
}
