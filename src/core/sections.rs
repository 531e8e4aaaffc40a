//! Section builder
//!
//! Turns classified courses and evaluated requirements into ordered display
//! sections, and groups sections into the bands shared by the CLI output and
//! every report format.

use crate::core::models::{
    Classification, DeclaredPrograms, PlannedCourse, Requirement, RequirementType,
};
use crate::core::rules::{RequirementMap, RuleKey};
use std::fmt;

/// Which bucket a section represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    /// Basic required courses
    BasicRequired,
    /// Basic elective courses
    BasicElective,
    /// Mandatory general courses
    MandatoryGeneral,
    /// Humanities and society electives
    HumanitiesSocietyElective,
    /// Research
    Research,
    /// Primary major
    Major,
    /// Advanced major
    AdvancedMajor,
    /// Individually designed major
    IndividuallyDesignedMajor,
    /// One double major
    DoubleMajor,
    /// One minor
    Minor,
    /// Free electives
    OtherElective,
    /// Unassigned and unrecognized courses
    Unclassified,
}

impl SectionKind {
    /// Identifier prefix of sections of this kind
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::BasicRequired => "BASIC_REQUIRED",
            Self::BasicElective => "BASIC_ELECTIVE",
            Self::MandatoryGeneral => "MANDATORY_GENERAL",
            Self::HumanitiesSocietyElective => "HUMANITIES_SOCIETY_ELECTIVE",
            Self::Research => "RESEARCH",
            Self::Major => "MAJOR",
            Self::AdvancedMajor => "ADVANCED_MAJOR",
            Self::IndividuallyDesignedMajor => "INDIVIDUALLY_DESIGNED_MAJOR",
            Self::DoubleMajor => "DOUBLE_MAJOR",
            Self::Minor => "MINOR",
            Self::OtherElective => "OTHER_ELECTIVE",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }

    /// Whether the section must be fulfilled for graduation
    #[must_use]
    pub const fn counts_for_graduation(self) -> bool {
        !matches!(self, Self::OtherElective | Self::Unclassified)
    }

    /// Display band the section belongs to
    #[must_use]
    pub const fn band(self) -> Band {
        match self {
            Self::BasicRequired
            | Self::BasicElective
            | Self::MandatoryGeneral
            | Self::HumanitiesSocietyElective => Band::Basic,
            Self::Research
            | Self::Major
            | Self::AdvancedMajor
            | Self::IndividuallyDesignedMajor => Band::MajorFamily,
            Self::DoubleMajor | Self::Minor => Band::OtherProgram,
            Self::OtherElective | Self::Unclassified => Band::Miscellaneous,
        }
    }
}

/// Display band grouping related sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    /// Basic and general education
    Basic,
    /// Major, advanced major, individually designed major, research
    MajorFamily,
    /// Double majors and minors
    OtherProgram,
    /// Free electives and unclassified courses
    Miscellaneous,
}

impl Band {
    /// Every band in display order
    pub const ALL: [Self; 4] = [
        Self::Basic,
        Self::MajorFamily,
        Self::OtherProgram,
        Self::Miscellaneous,
    ];

    /// Band heading
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Basic => "Basic & General",
            Self::MajorFamily => "Major",
            Self::OtherProgram => "Double Majors & Minors",
            Self::Miscellaneous => "Other",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A display/report grouping of courses and requirements
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Stable identifier (e.g., `MAJOR_CS`)
    pub id: String,
    /// Bucket kind
    pub kind: SectionKind,
    /// Program department, for department sections
    pub department: Option<String>,
    /// Display title
    pub title: String,
    /// Courses belonging to the section, in plan order
    pub courses: Vec<PlannedCourse>,
    /// Requirements attached to the section
    pub requirements: Vec<Requirement>,
    /// No requirements, or all requirements fulfilled
    pub fulfilled: bool,
}

impl Section {
    fn new(
        kind: SectionKind,
        department: Option<&str>,
        title: String,
        courses: Vec<PlannedCourse>,
        requirements: Vec<Requirement>,
    ) -> Self {
        let id = department.map_or_else(
            || kind.id_prefix().to_string(),
            |d| format!("{}_{d}", kind.id_prefix()),
        );
        let fulfilled = requirements.iter().all(Requirement::fulfilled);
        Self {
            id,
            kind,
            department: department.map(ToString::to_string),
            title,
            courses,
            requirements,
            fulfilled,
        }
    }

    /// Sum of credits of the section's courses
    #[must_use]
    pub fn total_credit(&self) -> f32 {
        self.courses.iter().map(|c| c.course.credit).sum()
    }

    /// The headline requirement, if one is flagged
    #[must_use]
    pub fn key_requirement(&self) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.is_key)
    }

    /// The secondary headline requirement, if one is flagged
    #[must_use]
    pub fn secondary_key_requirement(&self) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.is_secondary_key)
    }
}

fn belongs(
    kind: SectionKind,
    department: Option<&str>,
    classification: Option<&Classification>,
) -> bool {
    let Some(c) = classification else {
        return kind == SectionKind::Unclassified;
    };
    match kind {
        SectionKind::BasicRequired => *c == Classification::BasicRequired,
        SectionKind::BasicElective => *c == Classification::BasicElective,
        SectionKind::MandatoryGeneral => *c == Classification::MandatoryGeneral,
        SectionKind::HumanitiesSocietyElective => *c == Classification::HumanitiesSocietyElective,
        SectionKind::Research => *c == Classification::Research,
        SectionKind::Major => c.is_major_family(),
        SectionKind::AdvancedMajor => *c == Classification::AdvancedMajor,
        SectionKind::IndividuallyDesignedMajor => *c == Classification::IndividuallyDesignedMajor,
        SectionKind::DoubleMajor => department.is_some_and(|d| c.is_double_major_of(d)),
        SectionKind::Minor => {
            department.is_some_and(|d| matches!(c, Classification::Minor(m) if m == d))
        }
        SectionKind::OtherElective => *c == Classification::OtherElective,
        SectionKind::Unclassified => *c == Classification::Unrecognized,
    }
}

/// Build the ordered section list for one evaluation
///
/// # Arguments
/// * `courses` - Classified planned courses
/// * `requirements` - Evaluated requirement lists
/// * `programs` - Declared programs (decides which program sections exist)
#[must_use]
pub fn build_sections(
    courses: &[PlannedCourse],
    requirements: &RequirementMap,
    programs: &DeclaredPrograms,
) -> Vec<Section> {
    let major = Some(programs.major.as_str());
    let mut layout: Vec<(SectionKind, Option<&str>, Option<RequirementType>, String)> = vec![
        (
            SectionKind::BasicRequired,
            None,
            Some(RequirementType::BasicRequired),
            "Basic Required".to_string(),
        ),
        (
            SectionKind::BasicElective,
            None,
            Some(RequirementType::BasicElective),
            "Basic Elective".to_string(),
        ),
        (
            SectionKind::MandatoryGeneral,
            None,
            Some(RequirementType::MandatoryGeneral),
            "Mandatory General".to_string(),
        ),
        (
            SectionKind::HumanitiesSocietyElective,
            None,
            Some(RequirementType::HumanitiesSocietyElective),
            "Humanities & Society Elective".to_string(),
        ),
        (
            SectionKind::Research,
            None,
            Some(RequirementType::Research),
            "Research".to_string(),
        ),
        (
            SectionKind::Major,
            major,
            Some(RequirementType::Major),
            format!("Major ({})", programs.major),
        ),
    ];

    if programs.advanced_major {
        layout.push((
            SectionKind::AdvancedMajor,
            None,
            Some(RequirementType::AdvancedMajor),
            "Advanced Major".to_string(),
        ));
    }
    if programs.individually_designed_major {
        layout.push((
            SectionKind::IndividuallyDesignedMajor,
            None,
            Some(RequirementType::IndividuallyDesignedMajor),
            "Individually Designed Major".to_string(),
        ));
    }
    for d in &programs.double_majors {
        layout.push((
            SectionKind::DoubleMajor,
            Some(d.as_str()),
            Some(RequirementType::DoubleMajor),
            format!("Double Major ({d})"),
        ));
    }
    for d in &programs.minors {
        layout.push((
            SectionKind::Minor,
            Some(d.as_str()),
            Some(RequirementType::Minor),
            format!("Minor ({d})"),
        ));
    }
    layout.push((SectionKind::OtherElective, None, None, "Other Elective".to_string()));
    layout.push((SectionKind::Unclassified, None, None, "Unclassified".to_string()));

    layout
        .into_iter()
        .map(|(kind, department, requirement_type, title)| {
            let section_courses: Vec<PlannedCourse> = courses
                .iter()
                .filter(|c| belongs(kind, department, c.classification.as_ref()))
                .cloned()
                .collect();

            let section_requirements = requirement_type
                .and_then(|t| {
                    // Research and advanced major rules are keyed by the primary major.
                    let key_department = match t {
                        RequirementType::Research | RequirementType::AdvancedMajor => major,
                        _ => department,
                    };
                    requirements.get(&RuleKey::new(t, key_department.map(ToString::to_string)))
                })
                .cloned()
                .unwrap_or_default();

            Section::new(kind, department, title, section_courses, section_requirements)
        })
        .collect()
}

/// Sections of one display band
#[derive(Debug, Clone)]
pub struct SectionBand<'a> {
    /// The band
    pub band: Band,
    /// Sections in build order
    pub sections: Vec<&'a Section>,
}

/// Group sections into the four display bands, in band order
#[must_use]
pub fn group_sections(sections: &[Section]) -> Vec<SectionBand<'_>> {
    Band::ALL
        .into_iter()
        .map(|band| SectionBand {
            band,
            sections: sections.iter().filter(|s| s.kind.band() == band).collect(),
        })
        .collect()
}
