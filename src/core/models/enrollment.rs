//! Planned enrollment model: a catalog course placed in a term with a grade

use super::{Classification, Course};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Academic term, ordered chronologically within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    /// Spring term
    Spring,
    /// Summer term
    Summer,
    /// Fall term
    Fall,
    /// Winter term
    Winter,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spring => write!(f, "spring"),
            Self::Summer => write!(f, "summer"),
            Self::Fall => write!(f, "fall"),
            Self::Winter => write!(f, "winter"),
        }
    }
}

/// Letter or pass/fail grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// A+ (4.3)
    #[serde(rename = "A+")]
    APlus,
    /// A0 (4.0)
    #[serde(rename = "A0", alias = "A")]
    AZero,
    /// A- (3.7)
    #[serde(rename = "A-")]
    AMinus,
    /// B+ (3.3)
    #[serde(rename = "B+")]
    BPlus,
    /// B0 (3.0)
    #[serde(rename = "B0", alias = "B")]
    BZero,
    /// B- (2.7)
    #[serde(rename = "B-")]
    BMinus,
    /// C+ (2.3)
    #[serde(rename = "C+")]
    CPlus,
    /// C0 (2.0)
    #[serde(rename = "C0", alias = "C")]
    CZero,
    /// C- (1.7)
    #[serde(rename = "C-")]
    CMinus,
    /// D+ (1.3)
    #[serde(rename = "D+")]
    DPlus,
    /// D0 (1.0)
    #[serde(rename = "D0", alias = "D")]
    DZero,
    /// D- (0.7)
    #[serde(rename = "D-")]
    DMinus,
    /// Fail
    F,
    /// Satisfactory
    S,
    /// Unsatisfactory
    U,
    /// Pass
    P,
    /// No report
    #[serde(rename = "NR")]
    Nr,
    /// Withdrawn
    W,
}

impl Grade {
    /// Every grade symbol in table order
    pub const ALL: [Self; 18] = [
        Self::APlus,
        Self::AZero,
        Self::AMinus,
        Self::BPlus,
        Self::BZero,
        Self::BMinus,
        Self::CPlus,
        Self::CZero,
        Self::CMinus,
        Self::DPlus,
        Self::DZero,
        Self::DMinus,
        Self::F,
        Self::S,
        Self::U,
        Self::P,
        Self::Nr,
        Self::W,
    ];

    /// Grades that never count toward any requirement or total
    #[must_use]
    pub const fn is_excluded(self) -> bool {
        matches!(self, Self::F | Self::W | Self::U | Self::Nr)
    }

    /// Grade points on the 4.3 scale; `None` for pass/fail style grades
    #[must_use]
    pub const fn points(self) -> Option<f32> {
        match self {
            Self::APlus => Some(4.3),
            Self::AZero => Some(4.0),
            Self::AMinus => Some(3.7),
            Self::BPlus => Some(3.3),
            Self::BZero => Some(3.0),
            Self::BMinus => Some(2.7),
            Self::CPlus => Some(2.3),
            Self::CZero => Some(2.0),
            Self::CMinus => Some(1.7),
            Self::DPlus => Some(1.3),
            Self::DZero => Some(1.0),
            Self::DMinus => Some(0.7),
            Self::F => Some(0.0),
            Self::S | Self::U | Self::P | Self::Nr | Self::W => None,
        }
    }

    /// Grade symbol as written on a transcript
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::AZero => "A0",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::BZero => "B0",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::CZero => "C0",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::DZero => "D0",
            Self::DMinus => "D-",
            Self::F => "F",
            Self::S => "S",
            Self::U => "U",
            Self::P => "P",
            Self::Nr => "NR",
            Self::W => "W",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "A" => return Ok(Self::AZero),
            "B" => return Ok(Self::BZero),
            "C" => return Ok(Self::CZero),
            "D" => return Ok(Self::DZero),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|g| g.symbol() == upper)
            .ok_or_else(|| format!("Unknown grade: {s}"))
    }
}

/// Stable arena key of a planned course: code, year and term
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseKey {
    /// Catalog code
    pub code: String,
    /// Enrolled year (`0` = prior credit)
    pub year: u32,
    /// Enrolled term
    pub term: Term,
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}-{}", self.code, self.year, self.term)
    }
}

/// A catalog course placed in a term, with the engine's mutable classification state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// The catalog record
    pub course: Course,

    /// Enrolled year; `0` means credit earned prior to tracked history
    pub year: u32,

    /// Enrolled term
    pub term: Term,

    /// Received or expected grade
    pub grade: Grade,

    /// Computed classification (`None` = unassigned)
    #[serde(default)]
    pub classification: Option<Classification>,

    /// Every classification the engine found this course eligible for
    #[serde(default)]
    pub possible_classifications: Vec<Classification>,

    /// Manual override applied on top of the computed classification
    #[serde(default)]
    pub specified_classification: Option<Classification>,
}

impl PlannedCourse {
    /// Create a new planned course with no classification state
    #[must_use]
    pub const fn new(course: Course, year: u32, term: Term, grade: Grade) -> Self {
        Self {
            course,
            year,
            term,
            grade,
            classification: None,
            possible_classifications: Vec::new(),
            specified_classification: None,
        }
    }

    /// Arena key for this enrollment
    #[must_use]
    pub fn key(&self) -> CourseKey {
        CourseKey {
            code: self.course.code.clone(),
            year: self.year,
            term: self.term,
        }
    }

    /// Chronological position (year, then term)
    #[must_use]
    pub const fn when(&self) -> (u32, Term) {
        (self.year, self.term)
    }

    /// Whether the grade excludes this enrollment from everything
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        self.grade.is_excluded()
    }

    /// Whether the course currently counts toward totals
    #[must_use]
    pub fn is_countable(&self) -> bool {
        !self.is_excluded() && self.classification != Some(Classification::Unrecognized)
    }

    /// Record a classification in the possible-classifications log (deduplicated)
    pub fn note_possible(&mut self, classification: &Classification) {
        if !self.possible_classifications.contains(classification) {
            self.possible_classifications.push(classification.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned(grade: Grade) -> PlannedCourse {
        let course = Course::new(
            "CS.101".to_string(),
            "Intro".to_string(),
            "CS".to_string(),
            "basic".to_string(),
            3.0,
        );
        PlannedCourse::new(course, 2021, Term::Fall, grade)
    }

    #[test]
    fn test_term_order() {
        assert!(Term::Spring < Term::Summer);
        assert!(Term::Summer < Term::Fall);
        assert!(Term::Fall < Term::Winter);
    }

    #[test]
    fn test_prior_credit_sorts_first() {
        let mut prior = planned(Grade::P);
        prior.year = 0;
        prior.term = Term::Winter;
        assert!(prior.when() < planned(Grade::P).when());
    }

    #[test]
    fn test_exclusion_grades() {
        for grade in Grade::ALL {
            let expected = matches!(grade, Grade::F | Grade::W | Grade::U | Grade::Nr);
            assert_eq!(grade.is_excluded(), expected, "grade {grade}");
        }
    }

    #[test]
    fn test_grade_points() {
        assert_eq!(Grade::APlus.points(), Some(4.3));
        assert_eq!(Grade::CZero.points(), Some(2.0));
        assert_eq!(Grade::P.points(), None);
        assert_eq!(Grade::S.points(), None);
    }

    #[test]
    fn test_grade_from_str() {
        assert_eq!("a+".parse::<Grade>(), Ok(Grade::APlus));
        assert_eq!("A".parse::<Grade>(), Ok(Grade::AZero));
        assert_eq!("nr".parse::<Grade>(), Ok(Grade::Nr));
        assert!("E".parse::<Grade>().is_err());
    }

    #[test]
    fn test_countable() {
        let mut course = planned(Grade::BZero);
        assert!(course.is_countable());

        course.classification = Some(Classification::Unrecognized);
        assert!(!course.is_countable());

        assert!(!planned(Grade::W).is_countable());
    }

    #[test]
    fn test_note_possible_dedup() {
        let mut course = planned(Grade::AZero);
        course.note_possible(&Classification::Major);
        course.note_possible(&Classification::Major);
        course.note_possible(&Classification::Minor("EE".into()));
        assert_eq!(course.possible_classifications.len(), 2);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(planned(Grade::AZero).key().to_string(), "CS.101@2021-fall");
    }
}
