//! Catalog course model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Academic level of a catalog course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    /// Undergraduate course
    #[default]
    Undergraduate,
    /// Graduate course
    Graduate,
}

/// Represents a course in the university catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Department-prefixed course code (e.g., "CS.330")
    pub code: String,

    /// Course title (e.g., "Operating Systems")
    #[serde(default)]
    pub title: String,

    /// Offering department (e.g., "CS")
    pub department: String,

    /// Catalog category code (e.g., "major-elective")
    #[serde(default)]
    pub category: String,

    /// Credit units (can be fractional)
    #[serde(default)]
    pub credit: f32,

    /// Activity units
    #[serde(default)]
    pub au: u32,

    /// Free-form labels such as "social" or "humanities"
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Undergraduate or graduate
    #[serde(default)]
    pub level: CourseLevel,

    /// Graduate course recognized for both graduate and undergraduate tracks
    #[serde(default)]
    pub cross_recognized: bool,
}

impl Course {
    /// Create a new course with no tags
    ///
    /// # Arguments
    /// * `code` - Department-prefixed course code
    /// * `title` - Course title
    /// * `department` - Offering department
    /// * `category` - Catalog category code
    /// * `credit` - Credit units
    #[must_use]
    pub const fn new(
        code: String,
        title: String,
        department: String,
        category: String,
        credit: f32,
    ) -> Self {
        Self {
            code,
            title,
            department,
            category,
            credit,
            au: 0,
            tags: BTreeSet::new(),
            level: CourseLevel::Undergraduate,
            cross_recognized: false,
        }
    }

    /// Builder-style AU setter
    #[must_use]
    pub const fn with_au(mut self, au: u32) -> Self {
        self.au = au;
        self
    }

    /// Builder-style tag setter
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// First significant digit of the numeric part of the code
    ///
    /// The numeric part is whatever follows the department prefix. Leading
    /// zeros are skipped, so `CS.330` yields `3` and `CS.0101` yields `1`.
    ///
    /// # Returns
    /// `None` when the code contains no non-zero digit
    #[must_use]
    pub fn number_digit(&self) -> Option<u8> {
        let number = self
            .code
            .split_once('.')
            .map_or(self.code.as_str(), |(_, rest)| rest);

        number
            .chars()
            .filter_map(|c| c.to_digit(10))
            .find(|&d| d != 0)
            .and_then(|d| u8::try_from(d).ok())
    }

    /// Whether the course carries every tag in `tags`
    #[must_use]
    pub fn has_all_tags(&self, tags: &BTreeSet<String>) -> bool {
        tags.is_subset(&self.tags)
    }
}
