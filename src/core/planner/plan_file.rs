//! On-disk plan file schema

use super::PlanLoadError;
use crate::core::models::{Classification, Course, DeclaredPrograms, Grade, PlannedCourse, Term};
use crate::core::simulator::StudentPlan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `[[enrollments]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    /// Catalog code
    pub code: String,
    /// Enrolled year (`0` = prior credit)
    pub year: u32,
    /// Enrolled term
    pub term: Term,
    /// Received or expected grade
    pub grade: Grade,
    /// Manual classification override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specified_classification: Option<Classification>,
}

/// Top-level plan file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    /// Declared programs
    pub programs: DeclaredPrograms,
    /// Catalog records referenced by the enrollments
    #[serde(default)]
    pub catalog: Vec<Course>,
    /// Enrollments in evaluation order
    #[serde(default)]
    pub enrollments: Vec<EnrollmentRecord>,
}

impl PlanFile {
    /// Resolve enrollments against the catalog
    ///
    /// # Errors
    /// Returns [`PlanLoadError::DuplicateCourse`] for a repeated catalog code
    /// and [`PlanLoadError::UnknownCourse`] for an enrollment with no catalog record
    pub fn into_plan(self) -> Result<StudentPlan, PlanLoadError> {
        let mut catalog: BTreeMap<String, Course> = BTreeMap::new();
        for course in self.catalog {
            if catalog.contains_key(&course.code) {
                return Err(PlanLoadError::DuplicateCourse { code: course.code });
            }
            catalog.insert(course.code.clone(), course);
        }

        let courses = self
            .enrollments
            .into_iter()
            .map(|e| {
                let course = catalog
                    .get(&e.code)
                    .cloned()
                    .ok_or(PlanLoadError::UnknownCourse { code: e.code })?;
                let mut planned = PlannedCourse::new(course, e.year, e.term, e.grade);
                planned.specified_classification = e.specified_classification;
                Ok(planned)
            })
            .collect::<Result<Vec<_>, PlanLoadError>>()?;

        Ok(StudentPlan::new(self.programs, courses))
    }
}
