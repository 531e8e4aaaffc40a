//! Data models for `grad-planner`

pub mod classification;
pub mod course;
pub mod enrollment;
pub mod programs;
pub mod requirement;
pub mod substitution;

pub use classification::Classification;
pub use course::{Course, CourseLevel};
pub use enrollment::{CourseKey, Grade, PlannedCourse, Term};
pub use programs::DeclaredPrograms;
pub use requirement::{
    ConditionScope, ConstraintKind, CourseCondition, DepartmentRef, Requirement, RequirementKind,
    RequirementType, SubConstraint,
};
pub use substitution::SubstitutionRule;
