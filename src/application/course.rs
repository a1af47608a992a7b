//! The built-in course: R programming, seven phases.
//!
//! Both documents are compiled into the binary.

use crate::application::ApplicationResult;
use crate::application::services::OutlineService;
use crate::domain::Outline;

/// Default output directory for the built-in course.
pub const DEFAULT_COURSE_DIR: &str = "Comprehensive_R_Programming_Course";

/// Introduction written to `<root>/README.md`, independent of the outline.
pub const COURSE_INTRODUCTION: &str = include_str!("../../assets/README.md");

/// Outline of the built-in course in the outline TOML format.
pub const COURSE_OUTLINE_TOML: &str = include_str!("../../assets/course.toml");

/// Parse the embedded course outline.
pub fn builtin_outline() -> ApplicationResult<Outline> {
    OutlineService::parse(COURSE_OUTLINE_TOML, "<builtin>")
}
