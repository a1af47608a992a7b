//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod course;
pub mod error;
pub mod error_ext;
pub mod services;

pub use course::{builtin_outline, COURSE_INTRODUCTION, DEFAULT_COURSE_DIR};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
