//! Domain layer: outline entities and the pure traversal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod plan;

pub use entities::{Node, Outline, LESSON_EXTENSION, OUTLINE_DEPTH};
pub use error::DomainError;
pub use plan::{Operation, Plan, README_FILE};
