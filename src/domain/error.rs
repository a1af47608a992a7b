//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent outline shape violations.
/// Node locations are reported as slash-joined name paths, e.g. `Phase_1/Module_1.1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid node name {name:?} under {at}")]
    InvalidName { at: String, name: String },

    #[error("duplicate node name {name:?} under {at}")]
    DuplicateName { at: String, name: String },

    #[error("node has both children and content: {0}")]
    AmbiguousNode(String),

    #[error("expected a directory at depth {depth}, found a file: {at}")]
    UnexpectedLeaf { at: String, depth: usize },

    #[error("expected a lesson file at depth {depth}, found a directory: {at}")]
    UnexpectedBranch { at: String, depth: usize },

    #[error("lesson file must be markdown (.md): {0}")]
    NotMarkdown(String),

    #[error("top-level name {0:?} is reserved for the course introduction")]
    ReservedName(String),
}
