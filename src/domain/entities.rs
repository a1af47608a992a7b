//! Domain entities: the course outline

use std::collections::HashSet;
use std::path::Path;

use crate::domain::error::DomainError;
use crate::domain::plan::README_FILE;

/// Number of outline levels: phase, module, lesson file.
pub const OUTLINE_DEPTH: usize = 3;

/// Extension every lesson file must carry.
pub const LESSON_EXTENSION: &str = "md";

/// Label used for the outline root in error locations.
const ROOT_LABEL: &str = "<root>";

/// A node of the outline.
///
/// Branches become directories, leaves become files holding `content` verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Branch { name: String, children: Vec<Node> },
    Leaf { name: String, content: String },
}

impl Node {
    pub fn branch(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Branch {
            name: name.into(),
            children,
        }
    }

    pub fn leaf(name: impl Into<String>, content: impl Into<String>) -> Self {
        Node::Leaf {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Branch { name, .. } | Node::Leaf { name, .. } => name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Children of a branch; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Branch { children, .. } => children,
            Node::Leaf { .. } => &[],
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Branch { children, .. } => children.iter().map(Node::leaf_count).sum(),
            Node::Leaf { .. } => 1,
        }
    }
}

/// Validated, immutable course outline: phases -> modules -> lesson files.
///
/// Sibling order is kept and drives generation order; it has no effect on
/// the resulting tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    nodes: Vec<Node>,
}

impl Outline {
    /// Build an outline, checking names, sibling uniqueness and depth.
    ///
    /// The introduction owns `README.md` at the root, so no top-level node may
    /// take that name (compared case-insensitively).
    pub fn new(nodes: Vec<Node>) -> Result<Self, DomainError> {
        validate_level(&nodes, 1, ROOT_LABEL)?;
        Ok(Self { nodes })
    }

    /// Top-level units (phases).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of lesson files the outline produces.
    pub fn lesson_count(&self) -> usize {
        self.nodes.iter().map(Node::leaf_count).sum()
    }
}

fn validate_level(nodes: &[Node], depth: usize, at: &str) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for node in nodes {
        let name = node.name();
        if !is_valid_name(name) {
            return Err(DomainError::InvalidName {
                at: at.to_string(),
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(DomainError::DuplicateName {
                at: at.to_string(),
                name: name.to_string(),
            });
        }

        if depth == 1 && name.eq_ignore_ascii_case(README_FILE) {
            return Err(DomainError::ReservedName(name.to_string()));
        }

        let location = if at == ROOT_LABEL {
            name.to_string()
        } else {
            format!("{at}/{name}")
        };

        match node {
            Node::Leaf { .. } if depth < OUTLINE_DEPTH => {
                return Err(DomainError::UnexpectedLeaf {
                    at: location,
                    depth,
                });
            }
            Node::Leaf { .. } => {
                let is_markdown = Path::new(name)
                    .extension()
                    .is_some_and(|ext| ext == LESSON_EXTENSION);
                if !is_markdown {
                    return Err(DomainError::NotMarkdown(location));
                }
            }
            Node::Branch { .. } if depth >= OUTLINE_DEPTH => {
                return Err(DomainError::UnexpectedBranch {
                    at: location,
                    depth,
                });
            }
            Node::Branch { children, .. } => validate_level(children, depth + 1, &location)?,
        }
    }
    Ok(())
}

/// A name must be a single, non-special path segment.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
