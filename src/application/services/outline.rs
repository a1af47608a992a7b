//! Outline loading service
//!
//! Outline files are TOML: a `[[nodes]]` array of tables, each with a `name`
//! and either nested `children` (same shape) or a literal `content` string.
//!
//! ```toml
//! [[nodes]]
//! name = "PhaseA"
//!
//! [[nodes.children]]
//! name = "Module1"
//!
//! [[nodes.children.children]]
//! name = "lesson_1.md"
//! content = "hello"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::application::course::builtin_outline;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DomainError, Node, Outline};
use crate::infrastructure::traits::FileSystem;

/// Where an outline comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutlineSource {
    /// The course compiled into the binary.
    #[default]
    Builtin,
    /// A user-supplied outline file.
    File(PathBuf),
}

impl OutlineSource {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map(OutlineSource::File).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutline {
    #[serde(default)]
    nodes: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    name: String,
    children: Option<Vec<RawNode>>,
    content: Option<String>,
}

impl RawNode {
    fn into_node(self, parent: &str) -> Result<Node, DomainError> {
        let location = if parent.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", parent, self.name)
        };
        match (self.children, self.content) {
            (Some(_), Some(_)) => Err(DomainError::AmbiguousNode(location)),
            (None, Some(content)) => Ok(Node::leaf(self.name, content)),
            (children, None) => {
                let children = children
                    .unwrap_or_default()
                    .into_iter()
                    .map(|child| child.into_node(&location))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::branch(self.name, children))
            }
        }
    }
}

/// Loads and validates outlines.
pub struct OutlineService {
    fs: Arc<dyn FileSystem>,
}

impl OutlineService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Resolve an outline from its source.
    pub fn load(&self, source: &OutlineSource) -> ApplicationResult<Outline> {
        match source {
            OutlineSource::Builtin => builtin_outline(),
            OutlineSource::File(path) => self.load_file(path),
        }
    }

    /// Read and parse an outline file.
    pub fn load_file(&self, path: &Path) -> ApplicationResult<Outline> {
        debug!("load_file: {}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read outline", path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse outline TOML. `origin` names the source in error messages.
    pub fn parse(content: &str, origin: &str) -> ApplicationResult<Outline> {
        let raw: RawOutline =
            toml::from_str(content).map_err(|e| ApplicationError::OutlineParse {
                origin: origin.to_string(),
                message: e.to_string().trim_end().to_string(),
            })?;

        let nodes = raw
            .nodes
            .into_iter()
            .map(|node| node.into_node(""))
            .collect::<Result<Vec<_>, _>>()?;
        let outline = Outline::new(nodes)?;
        debug!(
            "parse: {} units, {} lessons from {}",
            outline.nodes().len(),
            outline.lesson_count(),
            origin
        );
        Ok(outline)
    }
}
