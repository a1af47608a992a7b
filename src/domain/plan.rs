//! Pure traversal: outline -> ordered filesystem operations.
//!
//! Nothing here touches the filesystem; applying a plan is the job of
//! `MaterializeService`.

use std::path::{Path, PathBuf};

use crate::domain::entities::{Node, Outline};

/// Name of the introduction document written at the root.
pub const README_FILE: &str = "README.md";

/// A single filesystem step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<'a> {
    /// Create a directory (idempotent).
    CreateDir(PathBuf),
    /// Create or truncate a file and write `content` verbatim.
    WriteFile { path: PathBuf, content: &'a str },
}

impl Operation<'_> {
    pub fn path(&self) -> &Path {
        match self {
            Operation::CreateDir(path) | Operation::WriteFile { path, .. } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Operation::CreateDir(_))
    }
}

/// Ordered operations for one materialization.
///
/// Every directory precedes the entries beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan<'a> {
    root: PathBuf,
    operations: Vec<Operation<'a>>,
}

impl<'a> Plan<'a> {
    /// Depth-first pre-order plan: root, `README.md`, then each unit and its contents.
    pub fn build(root: &Path, introduction: &'a str, outline: &'a Outline) -> Self {
        let mut operations = vec![
            Operation::CreateDir(root.to_path_buf()),
            Operation::WriteFile {
                path: root.join(README_FILE),
                content: introduction,
            },
        ];
        for node in outline.nodes() {
            push_node(&mut operations, root, node);
        }

        Self {
            root: root.to_path_buf(),
            operations,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn operations(&self) -> &[Operation<'a>] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn directory_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_dir()).count()
    }

    pub fn file_count(&self) -> usize {
        self.len() - self.directory_count()
    }
}

fn push_node<'a>(operations: &mut Vec<Operation<'a>>, parent: &Path, node: &'a Node) {
    let path = parent.join(node.name());
    match node {
        Node::Branch { children, .. } => {
            operations.push(Operation::CreateDir(path.clone()));
            for child in children {
                push_node(operations, &path, child);
            }
        }
        Node::Leaf { content, .. } => operations.push(Operation::WriteFile { path, content }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_outline() -> Outline {
        Outline::new(vec![Node::branch(
            "PhaseA",
            vec![Node::branch(
                "Module1",
                vec![Node::leaf("lesson_1.md", "hello")],
            )],
        )])
        .unwrap()
    }

    #[test]
    fn given_scenario_outline_when_planning_then_yields_preorder_operations() {
        let outline = scenario_outline();
        let root = Path::new("out");

        let plan = Plan::build(root, "intro", &outline);

        assert_eq!(
            plan.operations(),
            &[
                Operation::CreateDir(PathBuf::from("out")),
                Operation::WriteFile {
                    path: PathBuf::from("out/README.md"),
                    content: "intro"
                },
                Operation::CreateDir(PathBuf::from("out/PhaseA")),
                Operation::CreateDir(PathBuf::from("out/PhaseA/Module1")),
                Operation::WriteFile {
                    path: PathBuf::from("out/PhaseA/Module1/lesson_1.md"),
                    content: "hello"
                },
            ]
        );
        assert_eq!(plan.directory_count(), 3);
        assert_eq!(plan.file_count(), 2);
    }

    #[test]
    fn given_empty_outline_when_planning_then_only_root_and_readme() {
        let outline = Outline::default();
        let plan = Plan::build(Path::new("out"), "intro", &outline);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.root(), Path::new("out"));
    }

    #[test]
    fn given_empty_module_when_planning_then_directory_without_files() {
        let outline =
            Outline::new(vec![Node::branch("PhaseA", vec![Node::branch("Empty", vec![])])])
                .unwrap();
        let plan = Plan::build(Path::new("out"), "intro", &outline);

        let last = plan.operations().last().unwrap();
        assert_eq!(last, &Operation::CreateDir(PathBuf::from("out/PhaseA/Empty")));
    }
}
