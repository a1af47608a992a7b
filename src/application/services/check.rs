//! Drift check between a generated tree on disk and its outline
//!
//! Read-only. Reports what a re-run of `generate` would create or
//! overwrite, and what it would leave behind.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::course::COURSE_INTRODUCTION;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Operation, Outline, Plan};
use crate::infrastructure::traits::FileSystem;

/// Difference between the outline and the tree on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStatus {
    pub root: PathBuf,
    /// Planned entries absent from disk
    pub missing: Vec<PathBuf>,
    /// Planned entries present with different content or of the wrong kind
    pub stale: Vec<PathBuf>,
    /// Entries under root the outline does not produce
    pub extra: Vec<PathBuf>,
    /// No missing or stale entries and nothing extra
    pub in_sync: bool,
}

/// Compares outlines against the filesystem.
pub struct CheckService {
    fs: Arc<dyn FileSystem>,
}

impl CheckService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Compare the tree under `root` with what `outline` would produce.
    pub fn check(&self, root: &Path, outline: &Outline) -> ApplicationResult<TreeStatus> {
        let plan = Plan::build(root, COURSE_INTRODUCTION, outline);
        self.check_plan(&plan)
    }

    pub fn check_plan(&self, plan: &Plan<'_>) -> ApplicationResult<TreeStatus> {
        debug!("check_plan: root={}", plan.root().display());
        let mut missing = Vec::new();
        let mut stale = Vec::new();

        for operation in plan.operations() {
            let path = operation.path();
            if !self.fs.exists(path) {
                missing.push(path.to_path_buf());
                continue;
            }
            let up_to_date = match operation {
                Operation::CreateDir(_) => self.fs.is_dir(path),
                Operation::WriteFile { content, .. } => {
                    self.fs.is_file(path)
                        && self.fs.read(path).with_path_context("read file", path)?
                            == content.as_bytes()
                }
            };
            if !up_to_date {
                stale.push(path.to_path_buf());
            }
        }

        let extra = if self.fs.is_dir(plan.root()) {
            let planned: HashSet<&Path> = plan.operations().iter().map(Operation::path).collect();
            self.fs
                .list_tree(plan.root())
                .with_path_context("list directory", plan.root())?
                .into_iter()
                .filter(|path| !planned.contains(path.as_path()))
                .collect()
        } else {
            Vec::new()
        };

        let in_sync = missing.is_empty() && stale.is_empty() && extra.is_empty();
        debug!(
            "check_plan: missing={}, stale={}, extra={}",
            missing.len(),
            stale.len(),
            extra.len()
        );

        Ok(TreeStatus {
            root: plan.root().to_path_buf(),
            missing,
            stale,
            extra,
            in_sync,
        })
    }
}
