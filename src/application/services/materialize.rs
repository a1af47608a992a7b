//! Tree materialization service
//!
//! Applies a `Plan` to the filesystem: directories are created idempotently,
//! files are truncated and rewritten. The first failure aborts the run;
//! whatever was written before it stays on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::course::COURSE_INTRODUCTION;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Operation, Outline, Plan};
use crate::infrastructure::traits::FileSystem;

/// Summary of a completed materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub root: PathBuf,
    pub directories: usize,
    pub files: usize,
}

/// Writes outlines to disk.
pub struct MaterializeService {
    fs: Arc<dyn FileSystem>,
}

impl MaterializeService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Materialize `outline` under `root`, writing the course introduction to `root/README.md`.
    pub fn materialize(&self, root: &Path, outline: &Outline) -> ApplicationResult<MaterializeReport> {
        self.materialize_with(root, outline, |_| {})
    }

    /// Like [`materialize`](Self::materialize), calling `on_step` after each completed operation.
    pub fn materialize_with<F>(
        &self,
        root: &Path,
        outline: &Outline,
        on_step: F,
    ) -> ApplicationResult<MaterializeReport>
    where
        F: FnMut(&Operation<'_>),
    {
        let plan = Plan::build(root, COURSE_INTRODUCTION, outline);
        self.apply(&plan, on_step)
    }

    /// Execute every operation of `plan` in order.
    #[instrument(level = "debug", skip(self, plan, on_step), fields(root = %plan.root().display()))]
    pub fn apply<F>(&self, plan: &Plan<'_>, mut on_step: F) -> ApplicationResult<MaterializeReport>
    where
        F: FnMut(&Operation<'_>),
    {
        let mut directories = 0;
        let mut files = 0;

        for operation in plan.operations() {
            match operation {
                Operation::CreateDir(path) => {
                    self.fs
                        .create_dir_all(path)
                        .with_path_context("create directory", path)?;
                    directories += 1;
                }
                Operation::WriteFile { path, content } => {
                    self.fs
                        .write(path, content)
                        .with_path_context("write file", path)?;
                    files += 1;
                }
            }
            debug!("apply: {}", operation.path().display());
            on_step(operation);
        }

        Ok(MaterializeReport {
            root: plan.root().to_path_buf(),
            directories,
            files,
        })
    }
}
