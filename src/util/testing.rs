//! Test support: logging setup and an in-memory `FileSystem`.

use std::collections::{BTreeMap, HashSet};
use std::env;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::FileSystem;

static TEST_SETUP: Once = Once::new();
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Variables read while loading `Settings`.
const SETTINGS_ENV_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "COURSEGEN_OUTPUT_DIR",
    "COURSEGEN_OUTLINE",
];

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Process environment pinned to a scratch home for the lifetime of the guard.
///
/// `HOME` and `XDG_CONFIG_HOME` point below `home`, `COURSEGEN_*` overrides are
/// cleared. Guards serialize on a process-wide lock and restore the previous
/// values on drop.
pub struct IsolatedEnv {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl IsolatedEnv {
    pub fn new(home: &Path) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved = SETTINGS_ENV_VARS
            .iter()
            .map(|key| (*key, env::var_os(key)))
            .collect();

        env::set_var("HOME", home);
        env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        env::remove_var("COURSEGEN_OUTPUT_DIR");
        env::remove_var("COURSEGEN_OUTLINE");

        Self { saved, _lock: lock }
    }

    pub fn set(&self, key: &str, value: impl AsRef<OsStr>) {
        env::set_var(key, value);
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

/// Entry of the in-memory filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryEntry {
    Dir,
    File(Vec<u8>),
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<PathBuf, MemoryEntry>,
    failing: HashSet<PathBuf>,
    writes: usize,
}

/// In-memory filesystem with injectable failures.
///
/// Mirrors `std::fs` semantics the services rely on: `write` needs an
/// existing parent directory, `create_dir_all` fails on a file in the way.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any operation touching `path` fails with `PermissionDenied`.
    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        self.lock().failing.insert(path.into());
    }

    /// Seed a file, creating parent directories.
    pub fn insert_file(&self, path: impl Into<PathBuf>, content: &str) {
        let path = path.into();
        let mut state = self.lock();
        for ancestor in path.ancestors().skip(1).filter(|p| !p.as_os_str().is_empty()) {
            state.entries.insert(ancestor.to_path_buf(), MemoryEntry::Dir);
        }
        state
            .entries
            .insert(path, MemoryEntry::File(content.as_bytes().to_vec()));
    }

    /// Copy of every entry, for state comparisons.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, MemoryEntry> {
        self.lock().entries.clone()
    }

    /// Number of successful `write` calls.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn check_failure(state: &MemoryState, path: &Path) -> io::Result<()> {
    if state.failing.contains(path) {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("injected failure: {}", path.display()),
        ));
    }
    Ok(())
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, path.display().to_string())
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let state = self.lock();
        check_failure(&state, path)?;
        match state.entries.get(path) {
            Some(MemoryEntry::File(bytes)) => Ok(bytes.clone()),
            Some(MemoryEntry::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut state = self.lock();
        check_failure(&state, path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if state.entries.get(parent) != Some(&MemoryEntry::Dir) {
                return Err(not_found(parent));
            }
        }
        if state.entries.get(path) == Some(&MemoryEntry::Dir) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            ));
        }
        state
            .entries
            .insert(path.to_path_buf(), MemoryEntry::File(content.as_bytes().to_vec()));
        state.writes += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().entries.contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.lock().entries.get(path), Some(MemoryEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.lock().entries.get(path), Some(MemoryEntry::Dir))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        check_failure(&state, path)?;
        let ancestors: Vec<PathBuf> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect();
        for ancestor in ancestors.into_iter().rev() {
            match state.entries.get(&ancestor) {
                Some(MemoryEntry::Dir) => continue,
                Some(MemoryEntry::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("file in the way: {}", ancestor.display()),
                    ));
                }
                None => {}
            }
            state.entries.insert(ancestor, MemoryEntry::Dir);
        }
        Ok(())
    }

    fn list_tree(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.lock();
        check_failure(&state, root)?;
        Ok(state
            .entries
            .keys()
            .filter(|p| p.starts_with(root) && p.as_path() != root)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn given_missing_parent_when_write_then_not_found() {
        let fs = MemoryFileSystem::new();
        let err = fs.write(Path::new("a/b.md"), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn given_file_in_the_way_when_create_dir_all_then_fails() {
        let fs = MemoryFileSystem::new();
        fs.insert_file("a/b", "x");
        assert!(fs.create_dir_all(Path::new("a/b/c")).is_err());
        assert!(fs.create_dir_all(Path::new("a")).is_ok());
    }
}
