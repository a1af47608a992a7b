//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CheckService, MaterializeService, OutlineService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding application settings and the I/O boundary.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    pub fn outline_service(&self) -> OutlineService {
        OutlineService::new(Arc::clone(&self.fs))
    }

    pub fn materialize_service(&self) -> MaterializeService {
        MaterializeService::new(Arc::clone(&self.fs))
    }

    pub fn check_service(&self) -> CheckService {
        CheckService::new(Arc::clone(&self.fs))
    }
}
