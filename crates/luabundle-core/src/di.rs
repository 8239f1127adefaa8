use crate::config::BundleConfig;
use crate::fs::{FileSystem, RealFileSystem};
use std::sync::Arc;

/// Dependency injection container
/// Holds the configuration and file system shared by a build
pub struct Container {
    config: Arc<BundleConfig>,
    file_system: Arc<dyn FileSystem>,
}

impl Container {
    /// Create a new container backed by the real file system
    pub fn new(config: BundleConfig) -> Self {
        Container {
            config: Arc::new(config),
            file_system: Arc::new(RealFileSystem::new()),
        }
    }

    /// Create a container with a custom file system (for testing)
    pub fn with_dependencies(config: BundleConfig, file_system: Arc<dyn FileSystem>) -> Self {
        Container {
            config: Arc::new(config),
            file_system,
        }
    }

    pub fn config(&self) -> &Arc<BundleConfig> {
        &self.config
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.file_system
    }
}
