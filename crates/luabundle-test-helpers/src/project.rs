//! Builders for throwaway bundle projects

use crate::fixtures;
use indexmap::IndexMap;
use luabundle_core::fs::MockFileSystem;
use luabundle_core::BundleConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A set of module sources plus the optional example and pass-through files
#[derive(Debug, Clone)]
pub struct TestProject {
    modules: Vec<(String, PathBuf, String)>,
    entry_module: String,
    example: Option<String>,
    passthrough: Option<String>,
}

impl TestProject {
    pub fn new(entry_module: impl Into<String>) -> Self {
        Self {
            modules: Vec::new(),
            entry_module: entry_module.into(),
            example: None,
            passthrough: None,
        }
    }

    /// Toggle, Window and Library wired together through `require`
    pub fn ui_library() -> Self {
        Self::new("Library")
            .module("Toggle", "src/Elements/Toggle.lua", fixtures::toggle_module())
            .module("Window", "src/Components/Window.lua", fixtures::window_module())
            .module("Library", "src/Core/Library.lua", fixtures::library_module())
    }

    pub fn module(
        mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Self {
        self.modules.push((name.into(), path.into(), source.into()));
        self
    }

    pub fn example(mut self, source: impl Into<String>) -> Self {
        self.example = Some(source.into());
        self
    }

    pub fn passthrough(mut self, source: impl Into<String>) -> Self {
        self.passthrough = Some(source.into());
        self
    }

    pub fn config(&self) -> BundleConfig {
        let modules: IndexMap<String, PathBuf> = self
            .modules
            .iter()
            .map(|(name, path, _)| (name.clone(), path.clone()))
            .collect();
        BundleConfig {
            entry_module: self.entry_module.clone(),
            modules,
            ..Default::default()
        }
    }

    /// Populate an in-memory file system rooted at `root`
    pub fn into_mock(self, root: &Path) -> (BundleConfig, Arc<MockFileSystem>) {
        let config = self.config();
        let fs = Arc::new(MockFileSystem::new());
        for (_, path, source) in &self.modules {
            fs.add_file(root.join(path), source.clone());
        }
        if let Some(example) = &self.example {
            fs.add_file(root.join(&config.example.path), example.clone());
        }
        if let Some(raw) = &self.passthrough {
            fs.add_file(root.join(&config.passthrough.path), raw.clone());
        }
        (config, fs)
    }

    /// Write sources and `config_name` under `root` on disk
    pub fn write_to(&self, root: &Path, config_name: &str) -> std::io::Result<BundleConfig> {
        let config = self.config();
        let write = |relative: &Path, contents: &str| -> std::io::Result<()> {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, contents)
        };

        for (_, path, source) in &self.modules {
            write(path, source)?;
        }
        if let Some(example) = &self.example {
            write(&config.example.path, example)?;
        }
        if let Some(raw) = &self.passthrough {
            write(&config.passthrough.path, raw)?;
        }

        config
            .write_file(&root.join(config_name))
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(config)
    }
}
