use crate::errors::{BundleError, Result};
use crate::fs::FileSystem;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A declared module: unique name plus source path relative to the build root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: String,
    pub source_path: PathBuf,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
        }
    }
}

/// Raw module text as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    pub name: String,
    pub raw_source: String,
}

/// Read every descriptor's source verbatim, in declaration order.
///
/// The first missing file aborts the whole load with
/// [`BundleError::ModuleNotFound`].
pub fn load_modules(
    fs: &dyn FileSystem,
    root: &Path,
    descriptors: &[ModuleDescriptor],
) -> Result<Vec<LoadedModule>> {
    descriptors
        .iter()
        .map(|descriptor| load_module(fs, root, descriptor))
        .collect()
}

pub fn load_module(
    fs: &dyn FileSystem,
    root: &Path,
    descriptor: &ModuleDescriptor,
) -> Result<LoadedModule> {
    let path = root.join(&descriptor.source_path);
    let raw_source = fs.read_file(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BundleError::ModuleNotFound {
            name: descriptor.name.clone(),
            path: path.clone(),
        },
        _ => BundleError::Io(e),
    })?;

    debug!("Loaded module {} from {:?}", descriptor.name, path);

    Ok(LoadedModule {
        name: descriptor.name.clone(),
        raw_source,
    })
}
