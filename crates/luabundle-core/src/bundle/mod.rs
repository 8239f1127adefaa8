//! One-shot bundle build
//!
//! Modules flow strictly forward: loader → rewriter → wrapper → assembler.
//! Every declared module is read before any artifact is written, so a
//! missing source aborts the build with no output. Artifacts are then
//! written one at a time; a failed write leaves earlier artifacts in place.

mod assembler;
mod loader;
mod report;
mod rewriter;
mod wrapper;

pub use assembler::{filter_lines, indent_block, Artifact, ArtifactKind, Assembler};
pub use loader::{load_module, load_modules, LoadedModule, ModuleDescriptor};
pub use report::{digest, ArtifactOutcome, BuildReport};
pub use rewriter::{CandidateSet, ReferenceRewriter, Resolution, Rewrite};
pub use wrapper::{strip_export_tail, wrap_module, StrippedBody};

use crate::di::Container;
use crate::errors::{BundleError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A module after rewriting and wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    pub name: String,
    pub raw_source: String,
    /// Registry entry text spliced into artifacts
    pub transformed_source: String,
    /// Modules loaded by the rewritten call sites, in source order
    pub dependencies: Vec<String>,
}

/// Rewrite one module's references and wrap it as a registry entry.
pub fn transform_module(rewriter: &ReferenceRewriter, module: LoadedModule) -> ModuleRecord {
    let rewrite = rewriter.rewrite(&module.raw_source);

    for site in &rewrite.unresolved {
        debug!("{}: left unresolved reference {}", module.name, site);
    }
    for site in &rewrite.literal {
        debug!("{}: left quoted reference {}", module.name, site);
    }

    let stripped = strip_export_tail(&rewrite.source);
    match stripped.export {
        None => debug!("{}: no trailing return statement", module.name),
        Some(export) if export != module.name => debug!(
            "{}: trailing return exports '{}', factory returns '{}'",
            module.name, export, module.name
        ),
        Some(_) => {}
    }

    let transformed_source = wrap_module(&module.name, stripped.body);

    ModuleRecord {
        name: module.name,
        raw_source: module.raw_source,
        transformed_source,
        dependencies: rewrite.resolved,
    }
}

/// Drives a full three-artifact build against a [`Container`]
pub struct Bundler<'a> {
    container: &'a Container,
    root: PathBuf,
    out_dir: PathBuf,
}

impl<'a> Bundler<'a> {
    /// Sources resolve against `root`; artifacts go to the configured output
    /// directory, itself relative to `root`, or to `root` when unset.
    pub fn new(container: &'a Container, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let out_dir = match &container.config().out_dir {
            Some(dir) => root.join(dir),
            None => root.clone(),
        };
        Self {
            container,
            root,
            out_dir,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Validate the config, then load and transform every declared module.
    pub fn prepare(&self) -> Result<Vec<ModuleRecord>> {
        let config = self.container.config();
        config.validate()?;

        let loaded = load_modules(
            self.container.file_system().as_ref(),
            &self.root,
            &config.descriptors(),
        )?;

        let rewriter = ReferenceRewriter::new(config.modules.keys().cloned());
        Ok(loaded
            .into_iter()
            .map(|module| transform_module(&rewriter, module))
            .collect())
    }

    pub fn build(&self) -> Result<BuildReport> {
        let config = self.container.config();
        let records = self.prepare()?;
        info!("Bundling {} module(s)", records.len());

        let assembler = Assembler::new(config, &records);
        let mut report = BuildReport::default();

        let standalone = self.write(assembler.standalone())?;
        report.artifacts.push(standalone);

        let example = self.read_optional(&config.example.path)?;
        if example.is_none() {
            info!(
                "No usage example at {:?}, universal artifact has an empty example body",
                self.root.join(&config.example.path)
            );
        }
        let universal = self.write(assembler.universal(example.as_deref()))?;
        report.artifacts.push(universal);

        match self.read_optional(&config.passthrough.path)? {
            Some(raw) => {
                let passthrough = self.write(assembler.passthrough(&raw))?;
                report.artifacts.push(passthrough);
            }
            None => {
                let reason = format!(
                    "no source at {}",
                    self.root.join(&config.passthrough.path).display()
                );
                info!("Skipped {:?} ({})", config.outputs.passthrough, reason);
                report.artifacts.push(ArtifactOutcome::Skipped {
                    kind: ArtifactKind::PassThrough,
                    reason,
                });
            }
        }

        Ok(report)
    }

    fn read_optional(&self, relative: &Path) -> Result<Option<String>> {
        let fs = self.container.file_system();
        let path = self.root.join(relative);
        if !fs.exists(&path) {
            return Ok(None);
        }
        Ok(Some(fs.read_file(&path)?))
    }

    fn write(&self, artifact: Artifact) -> Result<ArtifactOutcome> {
        let path = self.out_dir.join(&artifact.file_name);
        self.container
            .file_system()
            .write_file(&path, &artifact.contents)
            .map_err(|source| BundleError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        let digest = digest(&artifact.contents);
        info!(
            "Built {:?} ({}, {} bytes, blake3 {})",
            path,
            artifact.kind,
            artifact.contents.len(),
            &digest[..12]
        );

        Ok(ArtifactOutcome::Written {
            kind: artifact.kind,
            path,
            bytes: artifact.contents.len(),
            digest,
        })
    }
}
