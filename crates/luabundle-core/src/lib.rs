pub mod bundle;
pub mod config;
pub mod di;
pub mod errors;
pub mod fs;

pub use bundle::{
    Artifact, ArtifactKind, ArtifactOutcome, Assembler, BuildReport, Bundler, ModuleDescriptor,
    ModuleRecord, ReferenceRewriter,
};
pub use config::{BundleConfig, CliOverrides};
pub use di::Container;
pub use errors::{BundleError, Result};
