use super::ArtifactKind;
use std::path::{Path, PathBuf};

/// What happened to one artifact during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutcome {
    Written {
        kind: ArtifactKind,
        path: PathBuf,
        bytes: usize,
        /// blake3 hex digest of the written contents
        digest: String,
    },
    Skipped {
        kind: ArtifactKind,
        reason: String,
    },
}

impl ArtifactOutcome {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactOutcome::Written { kind, .. } | ArtifactOutcome::Skipped { kind, .. } => *kind,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ArtifactOutcome::Written { path, .. } => Some(path),
            ArtifactOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, ArtifactOutcome::Written { .. })
    }
}

/// Per-artifact outcomes of one build, in production order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub artifacts: Vec<ArtifactOutcome>,
}

impl BuildReport {
    pub fn outcome(&self, kind: ArtifactKind) -> Option<&ArtifactOutcome> {
        self.artifacts
            .iter()
            .find(|outcome| outcome.kind() == kind)
    }

    pub fn written(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.artifacts.iter().filter(|outcome| outcome.is_written())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.artifacts
            .iter()
            .filter(|outcome| !outcome.is_written())
    }
}

/// Hex blake3 digest of `contents`
pub fn digest(contents: &str) -> String {
    blake3::hash(contents.as_bytes()).to_hex().to_string()
}
