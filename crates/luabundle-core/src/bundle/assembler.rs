//! Composition of the output artifacts from transformed modules.

use super::ModuleRecord;
use crate::config::BundleConfig;
use luabundle_runtime::module::{load_module_call, BUNDLE_CONSTRUCTOR, REGISTRY_PRELUDE};
use luabundle_runtime::usage::{USAGE_EPILOGUE, USAGE_PROLOGUE};
use std::fmt;
use std::path::PathBuf;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Registry, modules and a direct entry point
    Standalone,
    /// Deferred library constructor followed by the usage example
    Universal,
    /// Verbatim copy of an optional raw source
    PassThrough,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::Standalone => "standalone library",
            ArtifactKind::Universal => "library + example",
            ArtifactKind::PassThrough => "pass-through",
        };
        f.write_str(label)
    }
}

/// A complete output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// File name relative to the output directory
    pub file_name: PathBuf,
    pub contents: String,
}

pub struct Assembler<'a> {
    config: &'a BundleConfig,
    modules: String,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a BundleConfig, records: &[ModuleRecord]) -> Self {
        let modules = records
            .iter()
            .map(|record| record.transformed_source.as_str())
            .collect();
        Self { config, modules }
    }

    /// Registry, every module, and `return LoadModule(<entry>)`
    pub fn standalone(&self) -> Artifact {
        let mut out = String::new();
        out.push_str(&format!(
            "--[[\n{INDENT}{}\n{INDENT}Bundled Release (V8 Compatibility)\n]]\n\n",
            self.config.title
        ));
        out.push_str(REGISTRY_PRELUDE);
        out.push('\n');
        out.push_str(&self.modules);
        out.push_str(&format!(
            "\nreturn {}\n",
            load_module_call(&self.config.entry_module)
        ));

        Artifact {
            kind: ArtifactKind::Standalone,
            file_name: self.config.outputs.standalone.clone(),
            contents: out,
        }
    }

    /// Library behind a deferred constructor, then the usage example running
    /// inside the loader callback. `example` is the raw example script.
    pub fn universal(&self, example: Option<&str>) -> Artifact {
        let mut out = String::new();
        out.push_str(&format!(
            "--[[\n{INDENT}{} + Example (V8 Compatibility)\n{INDENT}Universal Script\n]]\n\n",
            self.config.title
        ));
        out.push_str(&format!("local {BUNDLE_CONSTRUCTOR} = function()\n"));
        out.push_str(&indent_block(REGISTRY_PRELUDE, INDENT));
        out.push_str(&self.modules);
        out.push_str(&format!(
            "\n{INDENT}return {}\nend\n\n-- --- EXAMPLE USAGE ---\n\n",
            load_module_call(&self.config.entry_module)
        ));

        out.push_str(USAGE_PROLOGUE);
        if let Some(example) = example {
            let filtered = filter_lines(example, &self.config.example.strip_markers);
            out.push_str(&indent_block(&filtered, INDENT));
        }
        out.push_str(USAGE_EPILOGUE);

        Artifact {
            kind: ArtifactKind::Universal,
            file_name: self.config.outputs.universal.clone(),
            contents: out,
        }
    }

    /// Raw source with trailing whitespace trimmed and one final newline
    pub fn passthrough(&self, raw: &str) -> Artifact {
        let mut contents = raw.trim_end().to_string();
        contents.push('\n');

        Artifact {
            kind: ArtifactKind::PassThrough,
            file_name: self.config.outputs.passthrough.clone(),
            contents,
        }
    }
}

/// Drop every line containing one of `markers`.
pub fn filter_lines(text: &str, markers: &[String]) -> String {
    let mut out = String::new();
    for line in text.split_inclusive('\n') {
        if markers.iter().any(|marker| line.contains(marker.as_str())) {
            continue;
        }
        out.push_str(line);
    }
    out
}

/// Prefix every non-empty line with `prefix`, terminating each line with `\n`.
pub fn indent_block(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if !line.is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
