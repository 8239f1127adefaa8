use crate::bundle::ModuleDescriptor;
use crate::errors::BundleError;
use indexmap::IndexMap;
use luabundle_runtime::usage::DEFAULT_STRIP_MARKERS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "luabundle.yaml";

/// Module layout of the UI library the bundler ships with.
const DEFAULT_MODULES: &[(&str, &str)] = &[
    ("Utility", "src/Core/Utility.lua"),
    ("ThemeManager", "src/Core/ThemeManager.lua"),
    ("Acrylic", "src/Core/Acrylic.lua"),
    ("Particles", "src/Core/Particles.lua"),
    ("SaveManager", "src/Core/SaveManager.lua"),
    ("Compatibility", "src/Core/Compatibility.lua"),
    ("Loader", "src/Core/Loader.lua"),
    ("Library", "src/Core/Library.lua"),
    ("Window", "src/Components/Window.lua"),
    ("Tab", "src/Components/Tab.lua"),
    ("Section", "src/Components/Section.lua"),
    ("Button", "src/Components/Elements/Button.lua"),
    ("Toggle", "src/Components/Elements/Toggle.lua"),
    ("Slider", "src/Components/Elements/Slider.lua"),
    ("TextBox", "src/Components/Elements/TextBox.lua"),
    ("Dropdown", "src/Components/Elements/Dropdown.lua"),
    ("ColorPicker", "src/Components/Elements/ColorPicker.lua"),
    ("Keybind", "src/Components/Elements/Keybind.lua"),
    ("Notifications", "src/Features/Notifications.lua"),
    ("Tooltips", "src/Features/Tooltips.lua"),
    ("Search", "src/Features/Search.lua"),
    ("Watermark", "src/Features/Watermark.lua"),
    ("KeybindList", "src/Features/KeybindList.lua"),
];

/// Usage example merged into the universal artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleOptions {
    /// Example script, relative to the build root (default: example.lua)
    #[serde(default = "default_example_path")]
    pub path: PathBuf,

    /// Lines containing any of these markers are dropped from the example
    #[serde(default = "default_strip_markers")]
    pub strip_markers: Vec<String>,
}

fn default_example_path() -> PathBuf {
    PathBuf::from("example.lua")
}

fn default_strip_markers() -> Vec<String> {
    DEFAULT_STRIP_MARKERS.iter().map(|m| m.to_string()).collect()
}

impl Default for ExampleOptions {
    fn default() -> Self {
        Self {
            path: default_example_path(),
            strip_markers: default_strip_markers(),
        }
    }
}

/// Raw source copied verbatim when present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassthroughOptions {
    #[serde(default = "default_passthrough_path")]
    pub path: PathBuf,
}

fn default_passthrough_path() -> PathBuf {
    PathBuf::from("src/Components/grg")
}

impl Default for PassthroughOptions {
    fn default() -> Self {
        Self {
            path: default_passthrough_path(),
        }
    }
}

/// Artifact file names, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    #[serde(default = "default_standalone_output")]
    pub standalone: PathBuf,

    #[serde(default = "default_universal_output")]
    pub universal: PathBuf,

    #[serde(default = "default_passthrough_output")]
    pub passthrough: PathBuf,
}

fn default_standalone_output() -> PathBuf {
    PathBuf::from("Release.lua")
}

fn default_universal_output() -> PathBuf {
    PathBuf::from("Universal.lua")
}

fn default_passthrough_output() -> PathBuf {
    PathBuf::from("GRGStandalone.lua")
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            standalone: default_standalone_output(),
            universal: default_universal_output(),
            passthrough: default_passthrough_output(),
        }
    }
}

/// Main bundler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Library title used in artifact header comments
    #[serde(default = "default_title")]
    pub title: String,

    /// Module returned by the artifact entry point (default: Library)
    #[serde(default = "default_entry_module")]
    pub entry_module: String,

    /// Module name to source path, in declaration order
    #[serde(default = "default_modules")]
    pub modules: IndexMap<String, PathBuf>,

    #[serde(default)]
    pub example: ExampleOptions,

    #[serde(default)]
    pub passthrough: PassthroughOptions,

    #[serde(default)]
    pub outputs: OutputOptions,

    /// Output directory for artifacts (default: the build root)
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

fn default_title() -> String {
    "Premium Glassmorphism UI Library".to_string()
}

fn default_entry_module() -> String {
    "Library".to_string()
}

fn default_modules() -> IndexMap<String, PathBuf> {
    DEFAULT_MODULES
        .iter()
        .map(|(name, path)| (name.to_string(), PathBuf::from(path)))
        .collect()
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            entry_module: default_entry_module(),
            modules: default_modules(),
            example: ExampleOptions::default(),
            passthrough: PassthroughOptions::default(),
            outputs: OutputOptions::default(),
            out_dir: None,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// CLI flags that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub entry_module: Option<String>,
    pub out_dir: Option<PathBuf>,
}

impl BundleConfig {
    /// Load configuration from a JSON or YAML file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self, BundleError> {
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| BundleError::Config(e.to_string()))
        } else {
            serde_yaml::from_str(&content).map_err(|e| BundleError::Config(e.to_string()))
        }
    }

    /// Create a default configuration and write it to a file
    pub fn init_file(path: &Path) -> Result<(), BundleError> {
        BundleConfig::default().write_file(path)
    }

    /// Write this configuration as JSON or YAML, chosen by extension
    pub fn write_file(&self, path: &Path) -> Result<(), BundleError> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| BundleError::Config(e.to_string()))?
        } else {
            serde_yaml::to_string(self).map_err(|e| BundleError::Config(e.to_string()))?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn merge_overrides(&mut self, overrides: CliOverrides) {
        if let Some(entry_module) = overrides.entry_module {
            self.entry_module = entry_module;
        }
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = Some(out_dir);
        }
    }

    /// Reject configurations that cannot produce a loadable artifact
    pub fn validate(&self) -> Result<(), BundleError> {
        if self.modules.is_empty() {
            return Err(BundleError::Config("no modules declared".to_string()));
        }
        if self.modules.keys().any(|name| name.trim().is_empty()) {
            return Err(BundleError::Config("module names must not be empty".to_string()));
        }
        if !self.modules.contains_key(&self.entry_module) {
            return Err(BundleError::Config(format!(
                "entry module '{}' is not declared",
                self.entry_module
            )));
        }
        Ok(())
    }

    pub fn descriptors(&self) -> Vec<ModuleDescriptor> {
        self.modules
            .iter()
            .map(|(name, path)| ModuleDescriptor::new(name.clone(), path.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BundleConfig::default();
        assert_eq!(config.entry_module, "Library");
        assert_eq!(config.modules.len(), 23);
        assert_eq!(
            config.modules.get("KeybindList"),
            Some(&PathBuf::from("src/Features/KeybindList.lua"))
        );
        assert_eq!(config.outputs.standalone, PathBuf::from("Release.lua"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_modules_keep_declaration_order() {
        let config = BundleConfig::default();
        let names: Vec<&str> = config.modules.keys().map(String::as_str).collect();
        assert_eq!(names.first(), Some(&"Utility"));
        assert_eq!(names.last(), Some(&"KeybindList"));
    }

    #[test]
    fn test_deserialize_yaml() {
        let yaml = r#"
entryModule: Window
modules:
  Toggle: src/Toggle.lua
  Window: src/Window.lua
example:
  stripMarkers: ["require("]
"#;
        let config: BundleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.entry_module, "Window");
        let names: Vec<&str> = config.modules.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Toggle", "Window"]);
        assert_eq!(config.example.strip_markers, vec!["require(".to_string()]);
        assert_eq!(config.example.path, PathBuf::from("example.lua"));
        assert_eq!(config.outputs.universal, PathBuf::from("Universal.lua"));
    }

    #[test]
    fn test_from_file_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("luabundle.json");
        std::fs::write(
            &path,
            r#"{ "entryModule": "A", "modules": { "A": "a.lua" }, "outDir": "dist" }"#,
        )
        .unwrap();

        let config = BundleConfig::from_file(&path).unwrap();
        assert_eq!(config.entry_module, "A");
        assert_eq!(config.out_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_from_file_invalid_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("luabundle.yaml");
        std::fs::write(&path, "modules: [not, a, map]").unwrap();

        let err = BundleConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, BundleError::Config(_)));
    }

    #[test]
    fn test_init_file_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        BundleConfig::init_file(&path).unwrap();
        let config = BundleConfig::from_file(&path).unwrap();
        assert_eq!(config, BundleConfig::default());
    }

    #[test]
    fn test_validate_rejects_undeclared_entry() {
        let config = BundleConfig {
            entry_module: "Missing".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_validate_rejects_empty_module_set() {
        let config = BundleConfig {
            modules: IndexMap::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_overrides() {
        let mut config = BundleConfig::default();
        config.merge_overrides(CliOverrides {
            entry_module: Some("Window".to_string()),
            out_dir: Some(PathBuf::from("dist")),
        });
        assert_eq!(config.entry_module, "Window");
        assert_eq!(config.out_dir, Some(PathBuf::from("dist")));
    }
}
