use assert_cmd::Command;
use luabundle_test_helpers::fixtures;
use luabundle_test_helpers::project::TestProject;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn luabundle_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("luabundle"))
}

// ============================================================================
// FULL BUILD
// ============================================================================

#[test]
fn test_build_discovers_config_in_root() {
    let temp_dir = TempDir::new().unwrap();
    TestProject::ui_library()
        .example(fixtures::example_script())
        .write_to(temp_dir.path(), "luabundle.yaml")
        .unwrap();

    luabundle_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Release.lua"))
        .stdout(predicate::str::contains("Universal.lua"))
        .stdout(predicate::str::contains("Skipped pass-through artifact"));

    let release = fs::read_to_string(temp_dir.path().join("Release.lua")).unwrap();
    assert!(release.contains("return LoadModule(\"Library\")"));
    assert!(!temp_dir.path().join("GRGStandalone.lua").exists());
}

#[test]
fn test_build_with_passthrough() {
    let temp_dir = TempDir::new().unwrap();
    TestProject::ui_library()
        .passthrough(fixtures::passthrough_source())
        .write_to(temp_dir.path(), "luabundle.yaml")
        .unwrap();

    luabundle_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("GRGStandalone.lua"));

    let copied = fs::read_to_string(temp_dir.path().join("GRGStandalone.lua")).unwrap();
    assert!(copied.ends_with("return G2L\n"));
}

#[test]
fn test_explicit_json_config_and_overrides() {
    let temp_dir = TempDir::new().unwrap();
    TestProject::ui_library()
        .write_to(temp_dir.path(), "bundle.json")
        .unwrap();

    luabundle_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .arg("--config")
        .arg(temp_dir.path().join("bundle.json"))
        .arg("--entry")
        .arg("Window")
        .arg("--out-dir")
        .arg("dist")
        .assert()
        .success();

    let release = fs::read_to_string(temp_dir.path().join("dist").join("Release.lua")).unwrap();
    assert!(release.ends_with("return LoadModule(\"Window\")\n"));
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_missing_module_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    TestProject::ui_library()
        .write_to(temp_dir.path(), "luabundle.yaml")
        .unwrap();
    fs::remove_file(temp_dir.path().join("src/Components/Window.lua")).unwrap();

    luabundle_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Window"));

    assert!(!temp_dir.path().join("Release.lua").exists());
}

#[test]
fn test_unknown_entry_fails() {
    let temp_dir = TempDir::new().unwrap();
    TestProject::ui_library()
        .write_to(temp_dir.path(), "luabundle.yaml")
        .unwrap();

    luabundle_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .arg("--entry")
        .arg("Nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "entry module 'Nope' is not declared",
        ));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("luabundle.yaml"), "modules: [1, 2]").unwrap();

    luabundle_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}

// ============================================================================
// INIT
// ============================================================================

#[test]
fn test_init_writes_default_config() {
    let temp_dir = TempDir::new().unwrap();

    luabundle_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .arg("--init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let config = fs::read_to_string(temp_dir.path().join("luabundle.yaml")).unwrap();
    assert!(config.contains("entryModule: Library"));
    assert!(config.contains("KeybindList: src/Features/KeybindList.lua"));

    luabundle_cmd()
        .arg("--root")
        .arg(temp_dir.path())
        .arg("--init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
