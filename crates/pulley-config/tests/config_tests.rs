// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for Pulleyfile loading and settings layering.

use std::path::PathBuf;

use figment::Jail;
use pulley_config::diagnostic::ConfigError;
use pulley_config::loader::{load_settings, PULLEYFILE_NAMES};
use pulley_config::{
    DocumentLoader, FileLoader, Pulleyfile, SettingsOverrides, find_pulleyfile,
    load_and_validate_settings, load_pulleyfile, validate,
};
use pulley_core::PulleyError;
use pulley_report::Reporter;

const DEMO_YAML: &str = "\
info:
  name: demo
packages:
  - name: a
    source: local
    options:
      path: ./assets
";

fn isolate_xdg(jail: &mut Jail) {
    let xdg = jail.directory().join("xdg");
    jail.set_env("XDG_CONFIG_HOME", xdg.display());
}

#[tokio::test]
async fn discovery_prefers_yaml_over_other_names() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Pulleyfile"), "{}").unwrap();
    std::fs::write(dir.path().join("pulleyfile.toml"), "").unwrap();
    std::fs::write(dir.path().join("PulleyFile.YAML"), DEMO_YAML).unwrap();

    let found = find_pulleyfile(dir.path()).await.unwrap();
    assert_eq!(found.file_name().unwrap(), "PulleyFile.YAML");
}

#[tokio::test]
async fn discovery_falls_back_through_priority_list() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pulleyfile"), DEMO_YAML).unwrap();
    std::fs::write(dir.path().join("pulleyfile.toml"), "").unwrap();

    let found = find_pulleyfile(dir.path()).await.unwrap();
    assert_eq!(found.file_name().unwrap(), "pulleyfile.toml");
    assert_eq!(PULLEYFILE_NAMES.len(), 4);
}

#[tokio::test]
async fn discovery_without_candidates_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("README.md"), "").unwrap();
    std::fs::create_dir(dir.path().join("pulleyfile.yaml")).unwrap();

    let err = find_pulleyfile(dir.path()).await.unwrap_err();
    assert!(matches!(err, PulleyError::ConfigLoad { .. }));
    assert!(err.to_string().contains("No Pulleyfile found"));
}

#[tokio::test]
async fn yaml_pulleyfile_loads_validates_and_deserializes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pulleyfile.yml");
    std::fs::write(&path, DEMO_YAML).unwrap();

    let value = load_pulleyfile(&path).await.unwrap();
    assert!(validate(&value).is_valid());

    let pulleyfile: Pulleyfile = serde_json::from_value(value).unwrap();
    assert_eq!(pulleyfile.info.name, "demo");
    assert_eq!(pulleyfile.packages[0].source_name().unwrap(), "local");
    assert!(pulleyfile.bundler.is_none());
}

#[tokio::test]
async fn file_loader_discovers_in_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pulleyfile.yaml"), DEMO_YAML).unwrap();

    let loader = FileLoader::new(None).in_dir(dir.path());
    let value = loader.load(&Reporter::silent()).await.unwrap();
    assert_eq!(value["info"]["name"], "demo");
}

#[tokio::test]
async fn file_loader_reports_unparsable_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pulleyfile.yaml");
    std::fs::write(&path, "info: [unclosed").unwrap();

    let err = FileLoader::new(Some(path))
        .load(&Reporter::silent())
        .await
        .unwrap_err();
    assert!(matches!(err, PulleyError::ConfigLoad { .. }));
}

#[tokio::test]
async fn missing_explicit_path_is_a_load_error() {
    let err = FileLoader::new(Some(PathBuf::from("/definitely/not/here.yaml")))
        .load(&Reporter::silent())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}

#[test]
fn settings_layers_merge_in_order() {
    Jail::expect_with(|jail| {
        isolate_xdg(jail);
        std::fs::create_dir_all(jail.directory().join("xdg/pulley")).map_err(|e| e.to_string())?;
        jail.create_file(
            "xdg/pulley/pulley.toml",
            "destination = \"/from/xdg\"\nbundler = \"xdg\"\nverbosity = 2\n",
        )?;
        jail.create_file("pulley.toml", "bundler = \"local-file\"\n")?;
        jail.set_env("PULLEY_VERBOSITY", "3");

        let settings = load_settings(&SettingsOverrides::default())?;
        assert_eq!(settings.destination, PathBuf::from("/from/xdg"));
        assert_eq!(settings.bundler.as_deref(), Some("local-file"));
        assert_eq!(settings.verbosity, 3);
        assert!(!settings.halt_on_rule_failure);
        Ok(())
    });
}

#[test]
fn command_line_overrides_beat_environment() {
    Jail::expect_with(|jail| {
        isolate_xdg(jail);
        jail.set_env("PULLEY_BUNDLER", "from-env");
        jail.set_env("PULLEY_HALT_ON_RULE_FAILURE", "true");

        let overrides = SettingsOverrides {
            bundler: Some("from-cli".into()),
            ..SettingsOverrides::default()
        };
        let settings = load_settings(&overrides)?;
        assert_eq!(settings.bundler.as_deref(), Some("from-cli"));
        assert!(settings.halt_on_rule_failure);
        assert_eq!(settings.destination, PathBuf::from("./out"));
        Ok(())
    });
}

#[test]
fn unrelated_pulley_variables_are_ignored() {
    Jail::expect_with(|jail| {
        isolate_xdg(jail);
        jail.set_env("PULLEY_SOMETHING_ELSE", "1");
        assert!(load_settings(&SettingsOverrides::default()).is_ok());
        Ok(())
    });
}

#[test]
fn invalid_settings_produce_diagnostics() {
    Jail::expect_with(|jail| {
        isolate_xdg(jail);
        jail.create_file("pulley.toml", "verbosity = 9\n")?;
        let errors = load_and_validate_settings(&SettingsOverrides::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigError::Validation { .. }));
        Ok(())
    });
}

#[test]
fn settings_typos_get_suggestions() {
    Jail::expect_with(|jail| {
        isolate_xdg(jail);
        jail.create_file("pulley.toml", "destinaton = \"x\"\n")?;
        let errors = load_and_validate_settings(&SettingsOverrides::default()).unwrap_err();
        match &errors[0] {
            ConfigError::UnknownKey { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("destination"));
            }
            other => panic!("expected unknown key diagnostic, got {other:?}"),
        }
        Ok(())
    });
}
