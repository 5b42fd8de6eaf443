//! Tests for config bootstrap and layering.

use crate::support::*;

#[test]
fn test_first_run_writes_default_config() {
    let t = Test::new();
    assert!(!t.config_path().exists());

    let output = t.run(&["version"]);
    assert_success(&output);

    let contents = std::fs::read_to_string(t.config_path()).unwrap();
    assert!(contents.contains("output: secrets.json"));
    assert!(contents.contains("azure_subscription: ''"));
}

#[test]
fn test_existing_config_is_kept() {
    let yaml = "export:\n  name: from-file\n  output: custom.json\n";
    let t = Test::with_config(yaml);

    assert_success(&t.run(&["version"]));
    assert_eq!(std::fs::read_to_string(t.config_path()).unwrap(), yaml);
}

#[test]
fn test_explicit_config_path() {
    let t = Test::new();
    let path = t.path("alt.yaml");

    let output = t.run(&["--config", path.to_str().unwrap(), "version"]);
    assert_success(&output);
    assert!(path.exists());
    assert!(!t.config_path().exists());
}

#[test]
fn test_invalid_yaml_is_fatal() {
    let t = Test::with_config("export: [unterminated\n");

    let output = t.run(&["version"]);
    assert_fatal(&output, "can't parse config");
}

#[test]
fn test_missing_export_name_names_every_source() {
    let t = Test::new();

    let output = t.run(&["secret", "azure", "export"]);
    assert_fatal(&output, "missing vault name");
    assert_stdout_contains(&output, "--name");
    assert_stdout_contains(&output, "HAZYCTL_EXPORT_NAME");
    assert_stdout_contains(&output, "export.name");
}

#[test]
fn test_missing_migrate_destination() {
    let t = Test::new();

    let output = t.run(&["secret", "azure", "migrate", "--source", "src-vault"]);
    assert_fatal(&output, "missing destination vault");
}

#[test]
fn test_env_override_reaches_command() {
    let t = Test::new();

    // Vault name comes from the environment; it is invalid, so the command
    // fails before any network call, naming the env-supplied value.
    let output = t
        .cmd()
        .env("HAZYCTL_EXPORT_NAME", "bad vault")
        .args(["secret", "azure", "export"])
        .output()
        .unwrap();
    assert_fatal(&output, "invalid vault 'bad vault'");
}
