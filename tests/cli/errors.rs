//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.run(&["--help"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("hazyctl") || out.contains("Usage"));
    assert!(out.contains("secret"));
    assert!(out.contains("update"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.run(&["unknown-command"]);
    assert_fatal(&output, "unknown-command");
}

#[test]
fn test_unknown_provider_rejected() {
    let t = Test::new();

    let output = t.run(&["secret", "gcp", "export", "-n", "kv"]);
    assert_fatal(&output, "provider gcp not found");
    assert_stdout_contains(&output, "azure");
}

#[test]
fn test_unknown_flag_rejected() {
    let t = Test::new();

    let output = t.run(&["secret", "azure", "migrate", "--bogus"]);
    assert_fatal(&output, "--bogus");
}

#[test]
fn test_missing_subcommand_is_fatal() {
    let t = Test::new();

    let output = t.run(&["secret", "azure"]);
    assert_failure(&output);
    assert_stdout_contains(&output, "✗");
}

#[test]
fn test_provider_name_is_case_insensitive() {
    let t = Test::new();

    // Parses as azure; fails later on the missing vault name.
    let output = t.run(&["secret", "Azure", "export"]);
    assert_fatal(&output, "missing vault name");
}

#[test]
fn test_insecure_remote_vault_url_rejected() {
    let t = Test::new();

    let output = t.export("http://vault.example.com", "out.json");
    assert_fatal(&output, "insecure http");
    assert!(!t.path("out.json").exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::new();

    let output = t.run(&["--verbose", "version"]);
    assert_success(&output);
    assert!(stderr(&output).contains("loading config"));
    assert_stdout_excludes(&output, "loading config");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.run(&["completions", "bash"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_hazyctl") || out.contains("complete"));
}

#[test]
fn test_completions_invalid_shell() {
    let t = Test::new();

    let output = t.run(&["completions", "tcsh"]);
    assert_fatal(&output, "tcsh");
}
