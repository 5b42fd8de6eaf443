//! Tests for `hazyctl version`.

use crate::support::*;

#[test]
fn test_version_prints_build_metadata() {
    let t = Test::new();

    let output = t.run(&["version"]);
    assert_success(&output);
    assert_stdout_contains(&output, &format!("Version: {}", env!("CARGO_PKG_VERSION")));
    assert_stdout_contains(&output, "Git Commit:");
    assert_stdout_contains(&output, "Build Date:");
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.run(&["--version"]);
    assert_success(&output);
    assert_stdout_contains(&output, "hazyctl");
}
