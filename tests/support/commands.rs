//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Bearer token the mock vaults accept.
pub const TEST_TOKEN: &str = "test-token";

/// Variables that would leak the developer's environment into a test run.
const SCRUBBED: &[&str] = &[
    "HAZYCTL_AZURE_SUBSCRIPTION",
    "HAZYCTL_MIGRATE_SOURCE",
    "HAZYCTL_MIGRATE_DESTINATION",
    "HAZYCTL_EXPORT_NAME",
    "HAZYCTL_EXPORT_OUTPUT",
    "HAZYCTL_LOG",
    "HAZYCTL_LOG_FORMAT",
    "HAZYCTL_RELEASE_API",
    "HAZYCTL_RELEASE_DOWNLOAD",
    "AZURE_TENANT_ID",
    "AZURE_CLIENT_ID",
    "AZURE_CLIENT_SECRET",
];

impl Test {
    /// Create a hazyctl command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - a fixed access token, so no real credential is ever consulted
    /// - colors disabled
    /// - current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("hazyctl").expect("failed to find hazyctl binary");
        for var in SCRUBBED {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env("HAZYCTL_AZURE_ACCESS_TOKEN", TEST_TOKEN);
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run hazyctl with `args`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run hazyctl")
    }

    /// Shortcut for `hazyctl secret azure export`.
    pub fn export(&self, vault: &str, output: &str) -> Output {
        self.run(&["secret", "azure", "export", "-n", vault, "-o", output])
    }

    /// Shortcut for `hazyctl secret azure migrate`.
    pub fn migrate(&self, source: &str, destination: &str) -> Output {
        self.run(&[
            "secret",
            "azure",
            "migrate",
            "--source",
            source,
            "--destination",
            destination,
        ])
    }
}
