//! Common test utilities for CLI integration tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: [&str; 8] = [
    "CRUMBTRAIL_DATA_DIR",
    "CRUMBTRAIL_CONFIG",
    "CRUMBTRAIL_OUTPUT_FORMAT",
    "CRUMBTRAIL_REFERENCE_FIELDS",
    "CRUMBTRAIL_ANCESTRY_FIELD",
    "CRUMBTRAIL_PART_OF_FIELD",
    "CRUMBTRAIL_MAX_DEPTH",
    "CRUMBTRAIL_INCLUDE_SELF",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the crumbtrail data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("crumbtrail-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Create an environment with `repository.yaml` already imported.
    pub fn with_repository() -> Self {
        let env = Self::new();
        env.command()
            .arg("import")
            .arg(fixture_path("repository.yaml"))
            .assert()
            .success();
        env
    }

    /// A command with no flags, run from the temp directory with every
    /// `CRUMBTRAIL_*` variable cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("crumbtrail").expect("Failed to find crumbtrail binary");
        cmd.current_dir(&self.temp_path);
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temp directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run `crumbtrail trail` with `args` and return stdout.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn trail(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .arg("trail")
            .args(args)
            .output()
            .expect("Failed to run trail command");

        assert!(
            output.status.success(),
            "Trail failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Path of a file under the library's `tests/fixtures`, shared with the
/// library's integration tests.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("crumbtrail")
        .join("tests")
        .join("fixtures")
        .join(name)
}
