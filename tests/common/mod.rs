//! Shared integration-test harness for running the `dupguard` binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Helpers for invoking the built binary.
pub struct DupGuardProcess;

impl DupGuardProcess {
    /// Runs `dupguard` with `args` to completion and returns its output.
    ///
    /// Logging is silenced through `DUPGUARD_LOG_LEVEL` so stderr only
    /// carries report-level messages.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::command(args)
            .output()
            .expect("failed to run dupguard")
    }

    /// Runs `dupguard` with extra environment variables set.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut cmd = Self::command(args);
        cmd.envs(env.iter().copied());
        cmd.output().expect("failed to run dupguard")
    }

    /// Builds the `dupguard` command without running it.
    ///
    /// Stdout and stderr are piped so a spawned child can be collected with
    /// `wait_with_output`.
    #[must_use]
    pub fn command(args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dupguard"));
        cmd.args(args)
            .env("DUPGUARD_LOG_LEVEL", "off")
            .env_remove("DUPGUARD_SPECIAL_FIELD")
            .env_remove("DUPGUARD_CONCURRENCY")
            .env_remove("DUPGUARD_COLOR")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Runs `dupguard` and parses its stdout as the JSON report.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_json(args: &[&str]) -> (Output, serde_json::Value) {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        let output = Self::spawn_command(&full);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let parsed = serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("invalid JSON report: {e}\nstdout: {stdout}"));
        (output, parsed)
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Returns a fixture path as a string argument.
    #[must_use]
    pub fn fixture_arg(name: &str) -> String {
        Self::fixture_path(name).to_string_lossy().into_owned()
    }
}
