//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Catalog with short hold windows so timing specs finish quickly
pub const FAST_CONFIG: &str = r#"
[reservation]
hold = "600ms"
speculative_borrow = "200ms"

[[members]]
id = 1
name = "Abebe"

[[members]]
id = 2
name = "Bob"

[[members]]
id = 3
name = "Charlie"

[[items]]
id = 1
title = "alice in the wonderland"
author = "K. Cox"

[[items]]
id = 2
title = "game of thrones"
author = "A. Donovan"
"#;

/// A scratch directory holding a config file
pub struct Project {
    dir: TempDir,
    config: PathBuf,
}

impl Project {
    pub fn with_config(content: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("lend.toml");
        std::fs::write(&config, content).unwrap();
        Self { dir, config }
    }

    pub fn fast() -> Self {
        Self::with_config(FAST_CONFIG)
    }

    /// Same catalog, with the speculative borrow disabled
    pub fn without_auto_borrow() -> Self {
        Self::with_config(&FAST_CONFIG.replace(
            "speculative_borrow = \"200ms\"",
            "auto_borrow = false",
        ))
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// `lend --config <project config>`
    pub fn lend(&self) -> CliRun {
        let mut run = lend();
        run.cmd.arg("--config").arg(&self.config);
        run
    }
}

/// `lend` with no config (demo catalog)
pub fn lend() -> CliRun {
    let mut cmd = Command::cargo_bin("lend").unwrap();
    cmd.env_remove("RUST_LOG");
    CliRun { cmd }
}

pub struct CliRun {
    cmd: Command,
}

impl CliRun {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    pub fn passes(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let result = RunOutput::from(output);
        assert!(
            result.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            result.stdout, result.stderr
        );
        result
    }

    pub fn fails(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let result = RunOutput::from(output);
        assert!(
            !result.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            result.stdout, result.stderr
        );
        result
    }
}

pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RunOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunOutput {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }
}
