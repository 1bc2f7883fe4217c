//! Test helpers for behavioral specifications.
//!
//! Provides high-level DSL for testing rw CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Aggressive timings for fast tests.
const RW_RENDER_TICK_MS: &str = "20";
const RW_KILL_TIMEOUT_MS: &str = "1000";

/// Project config that runs `main.py` with `sh` and shrinks every timer.
pub const FAST_CONFIG: &str = r#"
interpreter = "sh"

[timing]
poll_interval_ms = 50
search_poll_interval_ms = 50
heartbeat_interval_ms = 1000
max_search_wait_ms = 3000
inactivity_grace_ms = 300
probe_interval_ms = 100
discovery_attempts = 3
discovery_delay_ms = 100
terminate_timeout_ms = 1000
watch_fs = false

[view]
reconcile_interval_ms = 200
quiet_period_ms = 200
"#;

/// A pipeline that behaves like the real one: one log file, some console
/// output, then an output artifact named after the label.
pub const PIPELINE: &str = r##"
mkdir -p logs output
ts=$(date +%Y%m%d_%H%M%S)
log="logs/${CREW_INPUT_VALUE}_${ts}.log"
echo "INFO starting research on $3" >> "$log"
echo "agent stdout line"
echo "agent stderr line" >&2
sleep 0.3
echo "INFO writing report" >> "$log"
echo "# Report on $3" > "output/${CREW_INPUT_VALUE}_${ts}.md"
"##;

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>, so its
    // grandparent is target/debug/ where rw is built.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Returns a Command configured to run the rw binary
pub fn rw_cmd() -> Command {
    Command::new(binary_path("rw"))
}

/// Create a CLI builder for rw commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: vec![
                ("RW_RENDER_TICK_MS".into(), RW_RENDER_TICK_MS.into()),
                ("RW_KILL_TIMEOUT_MS".into(), RW_KILL_TIMEOUT_MS.into()),
                ("NO_COLOR".into(), "1".into()),
            ],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = rw_cmd();
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        // Parent settings must not leak into tests.
        cmd.env_remove("RW_LOG");
        cmd.env_remove("COLOR");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Assert the exit code.
    pub fn code_is(self, expected: i32) -> Self {
        assert_eq!(
            self.code(),
            Some(expected),
            "stdout: {}\nstderr: {}",
            self.stdout(),
            self.stderr()
        );
        self
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary pipeline project with helper methods.
pub struct Project {
    dir: tempfile::TempDir,
    /// Isolated state directory for this test (RW_STATE_DIR)
    state_dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            state_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A project with the fast config and `script` as its `main.py`
    pub fn with_pipeline(script: &str) -> Self {
        let project = Self::empty();
        project.file("runwatch.toml", FAST_CONFIG);
        project.file("main.py", script);
        project
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Get the isolated state directory path
    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }

    /// Run rw in this project's context
    pub fn rw(&self) -> CliBuilder {
        cli()
            .pwd(self.path())
            .env("RW_STATE_DIR", self.state_path())
    }

    /// Names of the files in a project subdirectory, sorted
    pub fn files_in(&self, dir: &str) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.path().join(dir)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Read the rw diagnostic log (for debugging test failures)
    pub fn rw_log(&self) -> String {
        std::fs::read_to_string(self.state_path().join("rw.log"))
            .unwrap_or_else(|_| "(no rw log)".to_string())
    }
}
