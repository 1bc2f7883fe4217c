// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration from `runwatch.toml`.
//!
//! Every key is optional; anything left out keeps the built-in default.
//! Durations are given in milliseconds.
//!
//! ```toml
//! interpreter = "python3"
//! script = "main.py"
//! logs_dir = "logs"
//! output_extension = "md"
//!
//! [timing]
//! max_run_time_ms = 600000
//!
//! [view]
//! quiet_period_ms = 1000
//! ```

use rw_core::RunPaths;
use rw_engine::{MonitorConfig, ViewConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "runwatch.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub interpreter: Option<String>,
    pub script: Option<String>,
    pub entry_point: Option<PathBuf>,
    pub package_dirs: Option<Vec<String>>,
    pub action: Option<String>,
    pub param_flag: Option<String>,
    pub label_env: Option<String>,
    pub logs_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub output_extension: Option<String>,
    pub timing: TimingConfig,
    pub view: ViewSection,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub poll_interval_ms: Option<u64>,
    pub search_poll_interval_ms: Option<u64>,
    pub heartbeat_interval_ms: Option<u64>,
    pub max_search_wait_ms: Option<u64>,
    pub inactivity_grace_ms: Option<u64>,
    pub max_tail_duration_ms: Option<u64>,
    pub clock_skew_ms: Option<u64>,
    pub watch_fs: Option<bool>,
    pub max_run_time_ms: Option<u64>,
    pub probe_interval_ms: Option<u64>,
    pub discovery_attempts: Option<u32>,
    pub discovery_delay_ms: Option<u64>,
    pub terminate_timeout_ms: Option<u64>,
    /// Zero means unbounded
    pub bridge_capacity: Option<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewSection {
    pub console_capacity: Option<usize>,
    pub log_capacity: Option<usize>,
    pub reconcile_interval_ms: Option<u64>,
    pub quiet_period_ms: Option<u64>,
}

impl ProjectConfig {
    /// Load `explicit` if given (it must exist), else `runwatch.toml` in
    /// the project root if present, else defaults.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = project_root.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    tracing::debug!(root = %project_root.display(), "no project config, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded project config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Directory layout with overrides applied, relative to the project root.
    pub fn run_paths(&self) -> RunPaths {
        let defaults = RunPaths::default();
        RunPaths::new(
            self.logs_dir.clone().unwrap_or(defaults.logs_dir),
            self.output_dir.clone().unwrap_or(defaults.output_dir),
            self.output_extension
                .clone()
                .unwrap_or(defaults.output_extension),
        )
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        let mut config = MonitorConfig {
            paths: self.run_paths(),
            ..MonitorConfig::default()
        };
        set(&mut config.interpreter, &self.interpreter);
        set(&mut config.script_name, &self.script);
        set(&mut config.package_dirs, &self.package_dirs);
        set(&mut config.process_action, &self.action);
        set(&mut config.param_flag, &self.param_flag);
        set(&mut config.label_env_var, &self.label_env);
        if self.entry_point.is_some() {
            config.entry_point = self.entry_point.clone();
        }

        let t = &self.timing;
        let tailer = &mut config.tailer;
        set_ms(&mut tailer.poll_interval, t.poll_interval_ms);
        set_ms(&mut tailer.search_poll_interval, t.search_poll_interval_ms);
        set_ms(&mut tailer.heartbeat_interval, t.heartbeat_interval_ms);
        set_ms(&mut tailer.max_search_wait, t.max_search_wait_ms);
        set_ms(&mut tailer.inactivity_grace, t.inactivity_grace_ms);
        set_ms(&mut tailer.max_tail_duration, t.max_tail_duration_ms);
        set_ms(&mut tailer.clock_skew, t.clock_skew_ms);
        set(&mut tailer.watch_fs, &t.watch_fs);
        set_ms(&mut config.max_run_time, t.max_run_time_ms);
        set_ms(&mut config.probe_interval, t.probe_interval_ms);
        set(&mut config.discovery_attempts, &t.discovery_attempts);
        set_ms(&mut config.discovery_delay, t.discovery_delay_ms);
        set_ms(&mut config.terminate_timeout, t.terminate_timeout_ms);
        if let Some(capacity) = t.bridge_capacity {
            config.bridge_capacity = (capacity > 0).then_some(capacity);
        }
        config
    }

    pub fn view_config(&self) -> ViewConfig {
        let mut config = ViewConfig::default();
        let v = &self.view;
        set(&mut config.console_capacity, &v.console_capacity);
        set(&mut config.log_capacity, &v.log_capacity);
        set_ms(&mut config.reconcile_interval, v.reconcile_interval_ms);
        set_ms(&mut config.quiet_period, v.quiet_period_ms);
        config
    }
}

fn set<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

fn set_ms(field: &mut Duration, value: Option<u64>) {
    if let Some(ms) = value {
        *field = Duration::from_millis(ms);
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
