// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings for one monitored run.

use rw_adapters::artifact::{DEFAULT_DISCOVERY_ATTEMPTS, DEFAULT_DISCOVERY_DELAY};
use rw_adapters::process::DEFAULT_PACKAGE_DIRS;
use rw_adapters::{TailerConfig, DEFAULT_BRIDGE_CAPACITY};
use rw_core::RunPaths;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Log and output directories, relative to the project root
    pub paths: RunPaths,
    pub interpreter: String,
    pub script_name: String,
    /// Explicit entry point, tried before searching
    pub entry_point: Option<PathBuf>,
    pub package_dirs: Vec<String>,
    pub process_action: String,
    pub param_flag: String,
    /// Environment variable carrying the cleaned label to the child
    pub label_env_var: String,
    pub tailer: TailerConfig,
    /// The child is terminated after running this long
    pub max_run_time: Duration,
    /// Interval between speculative output probes while the child runs
    pub probe_interval: Duration,
    pub discovery_attempts: u32,
    pub discovery_delay: Duration,
    /// SIGTERM grace before SIGKILL
    pub terminate_timeout: Duration,
    pub bridge_capacity: Option<usize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            paths: RunPaths::default(),
            interpreter: "python".to_string(),
            script_name: "main.py".to_string(),
            entry_point: None,
            package_dirs: DEFAULT_PACKAGE_DIRS.iter().map(|d| d.to_string()).collect(),
            process_action: "run".to_string(),
            param_flag: "--topic".to_string(),
            label_env_var: "CREW_INPUT_VALUE".to_string(),
            tailer: TailerConfig::default(),
            max_run_time: Duration::from_secs(1800),
            probe_interval: Duration::from_secs(3),
            discovery_attempts: DEFAULT_DISCOVERY_ATTEMPTS,
            discovery_delay: DEFAULT_DISCOVERY_DELAY,
            terminate_timeout: Duration::from_secs(5),
            bridge_capacity: Some(DEFAULT_BRIDGE_CAPACITY),
        }
    }
}
