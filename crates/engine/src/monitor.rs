// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring for one monitored run.
//!
//! [`start`] launches the pipeline and spawns the background tasks:
//! two output readers, the log tailer, and the supervisor. Everything they
//! observe reaches the caller through the returned [`EventDrain`].

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use rw_adapters::process::spawn_output_reader;
use rw_adapters::{
    discover_artifact, launch, newest_match, resolve_entry_point, Completion, CompletionSignal,
    Detector, EventBridge, EventDrain, LaunchSpec, LogTailer, ProcessHandle, TailState,
};
use rw_core::{CleanLabel, FilePattern, LineSource, LogEvent, RunId};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A run in progress.
pub struct ActiveRun {
    id: RunId,
    label: CleanLabel,
    handle: ProcessHandle,
    bridge: EventBridge,
    completion: CompletionSignal,
    log_pattern: FilePattern,
    output_pattern: FilePattern,
    terminate_timeout: Duration,
    readers: Vec<JoinHandle<u64>>,
    tailer: JoinHandle<TailState>,
    supervisor: JoinHandle<()>,
}

/// Launch the pipeline for `raw_label` under `project_root`.
///
/// Entry point resolution and spawn failures are returned synchronously;
/// nothing is spawned in that case.
pub fn start(
    config: &MonitorConfig,
    project_root: &Path,
    raw_label: &str,
) -> Result<(ActiveRun, EventDrain), MonitorError> {
    if !project_root.is_dir() {
        return Err(MonitorError::ProjectRoot(project_root.to_path_buf()));
    }
    let label = CleanLabel::new(raw_label);
    if label.is_empty() {
        return Err(MonitorError::EmptyLabel(raw_label.to_string()));
    }
    let id = RunId::generate();
    let paths = config.paths.rooted_at(project_root);
    let entry = resolve_entry_point(
        project_root,
        config.entry_point.as_deref(),
        &config.script_name,
        &config.package_dirs,
    )?;

    let spec = LaunchSpec {
        interpreter: config.interpreter.clone(),
        entry,
        action: config.process_action.clone(),
        param_flag: config.param_flag.clone(),
        value: raw_label.to_string(),
        cwd: project_root.to_path_buf(),
        env: vec![(config.label_env_var.clone(), label.to_string())],
    };
    let (handle, output) = launch(&spec)?;

    let (bridge, drain) = EventBridge::new(config.bridge_capacity);
    bridge.publish(LogEvent::notice(format!("starting run for {raw_label}")));
    bridge.publish(LogEvent::notice(format!("cleaned label: {label}")));
    bridge.publish(LogEvent::notice(format!("running: {}", spec.command_line())));
    bridge.publish(LogEvent::started());
    bridge.publish(LogEvent::notice(format!(
        "process started with pid {}",
        handle.pid()
    )));
    tracing::info!(run_id = %id, %label, pid = handle.pid(), "run started");

    let readers = vec![
        spawn_output_reader(output.stdout, LineSource::Stdout, bridge.clone()),
        spawn_output_reader(output.stderr, LineSource::Stderr, bridge.clone()),
    ];

    let completion = CompletionSignal::new(bridge.clone());
    let log_pattern = paths.log_pattern(&label);
    let output_pattern = paths.output_pattern(&label);

    let tailer = LogTailer::new(
        config.tailer.clone(),
        log_pattern.clone(),
        handle.started_at(),
        handle.clone(),
        bridge.clone(),
        completion.clone(),
    );
    let tailer = tokio::spawn(tailer.run());

    let supervisor = tokio::spawn(supervise(Supervisor {
        id: id.clone(),
        handle: handle.clone(),
        bridge: bridge.clone(),
        completion: completion.clone(),
        output_pattern: output_pattern.clone(),
        not_before: handle
            .started_at()
            .checked_sub(config.tailer.clock_skew)
            .unwrap_or(handle.started_at()),
        max_run_time: config.max_run_time,
        probe_interval: config.probe_interval,
        terminate_timeout: config.terminate_timeout,
        discovery_attempts: config.discovery_attempts,
        discovery_delay: config.discovery_delay,
    }));

    let run = ActiveRun {
        id,
        label,
        handle,
        bridge,
        completion,
        log_pattern,
        output_pattern,
        terminate_timeout: config.terminate_timeout,
        readers,
        tailer,
        supervisor,
    };
    Ok((run, drain))
}

impl ActiveRun {
    pub fn id(&self) -> &RunId {
        &self.id
    }

    pub fn label(&self) -> &CleanLabel {
        &self.label
    }

    pub fn pid(&self) -> u32 {
        self.handle.pid()
    }

    pub fn handle(&self) -> &ProcessHandle {
        &self.handle
    }

    pub fn log_pattern(&self) -> &FilePattern {
        &self.log_pattern
    }

    pub fn output_pattern(&self) -> &FilePattern {
        &self.output_pattern
    }

    pub fn completion(&self) -> Option<Completion> {
        self.completion.completion()
    }

    /// Probe liveness from the render loop; records completion on death.
    pub async fn poll_liveness(&self) -> bool {
        let alive = self.handle.is_alive().await;
        if !alive {
            self.completion
                .fire(Detector::LivenessPoll, self.handle.exit_code());
        }
        alive
    }

    /// Stop the child (SIGTERM, then SIGKILL). The supervisor records the
    /// exit and still runs output discovery.
    pub async fn terminate(&self) -> i32 {
        self.bridge
            .publish(LogEvent::notice("terminating process on request"));
        let code = self.handle.terminate(self.terminate_timeout).await;
        tracing::info!(run_id = %self.id, exit_code = code, "process terminated");
        code
    }

    /// Whether every background task has finished.
    pub fn is_settled(&self) -> bool {
        self.readers.iter().all(JoinHandle::is_finished)
            && self.tailer.is_finished()
            && self.supervisor.is_finished()
    }

    /// Cancel all background tasks. The child is killed once the last
    /// handle to it is dropped.
    pub fn abort(self) {
        tracing::debug!(run_id = %self.id, "aborting run tasks");
        for reader in &self.readers {
            reader.abort();
        }
        self.tailer.abort();
        self.supervisor.abort();
    }

    /// Wait for every background task to finish.
    pub async fn join(self) {
        for reader in self.readers {
            if let Err(e) = reader.await {
                tracing::warn!(error = %e, "output reader task failed");
            }
        }
        match self.tailer.await {
            Ok(state) => tracing::debug!(?state, "tailer finished"),
            Err(e) => tracing::warn!(error = %e, "tailer task failed"),
        }
        if let Err(e) = self.supervisor.await {
            tracing::warn!(error = %e, "supervisor task failed");
        }
    }
}

struct Supervisor {
    id: RunId,
    handle: ProcessHandle,
    bridge: EventBridge,
    completion: CompletionSignal,
    output_pattern: FilePattern,
    not_before: SystemTime,
    max_run_time: Duration,
    probe_interval: Duration,
    terminate_timeout: Duration,
    discovery_attempts: u32,
    discovery_delay: Duration,
}

/// Wait for the child (probing for the artifact meanwhile), record
/// completion, then run bounded artifact discovery.
async fn supervise(s: Supervisor) {
    let deadline = Instant::now() + s.max_run_time;
    let mut artifact: Option<PathBuf> = None;

    let exit_code = loop {
        let now = Instant::now();
        if now >= deadline {
            tracing::warn!(run_id = %s.id, limit_s = s.max_run_time.as_secs(), "run time limit reached");
            s.bridge.publish(LogEvent::notice(format!(
                "process exceeded {:?}, terminating",
                s.max_run_time
            )));
            break s.handle.terminate(s.terminate_timeout).await;
        }
        if let Some(code) = s
            .handle
            .wait_timeout(s.probe_interval.min(deadline - now))
            .await
        {
            break code;
        }
        probe_artifact(&s, &mut artifact);
    };

    s.bridge.publish(LogEvent::notice(format!(
        "process completed with return code {exit_code}"
    )));
    s.completion.fire(Detector::ProcessWait, Some(exit_code));

    let found = discover_artifact(
        &s.output_pattern,
        s.discovery_attempts,
        s.discovery_delay,
        s.not_before,
    )
    .await;
    match found {
        Some(path) => {
            if artifact.as_ref() != Some(&path) {
                publish_artifact(&s.bridge, path);
            }
        }
        None if artifact.is_none() => {
            tracing::warn!(run_id = %s.id, pattern = %s.output_pattern, "no output file produced");
            s.bridge.publish(LogEvent::notice(format!(
                "no output file found matching {}",
                s.output_pattern
            )));
        }
        None => {}
    }
    tracing::info!(run_id = %s.id, exit_code, "run supervision finished");
}

/// Publish a newer artifact if one appeared while the child runs.
fn probe_artifact(s: &Supervisor, artifact: &mut Option<PathBuf>) {
    let Some(found) = newest_match(&s.output_pattern, s.not_before) else {
        return;
    };
    if artifact.as_ref() != Some(&found.path) {
        *artifact = Some(found.path.clone());
        publish_artifact(&s.bridge, found.path);
    }
}

fn publish_artifact(bridge: &EventBridge, path: PathBuf) {
    tracing::info!(path = %path.display(), "output file discovered");
    bridge.publish(LogEvent::notice(format!(
        "found output file {}",
        path.display()
    )));
    bridge.publish(LogEvent::OutputFileDiscovered { path });
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
