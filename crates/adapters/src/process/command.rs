// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::EntryPoint;
use std::path::PathBuf;

/// Everything needed to start one pipeline run.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub interpreter: String,
    pub entry: EntryPoint,
    /// Sub-command passed to the entry point (e.g. `run`)
    pub action: String,
    /// Flag that introduces the input value (e.g. `--topic`)
    pub param_flag: String,
    /// The raw, uncleaned input value
    pub value: String,
    pub cwd: PathBuf,
    /// Added on top of the inherited environment
    pub env: Vec<(String, String)>,
}

impl LaunchSpec {
    /// `[interpreter, script, action, flag, value]` or
    /// `[interpreter, -m, module, action, flag, value]`
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![self.interpreter.clone()];
        match &self.entry {
            EntryPoint::Script(path) => argv.push(path.display().to_string()),
            EntryPoint::Module(module) => {
                argv.push("-m".to_string());
                argv.push(module.clone());
            }
        }
        argv.extend([
            self.action.clone(),
            self.param_flag.clone(),
            self.value.clone(),
        ]);
        argv
    }

    /// Space-joined argv, for display only.
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
