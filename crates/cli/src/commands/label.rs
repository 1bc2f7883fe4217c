// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rw label <TEXT>` - Show how a label is cleaned and which files it maps to

use anyhow::{bail, Result};
use clap::Args;
use rw_core::{CleanLabel, RunPaths};
use serde::Serialize;

use super::ProjectArgs;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct LabelArgs {
    /// Raw label text, as it would be passed to `rw run`
    pub text: String,

    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct LabelReport {
    pub input: String,
    pub label: String,
    pub log_pattern: String,
    pub output_pattern: String,
}

impl LabelReport {
    pub fn new(raw: &str, paths: &RunPaths) -> Option<Self> {
        let label = CleanLabel::new(raw);
        if label.is_empty() {
            return None;
        }
        Some(Self {
            input: raw.to_string(),
            log_pattern: paths.log_pattern(&label).to_string(),
            output_pattern: paths.output_pattern(&label).to_string(),
            label: label.to_string(),
        })
    }

    pub fn render_text(&self) -> String {
        format!(
            "label:  {}\nlogs:   {}\noutput: {}\n",
            self.label, self.log_pattern, self.output_pattern
        )
    }
}

pub fn handle(args: LabelArgs, format: OutputFormat) -> Result<()> {
    let (_, config) = args.project.load()?;
    let Some(report) = LabelReport::new(&args.text, &config.run_paths()) else {
        bail!("label {:?} is empty after cleaning", args.text);
    };
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;
