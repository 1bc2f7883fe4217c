// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rw run <LABEL>` - Launch the pipeline and follow it until it settles

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::ProjectArgs;
use crate::exit_error::ExitError;
use crate::output::OutputFormat;
use crate::render::{self, Outcome, RunSummary};

#[derive(Args)]
pub struct RunArgs {
    /// Input label passed to the pipeline (e.g. "Artificial Intelligence")
    pub label: String,

    /// Entry point script, tried before searching the project
    #[arg(long = "entry", value_name = "PATH")]
    pub entry: Option<PathBuf>,

    /// Print the output file's contents once the run settles
    #[arg(long)]
    pub show_output: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let (root, config) = args.project.load()?;
    let mut monitor = config.monitor_config();
    if let Some(entry) = args.entry {
        monitor.entry_point = Some(entry);
    }

    let (run, drain) = rw_engine::start(&monitor, &root, &args.label)?;
    let tick = crate::env::render_tick_ms().unwrap_or(render::DEFAULT_TICK);
    let summary = render::watch(run, drain, config.view_config(), tick, format).await;

    let contents = if args.show_output {
        read_output(&summary)
    } else {
        None
    };
    match format {
        OutputFormat::Text => {
            print!("{}", render::render_summary(&summary));
            if let (Some(path), Some(contents)) = (&summary.output_file, &contents) {
                print!("{}", render::render_output(path, contents));
            }
        }
        // One object per line, like the streamed lines before it
        OutputFormat::Json => match contents {
            Some(contents) => println!(
                "{}",
                serde_json::json!({ "summary": summary, "output": contents })
            ),
            None => println!("{}", serde_json::json!({ "summary": summary })),
        },
    }
    exit_for(&summary)
}

/// Contents of the discovered output file, if there is one and it reads.
fn read_output(summary: &RunSummary) -> Option<String> {
    let path = summary.output_file.as_ref()?;
    match rw_adapters::read_full_log(path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read output file");
            eprintln!("warning: could not read {}: {e}", path.display());
            None
        }
    }
}

/// Map the run outcome onto the CLI exit status.
///
/// A missing output file is reported but not treated as a failure.
pub fn exit_for(summary: &RunSummary) -> Result<()> {
    match summary.status {
        Outcome::Complete | Outcome::Incomplete => Ok(()),
        Outcome::Terminated => Err(ExitError::new(130, String::new()).into()),
        Outcome::Failed => {
            let code = summary
                .exit_code
                .filter(|c| (1..=255).contains(c))
                .unwrap_or(1);
            Err(ExitError::new(code, String::new()).into())
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
