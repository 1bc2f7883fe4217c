// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw - launch a pipeline and follow its logs and output

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;
mod render;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{files, label, run};
use logging::LoggingContext;
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "rw",
    version,
    about = "runwatch - launch a pipeline and follow its logs and output",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// Also print diagnostics to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the pipeline for a label and follow it
    Run(run::RunArgs),
    /// List recent log and output files
    Files(files::FilesArgs),
    /// Show the cleaned form of a label and its file patterns
    Label(label::LabelArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains every source message the
/// chain is skipped; otherwise it is rendered like anyhow's Debug.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let logging = match LoggingContext::init(env::state_dir().as_deref(), cli.verbose) {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            None
        }
    };
    if let Some(path) = logging.as_ref().and_then(|ctx| ctx.log_path()) {
        tracing::debug!(path = %path.display(), "logging to file");
    }

    let result = match command {
        Commands::Run(args) => run::handle(args, format).await,
        Commands::Files(args) => files::handle(args, format),
        Commands::Label(args) => label::handle(args, format),
    };

    if let Err(e) = &result {
        if e.downcast_ref::<exit_error::ExitError>().is_none() {
            tracing::error!(error = %e, "command failed");
        }
    }
    if let Some(ctx) = logging {
        ctx.shutdown();
    }
    result
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
