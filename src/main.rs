mod auth;
mod cli;
mod config;
mod error;
mod platform;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::Interrupted;

fn main() -> ExitCode {
    reset_sigpipe();
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run_interruptible(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<Interrupted>() => {
            println!("\n{}", "Operation cancelled.".yellow());
            ExitCode::FAILURE
        }
        Err(err) => {
            cli::output::error(&format!("Error: {:#}", err));
            ExitCode::FAILURE
        }
    }
}

/// Die quietly on a closed stdout (`mycli status | head -1`) instead of
/// panicking inside `println!`.
fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--debug`.
fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Run the command on a blocking thread and race it against Ctrl-C.
fn run_interruptible(cli: Cli) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;
    let outcome = rt.block_on(supervise(cli));
    // an interrupted command may still be blocked on stdin or a child process
    rt.shutdown_background();
    outcome
}

async fn supervise(cli: Cli) -> Result<()> {
    let command = tokio::task::spawn_blocking(move || cli::run(cli));
    tokio::select! {
        joined = command => joined.context("command task panicked")?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            Err(Interrupted.into())
        }
    }
}
