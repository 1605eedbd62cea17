use anyhow::Result;
use clap::{Args as ClapArgs, Subcommand};
use colored::Colorize;

use crate::cli::output;

#[derive(ClapArgs)]
pub struct Args {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(long, short)]
        key: String,

        /// Configuration value
        #[arg(long, short)]
        value: String,
    },

    /// Show configuration values
    Show {
        /// Specific configuration key to show
        #[arg(long, short)]
        key: Option<String>,
    },
}

/// Sample values shown by `config show`; nothing here is read from disk.
const SAMPLE_CONFIG: [(&str, &str); 3] = [
    ("default_location", "eastus"),
    ("output_format", "table"),
    ("subscription", "my-subscription-123"),
];

pub fn run(args: Args) -> Result<()> {
    match args.command {
        ConfigCommand::Set { key, value } => {
            output::success("Configuration set:");
            output::info(&format!("  {} = {}", key, value.cyan()));
        }
        ConfigCommand::Show { key: Some(key) } => match lookup(&key) {
            Some(value) => output::info(&format!("{}: {}", key, value.cyan())),
            None => output::error(&format!("Configuration key '{}' not found.", key)),
        },
        ConfigCommand::Show { key: None } => {
            output::header("Current configuration:");
            for (key, value) in SAMPLE_CONFIG {
                output::field(key, value);
            }
        }
    }
    Ok(())
}

fn lookup(key: &str) -> Option<&'static str> {
    SAMPLE_CONFIG
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}
