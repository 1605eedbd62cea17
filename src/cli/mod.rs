pub mod account;
pub mod config;
pub mod login;
pub mod logout;
pub mod output;
pub mod resource;
pub mod status;
pub mod whoami;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::auth::AuthStore;
use crate::config::{Paths, Settings};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// MyCliApp - A simple CLI application with dummy commands.
#[derive(Parser)]
#[command(name = "mycli", long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show version information
    #[arg(long, short = 'v')]
    pub version: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration directory [default: ~/.mycli]
    #[arg(long, global = true, env = "MYCLI_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and remember the identity
    Login(login::Args),

    /// Sign out and clear the remembered identity
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show account and configuration details
    Account,

    /// Show current status and health
    Status,

    /// Manage resources (dummy commands)
    Resource(resource::Args),

    /// Manage configuration settings
    Config(config::Args),
}

/// Everything a command handler needs, built once per invocation.
pub struct AppContext {
    pub paths: Paths,
    pub settings: Settings,
    pub store: AuthStore,
}

impl AppContext {
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let paths = Paths::resolve(config_dir)?;
        let config_file = paths.config_file();
        let settings = crate::config::load_settings(&config_file);
        let store = AuthStore::open(&config_file);
        tracing::debug!(
            config_dir = %paths.config_dir.display(),
            provider = %settings.auth_provider,
            authenticated = store.is_authenticated(),
            "context loaded"
        );
        Ok(Self {
            paths,
            settings,
            store,
        })
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    if cli.version {
        println!("MyCliApp version {}", VERSION);
        return Ok(());
    }

    let Some(command) = cli.command else {
        println!("Welcome to MyCliApp!");
        println!("Use 'mycli --help' to see available commands.");
        return Ok(());
    };

    let mut ctx = AppContext::load(cli.config_dir.as_deref())?;
    match command {
        Command::Login(args) => login::run(args, &mut ctx),
        Command::Logout => logout::run(&mut ctx),
        Command::Whoami => whoami::run(&ctx),
        Command::Account => account::run(&ctx),
        Command::Status => status::run(&ctx),
        Command::Resource(args) => resource::run(args),
        Command::Config(args) => config::run(args),
    }
}
