//! tgreporter CLI - Send lifecycle reports to a Telegram chat
//!
//! Provides commands for:
//! - Sending first-launch, became-active and custom reports
//! - Inspecting the stored install identity
//! - Showing the app and device metadata reports carry
//! - Viewing and validating configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use tgreporter_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    config::ConfigCommand,
    environment::EnvironmentCommand,
    identity::IdentityCommand,
    report::{ActiveCommand, CustomCommand, FirstLaunchCommand},
    GlobalArgs,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "tgreporter", version, about = "Report app lifecycle events to a Telegram chat")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send the first-launch report if this install has not reported yet
    FirstLaunch(FirstLaunchCommand),
    /// Send an "app became active" report
    Active(ActiveCommand),
    /// Send a custom event report
    Custom(CustomCommand),
    /// Inspect the install identity
    #[command(subcommand)]
    Identity(IdentityCommand),
    /// Show the metadata a report would carry
    #[command(subcommand)]
    Environment(EnvironmentCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => Config::load_or_default(&cli.global.config_path()).logging.level,
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::FirstLaunch(cmd) => cmd.execute(&cli.global, format).await,
        Commands::Active(cmd) => cmd.execute(&cli.global, format).await,
        Commands::Custom(cmd) => cmd.execute(&cli.global, format).await,
        Commands::Identity(cmd) => cmd.execute(&cli.global, format),
        Commands::Environment(cmd) => cmd.execute(&cli.global, format),
        Commands::Config(cmd) => cmd.execute(&cli.global, format),
    }
}
