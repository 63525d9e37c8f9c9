//! Environment command - Show the metadata a report would carry

use anyhow::{Context, Result};
use clap::Subcommand;
use tgreporter_core::{ports::IEnvironmentProvider, EnvironmentSnapshot};
use tgreporter_platform::SystemEnvironment;
use tracing::info;

use super::GlobalArgs;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum EnvironmentCommand {
    /// Show the app and device metadata of this host
    Show,
}

impl EnvironmentCommand {
    pub fn execute(&self, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
        match self {
            EnvironmentCommand::Show => execute_show(global, format),
        }
    }
}

fn execute_show(global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let config = global.load_config()?;
    let mut app = global.app_info();
    if let Some(channel) = config.report.channel {
        app = app.with_channel(channel);
    }
    let snapshot = SystemEnvironment::new(app).snapshot();

    info!(idiom = %snapshot.idiom, "Collected environment snapshot");

    let formatter = get_formatter(format);
    if format.is_json() {
        formatter.print_json(&snapshot_json(&snapshot)?);
    } else {
        formatter.success(&format!("Environment of {}", snapshot.resolved_app_name()));
        formatter.info("");

        let yaml = serde_yaml::to_string(&snapshot)
            .context("Failed to serialize environment to YAML")?;
        for line in yaml.lines() {
            formatter.info(line);
        }
    }
    Ok(())
}

fn snapshot_json(snapshot: &EnvironmentSnapshot) -> Result<serde_json::Value> {
    serde_json::to_value(snapshot).context("Failed to serialize environment to JSON")
}
