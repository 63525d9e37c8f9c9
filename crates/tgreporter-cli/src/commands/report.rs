//! Report commands - Send lifecycle reports from the command line
//!
//! `first-launch`, `active` and `custom` resolve credentials from flags and
//! configuration, send one report, and print its outcome.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use tgreporter::{EventIntent, ReportOutcome, SkipReason, TelegramReporter};
use tracing::info;

use super::GlobalArgs;
use crate::output::{get_formatter, OutputFormat};

/// Send the first-launch report
#[derive(Debug, Args)]
pub struct FirstLaunchCommand {
    /// Send even if this install already reported
    #[arg(long)]
    pub ignore_first_launch: bool,
}

/// Send an "app became active" report
#[derive(Debug, Args)]
pub struct ActiveCommand {}

/// Send a custom event report
#[derive(Debug, Args)]
pub struct CustomCommand {
    /// Event title
    #[arg(long)]
    pub title: Option<String>,

    /// Detail line as key=value (repeatable)
    #[arg(long = "detail", value_parser = parse_key_val)]
    pub details: Vec<(String, String)>,
}

impl FirstLaunchCommand {
    pub async fn execute(&self, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
        let config = global.load_config()?;
        let delivery = global.delivery(&config)?;
        let note = global.note(&config);
        let reporter = TelegramReporter::from_config(&config, global.app_info());

        info!(ignore_first_launch = self.ignore_first_launch, "Sending first launch report");
        let outcome = reporter
            .dispatcher()
            .start_first_launch_report(&delivery, &note, self.ignore_first_launch)
            .await;

        print_outcome("first_launch", &outcome, format)
    }
}

impl ActiveCommand {
    pub async fn execute(&self, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
        send_event(global, EventIntent::BecameActive, format).await
    }
}

impl CustomCommand {
    pub async fn execute(&self, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
        let details: BTreeMap<String, String> = self.details.iter().cloned().collect();
        let event = EventIntent::from_parts(
            tgreporter::EventKind::Custom,
            self.title.clone(),
            Some(details),
        );
        send_event(global, event, format).await
    }
}

async fn send_event(global: &GlobalArgs, event: EventIntent, format: OutputFormat) -> Result<()> {
    let config = global.load_config()?;
    let delivery = global.delivery(&config)?;
    let note = global.note(&config);
    let reporter = TelegramReporter::from_config(&config, global.app_info());

    info!(event = %event.log_name(), "Sending report");
    let outcome = reporter.dispatcher().report(&event, &delivery, &note).await;

    print_outcome(&event.kind().to_string(), &outcome, format)
}

/// Prints the outcome; a failed delivery becomes a non-zero exit
fn print_outcome(event: &str, outcome: &ReportOutcome, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(format);

    let (status, reason) = match outcome {
        ReportOutcome::Sent => ("sent", None),
        ReportOutcome::Skipped(SkipReason::NotFirstObservation) => {
            ("skipped", Some("install already reported".to_string()))
        }
        ReportOutcome::Skipped(SkipReason::IdentityUnavailable(e)) => {
            ("skipped", Some(e.to_string()))
        }
        ReportOutcome::Failed(e) => ("failed", Some(e.to_string())),
    };

    if format.is_json() {
        formatter.print_json(&serde_json::json!({
            "event": event,
            "status": status,
            "reason": reason,
        }));
    } else {
        match (outcome, &reason) {
            (ReportOutcome::Sent, _) => formatter.success(&format!("Report '{}' sent", event)),
            (ReportOutcome::Failed(_), Some(reason)) => {
                formatter.error(&format!("Report '{}' failed: {}", event, reason))
            }
            (_, reason) => formatter.info(&format!(
                "Report '{}' skipped: {}",
                event,
                reason.as_deref().unwrap_or("no reason given")
            )),
        }
    }

    if let ReportOutcome::Failed(e) = outcome {
        bail!("delivery failed: {}", e);
    }
    Ok(())
}

/// Parses `key=value`; the value may itself contain `=`
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("detail key must not be empty");
    }
    Ok((key.to_string(), value.to_string()))
}
