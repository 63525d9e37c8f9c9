//! Identity command - Inspect the stored install identity

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use tgreporter_core::IdentityStore;
use tgreporter_platform::KeyringSecureStore;
use tracing::info;

use super::GlobalArgs;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum IdentityCommand {
    /// Show the stored install identity without creating one
    Show,
}

impl IdentityCommand {
    pub fn execute(&self, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
        match self {
            IdentityCommand::Show => execute_show(global, format),
        }
    }
}

fn execute_show(global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let config = global.load_config()?;
    let store = IdentityStore::new(
        Arc::new(KeyringSecureStore::new()),
        &config.identity.namespace,
    );
    let key = store.key().clone();
    let id = store.peek();

    info!(key = %key, present = id.is_some(), "Read install identity");

    let formatter = get_formatter(format);
    if format.is_json() {
        formatter.print_json(&serde_json::json!({
            "service": key.service,
            "account": key.account,
            "install_id": id,
        }));
    } else {
        match &id {
            Some(id) => formatter.success(&format!("Install identity: {}", id)),
            None => formatter.info("No install identity stored; the next first-launch report will be sent"),
        }
        formatter.info(&format!("Keyring entry: {}", key));
    }
    Ok(())
}
