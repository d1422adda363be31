//! Command-line front end: argument parsing, file IO and wiring.

pub mod args;
pub mod compose;
pub mod request;

use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;

use invoicer_infra::{InMemoryInvoiceStore, InvoicingConfig};

pub use args::{Cli, Commands, ComposeArgs};
pub use compose::{compose, compose_and_submit, read_json, ComposeInputs};
pub use request::{ComposeRequest, RequestItem};

/// Execute a parsed command line.
pub fn run(cli: Cli, config: &InvoicingConfig) -> Result<()> {
    match cli.command {
        Commands::Compose(args) => run_compose(&args, config),
    }
}

fn run_compose(args: &ComposeArgs, config: &InvoicingConfig) -> Result<()> {
    let inputs = ComposeInputs {
        catalog: read_json(&args.catalog)?,
        customers: read_json(&args.customers)?,
        issuer: read_json(&args.issuer)?,
    };
    let request: ComposeRequest = read_json(&args.request)?;

    let store = InMemoryInvoiceStore::new();
    let stored = compose_and_submit(&inputs, &request, config, &store, Utc::now())?;
    let rendered = serde_json::to_string_pretty(&stored.payload).context("rendering payload")?;

    match &args.out {
        Some(path) => fs::write(path, rendered + "\n")
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
