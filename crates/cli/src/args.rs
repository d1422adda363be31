use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "invoicer", version, about = "Compose and price invoices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compose an invoice from a request and print its storage payload
    Compose(ComposeArgs),
}

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Catalog products (JSON array)
    #[arg(long)]
    pub catalog: PathBuf,

    /// Customer records (JSON array)
    #[arg(long)]
    pub customers: PathBuf,

    /// Issuer profile (JSON object)
    #[arg(long)]
    pub issuer: PathBuf,

    /// Compose request (JSON object)
    #[arg(long)]
    pub request: PathBuf,

    /// Write the payload here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}
