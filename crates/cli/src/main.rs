use clap::Parser;

use invoicer_cli::{run, Cli};
use invoicer_infra::InvoicingConfig;

fn main() -> anyhow::Result<()> {
    let config = InvoicingConfig::from_env()?;
    invoicer_observability::init_with(config.log_format);
    config.log_loaded();

    let cli = Cli::parse();
    if let Err(err) = run(cli, &config) {
        tracing::error!(error = ?err, "command failed");
        return Err(err);
    }
    Ok(())
}
