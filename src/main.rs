use clap::Parser;

use installer_catalog::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    let _log_guard = init_logger_from_settings(&settings)?;

    if let Err(e) = execute_command(cli, settings).await {
        tracing::error!(error = ?e, "Command failed");
        return Err(e);
    }

    Ok(())
}
