//! Dispatches a parsed command line to its handler.

use super::handlers::{
    CreateUserArgs, CreateUserCommandHandler, MigrateCommandHandler, ServeCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;

/// Runs the selected subcommand; no subcommand means `serve`.
pub async fn execute_command(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await?;
            Ok(())
        }
        Some(Commands::CreateUser {
            username,
            email,
            password,
            staff,
        }) => {
            CreateUserCommandHandler::new(settings)
                .execute(CreateUserArgs {
                    username,
                    email,
                    password,
                    staff,
                })
                .await?;
            Ok(())
        }
    }
}
