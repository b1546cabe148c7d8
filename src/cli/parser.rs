//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::validation::{
    validate_config_file_path, validate_email, validate_host_address, validate_password,
    validate_port, validate_rollback_steps, validate_username,
};

/// Installer catalog API server
#[derive(Parser, Debug)]
#[command(name = "installer-catalog")]
#[command(about = "HTTP API for game installers, their revisions and issue threads")]
#[command(long_about = "
Serves the installer catalog API and manages its database.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    installer-catalog serve

    # Bind to all interfaces on a custom port
    installer-catalog serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    installer-catalog --config /etc/catalog/production.toml serve

    # Check configuration without starting the server
    installer-catalog serve --dry-run

    # Apply, preview or roll back migrations
    installer-catalog migrate
    installer-catalog migrate --dry-run
    installer-catalog migrate --rollback 1

    # Create a moderator account
    installer-catalog create-user --username mod --email mod@example.com --staff
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Single configuration file, replacing the layered config directory
    #[arg(short, long, value_name = "FILE", value_parser = validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Environment layer to load ({env}.toml)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Debug level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind, e.g. 127.0.0.1 or 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = validate_host_address)]
        host: Option<String>,

        /// TCP port, 1-65535
        #[arg(short, long, value_name = "PORT", value_parser = validate_port)]
        port: Option<u16>,

        /// Overrides both the config file and --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply or roll back database migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert the last STEPS migrations (1-100)
        #[arg(long, value_name = "STEPS", value_parser = validate_rollback_steps)]
        rollback: Option<u32>,
    },
    /// Create a user account
    CreateUser {
        #[arg(long, value_parser = validate_username)]
        username: String,

        #[arg(long, value_parser = validate_email)]
        email: String,

        /// Read from CATALOG_USER_PASSWORD when omitted
        #[arg(long, env = "CATALOG_USER_PASSWORD", hide_env_values = true, value_parser = validate_password)]
        password: String,

        /// Grant moderation rights
        #[arg(long)]
        staff: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["installer-catalog", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["installer-catalog"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose && !cli.quiet);
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "installer-catalog",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "warning",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                log_level,
                dry_run,
            }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert_eq!(log_level, Some(LogLevel::Warn));
                assert!(!dry_run);
            }
            other => panic!("Expected Serve, got {:?}", other),
        }
    }

    #[test]
    fn test_migrate_flags_conflict() {
        let err = Cli::try_parse_from(["installer-catalog", "migrate", "--dry-run", "--rollback", "2"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_create_user_command() {
        let cli = Cli::try_parse_from([
            "installer-catalog",
            "create-user",
            "--username",
            "moderator",
            "--email",
            "mod@example.com",
            "--password",
            "correct horse",
            "--staff",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::CreateUser {
                username,
                email,
                staff,
                ..
            }) => {
                assert_eq!(username, "moderator");
                assert_eq!(email, "mod@example.com");
                assert!(staff);
            }
            other => panic!("Expected CreateUser, got {:?}", other),
        }
    }

    #[test]
    fn test_create_user_rejects_bad_email() {
        let result = Cli::try_parse_from([
            "installer-catalog",
            "create-user",
            "--username",
            "moderator",
            "--email",
            "not-an-email",
            "--password",
            "correct horse",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_quiet_conflict() {
        let err = Cli::try_parse_from(["installer-catalog", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
