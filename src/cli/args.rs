//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Gym membership service - member records, admin console and dashboard
#[derive(Parser, Debug)]
#[command(name = "gym-membership")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to (default: SERVER_HOST or 0.0.0.0)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (default: SERVER_PORT or 3000)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags_override() {
        let cli = Cli::parse_from(["gym-membership", "serve", "--port", "8080", "-H", "127.0.0.1"]);

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_migrate_subcommand() {
        let cli = Cli::parse_from(["gym-membership", "-v", "migrate", "status"]);

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }
}
