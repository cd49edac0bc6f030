//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use stripe_mock_config::{vars, FixtureLoader, Fixtures};

use crate::commands::{CheckCommand, RoutesCommand, ServeCommand};
use crate::error::CliError;

/// stripe-mock - fake payment API for tests
///
/// Serves customers, plans, coupons, subscriptions and sources described in a
/// YAML fixture file.
#[derive(Debug, Parser)]
#[command(
    name = "stripe-mock",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to the fixture file
    #[arg(
        short,
        long,
        global = true,
        env = vars::FIXTURES,
        value_hint = ValueHint::FilePath
    )]
    pub fixtures: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the fixtures over HTTP until interrupted
    Serve(ServeCommand),

    /// Print the stubs the fixtures produce
    Routes(RoutesCommand),

    /// Validate the fixture file
    Check(CheckCommand),
}

impl Cli {
    /// Load the fixture file, or empty fixtures when none is given.
    pub fn load_fixtures(&self) -> Result<Fixtures, CliError> {
        Ok(FixtureLoader::new().load_or_default(self.fixtures.as_deref())?)
    }

    /// Execute the selected command
    pub async fn execute(self, fixtures: Fixtures) -> Result<(), CliError> {
        let ctx = CommandContext {
            fixtures,
            fixtures_path: self.fixtures,
            format: self.format,
            verbose: self.verbose,
        };

        match self.command {
            Command::Serve(cmd) => cmd.execute(&ctx).await,
            Command::Routes(cmd) => cmd.execute(&ctx),
            Command::Check(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub fixtures: Fixtures,
    pub fixtures_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stripe-mock",
            "routes",
            "--fixtures",
            "fixtures.yaml",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.fixtures, Some(PathBuf::from("fixtures.yaml")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Routes(_)));
    }

    #[test]
    fn test_serve_address_overrides() {
        let cli = Cli::try_parse_from(["stripe-mock", "serve", "--port", "4242"]).unwrap();
        match cli.command {
            Command::Serve(cmd) => {
                assert_eq!(cmd.port, Some(4242));
                assert_eq!(cmd.host, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
