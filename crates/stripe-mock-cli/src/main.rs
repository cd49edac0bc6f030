//! stripe-mock CLI
//!
//! Main entry point for the `stripe-mock` binary.

use std::process::ExitCode;

use clap::Parser;
use stripe_mock_config::Environment;
use stripe_mock_log::{LogConfig, LogLevel};
use tracing::error;

mod cli;
mod commands;
mod error;

use cli::Cli;
use error::CliError;

/// Application exit codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ServerError = 4,
    ValidationError = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    // `.env` must be loaded before clap reads `env = ...` arguments
    Environment::init();
    let cli = Cli::parse();

    init_logging(&cli);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to create Tokio runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            error!(code = e.code(), "{e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            e.exit_code().into()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let fixtures = cli.load_fixtures()?;
    cli.execute(fixtures).await
}

fn init_logging(cli: &Cli) {
    let config = LogConfig::from_env();
    let config = match cli.verbose {
        0 if cli.quiet => config.with_level(LogLevel::Error),
        0 => config,
        1 => config.with_level(LogLevel::Debug),
        _ => config.with_level(LogLevel::Trace),
    };

    if let Err(e) = stripe_mock_log::init(config) {
        eprintln!("{e}");
    }
}
