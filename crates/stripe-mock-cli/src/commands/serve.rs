//! Serve command implementation.

use clap::Parser;
use stripe_mock::StripeMock;
use stripe_mock_config::Environment;
use tracing::info;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Serve the fixtures over HTTP until interrupted
#[derive(Debug, Parser)]
pub struct ServeCommand {
    /// Address to bind (overrides the fixture file and STRIPE_MOCK_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, 0 for any free port (overrides the fixture file and STRIPE_MOCK_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut fixtures = ctx.fixtures.clone();
        Environment::apply_server_overrides(&mut fixtures.server)?;
        if let Some(host) = &self.host {
            fixtures.server.host = host.clone();
        }
        if let Some(port) = self.port {
            fixtures.server.port = port;
        }

        let mock = StripeMock::from_fixtures(&fixtures).await?;
        let stubs = mock.stubs()?;

        match ctx.format {
            OutputFormat::Text => println!(
                "Serving {} objects at {}",
                fixtures.object_count(),
                mock.url()
            ),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "url": mock.url(),
                    "objects": fixtures.object_count(),
                    "stubs": stubs.len(),
                })
            ),
        }

        tokio::signal::ctrl_c()
            .await
            .map_err(|e| CliError::io("failed to wait for Ctrl-C", e))?;
        info!("Shutting down");
        Ok(())
    }
}
