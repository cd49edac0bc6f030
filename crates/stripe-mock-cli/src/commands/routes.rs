//! Routes command implementation.

use clap::Parser;
use serde::Serialize;
use stripe_mock::{MockStore, Responder, Stub, Synchronizer};

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Print the stubs the fixtures produce
#[derive(Debug, Parser)]
pub struct RoutesCommand {
    /// Only print exact-path stubs
    #[arg(long)]
    exact_only: bool,
}

#[derive(Debug, Serialize)]
struct Route {
    method: String,
    matcher: String,
    responder: String,
}

impl From<&Stub> for Route {
    fn from(stub: &Stub) -> Self {
        let responder = match &stub.responder {
            Responder::Static(response) => response.status.to_string(),
            Responder::Callback(_) => "callback".to_string(),
        };
        Self {
            method: stub.method.clone(),
            matcher: stub.matcher.to_string(),
            responder,
        }
    }
}

impl RoutesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut store = MockStore::new();
        store.load_fixtures(&ctx.fixtures);
        let stubs = Synchronizer::new().build(&store)?;

        let routes: Vec<Route> = stubs
            .ordered()
            .filter(|stub| !self.exact_only || stub.matcher.is_exact())
            .map(Route::from)
            .collect();

        match ctx.format {
            OutputFormat::Text => {
                for route in &routes {
                    println!("{:<4} {:<9} {}", route.method, route.responder, route.matcher);
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&routes)?),
        }
        Ok(())
    }
}
