//! Check command implementation.

use clap::Parser;
use serde::Serialize;
use stripe_mock_config::Fixtures;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Validate the fixture file
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Also require subscriptions and sources to belong to a listed customer
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Default, Serialize)]
struct Counts {
    customers: usize,
    plans: usize,
    coupons: usize,
    subscriptions: usize,
    sources: usize,
}

impl From<&Fixtures> for Counts {
    fn from(fixtures: &Fixtures) -> Self {
        Self {
            customers: fixtures.customers.len(),
            plans: fixtures.plans.len(),
            coupons: fixtures.coupons.len(),
            subscriptions: fixtures.subscriptions.values().map(|s| s.len()).sum(),
            sources: fixtures.sources.values().map(|s| s.len()).sum(),
        }
    }
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let path = ctx.fixtures_path.as_ref().ok_or_else(|| {
            CliError::config_with_hint(
                "no fixture file to check",
                "pass --fixtures <FILE> or set STRIPE_MOCK_FIXTURES",
            )
        })?;

        if self.strict {
            check_owners(&ctx.fixtures)?;
        }

        let counts = Counts::from(&ctx.fixtures);
        match ctx.format {
            OutputFormat::Text => {
                println!("{}: ok", path.display());
                println!("  customers:     {}", counts.customers);
                println!("  plans:         {}", counts.plans);
                println!("  coupons:       {}", counts.coupons);
                println!("  subscriptions: {}", counts.subscriptions);
                println!("  sources:       {}", counts.sources);
                if ctx.verbose > 0 {
                    println!("  server:        {}", ctx.fixtures.server.address());
                }
            }
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "path": path,
                    "valid": true,
                    "counts": counts,
                    "server": ctx.fixtures.server.address(),
                })
            ),
        }
        Ok(())
    }
}

/// Every customer that owns subscriptions or sources must be listed.
fn check_owners(fixtures: &Fixtures) -> Result<(), CliError> {
    let owners = fixtures
        .subscriptions
        .keys()
        .map(|id| ("subscriptions", id))
        .chain(fixtures.sources.keys().map(|id| ("sources", id)));

    for (collection, customer_id) in owners {
        if !fixtures.customers.contains_key(customer_id) {
            return Err(CliError::validation(format!(
                "{} reference unknown customer {}",
                collection, customer_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripe_mock_config::FixtureLoader;

    #[test]
    fn test_strict_rejects_orphans() {
        let fixtures = FixtureLoader::new()
            .parse("customers:\n  cus_1: {}\nsources:\n  cus_2:\n    card_1:\n      object: card\n")
            .unwrap();

        let err = check_owners(&fixtures).unwrap_err();
        assert_eq!(err.to_string(), "sources reference unknown customer cus_2");
    }

    #[test]
    fn test_counts() {
        let fixtures = FixtureLoader::new()
            .parse("plans:\n  gold: {}\n  silver: {}\nsubscriptions:\n  cus_1:\n    sub_1: {}\n")
            .unwrap();

        let counts = Counts::from(&fixtures);
        assert_eq!(counts.plans, 2);
        assert_eq!(counts.subscriptions, 1);
        assert_eq!(counts.customers, 0);
    }
}
