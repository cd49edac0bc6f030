//! Fixture file types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stripe_mock_core::{
    BankAccountParams, CardParams, CouponParams, CustomerParams, PlanParams, SourceParams,
    SubscriptionParams,
};

/// Default port of the mock server, matching the port stripe's own mock uses.
pub const DEFAULT_PORT: u16 = 12111;

/// Root of a fixture file.
///
/// Top-level collections map object id to params. Customer-bound
/// collections map customer id to (object id to params). Maps keep file
/// order, which becomes the order of listing responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fixtures {
    /// Mock server settings.
    pub server: ServerSettings,
    pub customers: IndexMap<String, CustomerParams>,
    pub plans: IndexMap<String, PlanParams>,
    pub coupons: IndexMap<String, CouponParams>,
    pub subscriptions: IndexMap<String, IndexMap<String, SubscriptionParams>>,
    pub sources: IndexMap<String, IndexMap<String, SourceFixture>>,
}

impl Fixtures {
    /// Total number of objects described by the file.
    pub fn object_count(&self) -> usize {
        self.customers.len()
            + self.plans.len()
            + self.coupons.len()
            + self.subscriptions.values().map(IndexMap::len).sum::<usize>()
            + self.sources.values().map(IndexMap::len).sum::<usize>()
    }
}

/// Where the mock server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub host: String,
    /// `0` asks the OS for an ephemeral port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    /// `host:port` string suitable for binding.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A source entry, discriminated by its `object` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum SourceFixture {
    Source(SourceParams),
    Card(CardParams),
    BankAccount(BankAccountParams),
}
