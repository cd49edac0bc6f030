//! The mock payment API: a store, a server, and the sync step between them.

use crate::server::MockApiServer;
use crate::store::MockStore;
use crate::stub::StubSet;
use crate::sync::Synchronizer;
use crate::table::StubTable;
use stripe_mock_config::Fixtures;
use stripe_mock_core::{
    BankAccountParams, CardParams, Coupon, CouponParams, Customer, CustomerParams, Plan,
    PlanParams, Result, Source, SourceParams, Subscription, SubscriptionParams,
};

/// Fake payment API for tests.
///
/// Add objects, call [`StripeMock::sync`], then point the code under test at
/// [`StripeMock::url`]. Adds do not touch the server; only `sync` does.
///
/// ```no_run
/// # async fn demo() -> stripe_mock_core::Result<()> {
/// use stripe_mock::StripeMock;
/// use stripe_mock_core::CustomerParams;
///
/// let mut mock = StripeMock::start().await;
/// mock.add_customer("cus_1", CustomerParams::default());
/// mock.sync().await?;
/// let customer_url = mock.url_for("/v1/customers/cus_1");
/// # Ok(())
/// # }
/// ```
pub struct StripeMock {
    store: MockStore,
    server: MockApiServer,
    synchronizer: Synchronizer,
}

impl StripeMock {
    /// Start an empty mock on a random local port.
    pub async fn start() -> Self {
        Self::with_server(MockApiServer::start().await)
    }

    pub fn with_server(server: MockApiServer) -> Self {
        Self {
            store: MockStore::new(),
            server,
            synchronizer: Synchronizer::new(),
        }
    }

    /// Start a mock on the fixtures' server address, loaded and synced.
    pub async fn from_fixtures(fixtures: &Fixtures) -> Result<Self> {
        let server = MockApiServer::start_on(&fixtures.server.address()).await?;
        let mut mock = Self::with_server(server);
        mock.store.load_fixtures(fixtures);
        mock.sync().await?;
        Ok(mock)
    }

    pub fn with_synchronizer(mut self, synchronizer: Synchronizer) -> Self {
        self.synchronizer = synchronizer;
        self
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub fn url_for(&self, path: &str) -> String {
        self.server.url_for(path)
    }

    pub fn store(&self) -> &MockStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MockStore {
        &mut self.store
    }

    pub fn server(&self) -> &MockApiServer {
        &self.server
    }

    pub fn add_customer(&mut self, id: &str, params: CustomerParams) -> &Customer {
        self.store.add_customer(id, params)
    }

    pub fn add_plan(&mut self, id: &str, params: PlanParams) -> &Plan {
        self.store.add_plan(id, params)
    }

    pub fn add_coupon(&mut self, id: &str, params: CouponParams) -> &Coupon {
        self.store.add_coupon(id, params)
    }

    pub fn add_subscription(
        &mut self,
        customer_id: &str,
        id: &str,
        params: SubscriptionParams,
    ) -> &Subscription {
        self.store.add_subscription(customer_id, id, params)
    }

    pub fn add_source(&mut self, customer_id: &str, id: &str, params: SourceParams) -> &Source {
        self.store.add_source(customer_id, id, params)
    }

    pub fn add_card(&mut self, customer_id: &str, id: &str, params: CardParams) -> &Source {
        self.store.add_card(customer_id, id, params)
    }

    pub fn add_bank_account(
        &mut self,
        customer_id: &str,
        id: &str,
        params: BankAccountParams,
    ) -> &Source {
        self.store.add_bank_account(customer_id, id, params)
    }

    /// Build the stubs for the current store without installing them.
    pub fn stubs(&self) -> Result<StubSet> {
        self.synchronizer.build(&self.store)
    }

    /// An in-process table holding the current stubs.
    pub fn table(&self) -> Result<StubTable> {
        let mut table = StubTable::new();
        table.install(self.stubs()?);
        Ok(table)
    }

    /// Rebuild every stub from the store and replace the server's stubs.
    pub async fn sync(&self) -> Result<()> {
        let stubs = self.stubs()?;
        self.server.install(&stubs).await;
        Ok(())
    }

    /// Empty the store and remove every stub.
    pub async fn reset(&mut self) {
        self.store.reset();
        self.server.reset().await;
    }
}
