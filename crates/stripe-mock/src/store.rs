//! In-memory object store.
//!
//! Every collection is keyed by id, so adding an id twice merges the new
//! params into the existing record instead of appending a duplicate.
//! Customer-bound collections are keyed by customer id first. Insertion
//! order is kept and becomes the order of listing responses.

use indexmap::map::Entry;
use indexmap::IndexMap;
use stripe_mock_config::{Fixtures, SourceFixture};
use stripe_mock_core::{
    BankAccount, BankAccountParams, Card, CardParams, Coupon, CouponParams, Customer,
    CustomerBound, CustomerParams, Fake, GenericSource, Plan, PlanParams, Resource, Source,
    SourceParams, SourceVariant, Subscription, SubscriptionParams,
};
use tracing::{debug, warn};

/// Fake API objects, owned by one mock instance.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    customers: IndexMap<String, Customer>,
    plans: IndexMap<String, Plan>,
    coupons: IndexMap<String, Coupon>,
    subscriptions: IndexMap<String, IndexMap<String, Subscription>>,
    sources: IndexMap<String, IndexMap<String, Source>>,
}

fn upsert<'a, T: Fake>(map: &'a mut IndexMap<String, T>, id: &str, params: T::Params) -> &'a T {
    match map.entry(id.to_string()) {
        Entry::Occupied(entry) => {
            let record = entry.into_mut();
            record.apply(params);
            debug!(object = %record.object(), id, "Updated");
            record
        }
        Entry::Vacant(entry) => {
            let record = entry.insert(T::build(id, params));
            debug!(object = %record.object(), id, "Added");
            record
        }
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every collection.
    pub fn reset(&mut self) {
        self.customers.clear();
        self.plans.clear();
        self.coupons.clear();
        self.subscriptions.clear();
        self.sources.clear();
        debug!("Store reset");
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
            && self.plans.is_empty()
            && self.coupons.is_empty()
            && self.subscriptions().next().is_none()
            && self.sources().next().is_none()
    }

    pub fn add_customer(&mut self, id: &str, params: CustomerParams) -> &Customer {
        upsert(&mut self.customers, id, params)
    }

    pub fn add_plan(&mut self, id: &str, params: PlanParams) -> &Plan {
        upsert(&mut self.plans, id, params)
    }

    pub fn add_coupon(&mut self, id: &str, params: CouponParams) -> &Coupon {
        upsert(&mut self.coupons, id, params)
    }

    pub fn add_subscription(
        &mut self,
        customer_id: &str,
        id: &str,
        params: SubscriptionParams,
    ) -> &Subscription {
        let owned = self.subscriptions.entry(customer_id.to_string()).or_default();
        match owned.entry(id.to_string()) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                record.apply(params);
                debug!(customer = customer_id, id, "Updated subscription");
                record
            }
            Entry::Vacant(entry) => {
                debug!(customer = customer_id, id, "Added subscription");
                entry.insert(Subscription::build(customer_id, id, params))
            }
        }
    }

    /// Add or update a generic source.
    pub fn add_source(&mut self, customer_id: &str, id: &str, params: SourceParams) -> &Source {
        self.upsert_source::<GenericSource>(customer_id, id, params)
    }

    pub fn add_card(&mut self, customer_id: &str, id: &str, params: CardParams) -> &Source {
        self.upsert_source::<Card>(customer_id, id, params)
    }

    pub fn add_bank_account(
        &mut self,
        customer_id: &str,
        id: &str,
        params: BankAccountParams,
    ) -> &Source {
        self.upsert_source::<BankAccount>(customer_id, id, params)
    }

    /// Merge into an existing source of the same variant. A source of another
    /// variant under the same id is replaced by a fresh record, in place.
    fn upsert_source<T: SourceVariant>(
        &mut self,
        customer_id: &str,
        id: &str,
        params: T::Params,
    ) -> &Source {
        let owned = self.sources.entry(customer_id.to_string()).or_default();

        let existing = owned.get(id).map(Source::object);
        let mut record = match owned.get_mut(id).and_then(T::from_source_mut) {
            Some(current) => current.clone(),
            None => <T as CustomerBound>::fake(customer_id, id),
        };
        record.apply(params);

        match existing {
            Some(previous) if previous != record.object() => warn!(
                customer = customer_id,
                id,
                from = %previous,
                to = %record.object(),
                "Replacing source with a different variant"
            ),
            Some(_) => debug!(customer = customer_id, id, object = %record.object(), "Updated source"),
            None => debug!(customer = customer_id, id, object = %record.object(), "Added source"),
        }

        let (index, _) = owned.insert_full(id.to_string(), record.into_source());
        &owned[index]
    }

    /// Apply a parsed fixture file through the add operations, in file order.
    pub fn load_fixtures(&mut self, fixtures: &Fixtures) {
        for (id, params) in &fixtures.customers {
            self.add_customer(id, params.clone());
        }
        for (id, params) in &fixtures.plans {
            self.add_plan(id, params.clone());
        }
        for (id, params) in &fixtures.coupons {
            self.add_coupon(id, params.clone());
        }
        for (customer_id, owned) in &fixtures.subscriptions {
            for (id, params) in owned {
                self.add_subscription(customer_id, id, params.clone());
            }
        }
        for (customer_id, owned) in &fixtures.sources {
            for (id, fixture) in owned {
                match fixture {
                    SourceFixture::Source(params) => {
                        self.add_source(customer_id, id, params.clone());
                    }
                    SourceFixture::Card(params) => {
                        self.add_card(customer_id, id, params.clone());
                    }
                    SourceFixture::BankAccount(params) => {
                        self.add_bank_account(customer_id, id, params.clone());
                    }
                }
            }
        }
        debug!(objects = fixtures.object_count(), "Loaded fixtures");
    }

    pub fn customers(&self) -> impl ExactSizeIterator<Item = &Customer> + '_ {
        self.customers.values()
    }

    pub fn plans(&self) -> impl ExactSizeIterator<Item = &Plan> + '_ {
        self.plans.values()
    }

    pub fn coupons(&self) -> impl ExactSizeIterator<Item = &Coupon> + '_ {
        self.coupons.values()
    }

    /// Every subscription, grouped by customer in insertion order.
    pub fn subscriptions(&self) -> impl Iterator<Item = &Subscription> + '_ {
        self.subscriptions.values().flat_map(IndexMap::values)
    }

    pub fn customer_subscriptions<'a>(
        &'a self,
        customer_id: &str,
    ) -> impl Iterator<Item = &'a Subscription> + 'a {
        self.subscriptions
            .get(customer_id)
            .into_iter()
            .flat_map(IndexMap::values)
    }

    /// Every source, grouped by customer in insertion order.
    pub fn sources(&self) -> impl Iterator<Item = &Source> + '_ {
        self.sources.values().flat_map(IndexMap::values)
    }

    pub fn customer_sources<'a>(
        &'a self,
        customer_id: &str,
    ) -> impl Iterator<Item = &'a Source> + 'a {
        self.sources
            .get(customer_id)
            .into_iter()
            .flat_map(IndexMap::values)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.plans.get(id)
    }

    pub fn coupon(&self, id: &str) -> Option<&Coupon> {
        self.coupons.get(id)
    }

    /// First subscription with this id, whichever customer owns it.
    pub fn subscription(&self, id: &str) -> Option<&Subscription> {
        self.subscriptions.values().find_map(|owned| owned.get(id))
    }

    /// First source with this id, whichever customer owns it.
    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.values().find_map(|owned| owned.get(id))
    }
}
