//! Store to stub synchronization.
//!
//! [`Synchronizer::build`] turns the current store contents into a complete
//! [`StubSet`]. Installing that set on a facility replaces whatever was
//! installed before, so the set must be rebuilt after every store mutation.

use crate::callbacks::{self, OwnedEntry, Snapshot};
use crate::patterns::{
    customer_source_url, customer_sources_url, customer_subscriptions_url, object_url,
    COUPON_URL_BASE, COUPON_URL_RE, CUSTOMER_SOURCE_LIST_URL_RE, CUSTOMER_SOURCE_OBJECT_URL_RE,
    CUSTOMER_SUBSCRIPTION_LIST_URL_RE, CUSTOMER_URL_BASE, CUSTOMER_URL_RE, PLAN_URL_BASE,
    PLAN_URL_RE, SOURCE_URL_BASE, SOURCE_URL_RE, SUBSCRIPTION_URL_BASE, SUBSCRIPTION_URL_RE,
};
use crate::store::MockStore;
use crate::stub::{Stub, StubResponse, StubSet};
use serde::Serialize;
use std::sync::Arc;
use stripe_mock_core::{Customer, ListEnvelope, ObjectKind, Resource, Result, Source, Subscription};
use tracing::debug;

/// A customer as served, with its sources and subscriptions embedded.
#[derive(Serialize)]
struct CustomerView<'a> {
    #[serde(flatten)]
    customer: &'a Customer,
    sources: ListEnvelope<&'a Source>,
    subscriptions: ListEnvelope<&'a Subscription>,
}

/// Builds stub sets from a [`MockStore`].
#[derive(Debug, Clone)]
pub struct Synchronizer {
    blocked_global_sources: Vec<ObjectKind>,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self {
            blocked_global_sources: vec![ObjectKind::Card],
        }
    }
}

impl Synchronizer {
    /// Cards are hidden from `/v1/sources/:id`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide a different set of source objects from `/v1/sources/:id`.
    pub fn with_blocked_sources(mut self, blocked: Vec<ObjectKind>) -> Self {
        self.blocked_global_sources = blocked;
        self
    }

    pub fn blocked_sources(&self) -> &[ObjectKind] {
        &self.blocked_global_sources
    }

    /// Build every stub for the current store contents.
    pub fn build(&self, store: &MockStore) -> Result<StubSet> {
        let mut stubs = StubSet::new();

        objects(&mut stubs, PLAN_URL_BASE, store.plans())?;
        stubs.push(Stub::get_pattern(
            &PLAN_URL_RE,
            callbacks::not_found("plan", &PLAN_URL_RE),
        ));

        objects(&mut stubs, COUPON_URL_BASE, store.coupons())?;
        stubs.push(Stub::get_pattern(
            &COUPON_URL_RE,
            callbacks::not_found("coupon", &COUPON_URL_RE),
        ));

        self.subscriptions(&mut stubs, store)?;
        self.sources(&mut stubs, store)?;
        self.customers(&mut stubs, store)?;

        debug!(
            exact = stubs.exact_count(),
            patterns = stubs.pattern_count(),
            "Built stubs"
        );
        Ok(stubs)
    }

    fn subscriptions(&self, stubs: &mut StubSet, store: &MockStore) -> Result<()> {
        objects(stubs, SUBSCRIPTION_URL_BASE, store.subscriptions())?;
        stubs.push(Stub::get_pattern(
            &SUBSCRIPTION_URL_RE,
            callbacks::not_found("subscription", &SUBSCRIPTION_URL_RE),
        ));

        let snapshot: Snapshot = Arc::new(
            store
                .subscriptions()
                .map(OwnedEntry::from_subscription)
                .collect::<Result<_>>()?,
        );
        stubs.push(Stub::get_pattern(
            &CUSTOMER_SUBSCRIPTION_LIST_URL_RE,
            callbacks::customer_subscription_listing(&snapshot),
        ));
        Ok(())
    }

    fn sources(&self, stubs: &mut StubSet, store: &MockStore) -> Result<()> {
        for source in store.sources() {
            let response = StubResponse::ok(source)?;
            if !self.blocked_global_sources.contains(&source.object()) {
                stubs.push(Stub::get(
                    object_url(SOURCE_URL_BASE, source.id()),
                    response.clone(),
                ));
            }
            stubs.push(Stub::get(
                customer_source_url(source.customer(), source.id()),
                response,
            ));
        }

        // Customer source listings stay on the callback so `?object=` filters.
        let snapshot: Snapshot = Arc::new(
            store
                .sources()
                .map(OwnedEntry::from_source)
                .collect::<Result<_>>()?,
        );
        stubs.push(Stub::get_pattern(
            &SOURCE_URL_RE,
            callbacks::source_lookup(&snapshot, &self.blocked_global_sources),
        ));
        stubs.push(Stub::get_pattern(
            &CUSTOMER_SOURCE_OBJECT_URL_RE,
            callbacks::customer_source_lookup(&snapshot),
        ));
        stubs.push(Stub::get_pattern(
            &CUSTOMER_SOURCE_LIST_URL_RE,
            callbacks::customer_source_listing(&snapshot),
        ));
        Ok(())
    }

    fn customers(&self, stubs: &mut StubSet, store: &MockStore) -> Result<()> {
        let mut data = Vec::with_capacity(store.customers().len());
        for customer in store.customers() {
            let view = CustomerView {
                customer,
                sources: ListEnvelope::new(
                    customer_sources_url(&customer.id),
                    store.customer_sources(&customer.id).collect(),
                ),
                subscriptions: ListEnvelope::new(
                    customer_subscriptions_url(&customer.id),
                    store.customer_subscriptions(&customer.id).collect(),
                ),
            };
            stubs.push(Stub::get(
                object_url(CUSTOMER_URL_BASE, &customer.id),
                StubResponse::ok(&view)?,
            ));
            data.push(view);
        }
        stubs.push(Stub::get(
            CUSTOMER_URL_BASE,
            StubResponse::ok(&ListEnvelope::new(CUSTOMER_URL_BASE, data))?,
        ));
        stubs.push(Stub::get_pattern(
            &CUSTOMER_URL_RE,
            callbacks::not_found("customer", &CUSTOMER_URL_RE),
        ));
        Ok(())
    }
}

/// One exact stub per record plus the collection listing.
fn objects<'a, T: Resource + 'a>(
    stubs: &mut StubSet,
    base: &str,
    records: impl Iterator<Item = &'a T>,
) -> Result<()> {
    let mut data = Vec::new();
    for record in records {
        stubs.push(Stub::get(
            object_url(base, record.id()),
            StubResponse::ok(record)?,
        ));
        data.push(record);
    }
    stubs.push(Stub::get(base, StubResponse::ok(&ListEnvelope::new(base, data))?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubRequest;
    use pretty_assertions::assert_eq;
    use stripe_mock_core::{
        BankAccountParams, CardParams, CustomerParams, PlanParams, SourceParams,
        SubscriptionParams,
    };

    fn resolve(stubs: &StubSet, path: &str) -> StubResponse {
        let request = StubRequest::parse("GET", path);
        stubs
            .ordered()
            .find(|stub| stub.matches(&request))
            .map(|stub| stub.responder.respond(&request))
            .unwrap_or_else(|| panic!("no stub for {}", path))
    }

    fn populated() -> MockStore {
        let mut store = MockStore::new();
        store.add_customer("cus_1", CustomerParams::default());
        store.add_plan("gold", PlanParams::default());
        store.add_subscription(
            "cus_1",
            "sub_1",
            SubscriptionParams {
                plan: Some(Some("gold".into())),
                ..Default::default()
            },
        );
        store.add_source("cus_1", "src_1", SourceParams::default());
        store.add_card("cus_1", "card_1", CardParams::default());
        store.add_bank_account("cus_1", "ba_1", BankAccountParams::default());
        store
    }

    #[test]
    fn test_empty_store_still_lists() {
        let stubs = Synchronizer::new().build(&MockStore::new()).unwrap();

        for path in ["/v1/plans", "/v1/coupons", "/v1/subscriptions", "/v1/customers"] {
            let response = resolve(&stubs, path);
            assert_eq!(response.status, 200);
            assert_eq!(response.body["total_count"], 0);
            assert_eq!(response.body["url"], path);
        }
    }

    #[test]
    fn test_known_and_unknown_ids() {
        let stubs = Synchronizer::new().build(&populated()).unwrap();

        let plan = resolve(&stubs, "/v1/plans/gold");
        assert_eq!(plan.status, 200);
        assert_eq!(plan.body["id"], "gold");

        let missing = resolve(&stubs, "/v1/coupons/nope");
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body["error"]["message"], "No such coupon: nope");
    }

    #[test]
    fn test_customer_embeds_listings() {
        let stubs = Synchronizer::new().build(&populated()).unwrap();

        let customer = resolve(&stubs, "/v1/customers/cus_1");
        assert_eq!(customer.body["object"], "customer");
        assert_eq!(customer.body["sources"]["total_count"], 3);
        assert_eq!(customer.body["sources"]["url"], "/v1/customers/cus_1/sources");
        assert_eq!(customer.body["subscriptions"]["data"][0]["id"], "sub_1");
    }

    #[test]
    fn test_cards_hidden_from_global_source_path() {
        let stubs = Synchronizer::new().build(&populated()).unwrap();

        assert_eq!(resolve(&stubs, "/v1/sources/src_1").status, 200);
        assert_eq!(resolve(&stubs, "/v1/sources/ba_1").status, 200);
        assert_eq!(resolve(&stubs, "/v1/sources/card_1").status, 404);
        assert_eq!(
            resolve(&stubs, "/v1/customers/cus_1/sources/card_1").status,
            200
        );
    }

    #[test]
    fn test_custom_blocked_sources() {
        let stubs = Synchronizer::new()
            .with_blocked_sources(vec![ObjectKind::BankAccount])
            .build(&populated())
            .unwrap();

        assert_eq!(resolve(&stubs, "/v1/sources/card_1").status, 200);
        assert_eq!(resolve(&stubs, "/v1/sources/ba_1").status, 404);
    }

    #[test]
    fn test_no_exact_stub_shadows_source_listing() {
        let stubs = Synchronizer::new().build(&populated()).unwrap();

        let cards = resolve(&stubs, "/v1/customers/cus_1/sources?object=card");
        assert_eq!(cards.body["total_count"], 1);
    }
}
