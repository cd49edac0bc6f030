//! Callbacks for pattern stubs.
//!
//! Callbacks resolve requests that no exact stub claimed. They own a
//! serialized snapshot of the store taken at synchronization time.

use crate::patterns::{
    capture, customer_sources_url, customer_subscriptions_url, CUSTOMER_SOURCE_LIST_URL_RE,
    CUSTOMER_SOURCE_OBJECT_URL_RE, CUSTOMER_SUBSCRIPTION_LIST_URL_RE, SOURCE_URL_RE,
};
use crate::stub::{Callback, StubRequest, StubResponse};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use stripe_mock_core::{ListEnvelope, ObjectKind, Result, Source, Subscription};

/// A customer-bound object serialized for serving.
#[derive(Debug, Clone)]
pub struct OwnedEntry {
    pub customer: String,
    pub id: String,
    pub object: ObjectKind,
    pub body: Value,
}

impl OwnedEntry {
    fn new<T: Serialize>(customer: &str, id: &str, object: ObjectKind, record: &T) -> Result<Self> {
        Ok(Self {
            customer: customer.to_string(),
            id: id.to_string(),
            object,
            body: serde_json::to_value(record)?,
        })
    }

    pub fn from_source(source: &Source) -> Result<Self> {
        Self::new(source.customer(), source.id(), source.object(), source)
    }

    pub fn from_subscription(subscription: &Subscription) -> Result<Self> {
        Self::new(
            &subscription.customer,
            &subscription.id,
            subscription.object,
            subscription,
        )
    }
}

/// Shared snapshot handed to several callbacks.
pub type Snapshot = Arc<Vec<OwnedEntry>>;

fn internal_error(message: &str) -> StubResponse {
    StubResponse {
        status: 500,
        headers: Vec::new(),
        body: serde_json::json!({
            "error": { "type": "api_error", "message": message }
        }),
    }
}

fn listing(url: String, data: Vec<Value>) -> StubResponse {
    StubResponse::ok(&ListEnvelope::new(url, data))
        .unwrap_or_else(|err| internal_error(&err.to_string()))
}

/// 404 for every request; the id is capture group 1 of `pattern`.
pub fn not_found(object_name: &'static str, pattern: &'static Regex) -> Callback {
    Arc::new(move |request: &StubRequest| {
        StubResponse::not_found(object_name, capture(pattern, &request.path, 1))
    })
}

/// Global `/v1/sources/:id` lookup.
///
/// Sources whose `object` is in `blocked_objects` are invisible here, so a
/// card answers 404 on this path even though the customer-scoped path
/// serves it.
pub fn source_lookup(sources: &Snapshot, blocked_objects: &[ObjectKind]) -> Callback {
    let cleaned: Vec<OwnedEntry> = sources
        .iter()
        .filter(|entry| !blocked_objects.contains(&entry.object))
        .cloned()
        .collect();

    Arc::new(move |request: &StubRequest| {
        let source_id = capture(&SOURCE_URL_RE, &request.path, 1);
        match cleaned.iter().find(|entry| entry.id == source_id) {
            Some(entry) => StubResponse {
                status: 200,
                headers: Vec::new(),
                body: entry.body.clone(),
            },
            None => StubResponse::not_found("source", source_id),
        }
    })
}

/// Customer-scoped `/v1/customers/:customer/sources/:id` lookup.
pub fn customer_source_lookup(sources: &Snapshot) -> Callback {
    let sources = Arc::clone(sources);

    Arc::new(move |request: &StubRequest| {
        let customer_id = capture(&CUSTOMER_SOURCE_OBJECT_URL_RE, &request.path, 1);
        let source_id = capture(&CUSTOMER_SOURCE_OBJECT_URL_RE, &request.path, 2);
        match sources
            .iter()
            .find(|entry| entry.customer == customer_id && entry.id == source_id)
        {
            Some(entry) => StubResponse {
                status: 200,
                headers: Vec::new(),
                body: entry.body.clone(),
            },
            None => StubResponse::not_found("source", source_id),
        }
    })
}

/// `/v1/customers/:customer/sources[?object=card|bank_account|source]`.
///
/// Unknown customers get an empty listing.
pub fn customer_source_listing(sources: &Snapshot) -> Callback {
    let sources = Arc::clone(sources);

    Arc::new(move |request: &StubRequest| {
        let customer_id = capture(&CUSTOMER_SOURCE_LIST_URL_RE, &request.path, 1);
        let object_type = request.query_param("object");
        let data = sources
            .iter()
            .filter(|entry| entry.customer == customer_id)
            .filter(|entry| object_type.map_or(true, |t| entry.object.as_str() == t))
            .map(|entry| entry.body.clone())
            .collect();
        listing(customer_sources_url(customer_id), data)
    })
}

/// `/v1/customers/:customer/subscriptions`; unknown customers get an empty listing.
pub fn customer_subscription_listing(subscriptions: &Snapshot) -> Callback {
    let subscriptions = Arc::clone(subscriptions);

    Arc::new(move |request: &StubRequest| {
        let customer_id = capture(&CUSTOMER_SUBSCRIPTION_LIST_URL_RE, &request.path, 1);
        let data = subscriptions
            .iter()
            .filter(|entry| entry.customer == customer_id)
            .map(|entry| entry.body.clone())
            .collect();
        listing(customer_subscriptions_url(customer_id), data)
    })
}
