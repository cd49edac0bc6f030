use super::{CustomerBound, Metadata, ObjectKind, Resource, FAKE_CREATED};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Length of the default billing period (30 days).
const PERIOD_SECS: i64 = 30 * 24 * 60 * 60;

/// A customer's subscription to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub object: ObjectKind,
    pub cancel_at_period_end: bool,
    pub canceled_at: Option<i64>,
    pub created: i64,
    pub current_period_end: i64,
    pub current_period_start: i64,
    pub customer: String,
    pub discount: Option<Value>,
    pub ended_at: Option<i64>,
    pub livemode: bool,
    pub metadata: Metadata,
    /// Id of the subscribed plan.
    pub plan: Option<String>,
    pub quantity: u32,
    pub start: i64,
    pub status: String,
    pub tax_percent: Option<f64>,
    pub trial_end: Option<i64>,
    pub trial_start: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubscriptionParams {
    pub cancel_at_period_end: Option<bool>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<Option<i64>>,
    pub created: Option<i64>,
    pub current_period_end: Option<i64>,
    pub current_period_start: Option<i64>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub discount: Option<Option<Value>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<Option<i64>>,
    pub livemode: Option<bool>,
    pub metadata: Option<Metadata>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub plan: Option<Option<String>>,
    pub quantity: Option<u32>,
    pub start: Option<i64>,
    pub status: Option<String>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<Option<f64>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<Option<i64>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub trial_start: Option<Option<i64>>,
}

impl Resource for Subscription {
    type Params = SubscriptionParams;

    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> ObjectKind {
        self.object
    }

    fn apply(&mut self, params: SubscriptionParams) {
        merge_params!(self, params, {
            cancel_at_period_end, created, current_period_end, current_period_start,
            livemode, metadata, quantity, start, status,
        }, nullable {
            canceled_at, discount, ended_at, plan, tax_percent, trial_end, trial_start,
        });
    }
}

impl CustomerBound for Subscription {
    fn fake(customer_id: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: ObjectKind::Subscription,
            cancel_at_period_end: false,
            canceled_at: None,
            created: FAKE_CREATED,
            current_period_end: FAKE_CREATED + PERIOD_SECS,
            current_period_start: FAKE_CREATED,
            customer: customer_id.to_string(),
            discount: None,
            ended_at: None,
            livemode: false,
            metadata: Metadata::new(),
            plan: None,
            quantity: 1,
            start: FAKE_CREATED,
            status: "active".to_string(),
            tax_percent: None,
            trial_end: None,
            trial_start: None,
        }
    }

    fn customer(&self) -> &str {
        &self.customer
    }
}
