use super::{Fake, Metadata, ObjectKind, Resource, FAKE_CREATED};
use serde::{Deserialize, Serialize};

/// A billing plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub object: ObjectKind,
    pub amount: i64,
    pub created: i64,
    pub currency: String,
    pub interval: String,
    pub interval_count: u32,
    pub livemode: bool,
    pub metadata: Metadata,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub product: Option<String>,
    pub statement_descriptor: Option<String>,
    pub trial_period_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanParams {
    pub amount: Option<i64>,
    pub created: Option<i64>,
    pub currency: Option<String>,
    pub interval: Option<String>,
    pub interval_count: Option<u32>,
    pub livemode: Option<bool>,
    pub metadata: Option<Metadata>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub nickname: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub product: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub statement_descriptor: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<Option<u32>>,
}

impl Resource for Plan {
    type Params = PlanParams;

    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> ObjectKind {
        self.object
    }

    fn apply(&mut self, params: PlanParams) {
        merge_params!(self, params, {
            amount, created, currency, interval, interval_count, livemode, metadata,
        }, nullable {
            name, nickname, product, statement_descriptor, trial_period_days,
        });
    }
}

impl Fake for Plan {
    fn fake(id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: ObjectKind::Plan,
            amount: 999,
            created: FAKE_CREATED,
            currency: "usd".to_string(),
            interval: "month".to_string(),
            interval_count: 1,
            livemode: false,
            metadata: Metadata::new(),
            name: Some("Test plan".to_string()),
            nickname: None,
            product: None,
            statement_descriptor: None,
            trial_period_days: None,
        }
    }
}
