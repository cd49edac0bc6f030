use super::{Fake, Metadata, ObjectKind, Resource, FAKE_CREATED};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub object: ObjectKind,
    pub amount_off: Option<i64>,
    pub created: i64,
    pub currency: Option<String>,
    pub duration: String,
    pub duration_in_months: Option<u32>,
    pub livemode: bool,
    pub max_redemptions: Option<u32>,
    pub metadata: Metadata,
    pub percent_off: Option<f64>,
    pub redeem_by: Option<i64>,
    pub times_redeemed: u32,
    pub valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CouponParams {
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub amount_off: Option<Option<i64>>,
    pub created: Option<i64>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub currency: Option<Option<String>>,
    pub duration: Option<String>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub duration_in_months: Option<Option<u32>>,
    pub livemode: Option<bool>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub max_redemptions: Option<Option<u32>>,
    pub metadata: Option<Metadata>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<Option<f64>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub redeem_by: Option<Option<i64>>,
    pub times_redeemed: Option<u32>,
    pub valid: Option<bool>,
}

impl Resource for Coupon {
    type Params = CouponParams;

    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> ObjectKind {
        self.object
    }

    fn apply(&mut self, params: CouponParams) {
        merge_params!(self, params, {
            created, duration, livemode, metadata, times_redeemed, valid,
        }, nullable {
            amount_off, currency, duration_in_months, max_redemptions, percent_off, redeem_by,
        });
    }
}

impl Fake for Coupon {
    fn fake(id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: ObjectKind::Coupon,
            amount_off: None,
            created: FAKE_CREATED,
            currency: None,
            duration: "forever".to_string(),
            duration_in_months: None,
            livemode: false,
            max_redemptions: None,
            metadata: Metadata::new(),
            percent_off: Some(25.0),
            redeem_by: None,
            times_redeemed: 0,
            valid: true,
        }
    }
}
