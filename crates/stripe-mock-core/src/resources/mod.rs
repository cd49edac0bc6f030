//! Payment API resources.
//!
//! Every resource is a typed record with a companion `*Params` type. Params
//! carry only optional fields and are merged shallowly into a record by
//! [`Resource::apply`].

mod coupon;
mod customer;
mod plan;
mod source;
mod subscription;

pub use coupon::{Coupon, CouponParams};
pub use customer::{Customer, CustomerParams};
pub use plan::{Plan, PlanParams};
pub use source::{
    BankAccount, BankAccountParams, Card, CardParams, GenericSource, Source, SourceOwner,
    SourceParams, SourceVariant,
};
pub use subscription::{Subscription, SubscriptionParams};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Serde adapter for params fields whose record field may be null.
///
/// An absent key stays `None`, an explicit `null` becomes `Some(None)` and
/// clears the record field on merge.
pub(crate) mod nullable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Key/value metadata attached to API objects.
pub type Metadata = BTreeMap<String, String>;

/// Creation timestamp shared by the fake templates (2017-12-14).
pub const FAKE_CREATED: i64 = 1_513_262_366;

/// Value of the `object` field of an API object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Customer,
    Plan,
    Coupon,
    Subscription,
    Source,
    Card,
    BankAccount,
    List,
}

impl ObjectKind {
    /// The wire name of this object kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Plan => "plan",
            Self::Coupon => "coupon",
            Self::Subscription => "subscription",
            Self::Source => "source",
            Self::Card => "card",
            Self::BankAccount => "bank_account",
            Self::List => "list",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "plan" => Some(Self::Plan),
            "coupon" => Some(Self::Coupon),
            "subscription" => Some(Self::Subscription),
            "source" => Some(Self::Source),
            "card" => Some(Self::Card),
            "bank_account" => Some(Self::BankAccount),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record served by the mock API.
pub trait Resource: Clone + Serialize {
    /// Optional-field update record merged by [`Resource::apply`].
    type Params: Default;

    /// Unique id within the record's collection.
    fn id(&self) -> &str;

    /// The `object` discriminator of the record.
    fn object(&self) -> ObjectKind;

    /// Merge params into the record, overwriting every field that is set.
    fn apply(&mut self, params: Self::Params);
}

/// A top-level resource with a default template.
pub trait Fake: Resource {
    /// Build the default record for `id`.
    fn fake(id: &str) -> Self;

    /// Build the default record for `id` and merge `params` into it.
    fn build(id: &str, params: Self::Params) -> Self {
        let mut record = Self::fake(id);
        record.apply(params);
        record
    }
}

/// A resource owned by a customer.
pub trait CustomerBound: Resource {
    /// Build the default record for `id`, owned by `customer_id`.
    fn fake(customer_id: &str, id: &str) -> Self;

    /// Id of the owning customer.
    fn customer(&self) -> &str;

    /// Build the default record and merge `params` into it.
    fn build(customer_id: &str, id: &str, params: Self::Params) -> Self {
        let mut record = <Self as CustomerBound>::fake(customer_id, id);
        record.apply(params);
        record
    }
}
