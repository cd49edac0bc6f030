use super::{Fake, Metadata, ObjectKind, Resource, FAKE_CREATED};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A customer record.
///
/// The API embeds `sources` and `subscriptions` listings in a customer; those
/// are derived from the store when responses are built, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub object: ObjectKind,
    pub account_balance: i64,
    pub created: i64,
    pub currency: Option<String>,
    pub default_source: Option<String>,
    pub delinquent: bool,
    pub description: Option<String>,
    pub discount: Option<Value>,
    pub email: Option<String>,
    pub livemode: bool,
    pub metadata: Metadata,
    pub shipping: Option<Value>,
}

/// Fields that can be set when adding or updating a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomerParams {
    pub account_balance: Option<i64>,
    pub created: Option<i64>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub currency: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub default_source: Option<Option<String>>,
    pub delinquent: Option<bool>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub discount: Option<Option<Value>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    pub livemode: Option<bool>,
    pub metadata: Option<Metadata>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Option<Value>>,
}

impl Resource for Customer {
    type Params = CustomerParams;

    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> ObjectKind {
        self.object
    }

    fn apply(&mut self, params: CustomerParams) {
        merge_params!(self, params, {
            account_balance, created, delinquent, livemode, metadata,
        }, nullable {
            currency, default_source, description, discount, email, shipping,
        });
    }
}

impl Fake for Customer {
    fn fake(id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: ObjectKind::Customer,
            account_balance: 0,
            created: FAKE_CREATED,
            currency: Some("usd".to_string()),
            default_source: Some("card_1BYxtEEzushJqDoiJUQkSyER".to_string()),
            delinquent: false,
            description: Some("Test user".to_string()),
            discount: None,
            email: Some("tony@local.com".to_string()),
            livemode: false,
            metadata: Metadata::new(),
            shipping: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fake_customer() {
        let customer = Customer::fake("cus_ok");
        assert_eq!(customer.id, "cus_ok");
        assert_eq!(customer.object, ObjectKind::Customer);
        assert_eq!(customer.email.as_deref(), Some("tony@local.com"));
    }

    #[test]
    fn test_apply_overwrites_only_set_fields() {
        let mut customer = Customer::fake("cus_ok");
        customer.apply(CustomerParams {
            email: Some(Some("someone@example.com".into())),
            delinquent: Some(true),
            ..Default::default()
        });

        assert_eq!(customer.email.as_deref(), Some("someone@example.com"));
        assert!(customer.delinquent);
        assert_eq!(customer.description.as_deref(), Some("Test user"));
        assert_eq!(customer.id, "cus_ok");
    }

    #[test]
    fn test_apply_explicit_null_clears_field() {
        let mut customer = Customer::fake("cus_ok");
        let params: CustomerParams =
            serde_yaml::from_str("default_source: null\ndescription: null").unwrap();
        assert_eq!(params.default_source, Some(None));
        assert_eq!(params.email, None);

        customer.apply(params);

        assert_eq!(customer.default_source, None);
        assert_eq!(customer.description, None);
        assert_eq!(customer.email.as_deref(), Some("tony@local.com"));
    }

    #[test]
    fn test_params_serialize_null_only_when_set() {
        let params = CustomerParams {
            default_source: Some(None),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["default_source"], Value::Null);
        assert!(value.get("description").is_none());

        let back: CustomerParams = serde_json::from_value(value).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(Customer::fake("cus_ok")).unwrap();
        assert_eq!(value["id"], "cus_ok");
        assert_eq!(value["object"], "customer");
        assert_eq!(value["discount"], Value::Null);
        assert_eq!(value["metadata"], serde_json::json!({}));
    }

    #[test]
    fn test_params_reject_unknown_fields() {
        let result = serde_yaml::from_str::<CustomerParams>("emial: typo@example.com");
        assert!(result.is_err());
    }
}
