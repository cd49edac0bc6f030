//! Payment sources attached to a customer.
//!
//! The API has three shapes of source: generic `source` objects, `card`s and
//! `bank_account`s. All three are listed under a customer, but cards are not
//! reachable through the global `/v1/sources/:id` path.

use super::{CustomerBound, Metadata, ObjectKind, Resource, FAKE_CREATED};
use serde::{Deserialize, Serialize};

/// Owner details of a generic source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceOwner {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// A generic (`object: "source"`) payment source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericSource {
    pub id: String,
    pub object: ObjectKind,
    pub amount: Option<i64>,
    pub client_secret: String,
    pub created: i64,
    pub currency: Option<String>,
    pub customer: String,
    pub flow: String,
    pub livemode: bool,
    pub metadata: Metadata,
    pub owner: SourceOwner,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub usage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceParams {
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Option<i64>>,
    pub client_secret: Option<String>,
    pub created: Option<i64>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub currency: Option<Option<String>>,
    pub flow: Option<String>,
    pub livemode: Option<bool>,
    pub metadata: Option<Metadata>,
    pub owner: Option<SourceOwner>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub usage: Option<String>,
}

impl Resource for GenericSource {
    type Params = SourceParams;

    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> ObjectKind {
        self.object
    }

    fn apply(&mut self, params: SourceParams) {
        merge_params!(self, params, {
            client_secret, created, flow, livemode, metadata, owner, status, kind, usage,
        }, nullable {
            amount, currency,
        });
    }
}

impl CustomerBound for GenericSource {
    fn fake(customer_id: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: ObjectKind::Source,
            amount: None,
            client_secret: "src_client_secret_test".to_string(),
            created: FAKE_CREATED,
            currency: None,
            customer: customer_id.to_string(),
            flow: "none".to_string(),
            livemode: false,
            metadata: Metadata::new(),
            owner: SourceOwner::default(),
            status: "chargeable".to_string(),
            kind: "card".to_string(),
            usage: "reusable".to_string(),
        }
    }

    fn customer(&self) -> &str {
        &self.customer
    }
}

/// A card attached to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub object: ObjectKind,
    pub address_city: Option<String>,
    pub address_country: Option<String>,
    pub address_line1: Option<String>,
    pub address_line1_check: Option<String>,
    pub address_line2: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub address_zip_check: Option<String>,
    pub brand: String,
    pub country: String,
    pub customer: String,
    pub cvc_check: Option<String>,
    pub dynamic_last4: Option<String>,
    pub exp_month: u32,
    pub exp_year: u32,
    pub fingerprint: String,
    pub funding: String,
    pub last4: String,
    pub metadata: Metadata,
    pub name: Option<String>,
    pub tokenization_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardParams {
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address_city: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address_country: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address_line1_check: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address_state: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address_zip: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub address_zip_check: Option<Option<String>>,
    pub brand: Option<String>,
    pub country: Option<String>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub cvc_check: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub dynamic_last4: Option<Option<String>>,
    pub exp_month: Option<u32>,
    pub exp_year: Option<u32>,
    pub fingerprint: Option<String>,
    pub funding: Option<String>,
    pub last4: Option<String>,
    pub metadata: Option<Metadata>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub tokenization_method: Option<Option<String>>,
}

impl Resource for Card {
    type Params = CardParams;

    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> ObjectKind {
        self.object
    }

    fn apply(&mut self, params: CardParams) {
        merge_params!(self, params, {
            brand, country, exp_month, exp_year, fingerprint, funding, last4, metadata,
        }, nullable {
            address_city, address_country, address_line1, address_line1_check, address_line2,
            address_state, address_zip, address_zip_check, cvc_check, dynamic_last4, name,
            tokenization_method,
        });
    }
}

impl CustomerBound for Card {
    fn fake(customer_id: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: ObjectKind::Card,
            address_city: Some("new york".to_string()),
            address_country: Some("usa".to_string()),
            address_line1: Some("McAllister St".to_string()),
            address_line1_check: Some("pass".to_string()),
            address_line2: None,
            address_state: Some("ny".to_string()),
            address_zip: Some("10013".to_string()),
            address_zip_check: Some("pass".to_string()),
            brand: "Visa".to_string(),
            country: "US".to_string(),
            customer: customer_id.to_string(),
            cvc_check: Some("pass".to_string()),
            dynamic_last4: None,
            exp_month: 4,
            exp_year: 2032,
            fingerprint: "ZX4L088dUFClwtPD".to_string(),
            funding: "credit".to_string(),
            last4: "4242".to_string(),
            metadata: Metadata::new(),
            name: Some("John Doe".to_string()),
            tokenization_method: None,
        }
    }

    fn customer(&self) -> &str {
        &self.customer
    }
}

/// A bank account attached to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub object: ObjectKind,
    pub account_holder_name: Option<String>,
    pub account_holder_type: Option<String>,
    pub bank_name: String,
    pub country: String,
    pub currency: String,
    pub customer: String,
    pub fingerprint: String,
    pub last4: String,
    pub metadata: Metadata,
    pub routing_number: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BankAccountParams {
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<Option<String>>,
    #[serde(with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub account_holder_type: Option<Option<String>>,
    pub bank_name: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
    pub fingerprint: Option<String>,
    pub last4: Option<String>,
    pub metadata: Option<Metadata>,
    pub routing_number: Option<String>,
    pub status: Option<String>,
}

impl Resource for BankAccount {
    type Params = BankAccountParams;

    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self) -> ObjectKind {
        self.object
    }

    fn apply(&mut self, params: BankAccountParams) {
        merge_params!(self, params, {
            bank_name, country, currency, fingerprint, last4, metadata, routing_number, status,
        }, nullable {
            account_holder_name, account_holder_type,
        });
    }
}

impl CustomerBound for BankAccount {
    fn fake(customer_id: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            object: ObjectKind::BankAccount,
            account_holder_name: Some("Jane Austen".to_string()),
            account_holder_type: Some("individual".to_string()),
            bank_name: "STRIPE TEST BANK".to_string(),
            country: "US".to_string(),
            currency: "usd".to_string(),
            customer: customer_id.to_string(),
            fingerprint: "1JWtPxqbdX5Gamtc".to_string(),
            last4: "6789".to_string(),
            metadata: Metadata::new(),
            routing_number: "110000000".to_string(),
            status: "new".to_string(),
        }
    }

    fn customer(&self) -> &str {
        &self.customer
    }
}

/// Any source attached to a customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Source {
    Generic(GenericSource),
    Card(Card),
    BankAccount(BankAccount),
}

impl Source {
    pub fn id(&self) -> &str {
        match self {
            Self::Generic(source) => &source.id,
            Self::Card(card) => &card.id,
            Self::BankAccount(account) => &account.id,
        }
    }

    pub fn customer(&self) -> &str {
        match self {
            Self::Generic(source) => &source.customer,
            Self::Card(card) => &card.customer,
            Self::BankAccount(account) => &account.customer,
        }
    }

    pub fn object(&self) -> ObjectKind {
        match self {
            Self::Generic(source) => source.object,
            Self::Card(card) => card.object,
            Self::BankAccount(account) => account.object,
        }
    }
}

/// A concrete source type that can be stored as a [`Source`].
pub trait SourceVariant: CustomerBound {
    /// Wrap the record in the matching [`Source`] variant.
    fn into_source(self) -> Source;

    /// Borrow the record out of `source` if it is of this variant.
    fn from_source_mut(source: &mut Source) -> Option<&mut Self>;
}

impl SourceVariant for GenericSource {
    fn into_source(self) -> Source {
        Source::Generic(self)
    }

    fn from_source_mut(source: &mut Source) -> Option<&mut Self> {
        match source {
            Source::Generic(inner) => Some(inner),
            _ => None,
        }
    }
}

impl SourceVariant for Card {
    fn into_source(self) -> Source {
        Source::Card(self)
    }

    fn from_source_mut(source: &mut Source) -> Option<&mut Self> {
        match source {
            Source::Card(inner) => Some(inner),
            _ => None,
        }
    }
}

impl SourceVariant for BankAccount {
    fn into_source(self) -> Source {
        Source::BankAccount(self)
    }

    fn from_source_mut(source: &mut Source) -> Option<&mut Self> {
        match source {
            Source::BankAccount(inner) => Some(inner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fake_customer_source() {
        let source = GenericSource::fake("cus_ok", "src_hihi");
        assert_eq!(source.customer, "cus_ok");
        assert_eq!(source.id, "src_hihi");
        assert_eq!(source.object, ObjectKind::Source);
    }

    #[test]
    fn test_variants_report_object_kind() {
        let card = Card::fake("cus_ok", "card_1").into_source();
        let account = BankAccount::fake("cus_ok", "ba_1").into_source();
        assert_eq!(card.object(), ObjectKind::Card);
        assert_eq!(account.object(), ObjectKind::BankAccount);
        assert_eq!(card.customer(), "cus_ok");
        assert_eq!(account.id(), "ba_1");
    }

    #[test]
    fn test_untagged_serialization() {
        let value = serde_json::to_value(Card::fake("cus_ok", "card_1").into_source()).unwrap();
        assert_eq!(value["object"], "card");
        assert_eq!(value["last4"], "4242");
        assert!(value.get("Card").is_none());
    }

    #[test]
    fn test_type_field_rename() {
        let value = serde_json::to_value(GenericSource::fake("cus_ok", "src_1")).unwrap();
        assert_eq!(value["type"], "card");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_card_name_can_be_nulled() {
        let params: CardParams = serde_yaml::from_str("name: null\nlast4: '1881'").unwrap();
        let card = Card::build("cus_ok", "card_1", params);
        assert_eq!(card.name, None);
        assert_eq!(card.last4, "1881");
        assert_eq!(card.brand, "Visa");
    }

    #[test]
    fn test_from_source_mut_checks_variant() {
        let mut source = Card::fake("cus_ok", "card_1").into_source();
        assert!(Card::from_source_mut(&mut source).is_some());
        assert!(BankAccount::from_source_mut(&mut source).is_none());
    }
}
