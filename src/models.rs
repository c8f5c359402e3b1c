use crate::envelope::{Links, Resource, ResourceRef, ToMany, ToOne};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of money. `value` is the decimal rendering of
/// `value_in_base_units` in the currency's minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub currency_code: String,
    pub value: Decimal,
    pub value_in_base_units: i64,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Saver,
    Transactional,
    HomeLoan,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self {
            AccountType::Saver => "SAVER",
            AccountType::Transactional => "TRANSACTIONAL",
            AccountType::HomeLoan => "HOME_LOAN",
        };
        f.write_str(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipType {
    Individual,
    Joint,
}

impl fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self {
            OwnershipType::Individual => "INDIVIDUAL",
            OwnershipType::Joint => "JOINT",
        };
        f.write_str(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAttributes {
    pub display_name: String,
    pub account_type: AccountType,
    pub ownership_type: OwnershipType,
    pub balance: Money,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRelationships {
    #[serde(default)]
    pub transactions: ToMany,
}

pub type Account = Resource<AccountAttributes, AccountRelationships>;

/// Whether the money has left the account yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Held,
    Settled,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self {
            TransactionStatus::Held => "HELD",
            TransactionStatus::Settled => "SETTLED",
        };
        f.write_str(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardPurchaseMethod {
    BarCode,
    Ocr,
    CardPin,
    CardDetails,
    CardOnFile,
    Ecommerce,
    MagneticStripe,
    Contactless,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldInfo {
    pub amount: Money,
    pub foreign_amount: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundUp {
    pub amount: Money,
    pub boost_portion: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cashback {
    pub description: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPurchase {
    pub card_number_suffix: Option<String>,
    pub method: CardPurchaseMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformingCustomer {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAttributes {
    pub status: TransactionStatus,
    #[serde(default)]
    pub raw_text: Option<String>,
    pub description: String,
    #[serde(default)]
    pub message: Option<String>,
    pub is_categorizable: bool,
    #[serde(default)]
    pub hold_info: Option<HoldInfo>,
    #[serde(default)]
    pub round_up: Option<RoundUp>,
    #[serde(default)]
    pub cashback: Option<Cashback>,
    pub amount: Money,
    #[serde(default)]
    pub foreign_amount: Option<Money>,
    #[serde(default)]
    pub card_purchase_method: Option<CardPurchase>,
    #[serde(default)]
    pub settled_at: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub note: Option<Note>,
    #[serde(default)]
    pub performing_customer: Option<PerformingCustomer>,
    #[serde(rename = "deepLinkURL", default)]
    pub deep_link_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRelationships {
    #[serde(default)]
    pub account: ToOne,
    #[serde(default)]
    pub transfer_account: ToOne,
    #[serde(default)]
    pub category: ToOne,
    #[serde(default)]
    pub parent_category: ToOne,
    #[serde(default)]
    pub tags: ToMany,
    #[serde(default)]
    pub attachment: ToOne,
}

pub type Transaction = Resource<TransactionAttributes, TransactionRelationships>;

/// Tags have no attributes; the tag name is the resource id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(flatten)]
    pub object: ResourceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<TagRelationships>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl Tag {
    pub fn name(&self) -> &str {
        &self.object.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRelationships {
    #[serde(default)]
    pub transactions: ToMany,
}

/// Wrap tag names into the references the tag relationship endpoints expect.
pub(crate) fn tag_refs<S: AsRef<str>>(tags: &[S]) -> Vec<ResourceRef> {
    tags.iter()
        .map(|tag| ResourceRef::new("tags", tag.as_ref()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttributes {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRelationships {
    #[serde(default)]
    pub parent: ToOne,
    #[serde(default)]
    pub children: ToMany,
}

pub type Category = Resource<CategoryAttributes, CategoryRelationships>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ping {
    pub meta: PingMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingMeta {
    pub id: String,
    pub status_emoji: String,
}
