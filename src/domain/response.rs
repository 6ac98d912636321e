//! Response models.
//!
//! Fields the vendor documents are typed; everything else a payload carries is kept
//! in `extra`, so no part of a response is dropped.

use std::collections::BTreeMap;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_json::value::RawValue;

use crate::domain::value::{
    BatchId, ConnectionId, ContactId, EmailNotificationId, GroupId, Money, SmsId, TransactionId,
    UserId, WalletId,
};

type Extra = BTreeMap<String, Value>;

/// JSON object kept as raw tokens and decoded one field at a time.
///
/// Models carrying [`Money`] go through this instead of `#[serde(flatten)]`: flattening buffers
/// every value and a money number would lose its original text.
#[derive(Deserialize)]
#[serde(transparent)]
struct RawFields(BTreeMap<String, Box<RawValue>>);

impl RawFields {
    /// Remove and decode `key`; absent keys and `null` both yield `None`.
    fn take<T: DeserializeOwned, E: de::Error>(&mut self, key: &str) -> Result<Option<T>, E> {
        match self.0.remove(key) {
            Some(raw) => serde_json::from_str::<Option<T>>(raw.get())
                .map_err(|err| E::custom(format_args!("field `{key}`: {err}"))),
            None => Ok(None),
        }
    }

    fn require<T: DeserializeOwned, E: de::Error>(&mut self, key: &'static str) -> Result<T, E> {
        self.take(key)?.ok_or_else(|| E::missing_field(key))
    }

    /// Everything not taken so far.
    fn into_extra<E: de::Error>(self) -> Result<Extra, E> {
        self.0
            .into_iter()
            .map(|(key, raw)| {
                serde_json::from_str(raw.get())
                    .map(|value| (key, value))
                    .map_err(E::custom)
            })
            .collect()
    }
}

/// Error message reported by the API, either in an error response body or per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorMessage {
    pub code: Option<i64>,
    /// Request field the message refers to, when the API reports one.
    pub field: Option<String>,
    pub description: String,
}

impl ApiErrorMessage {
    /// Flatten the vendor's `errors` value into a list of messages.
    ///
    /// Accepts a string, a list of strings or `{code, description}` objects, a single such
    /// object, or an object mapping request fields to messages.
    pub(crate) fn list_from_value(value: &Value) -> Vec<Self> {
        let mut out = Vec::new();
        collect_errors(value, None, &mut out);
        out
    }
}

fn collect_errors(value: &Value, field: Option<&str>, out: &mut Vec<ApiErrorMessage>) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                collect_errors(item, field, out);
            }
        }
        Value::Object(map) if is_error_object(map) => {
            let description = ["description", "message", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_owned)
                .unwrap_or_else(|| value.to_string());
            let code = map.get("code").and_then(|code| match code {
                Value::Number(number) => number.as_i64(),
                Value::String(text) => text.trim().parse().ok(),
                _ => None,
            });
            let field = map
                .get("field")
                .and_then(Value::as_str)
                .or(field)
                .map(str::to_owned);
            out.push(ApiErrorMessage {
                code,
                field,
                description,
            });
        }
        Value::Object(map) => {
            for (key, nested) in map {
                collect_errors(nested, Some(key), out);
            }
        }
        Value::String(text) => out.push(ApiErrorMessage {
            code: None,
            field: field.map(str::to_owned),
            description: text.clone(),
        }),
        other => out.push(ApiErrorMessage {
            code: None,
            field: field.map(str::to_owned),
            description: other.to_string(),
        }),
    }
}

fn is_error_object(map: &serde_json::Map<String, Value>) -> bool {
    ["code", "description", "message"]
        .iter()
        .any(|key| map.contains_key(*key))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionCallbackSettings {
    #[serde(default)]
    pub dlr: Option<String>,
    #[serde(default)]
    pub mo: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub label: Option<String>,
    pub description: Option<String>,
    pub system_id: Option<String>,
    /// Connection type (`type`), e.g. `sms` or `hlr`.
    pub kind: Option<String>,
    pub api_token: Option<String>,
    pub balance: Option<Money>,
    pub callbacks: Option<ConnectionCallbackSettings>,
    pub extra: Extra,
}

impl<'de> Deserialize<'de> for Connection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = RawFields::deserialize(deserializer)?;
        Ok(Self {
            id: fields.require("id")?,
            label: fields.take("label")?,
            description: fields.take("description")?,
            system_id: fields.take("system_id")?,
            kind: fields.take("type")?,
            api_token: fields.take("api_token")?,
            balance: fields.take("balance")?,
            callbacks: fields.take("callbacks")?,
            extra: fields.into_extra()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenReset {
    pub api_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordReset {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MccMnc {
    #[serde(default, deserialize_with = "lenient_string")]
    pub mcc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mnc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricelistEntry {
    pub mccmnc: Vec<MccMnc>,
    pub operator: Option<String>,
    pub country: Option<Value>,
    pub price: Option<Money>,
    pub extra: Extra,
}

impl<'de> Deserialize<'de> for PricelistEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = RawFields::deserialize(deserializer)?;
        Ok(Self {
            mccmnc: fields
                .take::<OneOrMany<MccMnc>, _>("mccmnc")?
                .map(OneOrMany::into_vec)
                .unwrap_or_default(),
            operator: fields.take("operator")?,
            country: fields.take("country")?,
            price: fields.take("price")?,
            extra: fields.into_extra()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pricelist {
    pub id: Option<u64>,
    pub timestamp: Option<i64>,
    pub networks: Vec<PricelistEntry>,
    pub extra: Extra,
}

impl<'de> Deserialize<'de> for Pricelist {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = RawFields::deserialize(deserializer)?;
        Ok(Self {
            id: fields.take("id")?,
            timestamp: fields.take("timestamp")?,
            networks: fields.take("networks")?.unwrap_or_default(),
            extra: fields.into_extra()?,
        })
    }
}

/// Per-recipient outcome of sending or validating a message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageReceipt {
    /// Ids of the created message parts; empty for validation or rejected recipients.
    #[serde(default, deserialize_with = "one_or_many")]
    pub id: Vec<SmsId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "error_list")]
    pub errors: Vec<ApiErrorMessage>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl MessageReceipt {
    pub fn is_accepted(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchRef {
    pub id: BatchId,
    #[serde(default)]
    pub label: Option<String>,
}

/// Address block of a looked-up message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageAddress {
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default)]
    pub ton: Option<i64>,
    #[serde(default)]
    pub npi: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeliveryStatus {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageDetails {
    pub id: SmsId,
    #[serde(default)]
    pub batch: Option<BatchRef>,
    #[serde(default)]
    pub from: Option<MessageAddress>,
    #[serde(default)]
    pub to: Option<MessageAddress>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub dlr: Option<DeliveryStatus>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HlrResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub msisdn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mccmnc: Option<String>,
    #[serde(default, deserialize_with = "error_list")]
    pub errors: Vec<ApiErrorMessage>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub msisdn: Option<String>,
    #[serde(default, rename = "firstname")]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastname")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactGroup {
    pub id: GroupId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contacts_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub id: WalletId,
    pub name: Option<String>,
    pub balance: Option<Money>,
    pub currency: Option<String>,
    pub notify_limit: Option<Money>,
    pub extra: Extra,
}

impl<'de> Deserialize<'de> for Wallet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = RawFields::deserialize(deserializer)?;
        Ok(Self {
            id: fields.require("id")?,
            name: fields.take("name")?,
            balance: fields.take("balance")?,
            currency: fields.take("currency")?,
            notify_limit: fields.take("notify_limit")?,
            extra: fields.into_extra()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletTransaction {
    pub id: TransactionId,
    pub timestamp: Option<i64>,
    pub amount: Option<Money>,
    pub comment: Option<String>,
    pub extra: Extra,
}

impl<'de> Deserialize<'de> for WalletTransaction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = RawFields::deserialize(deserializer)?;
        Ok(Self {
            id: fields.require("id")?,
            timestamp: fields.take("timestamp")?,
            amount: fields.take("amount")?,
            comment: fields.take("comment")?,
            extra: fields.into_extra()?,
        })
    }
}

/// Outcome of a wallet transfer. Both wallets are returned as sent by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletTransfer {
    pub source_wallet: Option<Value>,
    pub target_wallet: Option<Value>,
    pub amount: Option<Money>,
    pub extra: Extra,
}

impl<'de> Deserialize<'de> for WalletTransfer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = RawFields::deserialize(deserializer)?;
        Ok(Self {
            source_wallet: fields.take("source_wallet")?,
            target_wallet: fields.take("target_wallet")?,
            amount: fields.take("amount")?,
            extra: fields.into_extra()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmailNotification {
    pub id: EmailNotificationId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionSummary {
    pub id: ConnectionId,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryEntry {
    #[serde(default)]
    pub connection: Option<ConnectionSummary>,
    #[serde(default)]
    pub accepted: Option<u64>,
    #[serde(default)]
    pub delivered: Option<u64>,
    #[serde(default)]
    pub failed: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkEntry {
    #[serde(default, deserialize_with = "one_or_many")]
    pub mccmnc: Vec<MccMnc>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub accepted: Option<u64>,
    #[serde(default)]
    pub delivered: Option<u64>,
    #[serde(default)]
    pub failed: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchAnalytics {
    #[serde(default)]
    pub id: Option<BatchId>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub accepted: Option<u64>,
    #[serde(default)]
    pub delivered: Option<u64>,
    #[serde(default)]
    pub failed: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<OneOrMany<T>>::deserialize(deserializer)?
        .map(OneOrMany::into_vec)
        .unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value),
        Some(other) => Some(other.to_string()),
    })
}

fn error_list<'de, D>(deserializer: D) -> Result<Vec<ApiErrorMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .map(|value| ApiErrorMessage::list_from_value(&value))
        .unwrap_or_default())
}
