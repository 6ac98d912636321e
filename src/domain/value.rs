use std::fmt;

use phonenumber::country;
use serde::de::{self, Deserialize, Deserializer, Visitor};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Beepsend API token (connection or user token).
///
/// Invariant: non-empty after trimming.
pub struct ApiToken(String);

impl ApiToken {
    /// Query parameter name used by Beepsend (`api_token`).
    pub const FIELD: &'static str = "api_token";

    /// Create a validated [`ApiToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Field name used by Beepsend for this id.
            pub const FIELD: &'static str = $field;

            /// Wrap a raw numeric id.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the underlying numeric id.
            pub fn value(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(NumericIdVisitor).map(Self)
            }
        }
    };
}

struct NumericIdVisitor;

impl Visitor<'_> for NumericIdVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer id or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::custom(format!("negative id: {value}")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| E::custom(format!("non-numeric id: {value}")))
    }
}

numeric_id!(
    /// Beepsend connection id.
    ConnectionId,
    "connection_id"
);
numeric_id!(
    /// Beepsend user id.
    UserId,
    "user_id"
);
numeric_id!(
    /// Contact id.
    ContactId,
    "contact_id"
);
numeric_id!(
    /// Contact group id (`group_id`).
    GroupId,
    "group_id"
);
numeric_id!(
    /// Batch id (`batch_id`). Batches group messages sent in one request.
    BatchId,
    "batch_id"
);
numeric_id!(
    /// Wallet id.
    WalletId,
    "wallet_id"
);
numeric_id!(
    /// Id of a wallet e-mail notification recipient.
    EmailNotificationId,
    "email_id"
);
numeric_id!(
    /// Wallet transaction id.
    TransactionId,
    "transaction_id"
);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Human readable connection label.
///
/// Invariant: non-empty after trimming.
pub struct ConnectionLabel(String);

impl ConnectionLabel {
    pub const FIELD: &'static str = "label";

    /// Create a validated [`ConnectionLabel`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Connection addressed by a `/connections/...` path.
pub enum ConnectionRef {
    /// The connection the API token belongs to (`me`).
    Me,
    Id(ConnectionId),
}

impl ConnectionRef {
    pub(crate) fn segment(&self) -> String {
        match self {
            Self::Me => "me".to_owned(),
            Self::Id(id) => id.to_string(),
        }
    }
}

impl From<ConnectionId> for ConnectionRef {
    fn from(value: ConnectionId) -> Self {
        Self::Id(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Connection addressed by id or by label (pricelist CSV export, sending via a connection).
pub enum ConnectionKey {
    Id(ConnectionId),
    Label(ConnectionLabel),
}

impl ConnectionKey {
    pub(crate) fn segment(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Label(label) => label.as_str().to_owned(),
        }
    }
}

impl From<ConnectionId> for ConnectionKey {
    fn from(value: ConnectionId) -> Self {
        Self::Id(value)
    }
}

impl From<ConnectionLabel> for ConnectionKey {
    fn from(value: ConnectionLabel) -> Self {
        Self::Label(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// User addressed by a `/users/...` path.
pub enum UserRef {
    Me,
    Id(UserId),
}

impl UserRef {
    pub(crate) fn segment(&self) -> String {
        match self {
            Self::Me => "me".to_owned(),
            Self::Id(id) => id.to_string(),
        }
    }
}

impl From<UserId> for UserRef {
    fn from(value: UserId) -> Self {
        Self::Id(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Beepsend message id as returned by `POST /sms/`.
///
/// Invariant: non-empty after trimming.
pub struct SmsId(String);

impl SmsId {
    pub const FIELD: &'static str = "id";

    /// Create a validated [`SmsId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SmsId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Mobile number in international format without a leading `+` (`msisdn`).
///
/// Invariant: 1 to [`Msisdn::MAX_DIGITS`] ASCII digits. A leading `+` on input is dropped;
/// leading zeros are kept as given.
pub struct Msisdn(String);

impl Msisdn {
    pub const FIELD: &'static str = "msisdn";
    pub const MAX_DIGITS: usize = 20;

    /// Create a validated [`Msisdn`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty()
            || digits.len() > Self::MAX_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ValidationError::InvalidMsisdn {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(digits.to_owned()))
    }

    /// Digits as sent to Beepsend.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Msisdn {
    /// Convert a parsed phone number into its E.164 digits.
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164.trim_start_matches('+').to_owned())
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    pub const FIELD: &'static str = "phone";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// E-mail address (`email`).
///
/// Invariant: trimmed, exactly one `@` with non-empty local and domain parts, no whitespace.
pub struct EmailAddress(String);

impl EmailAddress {
    pub const FIELD: &'static str = "email";

    /// Create a validated [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let valid = match trimmed.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !trimmed.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(ValidationError::InvalidEmail {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id (`from`): alphanumeric originator or MSISDN.
///
/// Invariant: non-empty after trimming.
pub struct SenderId(String);

impl SenderId {
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageBody(String);

impl MessageBody {
    pub const FIELD: &'static str = "message";

    /// Create a validated message body.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Absolute `http`/`https` URL Beepsend calls back with delivery reports.
pub struct CallbackUrl(url::Url);

impl CallbackUrl {
    pub const FIELD: &'static str = "dlr_url";

    /// Parse and validate a callback URL.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
            input: trimmed.to_owned(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidUrl {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Contact group name.
///
/// Invariant: non-empty after trimming.
pub struct GroupName(String);

impl GroupName {
    pub const FIELD: &'static str = "name";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Free text search term (`query`).
///
/// Invariant: non-empty after trimming.
pub struct SearchTerm(String);

impl SearchTerm {
    pub const FIELD: &'static str = "query";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of items per page (`count`).
///
/// Invariant: `1..=200`.
pub struct PageSize(u32);

impl PageSize {
    pub const FIELD: &'static str = "count";

    pub const MIN: u32 = 1;
    pub const MAX: u32 = 200;

    /// Create a validated page size.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::PageSizeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unix timestamp in seconds.
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
/// Monetary amount sent to the API (wallet transfers and notification limits).
///
/// Invariant: finite and strictly positive.
pub struct Amount(f64);

impl Amount {
    pub const FIELD: &'static str = "amount";

    /// Create a validated [`Amount`].
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidAmount { actual: value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Money-like value returned by Beepsend as either a JSON string or a JSON number.
///
/// For numbers the raw JSON token is kept, so `10.50` stays `"10.50"` and long values keep
/// every digit. Decoding needs the raw token and fails when the value was already buffered
/// (inside `#[serde(flatten)]` or untagged enums).
pub struct Money(String);

impl Money {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(de::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(de::Error::custom(
                "expected money field to be JSON string or number",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let token = ApiToken::new("  abc ").unwrap();
        assert_eq!(token.as_str(), "abc");
        assert!(ApiToken::new("  ").is_err());

        let label = ConnectionLabel::new(" marketing ").unwrap();
        assert_eq!(label.as_str(), "marketing");

        let password = Password::new(" secret ").unwrap();
        assert_eq!(password.as_str(), " secret ");
        assert!(Password::new("").is_err());

        let sender = SenderId::new(" Beepsend ").unwrap();
        assert_eq!(sender.as_str(), "Beepsend");

        let body = MessageBody::new(" hi ").unwrap();
        assert_eq!(body.as_str(), " hi ");
        assert!(MessageBody::new(" \n ").is_err());

        let sms_id = SmsId::new(" 4b2d8a1e ").unwrap();
        assert_eq!(sms_id.as_str(), "4b2d8a1e");

        assert!(GroupName::new("  ").is_err());
        assert!(SearchTerm::new("").is_err());
    }

    #[test]
    fn msisdn_accepts_digits_and_strips_plus() {
        assert_eq!(Msisdn::new(" +46736007518 ").unwrap().as_str(), "46736007518");
        assert_eq!(Msisdn::new("046736007512").unwrap().as_str(), "046736007512");

        assert!(matches!(
            Msisdn::new(""),
            Err(ValidationError::Empty { field: "msisdn" })
        ));
        assert!(matches!(
            Msisdn::new("+"),
            Err(ValidationError::InvalidMsisdn { .. })
        ));
        assert!(matches!(
            Msisdn::new("4673 600"),
            Err(ValidationError::InvalidMsisdn { .. })
        ));
        assert!(Msisdn::new("1".repeat(Msisdn::MAX_DIGITS + 1)).is_err());
    }

    #[test]
    fn phone_number_converts_to_msisdn_digits() {
        let p1 = PhoneNumber::parse(None, "+46736007518").unwrap();
        let p2 = PhoneNumber::parse(None, "+46 73 600 75 18").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+46736007518");

        let msisdn: Msisdn = p2.into();
        assert_eq!(msisdn.as_str(), "46736007518");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn email_address_requires_local_and_domain() {
        assert_eq!(
            EmailAddress::new(" you@domain.com ").unwrap().as_str(),
            "you@domain.com"
        );
        assert!(EmailAddress::new("domain.com").is_err());
        assert!(EmailAddress::new("@domain.com").is_err());
        assert!(EmailAddress::new("you@").is_err());
        assert!(EmailAddress::new("a@b@c").is_err());
        assert!(EmailAddress::new("y ou@domain.com").is_err());
    }

    #[test]
    fn callback_url_requires_http_scheme() {
        let url = CallbackUrl::new("https://example.com/dlr").unwrap();
        assert_eq!(url.as_str(), "https://example.com/dlr");
        assert!(CallbackUrl::new("ftp://example.com").is_err());
        assert!(CallbackUrl::new("not a url").is_err());
    }

    #[test]
    fn page_size_and_amount_ranges_are_enforced() {
        assert!(PageSize::new(PageSize::MIN).is_ok());
        assert!(PageSize::new(PageSize::MAX).is_ok());
        assert!(PageSize::new(0).is_err());
        assert!(PageSize::new(PageSize::MAX + 1).is_err());

        assert!(Amount::new(0.01).is_ok());
        assert!(Amount::new(0.0).is_err());
        assert!(Amount::new(-5.0).is_err());
        assert!(Amount::new(f64::NAN).is_err());
        assert!(Amount::new(f64::INFINITY).is_err());
    }

    #[test]
    fn references_render_path_segments() {
        assert_eq!(ConnectionRef::Me.segment(), "me");
        assert_eq!(ConnectionRef::from(ConnectionId::new(12)).segment(), "12");
        assert_eq!(UserRef::Me.segment(), "me");
        assert_eq!(UserRef::from(UserId::new(3)).segment(), "3");

        let label = ConnectionLabel::new("bulk").unwrap();
        assert_eq!(ConnectionKey::from(label).segment(), "bulk");
        assert_eq!(ConnectionKey::from(ConnectionId::new(9)).segment(), "9");
    }

    #[test]
    fn numeric_ids_and_money_deserialize_leniently() {
        let id: ContactId = serde_json::from_str("42").unwrap();
        assert_eq!(id.value(), 42);
        let id: ContactId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id, ContactId::new(42));
        assert!(serde_json::from_str::<ContactId>("-1").is_err());
        assert!(serde_json::from_str::<ContactId>("\"abc\"").is_err());

        let money: Money = serde_json::from_str("\"10.00\"").unwrap();
        assert_eq!(money.as_str(), "10.00");
        let money: Money = serde_json::from_str("10.50").unwrap();
        assert_eq!(money.as_str(), "10.50");
        let money: Money = serde_json::from_str("3").unwrap();
        assert_eq!(money.to_string(), "3");
        let money: Money = serde_json::from_str("123456789012345678901.5").unwrap();
        assert_eq!(money.into_string(), "123456789012345678901.5");
        assert!(serde_json::from_str::<Money>("true").is_err());

        assert!(serde_json::from_str::<SmsId>("\"  \"").is_err());
    }
}
