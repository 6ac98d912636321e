use crate::domain::validation::ValidationError;
use crate::domain::value::{
    Amount, BatchId, CallbackUrl, ConnectionId, ConnectionLabel, EmailAddress, GroupId,
    GroupName, MessageBody, Msisdn, PageSize, Password, SearchTerm, SenderId, UnixTimestamp,
};

/// Cursor-style paging shared by list endpoints (`since_id`, `max_id`, `count`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub since_id: Option<u64>,
    pub max_id: Option<u64>,
    pub count: Option<PageSize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackMethod {
    Get,
    Post,
}

impl CallbackMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Callback configuration of a connection (`callbacks`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionCallbacks {
    /// Delivery report callback.
    pub dlr: Option<CallbackUrl>,
    /// Mobile originated (inbound) message callback.
    pub mo: Option<CallbackUrl>,
    pub method: Option<CallbackMethod>,
}

impl ConnectionCallbacks {
    fn is_empty(&self) -> bool {
        self.dlr.is_none() && self.mo.is_none() && self.method.is_none()
    }
}

/// Changes applied by `PUT /connections/{ref}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionUpdate {
    pub label: Option<ConnectionLabel>,
    pub description: Option<String>,
    pub system_id: Option<String>,
    pub callbacks: Option<ConnectionCallbacks>,
}

impl ConnectionUpdate {
    pub(crate) fn ensure_changes(&self) -> Result<(), ValidationError> {
        let callbacks_empty = self
            .callbacks
            .as_ref()
            .is_none_or(ConnectionCallbacks::is_empty);
        if self.label.is_none()
            && self.description.is_none()
            && self.system_id.is_none()
            && callbacks_empty
        {
            return Err(ValidationError::EmptyUpdate {
                resource: "connection",
            });
        }
        Ok(())
    }
}

/// Changes applied by `PUT /users/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<Msisdn>,
}

impl UserUpdate {
    pub(crate) fn ensure_changes(&self) -> Result<(), ValidationError> {
        if self.name.is_none() && self.phone.is_none() {
            return Err(ValidationError::EmptyUpdate { resource: "user" });
        }
        Ok(())
    }
}

/// New e-mail address, confirmed with the current password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailChange {
    pub email: EmailAddress,
    pub password: Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    /// Current password.
    pub password: Password,
    pub new_password: Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEncoding {
    Utf8,
    Unicode,
    Iso8859_15,
}

impl MessageEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Unicode => "Unicode",
            Self::Iso8859_15 => "ISO-8859-15",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Text,
    /// Message body is a hex encoded binary payload.
    Binary,
}

/// Which delivery reports Beepsend should send back (`receive_dlr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryReports {
    Never,
    All,
    FailuresOnly,
}

impl DeliveryReports {
    pub fn value(self) -> u8 {
        match self {
            Self::Never => 0,
            Self::All => 1,
            Self::FailuresOnly => 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub from: Option<SenderId>,
    pub encoding: Option<MessageEncoding>,
    pub message_type: MessageType,
    /// User data header as a hex string.
    pub udh: Option<String>,
    pub dlr_url: Option<CallbackUrl>,
    pub receive_dlr: Option<DeliveryReports>,
    pub send_time: Option<UnixTimestamp>,
    /// Validity period in seconds.
    pub validity_period: Option<u32>,
    pub batch_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    Numbers(Vec<Msisdn>),
    Groups(Vec<GroupId>),
}

#[derive(Debug, Clone)]
pub struct SendSms {
    recipients: Recipients,
    message: MessageBody,
    options: SendOptions,
}

impl SendSms {
    pub fn to_one(
        recipient: Msisdn,
        message: MessageBody,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        Self::to_numbers(vec![recipient], message, options)
    }

    pub fn to_numbers(
        recipients: Vec<Msisdn>,
        message: MessageBody,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty { field: "to" });
        }
        Self::build(Recipients::Numbers(recipients), message, options)
    }

    /// Send to every contact of the given contact groups.
    pub fn to_groups(
        groups: Vec<GroupId>,
        message: MessageBody,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if groups.is_empty() {
            return Err(ValidationError::Empty { field: "groups" });
        }
        Self::build(Recipients::Groups(groups), message, options)
    }

    fn build(
        recipients: Recipients,
        message: MessageBody,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if options.message_type == MessageType::Binary && !is_hex(message.as_str()) {
            return Err(ValidationError::InvalidHex {
                field: MessageBody::FIELD,
            });
        }
        if options.udh.as_deref().is_some_and(|udh| !is_hex(udh)) {
            return Err(ValidationError::InvalidHex { field: "udh" });
        }
        Ok(Self {
            recipients,
            message,
            options,
        })
    }

    pub fn recipients(&self) -> &Recipients {
        &self.recipients
    }

    pub fn message(&self) -> &MessageBody {
        &self.message
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

fn is_hex(value: &str) -> bool {
    !value.is_empty() && value.len() % 2 == 0 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Filters for `GET /sms/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    pub to: Option<Msisdn>,
    pub from: Option<SenderId>,
    pub batch_id: Option<BatchId>,
    pub min_date: Option<UnixTimestamp>,
    pub max_date: Option<UnixTimestamp>,
    pub count: Option<PageSize>,
}

impl MessageFilter {
    pub(crate) fn ensure_valid(&self) -> Result<(), ValidationError> {
        ensure_date_range(self.min_date, self.max_date)
    }
}

/// Bulk HLR lookup. Results are delivered to `dlr_url` by Beepsend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkHlr {
    msisdns: Vec<Msisdn>,
    dlr_url: Option<CallbackUrl>,
}

impl BulkHlr {
    pub fn new(msisdns: Vec<Msisdn>, dlr_url: Option<CallbackUrl>) -> Result<Self, ValidationError> {
        if msisdns.is_empty() {
            return Err(ValidationError::Empty {
                field: Msisdn::FIELD,
            });
        }
        Ok(Self { msisdns, dlr_url })
    }

    pub fn msisdns(&self) -> &[Msisdn] {
        &self.msisdns
    }

    pub fn dlr_url(&self) -> Option<&CallbackUrl> {
        self.dlr_url.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSortField {
    FirstName,
    LastName,
    Msisdn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSort {
    pub field: ContactSortField,
    pub descending: bool,
}

impl ContactSort {
    pub(crate) fn to_param(self) -> String {
        let field = match self.field {
            ContactSortField::FirstName => "firstname",
            ContactSortField::LastName => "lastname",
            ContactSortField::Msisdn => "msisdn",
        };
        if self.descending {
            format!("-{field}")
        } else {
            field.to_owned()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactsQuery {
    pub group: Option<GroupId>,
    pub page: Page,
    pub sort: Option<ContactSort>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub msisdn: Msisdn,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub group_id: Option<GroupId>,
}

impl NewContact {
    pub fn new(msisdn: Msisdn) -> Self {
        Self {
            msisdn,
            first_name: None,
            last_name: None,
            group_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub msisdn: Option<Msisdn>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub group_id: Option<GroupId>,
}

impl ContactUpdate {
    pub(crate) fn ensure_changes(&self) -> Result<(), ValidationError> {
        if self.msisdn.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.group_id.is_none()
        {
            return Err(ValidationError::EmptyUpdate {
                resource: "contact",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactGroup {
    pub name: GroupName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: SearchTerm,
    /// Restrict contact searches to one group. Ignored by group searches.
    pub group: Option<GroupId>,
    pub page: Page,
}

impl SearchQuery {
    pub fn new(term: SearchTerm) -> Self {
        Self {
            term,
            group: None,
            page: Page::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletUpdate {
    pub name: Option<String>,
    /// Balance below which notification e-mails are sent.
    pub notify_limit: Option<Amount>,
}

impl WalletUpdate {
    pub(crate) fn ensure_changes(&self) -> Result<(), ValidationError> {
        if self.name.is_none() && self.notify_limit.is_none() {
            return Err(ValidationError::EmptyUpdate { resource: "wallet" });
        }
        Ok(())
    }
}

/// Filters for the summary and network analytics endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticsFilter {
    /// Limit statistics to one connection; all connections when unset.
    pub connection: Option<ConnectionId>,
    pub from_date: Option<UnixTimestamp>,
    pub to_date: Option<UnixTimestamp>,
}

impl AnalyticsFilter {
    pub(crate) fn ensure_valid(&self) -> Result<(), ValidationError> {
        ensure_date_range(self.from_date, self.to_date)
    }
}

fn ensure_date_range(
    from: Option<UnixTimestamp>,
    to: Option<UnixTimestamp>,
) -> Result<(), ValidationError> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(ValidationError::InvalidDateRange {
            from: from.value(),
            to: to.value(),
        }),
        _ => Ok(()),
    }
}
