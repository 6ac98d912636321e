//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    AnalyticsFilter, BulkHlr, CallbackMethod, ConnectionCallbacks, ConnectionUpdate, ContactSort,
    ContactSortField, ContactUpdate, ContactsQuery, DeliveryReports, EmailChange, MessageEncoding,
    MessageFilter, MessageType, NewContact, NewContactGroup, Page, PasswordChange, Recipients,
    SearchQuery, SendOptions, SendSms, UserUpdate, WalletUpdate,
};
pub use response::{
    ApiErrorMessage, Batch, BatchAnalytics, BatchRef, Connection, ConnectionCallbackSettings,
    ConnectionSummary, Contact, ContactGroup, Customer, DeliveryStatus, EmailNotification,
    HlrResult, MccMnc, MessageAddress, MessageDetails, MessageReceipt, NetworkEntry,
    PasswordReset, Pricelist, PricelistEntry, SummaryEntry, TokenReset, User, Wallet,
    WalletTransaction, WalletTransfer,
};
pub use validation::ValidationError;
pub use value::{
    Amount, ApiToken, BatchId, CallbackUrl, ConnectionId, ConnectionKey, ConnectionLabel,
    ConnectionRef, ContactId, EmailAddress, EmailNotificationId, GroupId, GroupName, MessageBody,
    Money, Msisdn, PageSize, Password, PhoneNumber, SearchTerm, SenderId, SmsId, TransactionId,
    UnixTimestamp, UserId, UserRef, WalletId,
};
