//! Typed Rust client for the Beepsend REST API (SMS messaging, HLR lookups, contacts,
//! wallets and analytics).
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! the wire format, and a client layer that sends requests and maps responses.
//!
//! ```rust,no_run
//! use beepsend::{Auth, BeepsendClient, MessageBody, Msisdn, SendOptions, SendSms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), beepsend::BeepsendError> {
//!     let client = BeepsendClient::new(Auth::token("...")?);
//!     let to = Msisdn::new("+46736007518")?;
//!     let message = MessageBody::new("Hello World!")?;
//!     let request = SendSms::to_one(to, message, SendOptions::default())?;
//!     for receipt in client.messages().send(&request).await? {
//!         println!("{:?} accepted: {}", receipt.id, receipt.is_accepted());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Auth, BeepsendClient, BeepsendClientBuilder, BeepsendError, TokenPlacement};
pub use domain::{
    Amount, ApiErrorMessage, ApiToken, BulkHlr, CallbackUrl, ConnectionId, ConnectionKey,
    ConnectionRef, EmailAddress, GroupId, MessageBody, MessageReceipt, Money, Msisdn, Page,
    PageSize, PhoneNumber, SendOptions, SendSms, SenderId, SmsId, UnixTimestamp,
    ValidationError, WalletId,
};
