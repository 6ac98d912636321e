//! Transport layer: request encoding and wire-format details (serialization/deserialization).
//!
//! Every API operation is encoded into an [`ApiRequest`]: verb, path segments below the API
//! version, query pairs, and an optional JSON object body. The client turns it into an HTTP call.

mod analytics;
mod connections;
mod contacts;
mod customer;
mod error;
mod hlr;
mod messages;
mod pricelists;
mod search;
mod users;
mod wallets;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::{Page, PageSize};

pub use analytics::{
    encode_batch_analytics, encode_batches_analytics, encode_network_analytics,
    encode_summary_analytics,
};
pub use connections::{
    encode_get_connection, encode_list_connections, encode_reset_connection_password,
    encode_reset_connection_token, encode_update_connection,
};
pub use contacts::{
    encode_create_contact, encode_create_group, encode_delete_contact, encode_delete_group,
    encode_get_contact, encode_get_group, encode_list_contacts, encode_list_groups,
    encode_rename_group, encode_update_contact,
};
pub use customer::encode_get_customer;
pub use error::decode_error_body;
pub use hlr::{encode_bulk_hlr, encode_hlr_lookup, encode_validate_hlr};
pub use messages::{
    encode_get_batch, encode_get_message, encode_list_batches, encode_search_messages,
    encode_send_sms, encode_send_to_groups, encode_validate_sms,
};
pub use pricelists::{
    encode_current_pricelist, encode_pricelist_csv, encode_pricelist_revisions,
};
pub use search::{encode_search_contact_groups, encode_search_contacts};
pub use users::{
    encode_get_me, encode_request_password_reset, encode_reset_user_token, encode_update_email,
    encode_update_password, encode_update_user,
};
pub use wallets::{
    encode_add_email_notification, encode_get_wallet, encode_list_email_notifications,
    encode_list_wallets, encode_remove_email_notification, encode_transfer, encode_update_wallet,
    encode_wallet_transactions,
};

pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const CSV_MEDIA_TYPE: &str = "text/csv";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which credential authenticates a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Api,
    /// HLR endpoints are billed to an HLR connection with its own token.
    Hlr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments below `/{api_version}`; a trailing empty segment yields a trailing `/`.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Map<String, Value>>,
    pub token: TokenKind,
    /// Media type sent as `Accept`.
    pub accept: &'static str,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            token: TokenKind::Api,
            accept: JSON_MEDIA_TYPE,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PUT, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, segments)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_accept(mut self, media_type: &'static str) -> Self {
        self.accept = media_type;
        self
    }

    pub fn with_hlr_token(mut self) -> Self {
        self.token = TokenKind::Hlr;
        self
    }

    /// Unencoded path below the API version, e.g. `/contacts/12`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    Ok(serde_json::from_str(body)?)
}

fn insert_opt<V: Into<Value>>(body: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        body.insert(key.to_owned(), value.into());
    }
}

fn push_page(params: &mut Vec<(String, String)>, page: &Page) {
    if let Some(since_id) = page.since_id {
        params.push(("since_id".to_owned(), since_id.to_string()));
    }
    if let Some(max_id) = page.max_id {
        params.push(("max_id".to_owned(), max_id.to_string()));
    }
    push_count(params, page.count);
}

fn push_count(params: &mut Vec<(String, String)>, count: Option<PageSize>) {
    if let Some(count) = count {
        params.push((PageSize::FIELD.to_owned(), count.value().to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_joins_segments_and_keeps_trailing_slash() {
        assert_eq!(ApiRequest::get(["contacts", ""]).path(), "/contacts/");
        assert_eq!(ApiRequest::get(["users", "me"]).path(), "/users/me");
    }

    #[test]
    fn builders_set_method_token_and_payload() {
        let mut body = Map::new();
        body.insert("msisdn".to_owned(), Value::from("46736007518"));
        let request = ApiRequest::post(["hlr", "validate", ""])
            .with_body(body.clone())
            .with_hlr_token();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.token, TokenKind::Hlr);
        assert_eq!(request.body, Some(body));
        assert_eq!(request.accept, JSON_MEDIA_TYPE);
        assert!(request.query.is_empty());

        let csv = ApiRequest::get(["pricelists", "5.csv"]).with_accept(CSV_MEDIA_TYPE);
        assert_eq!(csv.accept, "text/csv");
    }

    #[test]
    fn push_page_emits_only_set_fields() {
        let mut params = Vec::new();
        push_page(
            &mut params,
            &Page {
                since_id: Some(10),
                max_id: None,
                count: Some(PageSize::new(50).unwrap()),
            },
        );
        assert_eq!(
            params,
            vec![
                ("since_id".to_owned(), "10".to_owned()),
                ("count".to_owned(), "50".to_owned()),
            ]
        );

        let mut params = Vec::new();
        push_page(&mut params, &Page::default());
        assert!(params.is_empty());
    }

    #[test]
    fn insert_opt_skips_none() {
        let mut body = Map::new();
        insert_opt(&mut body, "name", Some("group"));
        insert_opt::<String>(&mut body, "description", None);
        assert_eq!(body.len(), 1);
        assert_eq!(body.get("name"), Some(&Value::from("group")));
    }

    #[test]
    fn decode_json_reports_invalid_payloads() {
        let value: Value = decode_json(r#"{"ok": true}"#).unwrap();
        assert_eq!(value["ok"], Value::Bool(true));
        assert!(matches!(
            decode_json::<Value>("{ nope"),
            Err(TransportError::Json(_))
        ));
    }
}
