use serde_json::Map;

use super::{ApiRequest, insert_opt, push_page};
use crate::domain::{Amount, EmailAddress, EmailNotificationId, Page, WalletId, WalletUpdate};

pub fn encode_list_wallets() -> ApiRequest {
    ApiRequest::get(["wallets", ""])
}

pub fn encode_get_wallet(id: WalletId) -> ApiRequest {
    ApiRequest::get(["wallets".to_owned(), id.to_string()])
}

pub fn encode_update_wallet(id: WalletId, update: &WalletUpdate) -> ApiRequest {
    let mut body = Map::new();
    insert_opt(&mut body, "name", update.name.as_deref());
    insert_opt(&mut body, "notify_limit", update.notify_limit.map(Amount::value));
    ApiRequest::put(["wallets".to_owned(), id.to_string()]).with_body(body)
}

pub fn encode_wallet_transactions(id: WalletId, page: &Page) -> ApiRequest {
    let mut params = Vec::<(String, String)>::new();
    push_page(&mut params, page);
    ApiRequest::get([
        "wallets".to_owned(),
        id.to_string(),
        "transactions".to_owned(),
        String::new(),
    ])
    .with_query(params)
}

/// `POST /wallets/{source}/transfer/{target}/` moving `amount` between wallets.
pub fn encode_transfer(source: WalletId, target: WalletId, amount: Amount) -> ApiRequest {
    let mut body = Map::new();
    body.insert(Amount::FIELD.to_owned(), amount.value().into());
    ApiRequest::post([
        "wallets".to_owned(),
        source.to_string(),
        "transfer".to_owned(),
        target.to_string(),
        String::new(),
    ])
    .with_body(body)
}

pub fn encode_list_email_notifications(id: WalletId) -> ApiRequest {
    ApiRequest::get(emails_segments(id))
}

pub fn encode_add_email_notification(id: WalletId, email: &EmailAddress) -> ApiRequest {
    let mut body = Map::new();
    body.insert(EmailAddress::FIELD.to_owned(), email.as_str().into());
    ApiRequest::post(emails_segments(id)).with_body(body)
}

pub fn encode_remove_email_notification(id: WalletId, email: EmailNotificationId) -> ApiRequest {
    ApiRequest::delete([
        "wallets".to_owned(),
        id.to_string(),
        "emails".to_owned(),
        email.to_string(),
    ])
}

fn emails_segments(id: WalletId) -> [String; 4] {
    [
        "wallets".to_owned(),
        id.to_string(),
        "emails".to_owned(),
        String::new(),
    ]
}
