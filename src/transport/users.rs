use serde_json::Map;

use super::{ApiRequest, insert_opt};
use crate::domain::{EmailAddress, EmailChange, Password, PasswordChange, UserRef, UserUpdate};

pub fn encode_get_me() -> ApiRequest {
    ApiRequest::get(["users", "me"])
}

pub fn encode_update_user(update: &UserUpdate) -> ApiRequest {
    let mut body = Map::new();
    insert_opt(&mut body, "name", update.name.as_deref());
    insert_opt(&mut body, "phone", update.phone.as_ref().map(|it| it.as_str()));
    ApiRequest::put(["users", "me"]).with_body(body)
}

pub fn encode_update_email(change: &EmailChange) -> ApiRequest {
    let mut body = Map::new();
    body.insert(EmailAddress::FIELD.to_owned(), change.email.as_str().into());
    body.insert(Password::FIELD.to_owned(), change.password.as_str().into());
    ApiRequest::put(["users", "me", "email"]).with_body(body)
}

pub fn encode_update_password(change: &PasswordChange) -> ApiRequest {
    let mut body = Map::new();
    body.insert(Password::FIELD.to_owned(), change.password.as_str().into());
    body.insert(
        "new_password".to_owned(),
        change.new_password.as_str().into(),
    );
    ApiRequest::put(["users", "me", "password"]).with_body(body)
}

pub fn encode_request_password_reset(email: &EmailAddress) -> ApiRequest {
    ApiRequest::get(["users", "passwordreset"]).with_query(vec![(
        EmailAddress::FIELD.to_owned(),
        email.as_str().to_owned(),
    )])
}

pub fn encode_reset_user_token(user: UserRef) -> ApiRequest {
    ApiRequest::get(["users".to_owned(), user.segment(), "tokenreset".to_owned()])
}
