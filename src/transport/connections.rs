use serde_json::{Map, Value};

use super::{ApiRequest, insert_opt};
use crate::domain::{ConnectionCallbacks, ConnectionRef, ConnectionUpdate};

pub fn encode_list_connections() -> ApiRequest {
    ApiRequest::get(["connections", ""])
}

pub fn encode_get_connection(connection: ConnectionRef) -> ApiRequest {
    ApiRequest::get(["connections".to_owned(), connection.segment()])
}

pub fn encode_update_connection(connection: ConnectionRef, update: &ConnectionUpdate) -> ApiRequest {
    let mut body = Map::new();
    insert_opt(&mut body, "label", update.label.as_ref().map(|it| it.as_str()));
    insert_opt(&mut body, "description", update.description.as_deref());
    insert_opt(&mut body, "system_id", update.system_id.as_deref());
    if let Some(callbacks) = update.callbacks.as_ref() {
        let callbacks = encode_callbacks(callbacks);
        if !callbacks.is_empty() {
            body.insert("callbacks".to_owned(), Value::Object(callbacks));
        }
    }

    ApiRequest::put(["connections".to_owned(), connection.segment()]).with_body(body)
}

fn encode_callbacks(callbacks: &ConnectionCallbacks) -> Map<String, Value> {
    let mut out = Map::new();
    insert_opt(&mut out, "dlr", callbacks.dlr.as_ref().map(|it| it.as_str()));
    insert_opt(&mut out, "mo", callbacks.mo.as_ref().map(|it| it.as_str()));
    insert_opt(&mut out, "method", callbacks.method.map(|it| it.as_str()));
    out
}

pub fn encode_reset_connection_token(connection: ConnectionRef) -> ApiRequest {
    ApiRequest::get([
        "connections".to_owned(),
        connection.segment(),
        "tokenreset".to_owned(),
    ])
}

pub fn encode_reset_connection_password(connection: ConnectionRef) -> ApiRequest {
    ApiRequest::get([
        "connections".to_owned(),
        connection.segment(),
        "passwordreset".to_owned(),
    ])
}
