use serde_json::{Map, Value};

use super::{ApiRequest, insert_opt, push_count};
use crate::domain::{
    BatchId, CallbackUrl, ConnectionKey, MessageBody, MessageFilter, MessageType, Recipients,
    SendSms, SenderId, SmsId,
};

/// `POST /sms/`, or `POST /sms/{key}` to pick the sending connection explicitly.
pub fn encode_send_sms(connection: Option<&ConnectionKey>, request: &SendSms) -> ApiRequest {
    let segments = match connection {
        Some(key) => vec!["sms".to_owned(), key.segment()],
        None => vec!["sms".to_owned(), String::new()],
    };
    ApiRequest::post(segments).with_body(encode_sms_body(request))
}

/// Group sends are created as a batch (`POST /batches/`).
pub fn encode_send_to_groups(request: &SendSms) -> ApiRequest {
    ApiRequest::post(["batches", ""]).with_body(encode_sms_body(request))
}

pub fn encode_validate_sms(request: &SendSms) -> ApiRequest {
    ApiRequest::post(["sms", "validate", ""]).with_body(encode_sms_body(request))
}

fn encode_sms_body(request: &SendSms) -> Map<String, Value> {
    let mut body = Map::new();

    match request.recipients() {
        Recipients::Numbers(numbers) => {
            let to = match numbers.as_slice() {
                [single] => Value::from(single.as_str()),
                many => Value::from(many.iter().map(|it| it.as_str()).collect::<Vec<_>>()),
            };
            body.insert("to".to_owned(), to);
        }
        Recipients::Groups(groups) => {
            let groups = groups.iter().map(|it| it.value()).collect::<Vec<_>>();
            body.insert("groups".to_owned(), Value::from(groups));
        }
    }
    body.insert(
        MessageBody::FIELD.to_owned(),
        request.message().as_str().into(),
    );

    let options = request.options();
    insert_opt(
        &mut body,
        SenderId::FIELD,
        options.from.as_ref().map(SenderId::as_str),
    );
    insert_opt(&mut body, "encoding", options.encoding.map(|it| it.as_str()));
    if options.message_type == MessageType::Binary {
        body.insert("message_type".to_owned(), "binary".into());
    }
    insert_opt(&mut body, "udh", options.udh.as_deref());
    insert_opt(
        &mut body,
        CallbackUrl::FIELD,
        options.dlr_url.as_ref().map(CallbackUrl::as_str),
    );
    insert_opt(&mut body, "receive_dlr", options.receive_dlr.map(|it| it.value()));
    insert_opt(&mut body, "send_time", options.send_time.map(|it| it.value()));
    insert_opt(&mut body, "validity_period", options.validity_period);
    insert_opt(&mut body, "batch_label", options.batch_label.as_deref());

    body
}

pub fn encode_get_message(id: &SmsId) -> ApiRequest {
    ApiRequest::get(["sms".to_owned(), id.as_str().to_owned()])
}

pub fn encode_search_messages(filter: &MessageFilter) -> ApiRequest {
    let mut params = Vec::<(String, String)>::new();
    if let Some(to) = filter.to.as_ref() {
        params.push(("to".to_owned(), to.as_str().to_owned()));
    }
    if let Some(from) = filter.from.as_ref() {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }
    if let Some(batch_id) = filter.batch_id {
        params.push((BatchId::FIELD.to_owned(), batch_id.to_string()));
    }
    if let Some(min_date) = filter.min_date {
        params.push(("min_date".to_owned(), min_date.value().to_string()));
    }
    if let Some(max_date) = filter.max_date {
        params.push(("max_date".to_owned(), max_date.value().to_string()));
    }
    push_count(&mut params, filter.count);

    ApiRequest::get(["sms", ""]).with_query(params)
}

pub fn encode_list_batches() -> ApiRequest {
    ApiRequest::get(["batches", ""])
}

pub fn encode_get_batch(id: BatchId) -> ApiRequest {
    ApiRequest::get(["batches".to_owned(), id.to_string()])
}
