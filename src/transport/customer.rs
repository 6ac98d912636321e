use super::ApiRequest;

pub fn encode_get_customer() -> ApiRequest {
    ApiRequest::get(["customer", ""])
}
