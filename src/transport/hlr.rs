use serde_json::Map;

use super::ApiRequest;
use crate::domain::{BulkHlr, CallbackUrl, Msisdn};

pub fn encode_hlr_lookup(msisdn: &Msisdn) -> ApiRequest {
    ApiRequest::get(["hlr".to_owned(), msisdn.as_str().to_owned()]).with_hlr_token()
}

/// Bulk lookups are queued; numbers go out as repeated `msisdn[]` query pairs.
pub fn encode_bulk_hlr(request: &BulkHlr) -> ApiRequest {
    let mut params = request
        .msisdns()
        .iter()
        .map(|msisdn| ("msisdn[]".to_owned(), msisdn.as_str().to_owned()))
        .collect::<Vec<_>>();
    if let Some(dlr_url) = request.dlr_url() {
        params.push((CallbackUrl::FIELD.to_owned(), dlr_url.as_str().to_owned()));
    }

    ApiRequest::get(["hlr", ""])
        .with_query(params)
        .with_hlr_token()
}

pub fn encode_validate_hlr(msisdn: &Msisdn) -> ApiRequest {
    let mut body = Map::new();
    body.insert(Msisdn::FIELD.to_owned(), msisdn.as_str().into());
    ApiRequest::post(["hlr", "validate", ""])
        .with_body(body)
        .with_hlr_token()
}
