use super::ApiRequest;
use crate::domain::{AnalyticsFilter, BatchId};

pub fn encode_summary_analytics(filter: &AnalyticsFilter) -> ApiRequest {
    encode_filtered("summary", filter)
}

pub fn encode_network_analytics(filter: &AnalyticsFilter) -> ApiRequest {
    encode_filtered("network", filter)
}

fn encode_filtered(report: &str, filter: &AnalyticsFilter) -> ApiRequest {
    let last = filter
        .connection
        .map(|connection| connection.to_string())
        .unwrap_or_default();

    let mut params = Vec::<(String, String)>::new();
    if let Some(from_date) = filter.from_date {
        params.push(("from_date".to_owned(), from_date.value().to_string()));
    }
    if let Some(to_date) = filter.to_date {
        params.push(("to_date".to_owned(), to_date.value().to_string()));
    }

    ApiRequest::get(["analytics".to_owned(), report.to_owned(), last]).with_query(params)
}

pub fn encode_batches_analytics() -> ApiRequest {
    ApiRequest::get(["analytics", "batches", ""])
}

pub fn encode_batch_analytics(id: BatchId) -> ApiRequest {
    ApiRequest::get(["analytics".to_owned(), "batches".to_owned(), id.to_string()])
}
