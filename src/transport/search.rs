use super::{ApiRequest, push_page};
use crate::domain::{SearchQuery, SearchTerm};

pub fn encode_search_contacts(query: &SearchQuery) -> ApiRequest {
    let mut params = term_params(query);
    if let Some(group) = query.group {
        params.push(("group".to_owned(), group.to_string()));
    }
    push_page(&mut params, &query.page);
    ApiRequest::get(["search", "contacts", ""]).with_query(params)
}

pub fn encode_search_contact_groups(query: &SearchQuery) -> ApiRequest {
    let mut params = term_params(query);
    push_page(&mut params, &query.page);
    ApiRequest::get(["search", "contact_groups", ""]).with_query(params)
}

fn term_params(query: &SearchQuery) -> Vec<(String, String)> {
    vec![(SearchTerm::FIELD.to_owned(), query.term.as_str().to_owned())]
}
