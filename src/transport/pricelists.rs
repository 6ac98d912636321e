use super::{ApiRequest, CSV_MEDIA_TYPE};
use crate::domain::{ConnectionKey, ConnectionRef};

pub fn encode_current_pricelist(connection: ConnectionRef) -> ApiRequest {
    ApiRequest::get([
        "connections".to_owned(),
        connection.segment(),
        "pricelists".to_owned(),
        "current".to_owned(),
    ])
}

pub fn encode_pricelist_revisions(connection: ConnectionRef) -> ApiRequest {
    ApiRequest::get([
        "connections".to_owned(),
        connection.segment(),
        "pricelists".to_owned(),
        String::new(),
    ])
}

/// CSV export, addressed by connection id or label (`/pricelists/{key}.csv`).
///
/// `params` are appended to the query string as given.
pub fn encode_pricelist_csv(connection: &ConnectionKey, params: &[(&str, &str)]) -> ApiRequest {
    let query = params
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    ApiRequest::get(["pricelists".to_owned(), format!("{}.csv", connection.segment())])
        .with_query(query)
        .with_accept(CSV_MEDIA_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, ConnectionLabel};

    #[test]
    fn pricelist_paths() {
        assert_eq!(
            encode_current_pricelist(ConnectionRef::Me).path(),
            "/connections/me/pricelists/current"
        );
        assert_eq!(
            encode_current_pricelist(ConnectionId::new(5).into()).path(),
            "/connections/5/pricelists/current"
        );
        assert_eq!(
            encode_pricelist_revisions(ConnectionRef::Me).path(),
            "/connections/me/pricelists/"
        );
    }

    #[test]
    fn csv_accepts_id_or_label() {
        let by_id = encode_pricelist_csv(&ConnectionId::new(5).into(), &[]);
        assert_eq!(by_id.path(), "/pricelists/5.csv");
        assert!(by_id.query.is_empty());

        let label = ConnectionLabel::new("bulk-se").unwrap();
        let by_label = encode_pricelist_csv(&label.into(), &[]);
        assert_eq!(by_label.path(), "/pricelists/bulk-se.csv");
    }

    #[test]
    fn csv_asks_for_csv_and_forwards_params() {
        let request = encode_pricelist_csv(&ConnectionId::new(5).into(), &[("delimiter", ";")]);
        assert_eq!(request.accept, "text/csv");
        assert_eq!(request.query, vec![("delimiter".to_owned(), ";".to_owned())]);
        assert_eq!(encode_current_pricelist(ConnectionRef::Me).accept, "application/json");
    }
}
