use crate::domain::{ConnectionKey, ConnectionRef, Pricelist};
use crate::transport::{
    encode_current_pricelist, encode_pricelist_csv, encode_pricelist_revisions,
};

use super::{BeepsendClient, BeepsendError};

#[derive(Clone, Copy)]
pub struct PricelistsApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl PricelistsApi<'_> {
    /// Prices currently applied to the connection, per network.
    pub async fn current(
        &self,
        connection: impl Into<ConnectionRef>,
    ) -> Result<Pricelist, BeepsendError> {
        self.client
            .execute(encode_current_pricelist(connection.into()))
            .await
    }

    /// All pricelist revisions of the connection, newest first.
    pub async fn revisions(
        &self,
        connection: impl Into<ConnectionRef>,
    ) -> Result<Vec<Pricelist>, BeepsendError> {
        self.client
            .execute(encode_pricelist_revisions(connection.into()))
            .await
    }

    /// Download the current pricelist as CSV text, addressed by connection id or label.
    pub async fn csv(&self, connection: &ConnectionKey) -> Result<String, BeepsendError> {
        self.csv_with(connection, &[]).await
    }

    /// Same as [`PricelistsApi::csv`], with extra query parameters passed through as given.
    pub async fn csv_with(
        &self,
        connection: &ConnectionKey,
        params: &[(&str, &str)],
    ) -> Result<String, BeepsendError> {
        self.client
            .execute_text(encode_pricelist_csv(connection, params))
            .await
    }
}
