use crate::domain::{AnalyticsFilter, BatchAnalytics, BatchId, NetworkEntry, SummaryEntry};
use crate::transport::{
    encode_batch_analytics, encode_batches_analytics, encode_network_analytics,
    encode_summary_analytics,
};

use super::{BeepsendClient, BeepsendError};

/// Delivery statistics.
#[derive(Clone, Copy)]
pub struct AnalyticsApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl AnalyticsApi<'_> {
    /// Accepted/delivered/failed counts per connection, for all connections or the one in
    /// `filter`.
    ///
    /// Errors:
    /// - [`BeepsendError::Validation`] when `from_date` is after `to_date`.
    pub async fn summary(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<Vec<SummaryEntry>, BeepsendError> {
        filter.ensure_valid()?;
        self.client.execute(encode_summary_analytics(filter)).await
    }

    /// Counts broken down per mobile network.
    pub async fn network(
        &self,
        filter: &AnalyticsFilter,
    ) -> Result<Vec<NetworkEntry>, BeepsendError> {
        filter.ensure_valid()?;
        self.client.execute(encode_network_analytics(filter)).await
    }

    pub async fn batches(&self) -> Result<Vec<BatchAnalytics>, BeepsendError> {
        self.client.execute(encode_batches_analytics()).await
    }

    pub async fn batch(&self, id: BatchId) -> Result<BatchAnalytics, BeepsendError> {
        self.client.execute(encode_batch_analytics(id)).await
    }
}
