use serde_json::Value;

use crate::domain::{BulkHlr, HlrResult, Msisdn};
use crate::transport::{encode_bulk_hlr, encode_hlr_lookup, encode_validate_hlr};

use super::{BeepsendClient, BeepsendError};

/// HLR (home location register) lookups. Calls authenticate with the HLR token when one is
/// configured on [`Auth`](super::Auth).
#[derive(Clone, Copy)]
pub struct HlrApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl HlrApi<'_> {
    /// Synchronous lookup of a single number.
    pub async fn lookup(&self, msisdn: &Msisdn) -> Result<HlrResult, BeepsendError> {
        self.client.execute(encode_hlr_lookup(msisdn)).await
    }

    /// Queue lookups for many numbers. Results are delivered to the request's `dlr_url`; the
    /// immediate answer is returned as raw JSON.
    pub async fn bulk(&self, request: &BulkHlr) -> Result<Value, BeepsendError> {
        self.client.execute(encode_bulk_hlr(request)).await
    }

    /// Check whether a lookup for `msisdn` would be accepted, without performing it.
    pub async fn validate(&self, msisdn: &Msisdn) -> Result<HlrResult, BeepsendError> {
        self.client.execute(encode_validate_hlr(msisdn)).await
    }
}
