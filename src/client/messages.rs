use tracing::info;

use crate::domain::{
    Batch, BatchId, ConnectionKey, MessageDetails, MessageFilter, MessageReceipt, Recipients,
    SendSms, SmsId, ValidationError,
};
use crate::transport::{
    encode_get_batch, encode_get_message, encode_list_batches, encode_search_messages,
    encode_send_sms, encode_send_to_groups, encode_validate_sms,
};

use super::{BeepsendClient, BeepsendError};

/// Sending, validating and looking up SMS messages and batches.
#[derive(Clone, Copy)]
pub struct MessagesApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl MessagesApi<'_> {
    /// Send an SMS through the connection the token belongs to.
    ///
    /// The API answers with one receipt per recipient. A recipient the API refused carries
    /// `errors` in its receipt while the HTTP call itself succeeds; check
    /// [`MessageReceipt::is_accepted`].
    ///
    /// Errors:
    /// - [`BeepsendError::InvalidRequest`] when the whole request is rejected,
    /// - [`BeepsendError::Unauthorized`] for a bad token.
    pub async fn send(&self, request: &SendSms) -> Result<Vec<MessageReceipt>, BeepsendError> {
        let receipts: Vec<MessageReceipt> =
            self.client.execute(encode_send_sms(None, request)).await?;
        log_receipts(&receipts);
        Ok(receipts)
    }

    /// Send an SMS through a specific connection, addressed by id or label.
    pub async fn send_via(
        &self,
        connection: &ConnectionKey,
        request: &SendSms,
    ) -> Result<Vec<MessageReceipt>, BeepsendError> {
        let receipts: Vec<MessageReceipt> = self
            .client
            .execute(encode_send_sms(Some(connection), request))
            .await?;
        log_receipts(&receipts);
        Ok(receipts)
    }

    /// Send to contact groups. Beepsend creates a batch for the send.
    ///
    /// Errors:
    /// - [`BeepsendError::Validation`] when the request addresses numbers instead of groups.
    pub async fn send_to_groups(
        &self,
        request: &SendSms,
    ) -> Result<Vec<MessageReceipt>, BeepsendError> {
        if let Recipients::Numbers(_) = request.recipients() {
            return Err(ValidationError::WrongRecipients {
                expected: "contact groups",
                actual: "phone numbers",
            }
            .into());
        }
        let receipts: Vec<MessageReceipt> =
            self.client.execute(encode_send_to_groups(request)).await?;
        log_receipts(&receipts);
        Ok(receipts)
    }

    /// Dry run: the API checks recipients and content without sending or charging.
    pub async fn validate(&self, request: &SendSms) -> Result<Vec<MessageReceipt>, BeepsendError> {
        self.client.execute(encode_validate_sms(request)).await
    }

    pub async fn get(&self, id: &SmsId) -> Result<MessageDetails, BeepsendError> {
        self.client.execute(encode_get_message(id)).await
    }

    /// Look up sent messages.
    ///
    /// Errors:
    /// - [`BeepsendError::Validation`] when `min_date` is after `max_date`.
    pub async fn search(
        &self,
        filter: &MessageFilter,
    ) -> Result<Vec<MessageDetails>, BeepsendError> {
        filter.ensure_valid()?;
        self.client.execute(encode_search_messages(filter)).await
    }

    pub async fn batches(&self) -> Result<Vec<Batch>, BeepsendError> {
        self.client.execute(encode_list_batches()).await
    }

    pub async fn batch(&self, id: BatchId) -> Result<Batch, BeepsendError> {
        self.client.execute(encode_get_batch(id)).await
    }
}

fn log_receipts(receipts: &[MessageReceipt]) {
    let rejected = receipts.iter().filter(|it| !it.is_accepted()).count();
    info!(
        recipients = receipts.len(),
        rejected, "Beepsend accepted SMS request"
    );
}
