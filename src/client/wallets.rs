use tracing::info;

use crate::domain::{
    Amount, EmailAddress, EmailNotification, EmailNotificationId, Page, ValidationError, Wallet,
    WalletId, WalletTransaction, WalletTransfer, WalletUpdate,
};
use crate::transport::{
    encode_add_email_notification, encode_get_wallet, encode_list_email_notifications,
    encode_list_wallets, encode_remove_email_notification, encode_transfer, encode_update_wallet,
    encode_wallet_transactions,
};

use super::{BeepsendClient, BeepsendError};

/// Prepaid wallets funding the customer's connections.
#[derive(Clone, Copy)]
pub struct WalletsApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl WalletsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Wallet>, BeepsendError> {
        self.client.execute(encode_list_wallets()).await
    }

    pub async fn get(&self, id: WalletId) -> Result<Wallet, BeepsendError> {
        self.client.execute(encode_get_wallet(id)).await
    }

    /// Rename a wallet or change its low-balance notification limit.
    pub async fn update(&self, id: WalletId, update: &WalletUpdate) -> Result<Wallet, BeepsendError> {
        update.ensure_changes()?;
        self.client.execute(encode_update_wallet(id, update)).await
    }

    pub async fn transactions(
        &self,
        id: WalletId,
        page: &Page,
    ) -> Result<Vec<WalletTransaction>, BeepsendError> {
        self.client
            .execute(encode_wallet_transactions(id, page))
            .await
    }

    /// Move `amount` from `source` to `target`.
    ///
    /// Errors:
    /// - [`BeepsendError::Validation`] when `source` and `target` are the same wallet,
    /// - [`BeepsendError::InvalidRequest`] when the API refuses the transfer (e.g. insufficient
    ///   funds).
    pub async fn transfer(
        &self,
        source: WalletId,
        target: WalletId,
        amount: Amount,
    ) -> Result<WalletTransfer, BeepsendError> {
        if source == target {
            return Err(ValidationError::SameWallet {
                wallet: source.value(),
            }
            .into());
        }

        let transfer: WalletTransfer = self
            .client
            .execute(encode_transfer(source, target, amount))
            .await?;
        info!(
            source = source.value(),
            target = target.value(),
            amount = amount.value(),
            "Beepsend wallet transfer completed"
        );
        Ok(transfer)
    }

    /// Addresses notified when the wallet balance drops below its limit.
    pub async fn email_notifications(
        &self,
        id: WalletId,
    ) -> Result<Vec<EmailNotification>, BeepsendError> {
        self.client
            .execute(encode_list_email_notifications(id))
            .await
    }

    pub async fn add_email_notification(
        &self,
        id: WalletId,
        email: &EmailAddress,
    ) -> Result<EmailNotification, BeepsendError> {
        self.client
            .execute(encode_add_email_notification(id, email))
            .await
    }

    pub async fn remove_email_notification(
        &self,
        id: WalletId,
        email: EmailNotificationId,
    ) -> Result<(), BeepsendError> {
        self.client
            .execute_empty(encode_remove_email_notification(id, email))
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::client::BeepsendError;
    use crate::client::tests::{FakeTransport, make_client};
    use crate::domain::{
        Amount, EmailAddress, EmailNotificationId, Money, Page, PageSize, TransactionId,
        ValidationError, WalletId, WalletUpdate,
    };

    #[tokio::test]
    async fn get_decodes_money_fields() {
        let body = r#"{"id": 1, "name": "Main", "balance": 123.45, "currency": "EUR", "notify_limit": "10.00"}"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client(transport.clone());

        let wallet = client.wallets().get(WalletId::new(1)).await.unwrap();
        assert_eq!(wallet.balance.as_ref().map(Money::as_str), Some("123.45"));
        assert_eq!(wallet.notify_limit.as_ref().map(Money::as_str), Some("10.00"));
        assert_eq!(wallet.currency.as_deref(), Some("EUR"));
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/2/wallets/1"
        );
    }

    #[tokio::test]
    async fn update_sends_notify_limit() {
        let transport = FakeTransport::new(200, r#"{"id": 1}"#);
        let client = make_client(transport.clone());

        let update = WalletUpdate {
            notify_limit: Some(Amount::new(25.5).unwrap()),
            ..Default::default()
        };
        client.wallets().update(WalletId::new(1), &update).await.unwrap();
        assert_eq!(transport.last_request().method, Method::PUT);
        assert_eq!(transport.last_body(), json!({"notify_limit": 25.5}));

        let err = client
            .wallets()
            .update(WalletId::new(1), &WalletUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BeepsendError::Validation(_)));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn transactions_use_paging() {
        let body = r#"[{"id": 77, "timestamp": 1400000000, "amount": -5, "comment": "SMS"}]"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client(transport.clone());

        let page = Page {
            max_id: Some(100),
            count: Some(PageSize::new(10).unwrap()),
            ..Default::default()
        };
        let transactions = client
            .wallets()
            .transactions(WalletId::new(1), &page)
            .await
            .unwrap();
        assert_eq!(transactions[0].id, TransactionId::new(77));
        assert_eq!(transactions[0].amount.as_ref().map(Money::as_str), Some("-5"));
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/2/wallets/1/transactions/?max_id=100&count=10"
        );
    }

    #[tokio::test]
    async fn transfer_posts_amount_between_wallets() {
        let body = r#"{"source_wallet": {"id": 1}, "target_wallet": {"id": 2}, "amount": 12.5}"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client(transport.clone());

        let transfer = client
            .wallets()
            .transfer(WalletId::new(1), WalletId::new(2), Amount::new(12.5).unwrap())
            .await
            .unwrap();
        assert_eq!(transfer.amount.as_ref().map(Money::as_str), Some("12.5"));

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.url.as_str(),
            "https://example.invalid/2/wallets/1/transfer/2/"
        );
        assert_eq!(transport.last_body(), json!({"amount": 12.5}));
    }

    #[tokio::test]
    async fn transfer_to_same_wallet_is_rejected() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());

        let err = client
            .wallets()
            .transfer(WalletId::new(3), WalletId::new(3), Amount::new(1.0).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BeepsendError::Validation(ValidationError::SameWallet { wallet: 3 })
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn email_notification_management() {
        let transport = FakeTransport::new(200, r#"{"id": 6, "email": "ops@example.com"}"#);
        let client = make_client(transport.clone());

        let email = EmailAddress::new("ops@example.com").unwrap();
        let added = client
            .wallets()
            .add_email_notification(WalletId::new(1), &email)
            .await
            .unwrap();
        assert_eq!(added.id, EmailNotificationId::new(6));
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/2/wallets/1/emails/"
        );
        assert_eq!(transport.last_body(), json!({"email": "ops@example.com"}));

        let transport = FakeTransport::new(200, r#"[{"id": 6, "email": "ops@example.com"}]"#);
        let client = make_client(transport);
        let list = client
            .wallets()
            .email_notifications(WalletId::new(1))
            .await
            .unwrap();
        assert_eq!(list.len(), 1);

        let transport = FakeTransport::new(204, "");
        let client = make_client(transport.clone());
        client
            .wallets()
            .remove_email_notification(WalletId::new(1), EmailNotificationId::new(6))
            .await
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.url.as_str(),
            "https://example.invalid/2/wallets/1/emails/6"
        );
    }
}
