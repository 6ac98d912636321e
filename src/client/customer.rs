use crate::domain::Customer;
use crate::transport::encode_get_customer;

use super::{BeepsendClient, BeepsendError};

/// Customer account of the authenticated user.
#[derive(Clone, Copy)]
pub struct CustomerApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl CustomerApi<'_> {
    /// Fetch the customer the token belongs to.
    pub async fn get(&self) -> Result<Customer, BeepsendError> {
        self.client.execute(encode_get_customer()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{FakeTransport, make_client};

    #[tokio::test]
    async fn get_customer_decodes_profile() {
        let body = r#"{"id": 12, "name": "Beep AB", "city": "Stockholm", "invoice_day": 3}"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client(transport.clone());

        let customer = client.customer().get().await.unwrap();
        assert_eq!(customer.id, Some(12));
        assert_eq!(customer.name.as_deref(), Some("Beep AB"));
        assert!(customer.extra.contains_key("invoice_day"));
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/2/customer/"
        );
    }
}
