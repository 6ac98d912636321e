use crate::domain::{Contact, ContactGroup, SearchQuery};
use crate::transport::{encode_search_contact_groups, encode_search_contacts};

use super::{BeepsendClient, BeepsendError};

/// Free-text search over the address book.
#[derive(Clone, Copy)]
pub struct SearchApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl SearchApi<'_> {
    pub async fn contacts(&self, query: &SearchQuery) -> Result<Vec<Contact>, BeepsendError> {
        self.client.execute(encode_search_contacts(query)).await
    }

    /// Search groups by name. [`SearchQuery::group`] is not sent.
    pub async fn contact_groups(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<ContactGroup>, BeepsendError> {
        self.client
            .execute(encode_search_contact_groups(query))
            .await
    }
}
