use crate::domain::{
    Contact, ContactGroup, ContactId, ContactUpdate, ContactsQuery, GroupId, GroupName,
    NewContact, NewContactGroup, Page,
};
use crate::transport::{
    encode_create_contact, encode_create_group, encode_delete_contact, encode_delete_group,
    encode_get_contact, encode_get_group, encode_list_contacts, encode_list_groups,
    encode_rename_group, encode_update_contact,
};

use super::{BeepsendClient, BeepsendError};

/// Address book: contacts and contact groups.
#[derive(Clone, Copy)]
pub struct ContactsApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl ContactsApi<'_> {
    /// List contacts, optionally restricted to one group and sorted.
    pub async fn list(&self, query: &ContactsQuery) -> Result<Vec<Contact>, BeepsendError> {
        self.client.execute(encode_list_contacts(query)).await
    }

    pub async fn get(&self, id: ContactId) -> Result<Contact, BeepsendError> {
        self.client.execute(encode_get_contact(id)).await
    }

    pub async fn create(&self, contact: &NewContact) -> Result<Contact, BeepsendError> {
        self.client.execute(encode_create_contact(contact)).await
    }

    /// Errors:
    /// - [`BeepsendError::Validation`] when the update carries no changes; nothing is sent.
    pub async fn update(
        &self,
        id: ContactId,
        update: &ContactUpdate,
    ) -> Result<Contact, BeepsendError> {
        update.ensure_changes()?;
        self.client.execute(encode_update_contact(id, update)).await
    }

    pub async fn delete(&self, id: ContactId) -> Result<(), BeepsendError> {
        self.client.execute_empty(encode_delete_contact(id)).await
    }

    pub async fn groups(&self, page: &Page) -> Result<Vec<ContactGroup>, BeepsendError> {
        self.client.execute(encode_list_groups(page)).await
    }

    /// Fetch one group. Paging criteria are forwarded as query parameters.
    pub async fn group(&self, id: GroupId, page: &Page) -> Result<ContactGroup, BeepsendError> {
        self.client.execute(encode_get_group(id, page)).await
    }

    pub async fn create_group(&self, group: &NewContactGroup) -> Result<ContactGroup, BeepsendError> {
        self.client.execute(encode_create_group(group)).await
    }

    pub async fn rename_group(
        &self,
        id: GroupId,
        name: &GroupName,
    ) -> Result<ContactGroup, BeepsendError> {
        self.client.execute(encode_rename_group(id, name)).await
    }

    /// Delete a group. Contacts in it are kept.
    pub async fn delete_group(&self, id: GroupId) -> Result<(), BeepsendError> {
        self.client.execute_empty(encode_delete_group(id)).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::client::BeepsendError;
    use crate::client::tests::{FakeTransport, make_client};
    use crate::domain::{
        ContactId, ContactSort, ContactSortField, ContactUpdate, ContactsQuery, GroupId,
        GroupName, Msisdn, NewContact, Page, PageSize, ValidationError,
    };

    #[tokio::test]
    async fn list_encodes_group_paging_and_sort() {
        let body = r#"[{"id": 1, "msisdn": 46736007518, "firstname": "Ada", "lastname": "Lovelace", "group_id": 3}]"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client(transport.clone());

        let query = ContactsQuery {
            group: Some(GroupId::new(3)),
            page: Page {
                count: Some(PageSize::new(20).unwrap()),
                ..Default::default()
            },
            sort: Some(ContactSort {
                field: ContactSortField::LastName,
                descending: true,
            }),
        };
        let contacts = client.contacts().list(&query).await.unwrap();
        assert_eq!(contacts[0].id, ContactId::new(1));
        assert_eq!(contacts[0].msisdn.as_deref(), Some("46736007518"));
        assert_eq!(contacts[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(contacts[0].group_id, Some(GroupId::new(3)));

        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/2/contacts/?group=3&count=20&sort=-lastname"
        );
    }

    #[tokio::test]
    async fn create_sends_contact_fields() {
        let transport = FakeTransport::new(200, r#"{"id": 10, "msisdn": "46736007518"}"#);
        let client = make_client(transport.clone());

        let mut contact = NewContact::new(Msisdn::new("46736007518").unwrap());
        contact.first_name = Some("Ada".to_owned());
        contact.group_id = Some(GroupId::new(3));
        let created = client.contacts().create(&contact).await.unwrap();
        assert_eq!(created.id, ContactId::new(10));

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.as_str(), "https://example.invalid/2/contacts/");
        assert_eq!(
            transport.last_body(),
            json!({"msisdn": "46736007518", "firstname": "Ada", "group_id": 3})
        );
    }

    #[tokio::test]
    async fn update_requires_changes() {
        let transport = FakeTransport::new(200, r#"{"id": 10}"#);
        let client = make_client(transport.clone());

        let err = client
            .contacts()
            .update(ContactId::new(10), &ContactUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BeepsendError::Validation(ValidationError::EmptyUpdate { resource: "contact" })
        ));
        assert_eq!(transport.request_count(), 0);

        let update = ContactUpdate {
            last_name: Some("King".to_owned()),
            ..Default::default()
        };
        client
            .contacts()
            .update(ContactId::new(10), &update)
            .await
            .unwrap();
        assert_eq!(transport.last_request().method, Method::PUT);
        assert_eq!(transport.last_body(), json!({"lastname": "King"}));
    }

    #[tokio::test]
    async fn group_lifecycle_paths() {
        let transport = FakeTransport::new(200, r#"{"id": 3, "name": "VIP", "contacts_count": 12}"#);
        let client = make_client(transport.clone());

        let group = client
            .contacts()
            .group(GroupId::new(3), &Page::default())
            .await
            .unwrap();
        assert_eq!(group.contacts_count, Some(12));
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/2/contacts/groups/3"
        );

        let page = Page {
            since_id: Some(7),
            ..Page::default()
        };
        client.contacts().group(GroupId::new(3), &page).await.unwrap();
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/2/contacts/groups/3?since_id=7"
        );

        let name = GroupName::new("Gold").unwrap();
        client
            .contacts()
            .rename_group(GroupId::new(3), &name)
            .await
            .unwrap();
        assert_eq!(transport.last_request().method, Method::PUT);
        assert_eq!(transport.last_body(), json!({"name": "Gold"}));

        let transport = FakeTransport::new(204, "");
        let client = make_client(transport.clone());
        client.contacts().delete_group(GroupId::new(3)).await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.url.as_str(),
            "https://example.invalid/2/contacts/groups/3"
        );
    }

    #[tokio::test]
    async fn groups_list_uses_paging() {
        let transport = FakeTransport::new(200, r#"[{"id": 1}, {"id": 2, "name": "B"}]"#);
        let client = make_client(transport.clone());

        let page = Page {
            since_id: Some(1),
            ..Default::default()
        };
        let groups = client.contacts().groups(&page).await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/2/contacts/groups/?since_id=1"
        );
    }
}
