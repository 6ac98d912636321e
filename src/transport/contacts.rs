use serde_json::Map;

use super::{ApiRequest, insert_opt, push_page};
use crate::domain::{
    ContactId, ContactUpdate, ContactsQuery, GroupId, GroupName, Msisdn, NewContact,
    NewContactGroup, Page,
};

pub fn encode_list_contacts(query: &ContactsQuery) -> ApiRequest {
    let mut params = Vec::<(String, String)>::new();
    if let Some(group) = query.group {
        params.push(("group".to_owned(), group.to_string()));
    }
    push_page(&mut params, &query.page);
    if let Some(sort) = query.sort {
        params.push(("sort".to_owned(), sort.to_param()));
    }

    ApiRequest::get(["contacts", ""]).with_query(params)
}

pub fn encode_get_contact(id: ContactId) -> ApiRequest {
    ApiRequest::get(["contacts".to_owned(), id.to_string()])
}

pub fn encode_create_contact(contact: &NewContact) -> ApiRequest {
    let mut body = Map::new();
    body.insert(Msisdn::FIELD.to_owned(), contact.msisdn.as_str().into());
    insert_opt(&mut body, "firstname", contact.first_name.as_deref());
    insert_opt(&mut body, "lastname", contact.last_name.as_deref());
    insert_opt(&mut body, GroupId::FIELD, contact.group_id.map(GroupId::value));

    ApiRequest::post(["contacts", ""]).with_body(body)
}

pub fn encode_update_contact(id: ContactId, update: &ContactUpdate) -> ApiRequest {
    let mut body = Map::new();
    insert_opt(
        &mut body,
        Msisdn::FIELD,
        update.msisdn.as_ref().map(Msisdn::as_str),
    );
    insert_opt(&mut body, "firstname", update.first_name.as_deref());
    insert_opt(&mut body, "lastname", update.last_name.as_deref());
    insert_opt(&mut body, GroupId::FIELD, update.group_id.map(GroupId::value));

    ApiRequest::put(["contacts".to_owned(), id.to_string()]).with_body(body)
}

pub fn encode_delete_contact(id: ContactId) -> ApiRequest {
    ApiRequest::delete(["contacts".to_owned(), id.to_string()])
}

pub fn encode_list_groups(page: &Page) -> ApiRequest {
    let mut params = Vec::<(String, String)>::new();
    push_page(&mut params, page);
    ApiRequest::get(["contacts", "groups", ""]).with_query(params)
}

pub fn encode_get_group(id: GroupId, page: &Page) -> ApiRequest {
    let mut params = Vec::<(String, String)>::new();
    push_page(&mut params, page);
    ApiRequest::get(["contacts".to_owned(), "groups".to_owned(), id.to_string()])
        .with_query(params)
}

pub fn encode_create_group(group: &NewContactGroup) -> ApiRequest {
    ApiRequest::post(["contacts", "groups", ""]).with_body(group_body(&group.name))
}

pub fn encode_rename_group(id: GroupId, name: &GroupName) -> ApiRequest {
    ApiRequest::put(["contacts".to_owned(), "groups".to_owned(), id.to_string()])
        .with_body(group_body(name))
}

pub fn encode_delete_group(id: GroupId) -> ApiRequest {
    ApiRequest::delete(["contacts".to_owned(), "groups".to_owned(), id.to_string()])
}

fn group_body(name: &GroupName) -> Map<String, serde_json::Value> {
    let mut body = Map::new();
    body.insert(GroupName::FIELD.to_owned(), name.as_str().into());
    body
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{ContactSort, ContactSortField, PageSize};

    #[test]
    fn list_contacts_encodes_filters_in_order() {
        let query = ContactsQuery {
            group: Some(GroupId::new(3)),
            page: Page {
                max_id: Some(99),
                count: Some(PageSize::new(25).unwrap()),
                ..Default::default()
            },
            sort: Some(ContactSort {
                field: ContactSortField::LastName,
                descending: true,
            }),
        };

        let request = encode_list_contacts(&query);
        assert_eq!(request.path(), "/contacts/");
        assert_eq!(
            request.query,
            vec![
                ("group".to_owned(), "3".to_owned()),
                ("max_id".to_owned(), "99".to_owned()),
                ("count".to_owned(), "25".to_owned()),
                ("sort".to_owned(), "-lastname".to_owned()),
            ]
        );
    }

    #[test]
    fn create_contact_uses_vendor_field_names() {
        let mut contact = NewContact::new(Msisdn::new("46736007518").unwrap());
        contact.first_name = Some("Ada".to_owned());
        contact.group_id = Some(GroupId::new(2));

        let request = encode_create_contact(&contact);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path(), "/contacts/");
        assert_eq!(
            Value::Object(request.body.unwrap()),
            json!({"msisdn": "46736007518", "firstname": "Ada", "group_id": 2})
        );
    }

    #[test]
    fn update_and_delete_contact() {
        let update = ContactUpdate {
            last_name: Some("Lovelace".to_owned()),
            ..Default::default()
        };
        let request = encode_update_contact(ContactId::new(5), &update);
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path(), "/contacts/5");
        assert_eq!(
            Value::Object(request.body.unwrap()),
            json!({"lastname": "Lovelace"})
        );

        let request = encode_delete_contact(ContactId::new(5));
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path(), "/contacts/5");
        assert!(request.body.is_none());
    }

    #[test]
    fn group_requests() {
        assert_eq!(encode_list_groups(&Page::default()).path(), "/contacts/groups/");
        let group = encode_get_group(GroupId::new(8), &Page::default());
        assert_eq!(group.path(), "/contacts/groups/8");
        assert!(group.query.is_empty());

        let paged = encode_get_group(
            GroupId::new(8),
            &Page {
                since_id: None,
                max_id: Some(40),
                count: Some(PageSize::new(10).unwrap()),
            },
        );
        assert_eq!(
            paged.query,
            vec![
                ("max_id".to_owned(), "40".to_owned()),
                ("count".to_owned(), "10".to_owned()),
            ]
        );

        let name = GroupName::new("VIP").unwrap();
        let created = encode_create_group(&NewContactGroup { name: name.clone() });
        assert_eq!(created.method, Method::POST);
        assert_eq!(Value::Object(created.body.unwrap()), json!({"name": "VIP"}));

        let renamed = encode_rename_group(GroupId::new(8), &name);
        assert_eq!(renamed.method, Method::PUT);
        assert_eq!(renamed.path(), "/contacts/groups/8");

        let deleted = encode_delete_group(GroupId::new(8));
        assert_eq!(deleted.method, Method::DELETE);
    }
}
