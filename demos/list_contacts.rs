use beepsend::BeepsendClientBuilder;
use beepsend::domain::{ContactSort, ContactSortField, ContactsQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BeepsendClientBuilder::from_env()?.build()?;

    let query = ContactsQuery {
        sort: Some(ContactSort {
            field: ContactSortField::LastName,
            descending: false,
        }),
        ..Default::default()
    };
    for contact in client.contacts().list(&query).await? {
        println!(
            "{}: {:?} {:?} <{:?}>",
            contact.id, contact.first_name, contact.last_name, contact.msisdn
        );
    }

    Ok(())
}
