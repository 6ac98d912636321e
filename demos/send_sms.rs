use std::io;

use beepsend::{BeepsendClientBuilder, MessageBody, Msisdn, SendOptions, SendSms, SenderId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let to = std::env::var("BEEPSEND_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEPSEND_TO environment variable is required",
        )
    })?;
    let message = std::env::var("BEEPSEND_MESSAGE")
        .unwrap_or_else(|_| "Hello from the beepsend demo.".to_owned());
    let from = std::env::var("BEEPSEND_FROM").ok();

    let client = BeepsendClientBuilder::from_env()?.build()?;
    let options = SendOptions {
        from: from.map(SenderId::new).transpose()?,
        ..Default::default()
    };
    let request = SendSms::to_one(Msisdn::new(to)?, MessageBody::new(message)?, options)?;

    for receipt in client.messages().send(&request).await? {
        if receipt.is_accepted() {
            println!("to: {:?}, ids: {:?}", receipt.to, receipt.id);
        } else {
            println!("to: {:?}, rejected: {:?}", receipt.to, receipt.errors);
        }
    }

    Ok(())
}
