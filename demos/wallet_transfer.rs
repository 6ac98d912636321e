use std::io;

use beepsend::{Amount, BeepsendClientBuilder, WalletId};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source: u64 = required("BEEPSEND_SOURCE_WALLET")?.parse()?;
    let target: u64 = required("BEEPSEND_TARGET_WALLET")?.parse()?;
    let amount: f64 = required("BEEPSEND_AMOUNT")?.parse()?;

    let client = BeepsendClientBuilder::from_env()?.build()?;
    for wallet in client.wallets().list().await? {
        println!(
            "wallet {}: {:?} {:?} {:?}",
            wallet.id, wallet.name, wallet.balance, wallet.currency
        );
    }

    let transfer = client
        .wallets()
        .transfer(WalletId::new(source), WalletId::new(target), Amount::new(amount)?)
        .await?;
    println!("transferred: {:?}", transfer.amount);

    Ok(())
}
