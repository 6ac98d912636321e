use std::io;

use beepsend::{BeepsendClientBuilder, Msisdn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let msisdn = std::env::var("BEEPSEND_MSISDN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BEEPSEND_MSISDN environment variable is required",
        )
    })?;

    // BEEPSEND_HLR_TOKEN is used for the lookup when set.
    let client = BeepsendClientBuilder::from_env()?.build()?;
    let result = client.hlr().lookup(&Msisdn::new(msisdn)?).await?;
    println!(
        "msisdn: {:?}, mccmnc: {:?}, errors: {:?}",
        result.msisdn, result.mccmnc, result.errors
    );

    Ok(())
}
