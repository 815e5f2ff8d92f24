//! Ping the Mandrill API and print account info.
//!
//! Run with `MANDRILL_APIKEY=... RUST_LOG=mandrill_client=debug cargo run --example ping`.

use mandrill_client::{ApiErrorKind, Client, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::builder().debug(true).build()?;

    match client.users().ping().await {
        Ok(pong) => println!("ping: {pong}"),
        Err(err) if err.kind() == Some(ApiErrorKind::InvalidKey) => {
            eprintln!("the configured API key was rejected");
            return Err(err);
        }
        Err(err) => return Err(err),
    }

    let info = client.users().info().await?;
    println!("username: {}", info["username"]);
    println!("reputation: {}", info["reputation"]);
    Ok(())
}
