use std::env;
use upbank::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let token =
        env::var("UP_TOKEN").map_err(|_| "Set UP_TOKEN in your environment or .env file")?;
    let client = Client::new(token)?;

    let ping = client.ping().await?;
    println!("{} {}", ping.meta.status_emoji, ping.meta.id);

    Ok(())
}
