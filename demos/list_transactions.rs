use chrono::{Days, Local};
use std::env;
use upbank::{Client, ListTransactionsOption};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let token =
        env::var("UP_TOKEN").map_err(|_| "Set UP_TOKEN in your environment or .env file")?;

    let client = Client::new(token)?;

    // Transactions from the last 30 days.
    let now = Local::now().fixed_offset();
    let since = now
        .checked_sub_days(Days::new(29))
        .ok_or("start of window out of range")?;

    let transactions = client
        .list_transactions(&[ListTransactionsOption::Since(since)])
        .await?;

    println!("Fetched {} transactions since {}:", transactions.len(), since);
    for txn in &transactions {
        println!(
            "{} | {:?} | {} | {}",
            txn.created_at.date_naive(),
            txn.status,
            txn.amount,
            txn.description
        );
    }

    Ok(())
}
