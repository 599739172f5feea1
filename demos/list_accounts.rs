//! List accounts example.
//!
//! This example shows how to authenticate with an API key and list every
//! account it can see.
//!
//! Run with: WDMMG_API_KEY=... cargo run --example list_accounts

use wdmmg::WdmmgClient;

#[tokio::main]
async fn main() -> wdmmg::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Reads WDMMG_API_KEY and, if set, WDMMG_BASE_URL
    let client = WdmmgClient::from_env()?;

    println!("Connecting to {}...", client.config().base_url);

    let accounts = client.accounts().list().await?;
    println!("\nFound {} account(s):", accounts.len());

    for account in &accounts {
        println!(
            "  - {} {} ({})",
            account.id,
            account.name.as_deref().unwrap_or("Unnamed"),
            account.institution_name.as_deref().unwrap_or("unknown institution")
        );
        if let Some(balance) = account.balance {
            println!(
                "    Balance: {} {}",
                balance,
                account.currency.as_deref().unwrap_or("")
            );
        }
    }

    println!("\nDone!");
    Ok(())
}
