//! Export transactions example.
//!
//! Streams every transaction in a date range and prints it as CSV, keeping
//! one page in memory at a time.
//!
//! Run with: WDMMG_API_KEY=... cargo run --example export_transactions -- 2024-01-01 2024-12-31

use futures_util::StreamExt;
use rust_decimal::Decimal;
use wdmmg::api::TransactionsQuery;
use wdmmg::{Error, WdmmgClient};

#[tokio::main]
async fn main() -> wdmmg::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mut query = TransactionsQuery::new();
    if let Some(start) = args.next() {
        query = query.start_date(start);
    }
    if let Some(end) = args.next() {
        query = query.end_date(end);
    }

    let client = WdmmgClient::from_env()?;
    let mut stream = client.transactions().list_stream(query);

    println!("id,date,amount,currency,description");

    let mut count = 0usize;
    let mut total = Decimal::ZERO;
    while let Some(result) = stream.next().await {
        let txn = match result {
            Ok(txn) => txn,
            Err(Error::Validation(msg)) => {
                eprintln!("Bad date range: {}", msg);
                std::process::exit(2);
            }
            Err(e) => return Err(e),
        };

        let amount = txn.amount.unwrap_or(Decimal::ZERO);
        println!(
            "{},{},{},{},\"{}\"",
            txn.id,
            txn.date,
            amount,
            txn.currency.as_deref().unwrap_or(""),
            txn.description.as_deref().unwrap_or("").replace('"', "\"\"")
        );
        count += 1;
        total += amount;
    }

    eprintln!(
        "{} transaction(s) over {} page(s), net {}",
        count,
        stream.pages_fetched(),
        total
    );
    Ok(())
}
