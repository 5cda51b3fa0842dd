//! Purchases CLI
//!
//! Command-line interface for the Purchases API.

use std::str::FromStr;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use purchases_client::PurchasesClient;
use purchases_types::PurchaseId;

#[derive(Parser)]
#[command(name = "purchases")]
#[command(author, version, about = "Purchases API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Purchases API
    #[arg(
        long,
        env = "PURCHASES_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Purchase operations
    Purchase {
        #[command(subcommand)]
        action: PurchaseCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum PurchaseCommands {
    /// Record a new purchase
    Add {
        /// Description, at most 50 characters
        #[arg(long)]
        description: String,
        /// Transaction date, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`
        #[arg(long)]
        date: String,
        /// Amount, e.g. 11.25
        #[arg(long)]
        amount: String,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Show a purchase converted to another currency
    Convert {
        /// Purchase ID
        id: String,
        /// Target currency, e.g. Real
        #[arg(long)]
        currency: String,
        /// Target country, e.g. Brazil
        #[arg(long)]
        country: String,
    },
}

fn parse_date(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow::anyhow!("Invalid date: {}. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS", s))
}

fn parse_amount(s: &str) -> Result<Decimal> {
    Decimal::from_str(s).map_err(|_| anyhow::anyhow!("Invalid amount: {}", s))
}

fn parse_purchase_id(s: &str) -> Result<PurchaseId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid purchase ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = PurchasesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Purchase { action } => match action {
            PurchaseCommands::Add {
                description,
                date,
                amount,
                currency,
                country,
            } => {
                let date = parse_date(&date)?;
                let amount = parse_amount(&amount)?;
                let purchase = client
                    .add_purchase(&description, date, amount, currency, country)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&purchase)?);
            }
            PurchaseCommands::Convert {
                id,
                currency,
                country,
            } => {
                let purchase_id = parse_purchase_id(&id)?;
                let purchase = client
                    .get_converted_purchase(purchase_id, &currency, &country)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&purchase)?);
            }
        },
    }

    Ok(())
}
