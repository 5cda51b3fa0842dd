//! Client example demonstrating the purchase flow against a running server.
//!
//! A stand-in Treasury API is served locally so the example runs offline.
//!
//! Run with: cargo run -p purchases-app --example client_example --no-default-features --features sqlite

use axum::{Json, Router, extract::Query, routing::get};
use chrono::NaiveDate;
use purchases_client::PurchasesClient;
use purchases_hex::{PurchaseService, inbound::HttpServer};
use purchases_repo::{TreasuryGateway, build_repo};
use rust_decimal_macros::dec;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

/// Serves a single Brazil-Real rate on the rates of exchange path.
async fn start_fake_treasury() -> anyhow::Result<String> {
    let app = Router::new().route(
        treasury_rates::RATES_OF_EXCHANGE_PATH,
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let filter = params.get("filter").cloned().unwrap_or_default();
            if !filter.contains("currency:eq:Real") {
                return Json(json!({"data": [], "meta": {"count": 0}}));
            }
            Json(json!({
                "data": [{
                    "record_date": "2023-09-30",
                    "country": "Brazil",
                    "currency": "Real",
                    "country_currency_desc": "Brazil-Real",
                    "exchange_rate": "5.033",
                    "effective_date": "2023-09-30"
                }],
                "meta": {"count": 1, "total-count": 1, "total-pages": 1}
            }))
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("fake treasury stopped: {e}");
        }
    });
    Ok(format!("http://{addr}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("purchases.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let treasury_url = start_fake_treasury().await?;

    // Build repository (handles connection and schema)
    let repo = build_repo(&db_url).await?;
    let gateway = TreasuryGateway::new(&treasury_url);

    // Start server in background
    let service = PurchaseService::new(repo, gateway);
    let router = HttpServer::new(service).router();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    println!("🚀 Starting server on {addr}...");
    println!("   Database: {db_url}");
    println!("   Treasury: {treasury_url}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server stopped: {e}");
        }
    });

    // Create client
    let client = PurchasesClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: record and convert
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let date = NaiveDate::from_ymd_opt(2023, 10, 1)
        .and_then(|d| d.and_hms_opt(10, 15, 0))
        .ok_or_else(|| anyhow::anyhow!("invalid demo date"))?;

    let purchase = client
        .add_purchase("Office supplies", date, dec!(11.25), None, None)
        .await?;
    println!(
        "✅ Recorded purchase {} for {} {}",
        purchase.id, purchase.original_amount.value, purchase.original_amount.currency
    );

    let converted = client
        .get_converted_purchase(purchase.id, "Real", "Brazil")
        .await?;
    if let Some(amount) = &converted.converted_amount {
        println!(
            "✅ Converted: {} {} at rate {}",
            amount.value,
            amount.currency,
            amount.exchange_rate.as_deref().unwrap_or("?")
        );
    }

    // No rate published for this pair inside the window
    let missing = client
        .get_converted_purchase(purchase.id, "Euro", "Germany")
        .await;
    match missing {
        Err(e) => println!("✅ Expected failure: {e}"),
        Ok(_) => println!("⚠️  Unexpected conversion result"),
    }

    println!("\n🎉 Demo complete!");
    Ok(())
}
