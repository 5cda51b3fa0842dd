//! # Purchases Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter and the Treasury gateway
//! - Create the purchase service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use purchases_hex::{PurchaseService, inbound::HttpServer};
use purchases_repo::{TreasuryGateway, build_repo};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking).
    // The endpoint comes from OTEL_EXPORTER_OTLP_ENDPOINT.
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("purchases-service"), provider))
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,purchases_app=debug,purchases_hex=debug".into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing subscriber, exporting spans only when a collector is configured
    let otel_provider = if config.otlp_endpoint.is_some() {
        let (otel_tracer, otel_provider) = init_tracer()?;
        let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer())
            .with(telemetry)
            .init();
        Some(otel_provider)
    } else {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer())
            .init();
        None
    };

    tracing::info!("Starting purchases server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!("Using Treasury API: {}", config.treasury_api_url);

    // Build repository (handles connection and schema)
    let repo = build_repo(&config.database_url).await?;

    // Treasury rates of exchange client
    let gateway = TreasuryGateway::with_timeout(&config.treasury_api_url, config.treasury_timeout)?;

    // Create the purchase service
    let service = PurchaseService::new(repo, gateway);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
