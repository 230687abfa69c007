use anyhow::Result;
use clap::Parser;
use pipewatch_config::GatewayConfig;
use pipewatch_gateway::GatewayServer;
use pipewatch_kafka::KafkaStatusSink;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pipewatch Gateway - pipeline status ingestion")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/pipewatch.yaml")]
    config: PathBuf,

    /// Bind address (overrides the config file)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let env_filter = if args.debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pipewatch Gateway");
    info!("Configuration file: {:?}", args.config);

    // Load configuration; a broken config aborts startup instead of
    // starting a gateway that would fail every request.
    let config = GatewayConfig::from_file(&args.config)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => config
            .gateway
            .bind
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", config.gateway.bind, e))?,
    };

    // One producer for the lifetime of the process, shared by every
    // in-flight request.
    let sink = Arc::new(
        KafkaStatusSink::new(&config.kafka)
            .map_err(|e| anyhow::anyhow!("Failed to create Kafka producer: {}", e))?,
    );

    info!(
        "Forwarding to topic {} on {}",
        config.kafka.topic, config.kafka.brokers
    );

    let server = GatewayServer::new(bind_addr, sink);
    server.start().await
}
