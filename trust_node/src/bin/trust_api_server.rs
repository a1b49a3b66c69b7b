use anyhow::Result;
use clap::Parser;
use geoprop_trust_node::{
    api::start_api_server, storage::MemoryIdentityStore, DeviceTrustService, TrustConfig,
};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// Trust API Server Arguments
#[derive(Parser)]
#[clap(name = "trust-api-server")]
#[clap(about = "GeoProp device trust node - fingerprinting, trust tiers and bet authorization")]
struct Args {
    /// Path to a YAML or TOML configuration file
    #[clap(long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides configuration)
    #[clap(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = TrustConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!("Starting GeoProp trust node...");
    info!("Health endpoint: {}", config.verification.health_url);
    info!("Geolocation endpoint: {}", config.verification.geolocation_url);
    info!("Unknown check policy: {:?}", config.verification.unknown_policy);

    let store = Arc::new(MemoryIdentityStore::new());
    let service = Arc::new(DeviceTrustService::from_config(&config, store)?);

    start_api_server(&config, service).await
}
