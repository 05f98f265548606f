// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use enhance_detect_node::{
    api::{start_server, AppState},
    config::ServiceConfig,
    pipeline::PredictPipeline,
    storage::ArtifactStore,
    vision::VisionModelManager,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up settings from a local .env before reading flags and env vars
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Enhance/Detect Node...\n");
    println!("📦 BUILD VERSION: {}", enhance_detect_node::version::VERSION);
    println!("📅 Build Date: {}", enhance_detect_node::version::BUILD_DATE);
    println!();

    tracing::info!("{}", enhance_detect_node::version::get_version_string());
    tracing::info!("Features: {}", enhance_detect_node::version::FEATURES.join(", "));

    let config = ServiceConfig::parse();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    let addr = config.listen_addr()?;

    // Artifact directories must exist before the first request
    let store = ArtifactStore::from_config(&config);
    store.ensure_dirs()?;

    println!("🧠 Loading vision models...");
    let manager = VisionModelManager::new(&config).await?;
    println!("✅ Vision models loaded");

    let pipeline = PredictPipeline::new(store, manager.enhancer(), manager.detector());
    let state = AppState::new(pipeline, manager.list_models());

    println!("🌐 Listening on http://{}", addr);
    start_server(state, addr, config.max_upload_bytes).await?;

    println!("👋 Shutdown complete");
    Ok(())
}
