//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use s3are_core::Config;
use s3are_services::{UploadTransactionRepository, UploadWorkflow};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format)
        .context("Failed to initialize telemetry")?;

    tracing::info!(
        environment = %config.environment,
        route_prefix = %config.route_prefix(),
        "Configuration loaded and validated successfully"
    );

    // Setup database
    let pool = database::setup_database(&config).await?;
    let store = Arc::new(UploadTransactionRepository::new(pool));

    // Setup storage
    let issuer = storage::setup_storage(&config)?;

    let workflow = UploadWorkflow::new(store, issuer);
    let state = Arc::new(AppState::new(workflow));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
