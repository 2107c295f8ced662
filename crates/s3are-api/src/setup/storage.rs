//! Object storage setup

use anyhow::Result;
use s3are_core::Config;
use s3are_services::{create_credential_issuer, CredentialIssuer};
use std::sync::Arc;

/// Build the credential issuer for the configured bucket
pub fn setup_storage(config: &Config) -> Result<Arc<dyn CredentialIssuer>> {
    let issuer = create_credential_issuer(config)
        .map_err(|e| anyhow::anyhow!("Failed to create credential issuer: {}", e))?;

    let policy = config.presign_policy();
    tracing::info!(
        bucket = %config.s3_bucket,
        region = %config.s3_region,
        endpoint = ?config.s3_endpoint,
        default_ttl_secs = policy.default_ttl().as_secs(),
        max_ttl_secs = policy.max_ttl().as_secs(),
        "S3 credential issuer initialized"
    );

    Ok(issuer)
}
