use crate::{CredentialIssuer, S3CredentialIssuer, StorageError, StorageResult};
use s3are_core::Config;
use std::sync::Arc;

/// Create the credential issuer described by the configuration
pub fn create_credential_issuer(config: &Config) -> StorageResult<Arc<dyn CredentialIssuer>> {
    if config.s3_bucket.trim().is_empty() {
        return Err(StorageError::ConfigError(
            "S3_BUCKET not configured".to_string(),
        ));
    }
    if config.s3_region.trim().is_empty() {
        return Err(StorageError::ConfigError(
            "S3_REGION or AWS_REGION not configured".to_string(),
        ));
    }

    let issuer = S3CredentialIssuer::new(
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
        config.presign_policy(),
    )?;
    Ok(Arc::new(issuer))
}
