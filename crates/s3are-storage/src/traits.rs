//! Credential issuance abstraction
//!
//! This module defines the `CredentialIssuer` trait that every object-storage
//! backend implements, along with its error type.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use s3are_core::AppError;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

/// A time-bounded, signed permission for one storage operation on one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedCredential {
    pub url: String,
    pub expires_at: DateTime<Utc>,
    /// Effective lifetime after the presign policy was applied
    pub ttl: Duration,
}

/// Credential issuance trait
///
/// Implementations sign URLs against the object-storage backend. Each call is an
/// independent request: nothing is cached, persisted or retried. `requested_ttl`
/// is in seconds; missing or non-positive values fall back to the policy default
/// and larger values are clamped to the policy maximum.
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    /// Issue a write (PUT) credential for `object_key`.
    async fn issue_upload_credential(
        &self,
        object_key: &str,
        requested_ttl: Option<i64>,
    ) -> StorageResult<PresignedCredential>;

    /// Issue a read (GET) credential for `object_key`.
    async fn issue_download_credential(
        &self,
        object_key: &str,
        requested_ttl: Option<i64>,
    ) -> StorageResult<PresignedCredential>;
}
