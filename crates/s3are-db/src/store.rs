//! Transaction store trait
//!
//! The workflow only depends on this trait, so any backend (Postgres in
//! production, memory in tests) can persist upload transactions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use s3are_core::{AppError, UploadTransaction};
use uuid::Uuid;

/// Fields of a transaction at creation time. The store sets the status to
/// `WaitingFile` and maintains the timestamps.
#[derive(Debug, Clone)]
pub struct NewUploadTransaction {
    pub transaction_id: Uuid,
    pub consumer: String,
    pub user_name: String,
    pub file_name: String,
    pub file_extension: String,
    pub object_key: String,
    pub upload_url: String,
    pub upload_expires_at: DateTime<Utc>,
}

/// Fields written by the `WaitingFile -> FileUploaded` transition.
#[derive(Debug, Clone)]
pub struct UploadCompletion {
    pub transaction_id: Uuid,
    /// Owner the transaction must belong to
    pub consumer: String,
    /// Must equal the stored object key
    pub object_key: String,
    pub file_size: i64,
    pub file_type: String,
    pub download_url: String,
    pub download_expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persist a new `WaitingFile` transaction.
    async fn create(&self, new: NewUploadTransaction) -> Result<UploadTransaction, AppError>;

    /// Apply the completion transition as one conditional write.
    ///
    /// Returns `None` unless a transaction with this id, owned by
    /// `completion.consumer` and stored under `completion.object_key`, is still
    /// `WaitingFile`. Among concurrent callers for
    /// the same transaction at most one receives `Some`.
    async fn complete(
        &self,
        completion: UploadCompletion,
    ) -> Result<Option<UploadTransaction>, AppError>;

    /// Read a transaction only if all three fields match the stored record.
    async fn find_owned(
        &self,
        transaction_id: Uuid,
        consumer: &str,
        user_name: &str,
    ) -> Result<Option<UploadTransaction>, AppError>;
}
