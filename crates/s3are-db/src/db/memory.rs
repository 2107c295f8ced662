use crate::store::{NewUploadTransaction, TransactionStore, UploadCompletion};
use async_trait::async_trait;
use chrono::Utc;
use s3are_core::{AppError, UploadStatus, UploadTransaction};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Transaction store kept in process memory.
///
/// Each operation holds the lock for its whole read-modify-write, which gives
/// the same single-winner completion guarantee as the Postgres repository.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    transactions: Mutex<HashMap<Uuid, UploadTransaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored transactions. Fails if the lock is poisoned.
    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, UploadTransaction>>, AppError> {
        self.transactions
            .lock()
            .map_err(|_| AppError::Internal("transaction store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn create(&self, new: NewUploadTransaction) -> Result<UploadTransaction, AppError> {
        let mut transactions = self.lock()?;
        if transactions.contains_key(&new.transaction_id) {
            return Err(AppError::Internal(format!(
                "transaction {} already exists",
                new.transaction_id
            )));
        }

        let now = Utc::now();
        let transaction = UploadTransaction {
            transaction_id: new.transaction_id,
            consumer: new.consumer,
            user_name: new.user_name,
            file_name: new.file_name,
            file_extension: new.file_extension,
            object_key: new.object_key,
            upload_url: new.upload_url,
            upload_expires_at: new.upload_expires_at,
            download_url: None,
            download_expires_at: None,
            file_size: None,
            file_type: None,
            status: UploadStatus::WaitingFile,
            created_at: now,
            updated_at: now,
        };
        transactions.insert(transaction.transaction_id, transaction.clone());
        Ok(transaction)
    }

    async fn complete(
        &self,
        completion: UploadCompletion,
    ) -> Result<Option<UploadTransaction>, AppError> {
        let mut transactions = self.lock()?;
        let Some(transaction) = transactions.get_mut(&completion.transaction_id) else {
            return Ok(None);
        };
        if transaction.consumer != completion.consumer
            || transaction.object_key != completion.object_key
            || transaction.status != UploadStatus::WaitingFile
        {
            return Ok(None);
        }

        transaction.status = UploadStatus::FileUploaded;
        transaction.file_size = Some(completion.file_size);
        transaction.file_type = Some(completion.file_type);
        transaction.download_url = Some(completion.download_url);
        transaction.download_expires_at = Some(completion.download_expires_at);
        transaction.updated_at = Utc::now();
        Ok(Some(transaction.clone()))
    }

    async fn find_owned(
        &self,
        transaction_id: Uuid,
        consumer: &str,
        user_name: &str,
    ) -> Result<Option<UploadTransaction>, AppError> {
        let transactions = self.lock()?;
        Ok(transactions
            .get(&transaction_id)
            .filter(|t| t.consumer == consumer && t.user_name == user_name)
            .cloned())
    }
}
