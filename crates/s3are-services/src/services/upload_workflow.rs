//! Upload transaction workflow
//!
//! A transaction starts in `WaitingFile` when an upload credential is handed out
//! and moves to `FileUploaded` once, when the client reports completion and a
//! download credential is issued.

use s3are_core::models::{UploadCompletedRequest, UploadFileRequest};
use s3are_core::{AppError, UploadTransaction};
use s3are_db::{NewUploadTransaction, TransactionStore, UploadCompletion};
use s3are_storage::{decode_transaction_id, encode_object_key, CredentialIssuer};
use std::sync::Arc;
use uuid::Uuid;

/// Source of new transaction ids
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Random (v4) transaction ids
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[derive(Clone)]
pub struct UploadWorkflow {
    store: Arc<dyn TransactionStore>,
    issuer: Arc<dyn CredentialIssuer>,
    ids: Arc<dyn IdGenerator>,
}

impl UploadWorkflow {
    pub fn new(store: Arc<dyn TransactionStore>, issuer: Arc<dyn CredentialIssuer>) -> Self {
        Self::with_id_generator(store, issuer, Arc::new(RandomIdGenerator))
    }

    pub fn with_id_generator(
        store: Arc<dyn TransactionStore>,
        issuer: Arc<dyn CredentialIssuer>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { store, issuer, ids }
    }

    /// Start a transaction and hand out an upload credential.
    ///
    /// The credential is issued before anything is persisted; if issuance fails
    /// no record exists. If the write fails the credential is dropped.
    #[tracing::instrument(skip(self, request), fields(user_name = %request.user_name))]
    pub async fn request_upload(
        &self,
        consumer: &str,
        request: &UploadFileRequest,
    ) -> Result<UploadTransaction, AppError> {
        let transaction_id = self.ids.next_id();
        let object_key = encode_object_key(
            transaction_id,
            consumer,
            &request.user_name,
            &request.file_extension,
        )?;

        let credential = self
            .issuer
            .issue_upload_credential(&object_key, request.expiration_time)
            .await?;

        let transaction = self
            .store
            .create(NewUploadTransaction {
                transaction_id,
                consumer: consumer.to_string(),
                user_name: request.user_name.clone(),
                file_name: request.file_name.clone(),
                file_extension: request.file_extension.trim_start_matches('.').to_string(),
                object_key,
                upload_url: credential.url,
                upload_expires_at: credential.expires_at,
            })
            .await?;

        tracing::info!(
            transaction_id = %transaction.transaction_id,
            object_key = %transaction.object_key,
            expires_at = %transaction.upload_expires_at,
            "Upload requested"
        );

        Ok(transaction)
    }

    /// Record that the file is in storage and hand out a download credential.
    ///
    /// Succeeds once per transaction, and only for the exact object key handed
    /// out at request time. Anything else yields `NotFound`: a second call, a
    /// foreign consumer, an unknown transaction or a different key suffix.
    #[tracing::instrument(skip(self, request), fields(object_key = %request.object_key))]
    pub async fn complete_upload(
        &self,
        consumer: &str,
        request: &UploadCompletedRequest,
    ) -> Result<UploadTransaction, AppError> {
        let transaction_id = decode_transaction_id(&request.object_key)?;

        let credential = self
            .issuer
            .issue_download_credential(&request.object_key, request.expiration_time)
            .await?;

        let completed = self
            .store
            .complete(UploadCompletion {
                transaction_id,
                consumer: consumer.to_string(),
                object_key: request.object_key.clone(),
                file_size: request.file_size,
                file_type: request.file_type.clone(),
                download_url: credential.url,
                download_expires_at: credential.expires_at,
            })
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No pending upload for transaction {}",
                    transaction_id
                ))
            })?;

        tracing::info!(
            transaction_id = %completed.transaction_id,
            file_size = request.file_size,
            file_type = %request.file_type,
            "Upload completed"
        );

        Ok(completed)
    }

    /// Look up a transaction owned by `consumer` on behalf of `user_name`.
    #[tracing::instrument(skip(self))]
    pub async fn get_status(
        &self,
        transaction_id: Uuid,
        consumer: &str,
        user_name: &str,
    ) -> Result<UploadTransaction, AppError> {
        self.store
            .find_owned(transaction_id, consumer, user_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transaction {} not found", transaction_id)))
    }
}
