//! s3are Services Layer
//!
//! This crate is the business service layer: it hosts the upload workflow that
//! composes key encoding, credential issuance and transaction persistence, and
//! re-exports the storage and store types the API crate needs so that it depends
//! on a single service facade. Keep thin HTTP handling in s3are-api.

pub mod services;

pub use s3are_db::{InMemoryTransactionStore, TransactionStore, UploadTransactionRepository};
pub use s3are_storage::{
    create_credential_issuer, CredentialIssuer, PresignedCredential, S3CredentialIssuer,
    StorageError, StorageResult,
};
pub use services::upload_workflow::{IdGenerator, RandomIdGenerator, UploadWorkflow};
