//! s3are Storage Library
//!
//! This crate owns every interaction with the object-storage backend:
//! the `CredentialIssuer` trait, its S3 implementation and the object key codec.
//!
//! # Object key format
//!
//! `{transaction_id}_{consumer}_{user_name}.{file_extension}`
//!
//! The transaction id is recovered from the segment before the first `_`, so
//! `consumer` and `user_name` must never contain the delimiter. Key encoding and
//! decoding are centralized in the `keys` module.

pub mod factory;
pub mod keys;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_credential_issuer;
pub use keys::{decode_transaction_id, encode_object_key, KEY_DELIMITER, MAX_OBJECT_KEY_LEN};
pub use s3::S3CredentialIssuer;
pub use traits::{CredentialIssuer, PresignedCredential, StorageError, StorageResult};
