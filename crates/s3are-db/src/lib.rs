//! s3are Database Layer
//!
//! This crate provides the `TransactionStore` abstraction over persisted upload
//! transactions, with a Postgres implementation and an in-memory one.
//!
// Module declarations
pub mod db;
pub mod store;

// Re-exports: store trait and its inputs
pub use store::{NewUploadTransaction, TransactionStore, UploadCompletion};

// Re-exports: implementations
pub use db::{InMemoryTransactionStore, UploadTransactionRepository};
