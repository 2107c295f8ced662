//! Transaction store implementations
//
// Postgres repository used in production
pub mod upload_transaction;
//
// Process-local store for tests and local development
pub mod memory;

pub use memory::InMemoryTransactionStore;
pub use upload_transaction::UploadTransactionRepository;
