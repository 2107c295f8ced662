//! s3are Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! presigning policy shared by every s3are component.

pub mod config;
pub mod error;
pub mod models;
pub mod presign_policy;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{UploadStatus, UploadTransaction};
pub use presign_policy::PresignPolicy;
