use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle state of an upload transaction.
///
/// `WaitingFile` is the initial state; `FileUploaded` is terminal and is reached at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "upload_status", rename_all = "snake_case")
)]
pub enum UploadStatus {
    #[serde(rename = "Waiting file")]
    WaitingFile,
    #[serde(rename = "File Uploaded")]
    FileUploaded,
}

impl Display for UploadStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadStatus::WaitingFile => write!(f, "Waiting file"),
            UploadStatus::FileUploaded => write!(f, "File Uploaded"),
        }
    }
}

/// One upload/download lifecycle instance.
///
/// `download_url`, `download_expires_at`, `file_size` and `file_type` are set
/// if and only if `status` is [`UploadStatus::FileUploaded`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadTransaction {
    pub transaction_id: Uuid,
    pub consumer: String,
    pub user_name: String,
    pub file_name: String,
    pub file_extension: String,
    /// Name of the object in storage: `{transactionId}_{consumer}_{userName}.{fileExtension}`
    pub object_key: String,
    pub upload_url: String,
    pub upload_expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    pub status: UploadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UploadTransaction {
    pub fn is_completed(&self) -> bool {
        self.status == UploadStatus::FileUploaded
    }
}

/// Request permission to upload a file
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    /// End user on whose behalf the consumer uploads
    #[validate(length(
        min = 1,
        max = 255,
        message = "userName must be between 1 and 255 characters"
    ))]
    pub user_name: String,
    /// Original file name, without extension
    #[validate(length(
        min = 1,
        max = 255,
        message = "fileName must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    /// File extension, e.g. `pdf`
    #[serde(alias = "fileExtention")]
    #[validate(length(
        min = 1,
        max = 32,
        message = "fileExtension must be between 1 and 32 characters"
    ))]
    pub file_extension: String,
    /// Requested lifetime of the upload URL in seconds
    #[serde(default)]
    pub expiration_time: Option<i64>,
}

/// Report that the file has been uploaded to storage
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadCompletedRequest {
    /// Object key returned by the upload request
    #[serde(alias = "fileName")]
    #[validate(length(
        min = 1,
        max = 1024,
        message = "objectKey must be between 1 and 1024 characters"
    ))]
    pub object_key: String,
    /// Uploaded size in bytes
    #[validate(range(min = 0, message = "fileSize cannot be negative"))]
    pub file_size: i64,
    /// MIME type of the uploaded file
    #[validate(length(
        min = 1,
        max = 255,
        message = "fileType must be between 1 and 255 characters"
    ))]
    pub file_type: String,
    /// Requested lifetime of the download URL in seconds
    #[serde(default)]
    pub expiration_time: Option<i64>,
}

/// Look up a transaction owned by the caller
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FileStatusQuery {
    #[serde(alias = "transactionUuid")]
    pub transaction_id: Uuid,
    #[validate(length(
        min = 1,
        max = 255,
        message = "userName must be between 1 and 255 characters"
    ))]
    pub user_name: String,
}
