pub mod upload;

pub use upload::{
    FileStatusQuery, UploadCompletedRequest, UploadFileRequest, UploadStatus, UploadTransaction,
};
