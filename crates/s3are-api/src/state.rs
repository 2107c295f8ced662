//! Application state shared by every handler.

use s3are_services::UploadWorkflow;

pub struct AppState {
    pub workflow: UploadWorkflow,
}

impl AppState {
    pub fn new(workflow: UploadWorkflow) -> Self {
        Self { workflow }
    }
}
