pub mod upload_workflow;
