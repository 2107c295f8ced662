use crate::auth::Consumer;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedQuery};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use s3are_core::models::{
    FileStatusQuery, UploadCompletedRequest, UploadFileRequest, UploadTransaction,
};
use std::sync::Arc;

/// Request a presigned URL to upload a file
#[utoipa::path(
    post,
    path = "/uploadFileRequest",
    tag = "uploads",
    request_body = UploadFileRequest,
    params(
        ("x-consumer-username" = String, Header, description = "Caller identity injected by the gateway")
    ),
    responses(
        (status = 201, description = "Transaction created", body = UploadTransaction),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing consumer identity", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(consumer = %consumer, operation = "request_upload")
)]
pub async fn request_upload(
    consumer: Consumer,
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UploadFileRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let transaction = state
        .workflow
        .request_upload(consumer.as_str(), &request)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Report that the file has been uploaded and get a download URL
#[utoipa::path(
    put,
    path = "/fileUploaded",
    tag = "uploads",
    request_body = UploadCompletedRequest,
    params(
        ("x-consumer-username" = String, Header, description = "Caller identity injected by the gateway")
    ),
    responses(
        (status = 200, description = "Upload recorded", body = UploadTransaction),
        (status = 400, description = "Invalid input or malformed object key", body = ErrorResponse),
        (status = 401, description = "Missing consumer identity", body = ErrorResponse),
        (status = 404, description = "No pending upload for this key", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(consumer = %consumer, operation = "file_uploaded")
)]
pub async fn file_uploaded(
    consumer: Consumer,
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UploadCompletedRequest>,
) -> Result<Json<UploadTransaction>, HttpAppError> {
    let transaction = state
        .workflow
        .complete_upload(consumer.as_str(), &request)
        .await?;

    Ok(Json(transaction))
}

/// Get the status of a transaction
#[utoipa::path(
    get,
    path = "/fileStatus",
    tag = "uploads",
    params(
        FileStatusQuery,
        ("x-consumer-username" = String, Header, description = "Caller identity injected by the gateway")
    ),
    responses(
        (status = 200, description = "Transaction found", body = UploadTransaction),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 401, description = "Missing consumer identity", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
pub async fn file_status(
    consumer: Consumer,
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<FileStatusQuery>,
) -> Result<Json<UploadTransaction>, HttpAppError> {
    let transaction = state
        .workflow
        .get_status(query.transaction_id, consumer.as_str(), &query.user_name)
        .await?;

    Ok(Json(transaction))
}
