//! OpenAPI documentation.
//! Handler path annotations are relative to the route group; the served spec
//! carries the configured `ROUTER_GROUP_NAME` prefix.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use s3are_core::models;

/// Prefixes every path key with the route group (e.g. `/v1`).
fn prefix_openapi_paths(spec: &mut utoipa::openapi::OpenApi, prefix: &str) {
    if prefix.is_empty() {
        return;
    }
    let path_map = std::mem::take(&mut spec.paths.paths);
    for (key, item) in path_map {
        spec.paths.paths.insert(format!("{}{}", prefix, key), item);
    }
}

/// Returns the OpenAPI spec for routes served under `prefix`.
pub fn get_openapi_spec(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    prefix_openapi_paths(&mut spec, prefix);
    spec
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "s3are API",
        version = "0.1.0",
        description = "Upload broker: hands out presigned S3 URLs for direct uploads and downloads and tracks each upload transaction."
    ),
    paths(
        handlers::health::healthz,
        handlers::uploads::request_upload,
        handlers::uploads::file_uploaded,
        handlers::uploads::file_status,
    ),
    components(
        schemas(
            models::UploadTransaction,
            models::UploadStatus,
            models::UploadFileRequest,
            models::UploadCompletedRequest,
            handlers::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Upload transaction workflow"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_carry_route_group() {
        let spec = get_openapi_spec("/v1");
        assert!(spec.paths.paths.contains_key("/v1/uploadFileRequest"));
        assert!(spec.paths.paths.contains_key("/v1/healthz"));
        assert!(!spec.paths.paths.contains_key("/fileStatus"));
    }

    #[test]
    fn test_paths_unprefixed_without_group() {
        let spec = get_openapi_spec("");
        assert!(spec.paths.paths.contains_key("/fileUploaded"));
    }
}
