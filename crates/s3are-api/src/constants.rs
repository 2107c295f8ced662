//! API constants

/// Path of the served OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Path of the RapiDoc UI
pub const DOCS_PATH: &str = "/docs";

/// Largest accepted request body. Requests only carry small JSON documents.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// CORS preflight cache lifetime (12 hours)
pub const CORS_MAX_AGE_SECS: u64 = 12 * 60 * 60;
