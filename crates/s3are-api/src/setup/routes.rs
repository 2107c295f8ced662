//! Route configuration and setup

use crate::auth::{consumer_middleware, AuthState};
use crate::constants::{CORS_MAX_AGE_SECS, DOCS_PATH, MAX_REQUEST_BODY_BYTES, OPENAPI_JSON_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use s3are_core::Config;
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState::from_config(config)?);
    let prefix = config.route_prefix();

    // Protected routes (require the consumer header)
    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        auth_state,
        consumer_middleware,
    ));

    let group = public_routes().merge(protected_routes);
    let group = if prefix.is_empty() {
        group
    } else {
        Router::new().nest(&prefix, group)
    };

    let openapi = crate::api_doc::get_openapi_spec(&prefix);

    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = config.http_concurrency_limit.max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        request_timeout_secs = config.request_timeout_secs,
        "HTTP concurrency limit and request timeout enabled"
    );

    let app = group
        .route(OPENAPI_JSON_PATH, get(move || async move { Json(openapi) }))
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_JSON_PATH).path(DOCS_PATH))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS));

    let cors = if config.allows_any_origin() {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        cors.allow_origin(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        cors.allow_origin(origins).allow_credentials(true)
    };
    Ok(cors)
}

/// Public routes (no authentication required)
fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/healthz", get(handlers::health::healthz))
}

/// Protected routes (require the consumer identity header).
fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/uploadFileRequest", post(handlers::uploads::request_upload))
        .route("/fileUploaded", put(handlers::uploads::file_uploaded))
        .route("/fileStatus", get(handlers::uploads::file_status))
}
