use super::models::Consumer;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName},
    middleware::Next,
    response::{IntoResponse, Response},
};
use s3are_core::{AppError, Config};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AuthState {
    /// Header carrying the consumer identity
    pub header: HeaderName,
}

impl AuthState {
    pub fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let header = HeaderName::from_bytes(config.consumer_header.as_bytes()).map_err(|e| {
            anyhow::anyhow!(
                "CONSUMER_HEADER '{}' is not a valid header name: {}",
                config.consumer_header,
                e
            )
        })?;
        Ok(Self { header })
    }
}

/// Resolve the caller identity from the trusted header.
///
/// Missing, empty, blank or non-UTF-8 values are treated as anonymous.
pub fn identify(headers: &HeaderMap, header: &HeaderName) -> Result<Consumer, AppError> {
    let value = headers
        .get(header)
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", header)))?;

    let consumer = value
        .to_str()
        .map_err(|_| AppError::Unauthorized(format!("Invalid {} header", header)))?
        .trim();

    if consumer.is_empty() {
        return Err(AppError::Unauthorized(format!("Empty {} header", header)));
    }

    Ok(Consumer(consumer.to_string()))
}

pub async fn consumer_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match identify(request.headers(), &auth_state.header) {
        Ok(consumer) => {
            tracing::debug!(consumer = %consumer, "auth.success");
            request.extensions_mut().insert(consumer);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(
                path = %request.uri().path(),
                method = %request.method(),
                reason = %err,
                "auth.failure"
            );
            HttpAppError(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn header() -> HeaderName {
        HeaderName::from_static("x-consumer-username")
    }

    #[test]
    fn test_identify_reads_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header(), HeaderValue::from_static(" alice "));
        assert_eq!(
            identify(&headers, &header()).unwrap(),
            Consumer("alice".to_string())
        );
    }

    #[test]
    fn test_identify_rejects_missing_or_blank() {
        let headers = HeaderMap::new();
        assert!(matches!(
            identify(&headers, &header()),
            Err(AppError::Unauthorized(_))
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header(), HeaderValue::from_static("   "));
        assert!(matches!(
            identify(&headers, &header()),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_identify_rejects_non_utf8() {
        let mut headers = HeaderMap::new();
        headers.insert(header(), HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert!(matches!(
            identify(&headers, &header()),
            Err(AppError::Unauthorized(_))
        ));
    }
}
