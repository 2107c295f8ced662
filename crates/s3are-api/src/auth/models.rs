use crate::error::HttpAppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use s3are_core::AppError;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Identity of the calling principal, as injected by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumer(pub String);

impl Consumer {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Consumer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

// Set by `consumer_middleware`; handlers outside the protected router get a 401.
impl<S> FromRequestParts<S> for Consumer
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Consumer>()
            .cloned()
            .ok_or_else(|| HttpAppError(AppError::Unauthorized("Missing consumer".to_string())))
    }
}
