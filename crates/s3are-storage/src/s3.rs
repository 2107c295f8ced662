use crate::traits::{CredentialIssuer, PresignedCredential, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::Utc;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Result as ObjectResult;
use s3are_core::PresignPolicy;

/// S3 credential issuer
///
/// Signs PUT and GET URLs locally with the configured AWS credentials; the
/// object itself is never touched.
#[derive(Debug, Clone)]
pub struct S3CredentialIssuer {
    store: AmazonS3,
    bucket: String,
    policy: PresignPolicy,
}

impl S3CredentialIssuer {
    /// Create a new S3CredentialIssuer instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `policy` - Lifetime policy applied to every issued credential
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        policy: PresignPolicy,
    ) -> StorageResult<Self> {
        // Credentials come from the standard AWS_* environment variables.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::from_store(store, bucket, policy))
    }

    /// Wrap an already configured store.
    pub fn from_store(store: AmazonS3, bucket: String, policy: PresignPolicy) -> Self {
        Self {
            store,
            bucket,
            policy,
        }
    }

    async fn presign(
        &self,
        method: Method,
        object_key: &str,
        requested_ttl: Option<i64>,
    ) -> StorageResult<PresignedCredential> {
        if object_key.is_empty() {
            return Err(StorageError::InvalidKey(
                "object key must not be empty".to_string(),
            ));
        }

        let ttl = self.policy.effective_ttl(requested_ttl);
        let location = Path::from(object_key.to_string());
        let start = std::time::Instant::now();

        let url_result: ObjectResult<_> =
            self.store.signed_url(method.clone(), &location, ttl).await;

        let url = url_result
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %object_key,
                    method = %method,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 presign failed"
                );
                StorageError::BackendError(e.to_string())
            })?
            .to_string();

        tracing::debug!(
            bucket = %self.bucket,
            key = %object_key,
            method = %method,
            ttl_secs = ttl.as_secs(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 presign successful"
        );

        Ok(PresignedCredential {
            url,
            expires_at: Utc::now() + chrono::Duration::seconds(ttl.as_secs() as i64),
            ttl,
        })
    }
}

#[async_trait]
impl CredentialIssuer for S3CredentialIssuer {
    async fn issue_upload_credential(
        &self,
        object_key: &str,
        requested_ttl: Option<i64>,
    ) -> StorageResult<PresignedCredential> {
        self.presign(Method::PUT, object_key, requested_ttl).await
    }

    async fn issue_download_credential(
        &self,
        object_key: &str,
        requested_ttl: Option<i64>,
    ) -> StorageResult<PresignedCredential> {
        self.presign(Method::GET, object_key, requested_ttl).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const KEY: &str = "550e8400-e29b-41d4-a716-446655440000_alice_bob.pdf";

    fn issuer() -> S3CredentialIssuer {
        let store = AmazonS3Builder::new()
            .with_bucket_name("uploads")
            .with_region("us-east-1")
            .with_access_key_id("AKIDEXAMPLE")
            .with_secret_access_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
            .build()
            .unwrap();
        S3CredentialIssuer::from_store(store, "uploads".to_string(), PresignPolicy::default())
    }

    #[tokio::test]
    async fn test_upload_credential_uses_default_ttl() {
        let credential = issuer().issue_upload_credential(KEY, None).await.unwrap();

        assert_eq!(credential.ttl, Duration::from_secs(86_400));
        assert!(credential.url.contains(KEY));
        assert!(credential.url.contains("X-Amz-Expires=86400"));
        assert!(credential.url.contains("X-Amz-Signature="));
        assert!(credential.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_download_credential_is_clamped_to_seven_days() {
        let thirty_days = 30 * 86_400;
        let credential = issuer()
            .issue_download_credential(KEY, Some(thirty_days))
            .await
            .unwrap();

        assert_eq!(credential.ttl, Duration::from_secs(604_800));
        assert!(credential.url.contains("X-Amz-Expires=604800"));
    }

    #[tokio::test]
    async fn test_short_ttl_is_honored() {
        let credential = issuer()
            .issue_upload_credential(KEY, Some(10))
            .await
            .unwrap();

        assert_eq!(credential.ttl, Duration::from_secs(10));
        assert!(credential.url.contains("X-Amz-Expires=10&") || credential.url.ends_with("X-Amz-Expires=10"));
    }

    #[tokio::test]
    async fn test_upload_and_download_urls_differ() {
        let issuer = issuer();
        let put = issuer.issue_upload_credential(KEY, Some(60)).await.unwrap();
        let get = issuer.issue_download_credential(KEY, Some(60)).await.unwrap();
        assert_ne!(put.url, get.url);
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let err = issuer().issue_upload_credential("", None).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
