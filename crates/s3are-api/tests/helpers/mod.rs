//! Test helpers: build AppState and router for integration tests.
//!
//! The workflow runs against the in-memory transaction store and a signing
//! double, so these tests need neither Postgres nor S3.

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration as ChronoDuration, Utc};
use s3are_api::setup::routes;
use s3are_api::state::AppState;
use s3are_core::config::LogFormat;
use s3are_core::{Config, PresignPolicy};
use s3are_services::{
    CredentialIssuer, InMemoryTransactionStore, PresignedCredential, StorageError, StorageResult,
    UploadWorkflow,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const CONSUMER_HEADER: &str = "x-consumer-username";

/// Issuer double producing deterministic URLs with the real TTL policy.
#[derive(Default)]
pub struct FakeIssuer {
    policy: PresignPolicy,
    pub fail: AtomicBool,
}

impl FakeIssuer {
    fn sign(
        &self,
        method: &str,
        object_key: &str,
        requested_ttl: Option<i64>,
    ) -> StorageResult<PresignedCredential> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError(
                "access denied for AKIDSECRET".to_string(),
            ));
        }
        let ttl = self.policy.effective_ttl(requested_ttl);
        Ok(PresignedCredential {
            url: format!(
                "https://uploads.s3.amazonaws.com/{}?method={}&X-Amz-Expires={}",
                object_key,
                method,
                ttl.as_secs()
            ),
            expires_at: Utc::now() + ChronoDuration::seconds(ttl.as_secs() as i64),
            ttl,
        })
    }
}

#[async_trait]
impl CredentialIssuer for FakeIssuer {
    async fn issue_upload_credential(
        &self,
        object_key: &str,
        requested_ttl: Option<i64>,
    ) -> StorageResult<PresignedCredential> {
        self.sign("PUT", object_key, requested_ttl)
    }

    async fn issue_download_credential(
        &self,
        object_key: &str,
        requested_ttl: Option<i64>,
    ) -> StorageResult<PresignedCredential> {
        self.sign("GET", object_key, requested_ttl)
    }
}

/// Test application: server plus handles on its collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryTransactionStore>,
    pub issuer: Arc<FakeIssuer>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(router_group: &str) -> Config {
    Config {
        server_port: 8080,
        environment: "test".to_string(),
        router_group: router_group.to_string(),
        cors_origins: vec!["*".to_string()],
        http_concurrency_limit: 100,
        request_timeout_secs: 5,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 1,
        db_connect_retries: 1,
        db_connect_retry_delay_secs: 0,
        s3_bucket: "uploads".to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        consumer_header: CONSUMER_HEADER.to_string(),
        presign_default_ttl_secs: 86_400,
        presign_max_ttl_secs: 604_800,
        log_format: LogFormat::Compact,
    }
}

pub fn setup_test_app_with(config: Config) -> TestApp {
    let store = Arc::new(InMemoryTransactionStore::new());
    let issuer = Arc::new(FakeIssuer::default());
    let workflow = UploadWorkflow::new(store.clone(), issuer.clone());
    let state = Arc::new(AppState::new(workflow));

    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        store,
        issuer,
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config(""))
}
