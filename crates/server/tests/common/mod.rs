//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock torrent client and a temporary incoming directory, enabling
//! E2E testing without a Transmission daemon.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use additions_core::config::{LibraryConfig, PaginationConfig, ServerConfig, TransmissionConfig};
use additions_core::testing::MockTorrentClient;
use additions_core::{
    AcquisitionService, Config, FilesystemSource, SharedTorrentClient, TorrentSource,
};

/// Re-export fixtures for test convenience
pub use additions_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_listing() {
///     let fixture = TestFixture::new();
///     fixtures::landed_file(fixture.incoming(), "movie.mkv");
///
///     let response = fixture.get("/api/v1/additions").await;
///     assert_eq!(response.body["count"], 1);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock torrent client - control transfers
    pub torrent_client: Arc<MockTorrentClient>,
    /// Incoming directory scanned for completed downloads
    pub incoming_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default pagination.
    pub fn new() -> Self {
        Self::with_pagination(PaginationConfig::default())
    }

    /// Create a test fixture with custom pagination limits.
    pub fn with_pagination(pagination: PaginationConfig) -> Self {
        let incoming_dir = TempDir::new().expect("Failed to create incoming dir");
        let torrent_client = Arc::new(MockTorrentClient::new());

        let config = Config {
            library: LibraryConfig::new(incoming_dir.path()),
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            transmission: TransmissionConfig::default(),
            pagination,
        };

        let shared = Arc::new(SharedTorrentClient::from_client(torrent_client.clone()));
        let service = AcquisitionService::new(
            TorrentSource::new(shared),
            FilesystemSource::from_config(&config.library),
        );

        let state = Arc::new(additions_server::state::AppState::new(config, service));
        let router = additions_server::api::create_router(state);

        Self {
            router,
            torrent_client,
            incoming_dir,
        }
    }

    pub fn incoming(&self) -> &Path {
        self.incoming_dir.path()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Names of the `results` entries of a list response, in order.
pub fn result_names(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .expect("results should be an array")
        .iter()
        .map(|item| item["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
