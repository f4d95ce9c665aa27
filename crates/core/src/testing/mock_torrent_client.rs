//! Mock torrent client for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::torrent_client::{TorrentClient, TorrentClientError, Transfer, TransferFile};

/// Result string a real daemon returns for links it cannot parse.
const REJECTION: &str = "invalid or corrupt torrent file";

/// A recorded submission for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    /// The submitted link.
    pub link: String,
    /// When the submission was made.
    pub timestamp: chrono::DateTime<Utc>,
}

/// Mock implementation of the TorrentClient trait.
///
/// Provides controllable behavior for testing:
/// - Track submitted links for assertions
/// - Pre-populate transfers and control their progress/files
/// - Reject links that are neither magnet nor HTTP(S) URIs
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// let client = MockTorrentClient::new();
///
/// let id = client.submit("magnet:?xt=urn:btih:abc&dn=Show").await?;
/// client.set_files(&id, &["Show/S01E01.mkv"]).await;
/// client.set_progress(&id, 0.5).await;
///
/// let transfer = client.fetch(&id).await?;
/// assert_eq!(transfer.files.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockTorrentClient {
    /// Recorded submit calls.
    submitted: Arc<RwLock<Vec<RecordedSubmission>>>,
    /// Transfers in insertion order.
    transfers: Arc<RwLock<Vec<Transfer>>>,
    /// Link → transfer id, for duplicate submissions.
    links: Arc<RwLock<HashMap<String, String>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<TorrentClientError>>>,
    /// Counter for generating transfer ids.
    id_counter: AtomicUsize,
    /// Number of fetch calls made.
    fetches: AtomicUsize,
}

impl Default for MockTorrentClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTorrentClient {
    /// Create a new mock torrent client.
    pub fn new() -> Self {
        Self {
            submitted: Arc::new(RwLock::new(Vec::new())),
            transfers: Arc::new(RwLock::new(Vec::new())),
            links: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
            id_counter: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Get all recorded submissions, including rejected ones.
    pub async fn submitted_links(&self) -> Vec<RecordedSubmission> {
        self.submitted.read().await.clone()
    }

    /// Number of `fetch` calls made so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Pre-populate a transfer (for testing list operations).
    pub async fn add_mock_transfer(&self, transfer: Transfer) {
        self.transfers.write().await.push(transfer);
    }

    /// Set the progress for a transfer (clamped to 0.0 - 1.0).
    pub async fn set_progress(&self, id: &str, progress: f64) {
        let mut transfers = self.transfers.write().await;
        if let Some(transfer) = transfers.iter_mut().find(|t| t.id == id) {
            transfer.progress = progress.clamp(0.0, 1.0);
            for file in &mut transfer.files {
                file.completed = (file.size as f64 * transfer.progress) as u64;
            }
        }
    }

    /// Replace a transfer's file list, as if metadata had arrived.
    pub async fn set_files(&self, id: &str, names: &[&str]) {
        let mut transfers = self.transfers.write().await;
        if let Some(transfer) = transfers.iter_mut().find(|t| t.id == id) {
            transfer.files = names.iter().map(|name| mock_file(name)).collect();
        }
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: TorrentClientError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Get the number of transfers.
    pub async fn transfer_count(&self) -> usize {
        self.transfers.read().await.len()
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<TorrentClientError> {
        self.next_error.write().await.take()
    }

    fn is_acceptable(link: &str) -> bool {
        let link = link.trim();
        link.starts_with("magnet:?")
            || link.starts_with("http://")
            || link.starts_with("https://")
    }

    /// Display name from a magnet `dn=` parameter.
    fn display_name(link: &str) -> Option<String> {
        link.split(['?', '&'])
            .find_map(|part| part.strip_prefix("dn="))
            .map(|name| name.replace('+', " "))
    }
}

/// A 1 MiB file with nothing downloaded yet.
fn mock_file(name: &str) -> TransferFile {
    TransferFile {
        name: name.to_string(),
        size: 1024 * 1024,
        completed: 0,
    }
}

#[async_trait]
impl TorrentClient for MockTorrentClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit(&self, link: &str) -> Result<String, TorrentClientError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.submitted.write().await.push(RecordedSubmission {
            link: link.to_string(),
            timestamp: Utc::now(),
        });

        if !Self::is_acceptable(link) {
            return Err(TorrentClientError::Rejected(REJECTION.to_string()));
        }

        if let Some(id) = self.links.read().await.get(link) {
            return Ok(id.clone());
        }

        let id = (self.id_counter.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        let transfer = Transfer {
            id: id.clone(),
            name: Self::display_name(link).unwrap_or_default(),
            progress: 0.0,
            files: Vec::new(),
        };

        self.transfers.write().await.push(transfer);
        self.links.write().await.insert(link.to_string(), id.clone());
        Ok(id)
    }

    async fn fetch(&self, id: &str) -> Result<Transfer, TorrentClientError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.transfers
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TorrentClientError::TransferNotFound(id.to_string()))
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, TorrentClientError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.transfers.read().await.clone())
    }
}
