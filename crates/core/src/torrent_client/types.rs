//! Types for torrent client operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during torrent client operations.
#[derive(Debug, Error)]
pub enum TorrentClientError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Transfer not found: {0}")]
    TransferNotFound(String),

    #[error("Link rejected: {0}")]
    Rejected(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,
}

/// One file of a transfer as reported by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFile {
    /// Slash-delimited path, including the transfer's root segment.
    pub name: String,
    /// Total size in bytes.
    pub size: u64,
    /// Bytes downloaded so far.
    pub completed: u64,
}

/// A transfer known to the torrent client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Client-assigned identifier.
    pub id: String,
    pub name: String,
    /// Download progress (0.0 - 1.0).
    pub progress: f64,
    pub files: Vec<TransferFile>,
}

/// Trait for torrent client backends.
#[async_trait]
pub trait TorrentClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Submit a magnet link or torrent URL, returning the new transfer's id.
    ///
    /// Fails with [`TorrentClientError::Rejected`] if the client refuses the link.
    async fn submit(&self, link: &str) -> Result<String, TorrentClientError>;

    /// Fetch a single transfer with full metadata.
    async fn fetch(&self, id: &str) -> Result<Transfer, TorrentClientError>;

    /// List every transfer the client currently knows about.
    async fn list_transfers(&self) -> Result<Vec<Transfer>, TorrentClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_serialization() {
        let transfer = Transfer {
            id: "3".to_string(),
            name: "Show".to_string(),
            progress: 0.5,
            files: vec![TransferFile {
                name: "Show/S01E01.mkv".to_string(),
                size: 1000,
                completed: 500,
            }],
        };

        let json = serde_json::to_string(&transfer).unwrap();
        let parsed: Transfer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, transfer);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TorrentClientError::Rejected("invalid or corrupt torrent file".to_string())
                .to_string(),
            "Link rejected: invalid or corrupt torrent file"
        );
        assert_eq!(TorrentClientError::Timeout.to_string(), "Request timeout");
    }
}
