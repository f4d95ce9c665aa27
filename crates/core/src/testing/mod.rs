//! Testing utilities and mock implementations.
//!
//! Provides a mock torrent client and fixtures so the acquisition service
//! can be exercised without a running torrent daemon.
//!
//! # Example
//!
//! ```rust,ignore
//! use additions_core::testing::{fixtures, MockTorrentClient};
//!
//! let torrent_client = MockTorrentClient::new();
//! torrent_client.add_mock_transfer(fixtures::transfer("1", "Show", 0.5, &["Show/a.mkv"])).await;
//! ```

mod mock_torrent_client;

pub use mock_torrent_client::{MockTorrentClient, RecordedSubmission};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::Path;

    use crate::torrent_client::{Transfer, TransferFile};

    /// Create a transfer whose files are partially downloaded.
    pub fn transfer(id: &str, name: &str, progress: f64, files: &[&str]) -> Transfer {
        Transfer {
            id: id.to_string(),
            name: name.to_string(),
            progress,
            files: files
                .iter()
                .map(|file| TransferFile {
                    name: file.to_string(),
                    size: 500_000,
                    completed: 455_761,
                })
                .collect(),
        }
    }

    /// Write a single landed file directly under `root`.
    pub fn landed_file(root: &Path, name: &str) {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, "testing").expect("Failed to write landed file");
    }

    /// Write a landed directory `root/name` containing `files` (relative paths).
    pub fn landed_dir(root: &Path, name: &str, files: &[&str]) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create landed dir");
        for file in files {
            landed_file(&dir, file);
        }
    }
}
