//! Source adapters rendering each origin as canonical acquisitions.
//!
//! - [`TorrentSource`]: active transfers from the torrent client
//! - [`FilesystemSource`]: entries landed in the incoming directory

mod filesystem;
mod torrent;

pub use filesystem::FilesystemSource;
pub use torrent::TorrentSource;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::acquisition::{Acquisition, AcquisitionError};

/// Which origin a source reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Torrent,
    Filesystem,
}

impl SourceKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Torrent => "torrent",
            SourceKind::Filesystem => "filesystem",
        }
    }

    /// Error reported when a fetch from this kind of source overruns its deadline.
    pub fn timeout_error(&self, after: Duration) -> AcquisitionError {
        let msg = format!("no response within {:?}", after);
        match self {
            SourceKind::Torrent => AcquisitionError::ClientUnavailable(msg),
            SourceKind::Filesystem => AcquisitionError::DirectoryUnreadable(msg),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An origin of acquisitions, re-read on every request.
#[async_trait]
pub trait AcquisitionSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// List every acquisition this source currently knows about.
    async fn list_all(&self) -> Result<Vec<Acquisition>, AcquisitionError>;
}
