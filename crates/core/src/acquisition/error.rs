//! Error types for acquisition listing and creation.

use thiserror::Error;

use crate::torrent_client::TorrentClientError;

/// Errors surfaced to callers of the acquisition service.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Torrent client unavailable: {0}")]
    ClientUnavailable(String),

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("Directory unreadable: {0}")]
    DirectoryUnreadable(String),

    #[error("Unsupported query field: {0}")]
    InvalidFilterField(String),
}

impl AcquisitionError {
    /// Short machine-readable label, used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AcquisitionError::ClientUnavailable(_) => "client_unavailable",
            AcquisitionError::InvalidLink(_) => "invalid_link",
            AcquisitionError::DirectoryUnreadable(_) => "directory_unreadable",
            AcquisitionError::InvalidFilterField(_) => "invalid_filter_field",
        }
    }
}

impl From<TorrentClientError> for AcquisitionError {
    fn from(err: TorrentClientError) -> Self {
        match err {
            TorrentClientError::Rejected(msg) => AcquisitionError::InvalidLink(msg),
            other => AcquisitionError::ClientUnavailable(other.to_string()),
        }
    }
}
