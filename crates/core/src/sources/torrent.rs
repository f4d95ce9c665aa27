use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::acquisition::{normalize, Acquisition, AcquisitionError, FileRecord};
use crate::torrent_client::{SharedTorrentClient, Transfer};

use super::{AcquisitionSource, SourceKind};

/// Active transfers from the torrent client, always `downloading`.
pub struct TorrentSource {
    client: Arc<SharedTorrentClient>,
}

impl TorrentSource {
    pub fn new(client: Arc<SharedTorrentClient>) -> Self {
        Self { client }
    }

    /// Submit a link and return the resulting transfer.
    ///
    /// The transfer is always re-fetched after submission: freshly added
    /// transfers are not guaranteed to carry complete metadata.
    pub async fn add_one(&self, link: &str) -> Result<Acquisition, AcquisitionError> {
        let link = link.trim();
        if link.is_empty() {
            return Err(AcquisitionError::InvalidLink("link is empty".to_string()));
        }

        let client = self.client.get().await?;
        let id = client.submit(link).await?;
        info!(id = %id, backend = client.name(), "Submitted link to torrent client");

        let transfer = client.fetch(&id).await?;
        Ok(format_transfer(transfer))
    }
}

#[async_trait]
impl AcquisitionSource for TorrentSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Torrent
    }

    async fn list_all(&self) -> Result<Vec<Acquisition>, AcquisitionError> {
        let client = self.client.get().await?;
        let transfers = client.list_transfers().await?;
        debug!(count = transfers.len(), "Fetched transfers");
        Ok(transfers.into_iter().map(format_transfer).collect())
    }
}

/// Render a transfer, stripping each file's root segment.
fn format_transfer(transfer: Transfer) -> Acquisition {
    let files = transfer
        .files
        .iter()
        .map(|file| FileRecord::new(normalize(&file.name)))
        .collect();
    Acquisition::downloading(transfer.id, transfer.name, transfer.progress, files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::{AcquisitionState, FileKind};
    use crate::testing::{fixtures, MockTorrentClient};
    use crate::torrent_client::{TorrentClient, TorrentClientError};

    fn source_with(mock: Arc<MockTorrentClient>) -> TorrentSource {
        TorrentSource::new(Arc::new(SharedTorrentClient::from_client(mock)))
    }

    #[test]
    fn test_format_transfer() {
        let transfer = fixtures::transfer(
            "5",
            "Show",
            0.4,
            &["Show/S01E02.mkv", "Show/S01E01.srt", "Show/cover.jpg"],
        );

        let acquisition = format_transfer(transfer);
        assert_eq!(acquisition.id, "5");
        assert_eq!(acquisition.state, AcquisitionState::Downloading);
        assert_eq!(acquisition.name, "Show");
        assert!((acquisition.progress - 0.4).abs() < f64::EPSILON);

        let files: Vec<_> = acquisition
            .files
            .iter()
            .map(|f| (f.name.as_str(), f.kind))
            .collect();
        assert_eq!(
            files,
            vec![
                ("S01E01.srt", FileKind::Subtitle),
                ("S01E02.mkv", FileKind::Video),
                ("cover.jpg", FileKind::Image),
            ]
        );
    }

    #[test]
    fn test_format_single_file_transfer() {
        let transfer = fixtures::transfer("1", "movie.mp4", 0.9, &["movie.mp4"]);
        let acquisition = format_transfer(transfer);
        assert_eq!(acquisition.files.len(), 1);
        assert_eq!(acquisition.files[0].name, "movie.mp4");
        assert_eq!(acquisition.files[0].kind, FileKind::Video);
    }

    #[tokio::test]
    async fn test_list_all_preserves_client_order() {
        let mock = Arc::new(MockTorrentClient::new());
        mock.add_mock_transfer(fixtures::transfer("2", "Zeta", 0.1, &[]))
            .await;
        mock.add_mock_transfer(fixtures::transfer("1", "Alpha", 0.2, &[]))
            .await;

        let acquisitions = source_with(mock).list_all().await.unwrap();
        let ids: Vec<_> = acquisitions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_list_all_surfaces_client_failure() {
        let mock = Arc::new(MockTorrentClient::new());
        mock.set_next_error(TorrentClientError::ConnectionFailed("refused".into()))
            .await;

        let result = source_with(mock).list_all().await;
        assert!(matches!(result, Err(AcquisitionError::ClientUnavailable(_))));
    }

    #[tokio::test]
    async fn test_add_one_refetches_transfer() {
        let mock = Arc::new(MockTorrentClient::new());
        let source = source_with(Arc::clone(&mock));

        let acquisition = source
            .add_one("magnet:?xt=urn:btih:abc&dn=New+Show")
            .await
            .unwrap();

        assert_eq!(mock.fetch_count(), 1);
        assert_eq!(acquisition.name, "New Show");
        assert_eq!(acquisition.state, AcquisitionState::Downloading);
    }

    #[tokio::test]
    async fn test_add_one_rejected_link() {
        let mock = Arc::new(MockTorrentClient::new());
        let source = source_with(Arc::clone(&mock));

        let result = source.add_one("definitely not a magnet").await;
        assert!(matches!(result, Err(AcquisitionError::InvalidLink(_))));
        assert_eq!(mock.fetch_count(), 0);
        assert!(source.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_one_blank_link_never_reaches_client() {
        let mock = Arc::new(MockTorrentClient::new());
        let source = source_with(Arc::clone(&mock));

        let result = source.add_one("   ").await;
        assert!(matches!(result, Err(AcquisitionError::InvalidLink(_))));
        assert!(mock.submitted_links().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_one_client_down() {
        let mock = Arc::new(MockTorrentClient::new());
        mock.set_next_error(TorrentClientError::Timeout).await;

        let result = source_with(Arc::clone(&mock))
            .add_one("magnet:?xt=urn:btih:abc")
            .await;
        assert!(matches!(result, Err(AcquisitionError::ClientUnavailable(_))));
        assert!(mock.list_transfers().await.unwrap().is_empty());
    }
}
