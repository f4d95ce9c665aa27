//! Caller-facing acquisition operations.
//!
//! Every call re-reads both sources; nothing is cached between requests
//! except the torrent client connection.

use std::time::{Duration, Instant};

use futures::future;
use tracing::{debug, info, warn};

use crate::acquisition::{merge, Acquisition, AcquisitionError};
use crate::metrics::{CREATED, LISTED_ACQUISITIONS, SOURCE_FETCHES, SOURCE_FETCH_DURATION};
use crate::query::AcquisitionQuery;
use crate::sources::{AcquisitionSource, FilesystemSource, SourceKind, TorrentSource};

/// Lists and creates acquisitions across the torrent client and the
/// incoming directory.
pub struct AcquisitionService {
    torrent: TorrentSource,
    filesystem: FilesystemSource,
    torrent_timeout: Option<Duration>,
    scan_timeout: Option<Duration>,
}

impl AcquisitionService {
    pub fn new(torrent: TorrentSource, filesystem: FilesystemSource) -> Self {
        Self {
            torrent,
            filesystem,
            torrent_timeout: None,
            scan_timeout: None,
        }
    }

    /// Bound every call to one source by `timeout`.
    pub fn with_source_timeout(mut self, source: SourceKind, timeout: Duration) -> Self {
        match source {
            SourceKind::Torrent => self.torrent_timeout = Some(timeout),
            SourceKind::Filesystem => self.scan_timeout = Some(timeout),
        }
        self
    }

    fn timeout_for(&self, source: SourceKind) -> Option<Duration> {
        match source {
            SourceKind::Torrent => self.torrent_timeout,
            SourceKind::Filesystem => self.scan_timeout,
        }
    }

    /// Merge both sources (torrent first), then filter and order.
    ///
    /// Both sources are fetched concurrently. If either fails the whole
    /// listing fails.
    pub async fn list_acquisitions(
        &self,
        query: &AcquisitionQuery,
    ) -> Result<Vec<Acquisition>, AcquisitionError> {
        let (downloading, completed) =
            future::try_join(self.fetch(&self.torrent), self.fetch(&self.filesystem)).await?;

        let merged = merge(downloading, completed);
        let total = merged.len();
        let result = query.apply(merged).into_vec();

        LISTED_ACQUISITIONS.observe(result.len() as f64);
        debug!(total, matched = result.len(), "Listed acquisitions");
        Ok(result)
    }

    /// Submit a link to the torrent client and return the new transfer.
    pub async fn create_acquisition(&self, link: &str) -> Result<Acquisition, AcquisitionError> {
        let result = self
            .with_deadline(SourceKind::Torrent, self.torrent.add_one(link))
            .await;

        match &result {
            Ok(acquisition) => {
                CREATED.with_label_values(&["success"]).inc();
                info!(id = %acquisition.id, name = %acquisition.name, "Created acquisition");
            }
            Err(e) => {
                CREATED.with_label_values(&[e.kind()]).inc();
                warn!(error = %e, "Failed to create acquisition");
            }
        }
        result
    }

    async fn fetch(
        &self,
        source: &dyn AcquisitionSource,
    ) -> Result<Vec<Acquisition>, AcquisitionError> {
        let kind = source.kind();
        let start = Instant::now();

        let result = self.with_deadline(kind, source.list_all()).await;

        SOURCE_FETCH_DURATION
            .with_label_values(&[kind.as_str()])
            .observe(start.elapsed().as_secs_f64());
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => {
                warn!(source = %kind, error = %e, "Source fetch failed");
                "error"
            }
        };
        SOURCE_FETCHES
            .with_label_values(&[kind.as_str(), outcome])
            .inc();

        result
    }

    async fn with_deadline<T>(
        &self,
        kind: SourceKind,
        fut: impl std::future::Future<Output = Result<T, AcquisitionError>>,
    ) -> Result<T, AcquisitionError> {
        match self.timeout_for(kind) {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| kind.timeout_error(limit))?,
            None => fut.await,
        }
    }
}
