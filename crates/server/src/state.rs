use std::sync::Arc;
use std::time::Duration;

use additions_core::config::PaginationConfig;
use additions_core::{
    AcquisitionService, Config, FilesystemSource, SanitizedConfig, SharedTorrentClient,
    SourceKind, TorrentSource, TransmissionConnector,
};
use tracing::info;

/// Shared application state
pub struct AppState {
    config: Config,
    service: AcquisitionService,
}

impl AppState {
    pub fn new(config: Config, service: AcquisitionService) -> Self {
        Self { config, service }
    }

    /// Wire the service to Transmission and the incoming directory.
    ///
    /// No connection is made here; the torrent client connects on first use.
    pub fn from_config(config: Config) -> Self {
        let connector = TransmissionConnector::new(config.transmission.clone());
        let client = Arc::new(SharedTorrentClient::new(connector));

        let mut service = AcquisitionService::new(
            TorrentSource::new(client),
            FilesystemSource::from_config(&config.library),
        );
        if let Some(secs) = config.library.scan_timeout_secs {
            info!("Incoming directory scans limited to {}s", secs);
            service = service.with_source_timeout(SourceKind::Filesystem, Duration::from_secs(secs));
        }

        Self::new(config, service)
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn service(&self) -> &AcquisitionService {
        &self.service
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.config.pagination
    }
}
