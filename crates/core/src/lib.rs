pub mod acquisition;
pub mod config;
pub mod metrics;
pub mod query;
pub mod service;
pub mod sources;
pub mod testing;
pub mod torrent_client;

pub use acquisition::{
    classify, merge, normalize, Acquisition, AcquisitionError, AcquisitionSet, AcquisitionState,
    FileKind, FileRecord,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use query::{AcquisitionField, AcquisitionQuery, OrderBy, OrderKey};
pub use service::AcquisitionService;
pub use sources::{AcquisitionSource, FilesystemSource, SourceKind, TorrentSource};
pub use torrent_client::{
    SharedTorrentClient, TorrentClient, TorrentClientError, TransmissionClient,
    TransmissionConnector,
};
