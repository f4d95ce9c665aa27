//! Process-wide, lazily connected torrent client handle.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::TransmissionConfig;

use super::{TorrentClient, TorrentClientError, TransmissionClient};

/// Something that can establish a torrent client connection.
#[async_trait]
pub trait TorrentConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn TorrentClient>, TorrentClientError>;
}

/// An already-built client connects to itself.
#[async_trait]
impl TorrentConnector for Arc<dyn TorrentClient> {
    async fn connect(&self) -> Result<Arc<dyn TorrentClient>, TorrentClientError> {
        Ok(Arc::clone(self))
    }
}

/// Connects to a Transmission daemon and verifies the session.
pub struct TransmissionConnector {
    config: TransmissionConfig,
}

impl TransmissionConnector {
    pub fn new(config: TransmissionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TorrentConnector for TransmissionConnector {
    async fn connect(&self) -> Result<Arc<dyn TorrentClient>, TorrentClientError> {
        let client = TransmissionClient::new(self.config.clone())?;
        client.check_session().await?;
        info!("Connected to Transmission at {}", self.config.rpc_url());
        Ok(Arc::new(client))
    }
}

/// Shared torrent client, connected on first use and reused afterwards.
///
/// Concurrent first callers wait on the same initialization, so at most one
/// client is ever constructed. A failed connection leaves the slot empty and
/// the next caller tries again.
pub struct SharedTorrentClient {
    connector: Box<dyn TorrentConnector>,
    client: OnceCell<Arc<dyn TorrentClient>>,
}

impl SharedTorrentClient {
    pub fn new(connector: impl TorrentConnector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
            client: OnceCell::new(),
        }
    }

    /// Wrap a client that is already connected.
    pub fn from_client(client: Arc<dyn TorrentClient>) -> Self {
        Self::new(client)
    }

    /// Get the client, connecting if this is the first use.
    pub async fn get(&self) -> Result<Arc<dyn TorrentClient>, TorrentClientError> {
        self.client
            .get_or_try_init(|| self.connector.connect())
            .await
            .map(Arc::clone)
    }

    /// Whether a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }
}
