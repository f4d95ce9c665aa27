//! Torrent client abstraction.
//!
//! This module provides a `TorrentClient` trait for the download backend,
//! a Transmission RPC implementation, and the lazily connected handle shared
//! by every request.

mod shared;
mod transmission;
mod types;

pub use shared::{SharedTorrentClient, TorrentConnector, TransmissionConnector};
pub use transmission::TransmissionClient;
pub use types::*;
