//! Canonical acquisition model.
//!
//! Both sources (torrent client and incoming directory) are rendered into
//! the types defined here. File kinds and display names are derived by the
//! pure helpers in [`classify`] and [`normalize`].

mod classify;
mod collection;
mod error;
mod normalize;
mod types;

pub use classify::classify;
pub use collection::{merge, AcquisitionSet};
pub use error::AcquisitionError;
pub use normalize::normalize;
pub use types::*;
