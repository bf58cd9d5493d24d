//! HLS master playlist handling.
//!
//! Parses `#EXT-X-STREAM-INF` variant entries and renders rearranged master
//! playlists.

mod parser;
mod variant;
mod writer;

pub use parser::{is_master_playlist, parse};
pub use variant::{LineEnding, Resolution, Variant};
pub use writer::{arrange, serialize, write, HIGH_BITRATE_BPS, PLAYLIST_VERSION};

/// Tag introducing a variant stream in a master playlist.
pub(crate) const STREAM_INF_TAG: &str = "#EXT-X-STREAM-INF:";
