//! hls-edge-manifest: device-aware rewriting of HLS master playlists.
//!
//! This crate is the pure core of hls-edge. It has no I/O and no async code;
//! every function is a deterministic transformation of its inputs.
//!
//! # Modules
//!
//! - `hls` - master playlist parsing, variant arrangement and serialization
//! - `policy` - mapping a device profile to a variant selection policy
//!
//! # Pipeline
//!
//! 1. [`parse`] turns playlist text into an ordered list of [`Variant`]s
//! 2. [`decide`] maps the requesting device's [`DeviceProfile`] to a
//!    [`SelectionPolicy`]
//! 3. [`write`] filters and reorders the variants according to the policy and
//!    renders a new master playlist
//!
//! ```
//! use hls_edge_manifest::{decide, parse, write, DeviceProfile, LineEnding};
//!
//! let text = "#EXTM3U\n\
//!     #EXT-X-STREAM-INF:BANDWIDTH=3000000,RESOLUTION=1920x1080\nhigh.m3u8\n\
//!     #EXT-X-STREAM-INF:BANDWIDTH=600000,RESOLUTION=640x360\nlow.m3u8\n";
//!
//! let variants = parse(text).unwrap();
//! let policy = decide(&DeviceProfile::new(640, 360).with_release_year(2010), variants.len());
//! let output = write(&variants, &policy, LineEnding::detect(text));
//!
//! assert_eq!(
//!     output,
//!     "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-STREAM-INF:BANDWIDTH=600000,RESOLUTION=640x360\nlow.m3u8\n"
//! );
//! ```

pub mod error;
pub mod hls;
pub mod policy;

pub use error::{ParseError, Result};
pub use hls::{
    arrange, is_master_playlist, parse, serialize, write, LineEnding, Resolution, Variant,
};
pub use hls_edge_common::DeviceProfile;
pub use policy::{decide, decide_with, DecisionRules, PrimaryOrder, SelectionPolicy};
