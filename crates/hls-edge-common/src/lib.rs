//! hls-edge-common: types shared by the manifest core and the edge proxy.
//!
//! - **Device profile**: the capability snapshot a lookup service returns for
//!   a user-agent
//! - **Error handling**: the request-level error kinds and result alias
//!
//! # Examples
//!
//! ```
//! use hls_edge_common::{DeviceProfile, Error, Result};
//!
//! let profile = DeviceProfile::new(1080, 1920);
//! assert_eq!(profile.target_dimension(), 1920);
//!
//! fn lookup() -> Result<DeviceProfile> {
//!     Err(Error::resolution("lookup service unreachable"))
//! }
//! assert!(lookup().is_err());
//! ```

pub mod error;
pub mod types;

pub use error::{BoxError, Error, Result};
pub use types::*;
