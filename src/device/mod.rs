//! Device profile resolution.
//!
//! A [`DeviceResolver`] turns the request's user-agent string into a
//! [`DeviceProfile`]. The proxy uses [`DdrClient`], which asks a device
//! description repository over HTTP; [`StaticResolver`] answers with a fixed
//! profile for offline use.

mod client;
mod document;

pub use client::DdrClient;
pub use document::profile_from_document;

use hls_edge_common::DeviceProfile;
use reqwest::StatusCode;

/// Why a device profile could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("request to device lookup service failed")]
    Request(#[source] reqwest::Error),

    #[error("device lookup service returned {0}")]
    Status(StatusCode),

    #[error("device lookup response is not valid JSON")]
    Decode(#[source] reqwest::Error),

    #[error("device lookup response has no result.attributes object")]
    MissingAttributes,

    #[error("device lookup response has no display size for a non-desktop device")]
    MissingDisplay,
}

impl From<ResolutionError> for hls_edge_common::Error {
    fn from(err: ResolutionError) -> Self {
        Self::resolution(err)
    }
}

/// Maps a user-agent string to a device profile.
#[async_trait::async_trait]
pub trait DeviceResolver: Send + Sync {
    /// Look up the profile of the device sending `user_agent`.
    async fn resolve(&self, user_agent: &str) -> Result<DeviceProfile, ResolutionError>;
}

/// Resolver that returns the same profile for every user agent.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    profile: DeviceProfile,
}

impl StaticResolver {
    pub fn new(profile: DeviceProfile) -> Self {
        Self { profile }
    }
}

#[async_trait::async_trait]
impl DeviceResolver for StaticResolver {
    async fn resolve(&self, _user_agent: &str) -> Result<DeviceProfile, ResolutionError> {
        Ok(self.profile.clone())
    }
}
