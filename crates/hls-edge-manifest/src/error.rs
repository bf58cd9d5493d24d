//! Error types for hls-edge-manifest.

use thiserror::Error;

/// Result type for playlist parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A master playlist that is structurally broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A stream-info tag with a bandwidth reached the end of input without a URI line.
    #[error("#EXT-X-STREAM-INF on line {line} is not followed by a URI line")]
    MissingUri { line: usize },
}

impl From<ParseError> for hls_edge_common::Error {
    fn from(err: ParseError) -> Self {
        Self::parse(err)
    }
}
