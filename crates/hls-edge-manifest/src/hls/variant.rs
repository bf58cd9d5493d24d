//! Variant stream records.

use std::fmt;
use std::str::FromStr;

use super::STREAM_INF_TAG;

/// Video resolution of a variant stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a new resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The larger of width and height.
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ();

    /// Parse the `<width>x<height>` form of the RESOLUTION attribute.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s.split_once('x').ok_or(())?;
        Ok(Self {
            width: width.parse().map_err(|_| ())?,
            height: height.parse().map_err(|_| ())?,
        })
    }
}

/// One variant stream of a master playlist: a stream-info tag plus its URI.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    /// Peak bitrate in bits per second.
    pub bandwidth: u64,
    /// Video resolution, when advertised.
    pub resolution: Option<Resolution>,
    /// Every other attribute of the tag, verbatim and comma separated.
    pub extra_attributes: Option<String>,
    /// URI of the variant's media playlist.
    pub uri: String,
}

impl Variant {
    /// Create a variant with only bandwidth and URI.
    pub fn new(bandwidth: u64, uri: impl Into<String>) -> Self {
        Self {
            bandwidth,
            resolution: None,
            extra_attributes: None,
            uri: uri.into(),
        }
    }

    /// Set the resolution.
    #[must_use]
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Some(Resolution::new(width, height));
        self
    }

    /// Set the passthrough attributes.
    #[must_use]
    pub fn with_extra_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.extra_attributes = Some(attributes.into());
        self
    }

    /// Whether the variant fits within `dimension` pixels on its larger side.
    ///
    /// A variant without a resolution always fits.
    pub fn fits(&self, dimension: u32) -> bool {
        self.resolution
            .map_or(true, |resolution| resolution.max_dimension() <= dimension)
    }

    /// Render the `#EXT-X-STREAM-INF` tag line (without line terminator).
    ///
    /// Attribute order is BANDWIDTH, then RESOLUTION, then the passthrough
    /// attributes.
    pub fn stream_inf(&self) -> String {
        let mut line = format!("{}BANDWIDTH={}", STREAM_INF_TAG, self.bandwidth);
        if let Some(resolution) = self.resolution {
            line.push_str(&format!(",RESOLUTION={}", resolution));
        }
        if let Some(ref extra) = self.extra_attributes {
            line.push(',');
            line.push_str(extra);
        }
        line
    }
}

/// Line terminator used when rendering a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Detect the convention of the first line terminator in `text`.
    ///
    /// Text without any line break is treated as LF.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if text[..pos].ends_with('\r') => Self::CrLf,
            _ => Self::Lf,
        }
    }

    /// The terminator itself.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}
