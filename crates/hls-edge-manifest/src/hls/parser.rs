//! Master playlist parser.
//!
//! A single pass over the playlist lines. Each `#EXT-X-STREAM-INF` tag is
//! paired with the next non-blank line as its URI; everything else in the
//! document is ignored.

use super::variant::{Resolution, Variant};
use super::STREAM_INF_TAG;
use crate::error::{ParseError, Result};

/// What follows a stream-info tag.
enum Following<'a> {
    Uri(&'a str),
    Tag,
    End,
}

/// Parse the variant streams of a master playlist, in source order.
///
/// Stream-info tags without a usable BANDWIDTH are skipped. A document with no
/// variants yields an empty vector. The only error is a stream-info tag that
/// reaches the end of input without a URI line.
pub fn parse(text: &str) -> Result<Vec<Variant>> {
    let mut variants = Vec::new();
    let mut lines = text.lines().enumerate().peekable();

    while let Some((index, line)) = lines.next() {
        let Some(attributes) = line.trim().strip_prefix(STREAM_INF_TAG) else {
            continue;
        };
        let line_number = index + 1;
        let info = StreamInf::parse(attributes);

        let following = loop {
            let Some(&(_, next)) = lines.peek() else {
                break Following::End;
            };
            if next.trim().is_empty() {
                lines.next();
                continue;
            }
            if next.trim_start().starts_with('#') {
                break Following::Tag;
            }
            lines.next();
            break Following::Uri(next.trim());
        };

        let Some(bandwidth) = info.bandwidth else {
            tracing::debug!(line = line_number, "Skipping stream-info tag without BANDWIDTH");
            continue;
        };

        match following {
            Following::Uri(uri) => variants.push(Variant {
                bandwidth,
                resolution: info.resolution,
                extra_attributes: info.extra_attributes,
                uri: uri.to_string(),
            }),
            Following::Tag => {
                tracing::warn!(line = line_number, "Stream-info tag followed by another tag, skipping");
            }
            Following::End => return Err(ParseError::MissingUri { line: line_number }),
        }
    }

    Ok(variants)
}

/// Whether `text` lists at least one variant stream.
///
/// Media playlists (segment lists) return false.
pub fn is_master_playlist(text: &str) -> bool {
    text.lines()
        .any(|line| line.trim_start().starts_with(STREAM_INF_TAG))
}

/// Attributes of one stream-info tag.
#[derive(Debug, Default)]
struct StreamInf {
    bandwidth: Option<u64>,
    resolution: Option<Resolution>,
    extra_attributes: Option<String>,
}

impl StreamInf {
    fn parse(list: &str) -> Self {
        let mut info = Self::default();
        let mut extra = Vec::new();

        for attribute in split_attributes(list) {
            let (name, value) = attribute.split_once('=').unwrap_or((attribute, ""));
            match name.trim() {
                "BANDWIDTH" if info.bandwidth.is_none() => match value.trim().parse() {
                    Ok(bandwidth) => info.bandwidth = Some(bandwidth),
                    Err(_) => extra.push(attribute),
                },
                "RESOLUTION" if info.resolution.is_none() => match value.trim().parse() {
                    Ok(resolution) => info.resolution = Some(resolution),
                    Err(()) => extra.push(attribute),
                },
                _ => extra.push(attribute),
            }
        }

        if !extra.is_empty() {
            info.extra_attributes = Some(extra.join(","));
        }
        info
    }
}

/// Split an attribute list on commas that are not inside a quoted string.
fn split_attributes(list: &str) -> Vec<&str> {
    let mut attributes = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                attributes.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    attributes.push(&list[start..]);

    attributes
        .into_iter()
        .map(str::trim)
        .filter(|attribute| !attribute.is_empty())
        .collect()
}
