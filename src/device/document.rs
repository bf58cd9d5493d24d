//! Decoding of device description documents.
//!
//! The classify endpoint answers with
//! `{"result": {"attributes": {"displayWidth": "1080", "is_desktop": "false", ...}}}`.
//! Values arrive as strings or as native JSON types depending on the
//! repository build, so every accessor accepts both.

use super::ResolutionError;
use hls_edge_common::DeviceProfile;
use serde_json::{Map, Value};

const DISPLAY_WIDTH: &str = "displayWidth";
const DISPLAY_HEIGHT: &str = "displayHeight";
const IS_DESKTOP: &str = "is_desktop";
const DEVICE_OS: &str = "device_os";
const DEVICE_OS_VERSION: &str = "device_os_version";
const RELEASE_YEAR: &str = "release-year";

/// Build a device profile from a classify response document.
pub fn profile_from_document(document: &Value) -> Result<DeviceProfile, ResolutionError> {
    let attributes = document
        .pointer("/result/attributes")
        .and_then(Value::as_object)
        .ok_or(ResolutionError::MissingAttributes)?;

    let is_desktop = flag(attributes, IS_DESKTOP);
    let width = number(attributes, DISPLAY_WIDTH);
    let height = number(attributes, DISPLAY_HEIGHT);

    let (display_width, display_height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        _ if is_desktop => (width.unwrap_or(0), height.unwrap_or(0)),
        _ => return Err(ResolutionError::MissingDisplay),
    };

    Ok(DeviceProfile {
        display_width,
        display_height,
        is_desktop,
        os_name: text(attributes, DEVICE_OS),
        os_version_major: number(attributes, DEVICE_OS_VERSION),
        release_year: number(attributes, RELEASE_YEAR),
    })
}

/// Leading integer of a numeric attribute (`"6.0.1"` reads as 6).
fn number(attributes: &Map<String, Value>, key: &str) -> Option<u32> {
    match attributes.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

fn flag(attributes: &Map<String, Value>, key: &str) -> bool {
    match attributes.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn text(attributes: &Map<String, Value>, key: &str) -> Option<String> {
    attributes
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
