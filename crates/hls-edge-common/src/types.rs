//! Device capability types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability snapshot of the device making a playlist request.
///
/// Built fresh for every request by a device resolver and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Screen width in pixels.
    pub display_width: u32,
    /// Screen height in pixels.
    pub display_height: u32,
    /// Whether the device is a desktop browser.
    pub is_desktop: bool,
    /// Operating system name (e.g. "iOS", "Android").
    #[serde(default)]
    pub os_name: Option<String>,
    /// Major version of the operating system.
    #[serde(default)]
    pub os_version_major: Option<u32>,
    /// Year the device model was released.
    #[serde(default)]
    pub release_year: Option<u32>,
}

impl DeviceProfile {
    /// Create a non-desktop profile with the given screen size and no OS data.
    pub fn new(display_width: u32, display_height: u32) -> Self {
        Self {
            display_width,
            display_height,
            is_desktop: false,
            os_name: None,
            os_version_major: None,
            release_year: None,
        }
    }

    /// Create a desktop profile with unknown screen size.
    pub fn desktop() -> Self {
        Self {
            is_desktop: true,
            ..Self::new(0, 0)
        }
    }

    /// Set the operating system name and major version.
    #[must_use]
    pub fn with_os(mut self, name: impl Into<String>, version_major: Option<u32>) -> Self {
        self.os_name = Some(name.into());
        self.os_version_major = version_major;
        self
    }

    /// Set the release year.
    #[must_use]
    pub fn with_release_year(mut self, year: u32) -> Self {
        self.release_year = Some(year);
        self
    }

    /// The larger of the two screen dimensions.
    pub fn target_dimension(&self) -> u32 {
        self.display_width.max(self.display_height)
    }

    /// Whether the OS name matches `name`, ignoring ASCII case.
    pub fn os_is(&self, name: &str) -> bool {
        self.os_name
            .as_deref()
            .is_some_and(|os| os.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_desktop { "desktop" } else { "mobile" };
        write!(f, "{} {}x{}", kind, self.display_width, self.display_height)?;
        if let Some(ref os) = self.os_name {
            write!(f, " {}", os)?;
            if let Some(major) = self.os_version_major {
                write!(f, " {}", major)?;
            }
        }
        if let Some(year) = self.release_year {
            write!(f, " ({})", year)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_dimension_uses_larger_side() {
        assert_eq!(DeviceProfile::new(640, 360).target_dimension(), 640);
        assert_eq!(DeviceProfile::new(1080, 2340).target_dimension(), 2340);
    }

    #[test]
    fn test_os_is_case_insensitive() {
        let profile = DeviceProfile::new(320, 480).with_os("iOS", Some(6));
        assert!(profile.os_is("ios"));
        assert!(profile.os_is("iOS"));
        assert!(!profile.os_is("Android"));
        assert!(!DeviceProfile::new(1, 1).os_is("iOS"));
    }

    #[test]
    fn test_display() {
        let profile = DeviceProfile::new(640, 360)
            .with_os("Android", Some(5))
            .with_release_year(2011);
        assert_eq!(profile.to_string(), "mobile 640x360 Android 5 (2011)");
        assert_eq!(DeviceProfile::desktop().to_string(), "desktop 0x0");
    }

    #[test]
    fn test_json_roundtrip_defaults_optional_fields() {
        let json = r#"{"display_width":1280,"display_height":720,"is_desktop":true}"#;
        let profile: DeviceProfile = serde_json::from_str(json).unwrap();
        assert!(profile.is_desktop);
        assert_eq!(profile.os_name, None);
        assert_eq!(profile.release_year, None);
    }
}
