//! Variant selection policy.
//!
//! Maps a device profile to the ordering and capping rules the writer applies.

use hls_edge_common::DeviceProfile;
use std::fmt;
use std::str::FromStr;

/// Which variant ends up first in the rewritten playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum PrimaryOrder {
    /// Highest bandwidth first.
    HighestFirst,
    /// Lowest bandwidth first; the only ascending order.
    LowestFirst,
    /// The median-bandwidth variant first.
    MiddleFirst,
    /// Best variant that fits the cap dimension first.
    CappedBest,
}

impl fmt::Display for PrimaryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighestFirst => write!(f, "highest"),
            Self::LowestFirst => write!(f, "lowest"),
            Self::MiddleFirst => write!(f, "middle"),
            Self::CappedBest => write!(f, "capped"),
        }
    }
}

impl FromStr for PrimaryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "highest" | "highest-first" => Ok(Self::HighestFirst),
            "lowest" | "lowest-first" => Ok(Self::LowestFirst),
            "middle" | "middle-first" => Ok(Self::MiddleFirst),
            "capped" | "capped-best" => Ok(Self::CappedBest),
            other => Err(format!("unknown order '{}'", other)),
        }
    }
}

/// Ordering and capping rules for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionPolicy {
    /// Head-selection and sort direction.
    pub primary_order: PrimaryOrder,
    /// Drop variants larger than `cap_dimension`.
    pub cap_enabled: bool,
    /// Screen dimension used for capping and for the capped-best search.
    pub cap_dimension: u32,
}

impl SelectionPolicy {
    /// Create a policy without capping.
    pub fn new(primary_order: PrimaryOrder, cap_dimension: u32) -> Self {
        Self {
            primary_order,
            cap_enabled: false,
            cap_dimension,
        }
    }

    /// Create a policy that drops variants larger than `cap_dimension`.
    pub fn capped(primary_order: PrimaryOrder, cap_dimension: u32) -> Self {
        Self {
            primary_order,
            cap_enabled: true,
            cap_dimension,
        }
    }
}

/// Thresholds for the decision procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct DecisionRules {
    /// iOS major versions below this are legacy.
    pub ios_legacy_below: u32,
    /// Android major versions below this are legacy.
    pub android_legacy_below: u32,
    /// Devices released before this year are legacy.
    pub legacy_release_year_below: u32,
    /// Target dimension assumed for desktop browsers.
    pub desktop_dimension: u32,
}

impl Default for DecisionRules {
    fn default() -> Self {
        Self {
            ios_legacy_below: 7,
            android_legacy_below: 6,
            legacy_release_year_below: 2012,
            desktop_dimension: 1280,
        }
    }
}

impl DecisionRules {
    /// Whether a non-desktop device is old enough to need the smallest variant.
    ///
    /// An unknown OS version or release year never makes a device legacy.
    pub fn is_legacy(&self, profile: &DeviceProfile) -> bool {
        let version_below = |limit: u32| profile.os_version_major.is_some_and(|v| v < limit);

        (profile.os_is("iOS") && version_below(self.ios_legacy_below))
            || (profile.os_is("Android") && version_below(self.android_legacy_below))
            || profile
                .release_year
                .is_some_and(|year| year < self.legacy_release_year_below)
    }
}

/// Decide the selection policy for a device using the default thresholds.
pub fn decide(profile: &DeviceProfile, variant_count: usize) -> SelectionPolicy {
    decide_with(profile, variant_count, &DecisionRules::default())
}

/// Decide the selection policy for a device.
///
/// - desktops: capped-best search at `rules.desktop_dimension`, no filtering
/// - legacy mobiles: lowest first, filtered to the screen size
/// - other mobiles: capped-best search at the screen size, no filtering
pub fn decide_with(
    profile: &DeviceProfile,
    variant_count: usize,
    rules: &DecisionRules,
) -> SelectionPolicy {
    let target = profile.target_dimension();

    let policy = if profile.is_desktop {
        SelectionPolicy::new(PrimaryOrder::CappedBest, rules.desktop_dimension)
    } else if rules.is_legacy(profile) {
        SelectionPolicy::capped(PrimaryOrder::LowestFirst, target)
    } else {
        SelectionPolicy::new(PrimaryOrder::CappedBest, target)
    };

    tracing::debug!(
        device = %profile,
        variant_count,
        order = %policy.primary_order,
        cap_enabled = policy.cap_enabled,
        cap_dimension = policy.cap_dimension,
        "Selected variant policy"
    );

    policy
}
