//! Master playlist writer.
//!
//! Applies a [`SelectionPolicy`] to a list of variants (cap filter, stable
//! bandwidth sort, head selection) and renders the result.

use super::variant::{LineEnding, Variant};
use crate::policy::{PrimaryOrder, SelectionPolicy};

/// Bitrate at or above which the capped-best search steps down one variant.
pub const HIGH_BITRATE_BPS: u64 = 4_000_000;

/// `#EXT-X-VERSION` of rendered playlists.
pub const PLAYLIST_VERSION: u8 = 3;

/// Filter and reorder variants according to `policy`.
///
/// Never drops every variant: if the cap filter would remove all of them, the
/// original list is kept.
pub fn arrange(variants: &[Variant], policy: &SelectionPolicy) -> Vec<Variant> {
    let mut arranged = apply_cap(variants, policy);

    match policy.primary_order {
        PrimaryOrder::LowestFirst => arranged.sort_by(|a, b| a.bandwidth.cmp(&b.bandwidth)),
        _ => arranged.sort_by(|a, b| b.bandwidth.cmp(&a.bandwidth)),
    }

    let head = select_head(&arranged, policy);
    if head > 0 {
        arranged[..=head].rotate_right(1);
    }

    arranged
}

/// Arrange variants according to `policy` and render the playlist.
pub fn write(variants: &[Variant], policy: &SelectionPolicy, line_ending: LineEnding) -> String {
    serialize(&arrange(variants, policy), line_ending)
}

/// Render variants, in the given order, as a master playlist.
///
/// Every line is terminated, including the last one.
pub fn serialize(variants: &[Variant], line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let mut out = String::new();

    out.push_str("#EXTM3U");
    out.push_str(eol);
    out.push_str(&format!("#EXT-X-VERSION:{}", PLAYLIST_VERSION));
    out.push_str(eol);

    for variant in variants {
        out.push_str(&variant.stream_inf());
        out.push_str(eol);
        out.push_str(&variant.uri);
        out.push_str(eol);
    }

    out
}

fn apply_cap(variants: &[Variant], policy: &SelectionPolicy) -> Vec<Variant> {
    if !policy.cap_enabled {
        return variants.to_vec();
    }

    let kept: Vec<Variant> = variants
        .iter()
        .filter(|variant| variant.fits(policy.cap_dimension))
        .cloned()
        .collect();

    if kept.is_empty() && !variants.is_empty() {
        tracing::debug!(
            cap_dimension = policy.cap_dimension,
            "No variant fits the cap, keeping all variants"
        );
        return variants.to_vec();
    }

    kept
}

/// Index of the variant to move to the front of an already sorted list.
fn select_head(sorted: &[Variant], policy: &SelectionPolicy) -> usize {
    match policy.primary_order {
        PrimaryOrder::HighestFirst | PrimaryOrder::LowestFirst => 0,
        PrimaryOrder::MiddleFirst => sorted.len() / 2,
        PrimaryOrder::CappedBest => {
            let Some(fit) = sorted
                .iter()
                .position(|variant| variant.fits(policy.cap_dimension))
            else {
                return 0;
            };

            if sorted[fit].bandwidth >= HIGH_BITRATE_BPS && fit + 1 < sorted.len() {
                fit + 1
            } else {
                fit
            }
        }
    }
}
