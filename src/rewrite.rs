//! Playlist rewriting for one request: parse, decide, write.

use crate::config::LineEndingMode;
use hls_edge_common::{DeviceProfile, Result};
use hls_edge_manifest::{arrange, decide_with, parse, serialize, DecisionRules, SelectionPolicy, Variant};

/// Outcome of a playlist rewrite.
#[derive(Debug, Clone)]
pub struct Rewritten {
    pub body: String,
    pub policy: SelectionPolicy,
    pub variants_in: usize,
    pub variants_out: usize,
}

/// Rewrite a master playlist for the given device.
pub fn rewrite_playlist(
    text: &str,
    profile: &DeviceProfile,
    rules: &DecisionRules,
    line_ending: LineEndingMode,
) -> Result<Rewritten> {
    let variants = parse(text)?;
    let policy = decide_with(profile, variants.len(), rules);
    Ok(render(text, &variants, policy, line_ending))
}

/// Rewrite a master playlist with an explicit policy.
pub fn rewrite_with_policy(
    text: &str,
    policy: SelectionPolicy,
    line_ending: LineEndingMode,
) -> Result<Rewritten> {
    let variants = parse(text)?;
    Ok(render(text, &variants, policy, line_ending))
}

fn render(
    text: &str,
    variants: &[Variant],
    policy: SelectionPolicy,
    line_ending: LineEndingMode,
) -> Rewritten {
    let arranged = arrange(variants, &policy);
    let body = serialize(&arranged, line_ending.resolve(text));
    let variants_out = arranged.len();

    tracing::debug!(
        variants_in = variants.len(),
        variants_out,
        order = %policy.primary_order,
        "Rewrote master playlist"
    );

    Rewritten {
        body,
        policy,
        variants_in: variants.len(),
        variants_out,
    }
}
