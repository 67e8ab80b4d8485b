//! Confidence-weighted color blending policies.
//!
//! Turns one [`PixelStat`] into one output color. Channel arithmetic is
//! per-channel linear interpolation in f64, truncated to u8; output alpha
//! is always 255.

use std::fmt;
use std::str::FromStr;

use crate::aggregate::PixelStat;
use crate::color::Rgba;

/// How per-pixel vote statistics become an output color.
///
/// Selected once per run and applied uniformly to every pixel. `White` and
/// `Dominance` are intentionally the same formula under two names; the
/// upstream data product used both and disagreed on which was the default,
/// so both parse and both map to one code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// Fade toward white as agreement drops: `conf = top_count / total`.
    #[default]
    White,
    /// Blend the winner with the runner-up by their vote shares; no white.
    Smooth,
    /// Like `White`, but rescaled so agreement at or below 50% is pure
    /// white: `conf = max(0, 2 * raw - 1)`.
    Confidence,
    /// Alias for `White`.
    Dominance,
}

impl RenderPolicy {
    /// All policies, in parse-name order.
    pub const ALL: [RenderPolicy; 4] = [
        RenderPolicy::White,
        RenderPolicy::Smooth,
        RenderPolicy::Confidence,
        RenderPolicy::Dominance,
    ];

    /// The name accepted by [`FromStr`] and printed by [`fmt::Display`].
    pub fn name(self) -> &'static str {
        match self {
            RenderPolicy::White => "white",
            RenderPolicy::Smooth => "smooth",
            RenderPolicy::Confidence => "confidence",
            RenderPolicy::Dominance => "dominance",
        }
    }
}

impl fmt::Display for RenderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized render policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError(String);

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown render policy '{}' (expected one of: white, smooth, confidence, dominance)",
            self.0
        )
    }
}

impl std::error::Error for ParsePolicyError {}

impl FromStr for RenderPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderPolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| ParsePolicyError(s.to_string()))
    }
}

/// Blend one pixel's vote statistics into an output color.
///
/// Total over all stats produced by a non-empty group: `total >= 1` rules
/// out the confidence division, and `top_count >= 1` rules out the smooth
/// one (`second_count` alone may be 0).
pub fn blend(stat: &PixelStat, policy: RenderPolicy) -> Rgba {
    match policy {
        RenderPolicy::White | RenderPolicy::Dominance => {
            let conf = stat.top_count as f64 / stat.total as f64;
            lerp(stat.top, Rgba::WHITE, conf)
        }
        RenderPolicy::Confidence => {
            let raw = stat.top_count as f64 / stat.total as f64;
            let conf = (2.0 * raw - 1.0).max(0.0);
            lerp(stat.top, Rgba::WHITE, conf)
        }
        RenderPolicy::Smooth => {
            let span = (stat.top_count + stat.second_count) as f64;
            let w1 = stat.top_count as f64 / span;
            lerp(stat.top, stat.second, w1)
        }
    }
}

/// Per-channel `a * w + b * (1 - w)`, truncated to u8, opaque alpha.
#[inline]
fn lerp(a: Rgba, b: Rgba, w: f64) -> Rgba {
    let channel = |a: u8, b: u8| (a as f64 * w + b as f64 * (1.0 - w)) as u8;
    Rgba {
        r: channel(a.r, b.r),
        g: channel(a.g, b.g),
        b: channel(a.b, b.b),
        a: 255,
    }
}
