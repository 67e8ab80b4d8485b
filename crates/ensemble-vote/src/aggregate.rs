//! Per-pixel color frequency aggregation across a raster group.
//!
//! For every pixel position, counts how often each exact RGBA value occurs
//! across the group and records the winner and runner-up. The frequency
//! table itself is ephemeral; only the extracted [`PixelStat`] survives.

use std::collections::HashMap;
use std::fmt;

use crate::color::Rgba;
use crate::raster::Raster;

/// Vote summary for one pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelStat {
    /// The most frequent color at this position.
    pub top: Rgba,
    /// How many rasters voted for `top`.
    pub top_count: u32,
    /// The most frequent color distinct from `top`. Equals `top` when the
    /// group is unanimous (then `second_count` is 0).
    pub second: Rgba,
    /// How many rasters voted for `second`; 0 when the group is unanimous.
    pub second_count: u32,
    /// Group size, identical for every position of one aggregation.
    pub total: u32,
}

/// Grid of [`PixelStat`] values, one per pixel, row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatGrid {
    stats: Vec<PixelStat>,
    width: u32,
    height: u32,
}

impl StatGrid {
    /// Grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The stat at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> &PixelStat {
        assert!(x < self.width && y < self.height, "stat out of bounds");
        &self.stats[y as usize * self.width as usize + x as usize]
    }

    /// All stats in row-major order.
    #[inline]
    pub fn stats(&self) -> &[PixelStat] {
        &self.stats
    }
}

/// Error produced when a raster group cannot be aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The group contains no rasters.
    EmptyGroup,
    /// A raster's dimensions differ from the first raster's.
    DimensionMismatch {
        /// Index of the offending raster within the group.
        index: usize,
        /// Dimensions of the first raster.
        expected: (u32, u32),
        /// Dimensions of the offending raster.
        found: (u32, u32),
    },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::EmptyGroup => {
                write!(f, "raster group is empty")
            }
            AggregateError::DimensionMismatch {
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "raster {} dimensions ({}x{}) differ from base ({}x{})",
                    index, found.0, found.1, expected.0, expected.1
                )
            }
        }
    }
}

impl std::error::Error for AggregateError {}

/// Aggregate per-pixel color votes across a group of equally-sized rasters.
///
/// Every raster must match the first raster's dimensions; this is checked
/// up front, before any pixel work. The result grid has the group's shared
/// dimensions, with one [`PixelStat`] per position.
///
/// Ties are broken deterministically: of two colors with equal counts, the
/// one with the smaller [`Rgba::packed`] value wins. This applies to the
/// winner and the runner-up alike, so the result is independent of raster
/// order and of frequency-table iteration order.
pub fn aggregate(group: &[Raster]) -> Result<StatGrid, AggregateError> {
    let first = group.first().ok_or(AggregateError::EmptyGroup)?;
    let (width, height) = first.dimensions();

    for (index, raster) in group.iter().enumerate().skip(1) {
        if raster.dimensions() != (width, height) {
            return Err(AggregateError::DimensionMismatch {
                index,
                expected: (width, height),
                found: raster.dimensions(),
            });
        }
    }

    let total = group.len() as u32;
    let mut stats = Vec::with_capacity(width as usize * height as usize);
    let mut freq: HashMap<Rgba, u32> = HashMap::with_capacity(group.len());

    for y in 0..height {
        for x in 0..width {
            freq.clear();
            for raster in group {
                *freq.entry(raster.get(x, y)).or_insert(0) += 1;
            }
            stats.push(extract_top_two(&freq, first.get(x, y), total));
        }
    }

    Ok(StatGrid {
        stats,
        width,
        height,
    })
}

/// Pick the winner and runner-up from the frequency table.
///
/// `seed` is a color known to be present in the table (any vote from the
/// first raster). It starts the scan at count 0, so every real entry has
/// a higher count and the first one always replaces it; the scan cannot
/// come up empty and carries no panic path.
fn extract_top_two(freq: &HashMap<Rgba, u32>, seed: Rgba, total: u32) -> PixelStat {
    let mut top = (seed, 0);
    for (&color, &count) in freq {
        if beats(count, color, Some(top)) {
            top = (color, count);
        }
    }
    let (top, top_count) = top;

    let mut second = None;
    for (&color, &count) in freq {
        if color != top && beats(count, color, second) {
            second = Some((color, count));
        }
    }
    let (second, second_count) = second.unwrap_or((top, 0));

    PixelStat {
        top,
        top_count,
        second,
        second_count,
        total,
    }
}

/// Whether `(count, color)` ranks above the current best candidate:
/// higher count first, smaller packed RGBA value on equal counts.
#[inline]
fn beats(count: u32, color: Rgba, best: Option<(Rgba, u32)>) -> bool {
    match best {
        None => true,
        Some((best_color, best_count)) => {
            count > best_count || (count == best_count && color.packed() < best_color.packed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn solid(color: Rgba, width: u32, height: u32) -> Raster {
        Raster::new(
            vec![color; width as usize * height as usize],
            width,
            height,
        )
    }

    #[test]
    fn test_empty_group_rejected() {
        assert_eq!(aggregate(&[]), Err(AggregateError::EmptyGroup));
    }

    #[test]
    fn test_dimension_mismatch_rejected_before_pixel_work() {
        let group = vec![
            solid(Rgba::WHITE, 4, 4),
            solid(Rgba::WHITE, 4, 5),
        ];
        assert_eq!(
            aggregate(&group),
            Err(AggregateError::DimensionMismatch {
                index: 1,
                expected: (4, 4),
                found: (4, 5),
            })
        );
    }

    #[test]
    fn test_single_raster_group() {
        let red = Rgba::opaque(200, 10, 10);
        let stats = aggregate(&[solid(red, 2, 2)]).unwrap();

        for stat in stats.stats() {
            assert_eq!(
                *stat,
                PixelStat {
                    top: red,
                    top_count: 1,
                    second: red,
                    second_count: 0,
                    total: 1,
                }
            );
        }
    }

    #[test]
    fn test_majority_and_runner_up() {
        let red = Rgba::opaque(255, 0, 0);
        let green = Rgba::opaque(0, 255, 0);
        let group = vec![solid(red, 1, 1), solid(red, 1, 1), solid(green, 1, 1)];

        let stats = aggregate(&group).unwrap();
        let stat = stats.get(0, 0);
        assert_eq!(stat.top, red);
        assert_eq!(stat.top_count, 2);
        assert_eq!(stat.second, green);
        assert_eq!(stat.second_count, 1);
        assert_eq!(stat.total, 3);
    }

    #[test]
    fn test_first_raster_color_loses_to_a_bigger_count() {
        let red = Rgba::opaque(255, 0, 0);
        let green = Rgba::opaque(0, 255, 0);
        // The scan starts from the first raster's color; it must still be
        // outvoted like any other entry.
        let group = vec![solid(red, 1, 1), solid(green, 1, 1), solid(green, 1, 1)];

        let stat = *aggregate(&group).unwrap().get(0, 0);
        assert_eq!(stat.top, green);
        assert_eq!(stat.top_count, 2);
        assert_eq!(stat.second, red);
        assert_eq!(stat.second_count, 1);
    }

    #[test]
    fn test_unanimous_pixel_has_no_runner_up() {
        let blue = Rgba::opaque(0, 0, 255);
        let group = vec![solid(blue, 1, 1), solid(blue, 1, 1), solid(blue, 1, 1)];

        let stat = *aggregate(&group).unwrap().get(0, 0);
        assert_eq!(stat.top, blue);
        assert_eq!(stat.top_count, 3);
        assert_eq!(stat.second, blue);
        assert_eq!(stat.second_count, 0);
    }

    #[test]
    fn test_tie_break_is_smallest_packed_value() {
        let red = Rgba::opaque(255, 0, 0);
        let green = Rgba::opaque(0, 255, 0);
        // 1-1 tie: green packs below red, so green must win regardless of
        // raster order.
        for group in [
            vec![solid(red, 1, 1), solid(green, 1, 1)],
            vec![solid(green, 1, 1), solid(red, 1, 1)],
        ] {
            let stat = *aggregate(&group).unwrap().get(0, 0);
            assert_eq!(stat.top, green);
            assert_eq!(stat.top_count, 1);
            assert_eq!(stat.second, red);
            assert_eq!(stat.second_count, 1);
        }
    }

    #[test]
    fn test_runner_up_tie_break() {
        let red = Rgba::opaque(255, 0, 0);
        let green = Rgba::opaque(0, 255, 0);
        let blue = Rgba::opaque(0, 0, 255);
        // Red wins 2-1-1; blue packs below green, so blue is the runner-up.
        let group = vec![
            solid(red, 1, 1),
            solid(red, 1, 1),
            solid(green, 1, 1),
            solid(blue, 1, 1),
        ];

        let stat = *aggregate(&group).unwrap().get(0, 0);
        assert_eq!(stat.top, red);
        assert_eq!(stat.second, blue);
        assert_eq!(stat.second_count, 1);
    }

    #[test]
    fn test_alpha_distinguishes_votes() {
        let opaque = Rgba::new(10, 10, 10, 255);
        let translucent = Rgba::new(10, 10, 10, 128);
        let group = vec![
            solid(opaque, 1, 1),
            solid(opaque, 1, 1),
            solid(translucent, 1, 1),
        ];

        let stat = *aggregate(&group).unwrap().get(0, 0);
        assert_eq!(stat.top, opaque);
        assert_eq!(stat.top_count, 2);
        assert_eq!(stat.second, translucent);
        assert_eq!(stat.second_count, 1);
    }

    #[test]
    fn test_positions_are_independent() {
        let a = Raster::new(
            vec![Rgba::opaque(1, 0, 0), Rgba::opaque(2, 0, 0)],
            2,
            1,
        );
        let b = Raster::new(
            vec![Rgba::opaque(1, 0, 0), Rgba::opaque(3, 0, 0)],
            2,
            1,
        );

        let stats = aggregate(&[a, b]).unwrap();
        assert_eq!(stats.get(0, 0).top_count, 2);
        assert_eq!(stats.get(1, 0).top_count, 1);
        // 2 packs below 3, so pixel (1,0) resolves its tie toward 2.
        assert_eq!(stats.get(1, 0).top, Rgba::opaque(2, 0, 0));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AggregateError::EmptyGroup.to_string(), "raster group is empty");
        assert_eq!(
            AggregateError::DimensionMismatch {
                index: 2,
                expected: (4, 4),
                found: (4, 5),
            }
            .to_string(),
            "raster 2 dimensions (4x5) differ from base (4x4)"
        );
    }
}
