//! Domain-critical regression tests for ensemble-vote.
//!
//! These tests pin down the cross-module properties of the voting and
//! blending pipeline, not just happy paths. Each test documents the class
//! of bug it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::aggregate::{aggregate, PixelStat};
    use crate::blend::{blend, RenderPolicy};
    use crate::color::Rgba;
    use crate::raster::Raster;

    fn solid(color: Rgba) -> Raster {
        Raster::new(vec![color], 1, 1)
    }

    /// Squared RGB distance, used to measure proximity to the top color.
    fn distance(a: Rgba, b: Rgba) -> u32 {
        let d = |x: u8, y: u8| {
            let diff = x as i32 - y as i32;
            (diff * diff) as u32
        };
        d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
    }

    // ========================================================================
    // Size-1 groups must pass through unchanged
    // ========================================================================

    /// If this breaks, it means: a blending policy is no longer the identity
    /// at full confidence. A single-raster group has conf = 1 under every
    /// white-fading policy and no runner-up under smooth, so each policy
    /// must reproduce the input color exactly.
    #[test]
    fn test_single_raster_identity_under_every_policy() {
        let colors = [
            Rgba::opaque(0, 0, 0),
            Rgba::opaque(255, 255, 255),
            Rgba::opaque(17, 130, 244),
            Rgba::opaque(200, 3, 77),
        ];
        for color in colors {
            let stats = aggregate(&[solid(color)]).unwrap();
            for policy in RenderPolicy::ALL {
                assert_eq!(
                    blend(stats.get(0, 0), policy),
                    Rgba::opaque(color.r, color.g, color.b),
                    "policy {policy} altered a size-1 group"
                );
            }
        }
    }

    /// If this breaks, it means: unanimous pixels are being diluted. When
    /// every member votes the same color, conf = 1 and second_count = 0,
    /// so all four policies must output that color exactly.
    #[test]
    fn test_unanimous_group_identity_under_every_policy() {
        let color = Rgba::opaque(31, 64, 127);
        let group = vec![solid(color); 7];
        let stats = aggregate(&group).unwrap();
        for policy in RenderPolicy::ALL {
            assert_eq!(blend(stats.get(0, 0), policy), color);
        }
    }

    // ========================================================================
    // Monotonicity of agreement
    // ========================================================================

    /// If this breaks, it means: more agreement is moving the output AWAY
    /// from the dominant color. For white, dominance and confidence,
    /// raising top_count at fixed total must never increase the distance
    /// between the blend and the top color.
    #[test]
    fn test_more_agreement_never_moves_away_from_top() {
        let top = Rgba::opaque(180, 40, 90);
        let other = Rgba::opaque(10, 200, 10);
        let total = 10;

        for policy in [
            RenderPolicy::White,
            RenderPolicy::Dominance,
            RenderPolicy::Confidence,
        ] {
            let mut prev = u32::MAX;
            for top_count in 1..=total {
                let stat = PixelStat {
                    top,
                    top_count,
                    second: other,
                    second_count: total - top_count,
                    total,
                };
                let dist = distance(blend(&stat, policy), top);
                assert!(
                    dist <= prev,
                    "policy {policy}: distance to top grew from {prev} to {dist} \
                     when top_count rose to {top_count}/{total}"
                );
                prev = dist;
            }
        }
    }

    /// If this breaks, it means: the confidence rescale lost its clamp.
    /// Agreement at or below 50% must render pure white, not a negative
    /// or wrapped blend weight.
    #[test]
    fn test_confidence_is_pure_white_up_to_half_agreement() {
        let top = Rgba::opaque(0, 0, 0);
        let other = Rgba::opaque(50, 50, 50);
        for (top_count, total) in [(1, 2), (1, 3), (2, 4), (3, 6), (5, 10)] {
            let stat = PixelStat {
                top,
                top_count,
                second: other,
                second_count: total - top_count,
                total,
            };
            assert_eq!(
                blend(&stat, RenderPolicy::Confidence),
                Rgba::WHITE,
                "top_count {top_count}/{total} should clamp to white"
            );
        }
    }

    // ========================================================================
    // Reference numbers for the 2-of-3 red/green group
    // ========================================================================

    /// If this breaks, it means: the end-to-end arithmetic drifted. A group
    /// of three 1x1 rasters voting red, red, green has conf = 2/3 under
    /// white (green and blue channels fade a third toward 255) and weights
    /// 2/3 / 1/3 under smooth.
    #[test]
    fn test_reference_two_of_three_group() {
        let red = Rgba::opaque(255, 0, 0);
        let green = Rgba::opaque(0, 255, 0);
        let stats = aggregate(&[solid(red), solid(red), solid(green)]).unwrap();

        let stat = stats.get(0, 0);
        assert_eq!(stat.top, red);
        assert_eq!(stat.top_count, 2);
        assert_eq!(stat.second, green);
        assert_eq!(stat.second_count, 1);
        assert_eq!(stat.total, 3);

        assert_eq!(blend(stat, RenderPolicy::White), Rgba::opaque(255, 85, 85));
        assert_eq!(blend(stat, RenderPolicy::Smooth), Rgba::opaque(170, 85, 0));
    }

    // ========================================================================
    // Determinism
    // ========================================================================

    /// If this breaks, it means: tie-breaking became order-dependent again
    /// (the classic map-iteration-order bug). Shuffling the group must not
    /// change any stat, and re-running must reproduce the same grid.
    #[test]
    fn test_aggregation_is_order_independent_and_repeatable() {
        let a = Rgba::opaque(9, 9, 9);
        let b = Rgba::opaque(9, 9, 10);
        let c = Rgba::opaque(200, 0, 0);
        let group = vec![solid(a), solid(b), solid(c), solid(b), solid(a)];

        let baseline = aggregate(&group).unwrap();
        let rotations = [
            vec![solid(b), solid(c), solid(b), solid(a), solid(a)],
            vec![solid(c), solid(a), solid(a), solid(b), solid(b)],
        ];
        for rotated in rotations {
            let stats = aggregate(&rotated).unwrap();
            assert_eq!(stats.get(0, 0), baseline.get(0, 0));
        }

        let rerun = aggregate(&group).unwrap();
        assert_eq!(rerun.get(0, 0), baseline.get(0, 0));
        // a packs below b; the 2-2 tie must resolve to a.
        assert_eq!(baseline.get(0, 0).top, a);
        assert_eq!(baseline.get(0, 0).second, b);
    }
}
