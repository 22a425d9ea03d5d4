//! Render scale computation
//!
//! Maps the pixel width of the PDF pane and the intrinsic width of the first
//! rendered page to the scale pages are painted at.

use crate::config::ScaleConfig;

/// Scale used until a page has reported its intrinsic width.
pub const UNKNOWN_WIDTH_SCALE: f64 = 1.0;

/// Compute the render scale with the default padding and bounds.
///
/// ```
/// use review_core::scale::compute_scale;
///
/// assert!((compute_scale(1000.0, Some(800.0)) - 1.15).abs() < 1e-9);
/// assert_eq!(compute_scale(200.0, Some(800.0)), 0.5);
/// assert_eq!(compute_scale(640.0, None), 1.0);
/// ```
pub fn compute_scale(pane_width_px: f64, intrinsic_width_px: Option<f64>) -> f64 {
    compute_scale_with(&ScaleConfig::default(), pane_width_px, intrinsic_width_px)
}

/// Compute the render scale with explicit padding and bounds.
///
/// An intrinsic width that is not a positive finite number counts as unknown.
/// Bounds are applied as a floor then a ceiling, so inverted bounds in an
/// unvalidated config yield `max_scale` instead of panicking.
pub fn compute_scale_with(
    config: &ScaleConfig,
    pane_width_px: f64,
    intrinsic_width_px: Option<f64>,
) -> f64 {
    let intrinsic = match intrinsic_width_px {
        Some(w) if w.is_finite() && w > 0.0 => w,
        _ => return UNKNOWN_WIDTH_SCALE,
    };

    let available = pane_width_px - config.padding_px;
    let raw = available / intrinsic;
    if raw.is_nan() {
        return config.min_scale;
    }
    raw.max(config.min_scale).min(config.max_scale)
}

/// Pixel width of the left pane given the container width and its share in percent.
pub fn pane_width_px(container_width_px: f64, left_percent: f64) -> f64 {
    container_width_px * left_percent / 100.0
}

/// Scale rendered as a whole percentage for the status line.
pub fn scale_percent(scale: f64) -> u32 {
    (scale * 100.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_within_bounds_is_unchanged() {
        let scale = compute_scale(1000.0, Some(800.0));
        assert!((scale - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_narrow_pane_clamps_to_minimum() {
        assert_eq!(compute_scale(200.0, Some(800.0)), 0.5);
    }

    #[test]
    fn test_wide_pane_clamps_to_maximum() {
        assert_eq!(compute_scale(4000.0, Some(600.0)), 2.0);
    }

    #[test]
    fn test_unknown_width_is_identity_scale() {
        assert_eq!(compute_scale(0.0, None), 1.0);
        assert_eq!(compute_scale(10_000.0, None), 1.0);
    }

    #[test]
    fn test_degenerate_widths_count_as_unknown() {
        assert_eq!(compute_scale(900.0, Some(0.0)), 1.0);
        assert_eq!(compute_scale(900.0, Some(-612.0)), 1.0);
        assert_eq!(compute_scale(900.0, Some(f64::NAN)), 1.0);
    }

    #[test]
    fn test_pane_narrower_than_padding() {
        assert_eq!(compute_scale(40.0, Some(612.0)), 0.5);
    }

    #[test]
    fn test_nan_pane_width_falls_to_minimum() {
        assert_eq!(compute_scale(f64::NAN, Some(612.0)), 0.5);
    }

    #[test]
    fn test_custom_bounds() {
        let config = ScaleConfig {
            padding_px: 0.0,
            min_scale: 0.25,
            max_scale: 4.0,
        };
        assert_eq!(compute_scale_with(&config, 2448.0, Some(612.0)), 4.0);
        assert_eq!(compute_scale_with(&config, 100.0, Some(612.0)), 0.25);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let config = ScaleConfig {
            padding_px: 0.0,
            min_scale: 3.0,
            max_scale: 1.0,
        };
        assert_eq!(compute_scale_with(&config, 612.0, Some(612.0)), 1.0);
    }

    #[test]
    fn test_pane_width_from_percent() {
        assert_eq!(pane_width_px(1600.0, 50.0), 800.0);
        assert_eq!(pane_width_px(1000.0, 30.0), 300.0);
    }

    #[test]
    fn test_scale_percent_rounds() {
        assert_eq!(scale_percent(1.15), 115);
        assert_eq!(scale_percent(0.5), 50);
        assert_eq!(scale_percent(1.2345), 123);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: scale always lands inside [0.5, 2.0] for a known width
        #[test]
        fn scale_is_bounded(pane in 0.0f64..10_000.0, intrinsic in 1.0f64..5_000.0) {
            let scale = compute_scale(pane, Some(intrinsic));
            prop_assert!((0.5..=2.0).contains(&scale), "scale {} out of bounds", scale);
        }

        /// Property: unknown intrinsic width always gives 1.0
        #[test]
        fn unknown_width_ignores_pane(pane in -10_000.0f64..10_000.0) {
            prop_assert_eq!(compute_scale(pane, None), 1.0);
        }

        /// Property: a wider pane never produces a smaller scale
        #[test]
        fn scale_is_monotonic_in_pane_width(
            pane in 0.0f64..5_000.0,
            extra in 0.0f64..5_000.0,
            intrinsic in 1.0f64..5_000.0,
        ) {
            let narrow = compute_scale(pane, Some(intrinsic));
            let wide = compute_scale(pane + extra, Some(intrinsic));
            prop_assert!(wide >= narrow);
        }
    }
}
