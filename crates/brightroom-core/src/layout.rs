//! Fit computation for the preview canvas.
//!
//! The canvas is rendered at Hi-DPI resolution and shrunk back with CSS, so
//! the budget is measured in canvas pixels: `(container - margin) * scale`.

use serde::Serialize;

use crate::config::EditorConfig;
use crate::transform::Rotation;

/// Canvas size for the current container, image and rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Canvas backing store width in pixels.
    pub canvas_width: u32,
    /// Canvas backing store height in pixels.
    pub canvas_height: u32,
    /// CSS width in px (before the CSS transform scales it down).
    pub css_width: f64,
    /// CSS height in px.
    pub css_height: f64,
    /// Factor applied to the natural image size (at most 1).
    pub scale: f64,
}

impl Layout {
    /// The layout used while no image is ready: an empty canvas.
    pub const EMPTY: Layout = Layout {
        canvas_width: 0,
        canvas_height: 0,
        css_width: 0.0,
        css_height: 0.0,
        scale: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.canvas_width == 0 || self.canvas_height == 0
    }
}

/// Drawing budget in canvas pixels for a container of the given CSS size.
pub fn budget(container_width: f64, container_height: f64, config: &EditorConfig) -> (f64, f64) {
    let clamp = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    (
        clamp((container_width - config.margin) * config.hidpi_scale),
        clamp((container_height - config.margin) * config.hidpi_scale),
    )
}

/// Compute the preview layout.
///
/// `natural` is `None` while no image is ready. Otherwise the largest scale
/// not above 1 is chosen that fits the image into the budget, with the budget
/// transposed for 90°/270° since the visual bounding box rotates with it.
pub fn fit(
    container_width: f64,
    container_height: f64,
    natural: Option<(u32, u32)>,
    rotation: Rotation,
    config: &EditorConfig,
) -> Layout {
    let Some((natural_width, natural_height)) = natural.filter(|(w, h)| *w > 0 && *h > 0) else {
        return Layout::EMPTY;
    };

    let (mut max_width, mut max_height) = budget(container_width, container_height, config);
    if rotation.swaps_dimensions() {
        std::mem::swap(&mut max_width, &mut max_height);
    }

    let (nw, nh) = (f64::from(natural_width), f64::from(natural_height));
    let scale = (max_width / nw).min(max_height / nh).min(1.0);

    // Canvas sizes are integral; the epsilon keeps 2800 * (1000 / 2800) at 1000.
    let canvas_width = (nw * scale + 1e-6).floor() as u32;
    let canvas_height = (nh * scale + 1e-6).floor() as u32;

    Layout {
        canvas_width,
        canvas_height,
        css_width: f64::from(canvas_width),
        css_height: f64::from(canvas_height),
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EditorConfig {
        EditorConfig::default()
    }

    #[test]
    fn test_no_image_is_empty() {
        let layout = fit(800.0, 600.0, None, Rotation::Deg0, &config());
        assert_eq!(layout, Layout::EMPTY);
        assert!(layout.is_empty());
    }

    #[test]
    fn test_zero_natural_size_is_empty() {
        let layout = fit(800.0, 600.0, Some((0, 100)), Rotation::Deg0, &config());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_budget_subtracts_margin_and_scales() {
        assert_eq!(budget(800.0, 600.0, &config()), (1400.0, 1000.0));
        assert_eq!(budget(50.0, 50.0, &config()), (0.0, 0.0));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let layout = fit(800.0, 600.0, Some((200, 100)), Rotation::Deg0, &config());
        assert_eq!((layout.canvas_width, layout.canvas_height), (200, 100));
        assert_eq!(layout.scale, 1.0);
        assert_eq!(layout.css_width, 200.0);
    }

    #[test]
    fn test_large_image_fits_budget() {
        // Budget 1400x1000; a 2800x1000 image is limited by width.
        let layout = fit(800.0, 600.0, Some((2800, 1000)), Rotation::Deg0, &config());
        assert_eq!(layout.scale, 0.5);
        assert_eq!((layout.canvas_width, layout.canvas_height), (1400, 500));
    }

    #[test]
    fn test_quarter_turn_swaps_budget() {
        // Rotated, the 2800-wide image must fit into the 1000 height budget.
        let layout = fit(800.0, 600.0, Some((2800, 1000)), Rotation::Deg90, &config());
        assert_eq!(layout.scale, 1000.0 / 2800.0);
        assert_eq!(layout.canvas_width, 1000);
        assert_eq!(layout.canvas_height, 357);
    }

    #[test]
    fn test_rotation_cycle_produces_consistent_budgets() {
        let natural = Some((3000, 1500));
        let layouts: Vec<Layout> = [
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
            Rotation::Deg0,
        ]
        .into_iter()
        .map(|r| fit(800.0, 600.0, natural, r, &config()))
        .collect();

        assert_eq!(layouts[0], layouts[2]);
        assert_eq!(layouts[1], layouts[3]);
        assert_ne!(layouts[0], layouts[1]);
    }

    #[test]
    fn test_container_smaller_than_margin() {
        let layout = fit(80.0, 80.0, Some((100, 100)), Rotation::Deg0, &config());
        assert!(layout.is_empty());
        assert_eq!(layout.scale, 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the oriented canvas never exceeds the budget nor the natural size.
        #[test]
        fn prop_layout_fits_budget(
            container_w in 0.0f64..4000.0,
            container_h in 0.0f64..4000.0,
            natural_w in 1u32..=8000,
            natural_h in 1u32..=8000,
            r in 0usize..4,
        ) {
            let rotation = Rotation::ALL[r];
            let config = EditorConfig::default();
            let layout = fit(container_w, container_h, Some((natural_w, natural_h)), rotation, &config);
            let (budget_w, budget_h) = budget(container_w, container_h, &config);

            let (visual_w, visual_h) = if rotation.swaps_dimensions() {
                (layout.canvas_height, layout.canvas_width)
            } else {
                (layout.canvas_width, layout.canvas_height)
            };
            prop_assert!(f64::from(visual_w) <= budget_w + 1e-6);
            prop_assert!(f64::from(visual_h) <= budget_h + 1e-6);
            prop_assert!(layout.canvas_width <= natural_w);
            prop_assert!(layout.canvas_height <= natural_h);
            prop_assert!(layout.scale <= 1.0);
        }
    }
}
