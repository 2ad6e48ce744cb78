//! Per-element renderers.
//!
//! Renderers turn layout and interaction state into target visuals plus the
//! timing to reach them. They never touch interaction state. [`FrameTween`]
//! interpolates between the frames they produce.

mod arc_slider;
mod background;
mod color_bar;
mod core_button;
mod petal;
mod tween;

pub use arc_slider::{ArcSliderRenderer, ArcSliderVisual};
pub use background::{BackgroundRenderer, BackgroundVisual};
pub use color_bar::{ColorBarRenderer, ColorBarVisual};
pub use core_button::{CoreButtonRenderer, CoreButtonVisual};
pub use petal::{HalfClip, PetalRef, PetalRenderer, PetalVisual};
pub use tween::{Animate, FrameTween};

use crate::arc::Point;
use crate::constants::{BAR_WIDTH, PETAL_STAGGER_MS, SLIDER_OFFSET};
use crate::layout::BloomLayout;
use crate::seam::ring_elements;

/// Timing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Overshoot-free spring used for the bloom itself.
    Bloom,
    Ease,
    EaseOut,
}

impl Easing {
    /// Cubic-bezier control points `(x1, y1, x2, y2)`.
    pub fn control_points(self) -> (f64, f64, f64, f64) {
        match self {
            Easing::Bloom => (0.22, 1.0, 0.36, 1.0),
            Easing::Ease => (0.25, 0.1, 0.25, 1.0),
            Easing::EaseOut => (0.0, 0.0, 0.58, 1.0),
        }
    }
}

/// How a property should travel to its new target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub easing: Easing,
}

impl Transition {
    /// Jump straight to the target.
    pub const INSTANT: Transition = Transition {
        duration_ms: 0,
        delay_ms: 0,
        easing: Easing::Ease,
    };

    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            easing,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0 && self.delay_ms == 0
    }
}

/// All renderers for one bloom configuration. Rebuilt wholesale on structural change.
pub(crate) struct Scene {
    pub(crate) petals: Vec<PetalRenderer>,
    pub(crate) bar: ColorBarRenderer,
    pub(crate) slider: Option<ArcSliderRenderer>,
    pub(crate) core: CoreButtonRenderer,
    pub(crate) background: BackgroundRenderer,
}

impl Scene {
    pub(crate) fn build(layout: &BloomLayout) -> Self {
        let total_layers = layout.layers.len();
        let mut petals = Vec::new();

        for (layer, colors) in layout.layers.iter().enumerate() {
            let before = layout.petals_before(layer);
            let elements = ring_elements(layer, total_layers, colors.len(), layout.rotations[layer]);
            for element in elements {
                let (x, y) = layout
                    .petal_offset(layer, element.index)
                    .unwrap_or_default();
                petals.push(PetalRenderer::new(
                    PetalRef {
                        layer,
                        index: element.index,
                    },
                    element.part,
                    colors[element.index],
                    element.z_index,
                    Point::new(x, y),
                    layout.petal_size,
                    (before + element.index) as u64 * PETAL_STAGGER_MS,
                ));
            }
        }

        Self {
            petals,
            bar: ColorBarRenderer::new(layout.bar_radius, BAR_WIDTH),
            slider: layout
                .show_slider
                .then(|| ArcSliderRenderer::new(layout.bar_radius, BAR_WIDTH, SLIDER_OFFSET)),
            core: CoreButtonRenderer::new(layout.core_size),
            background: BackgroundRenderer::new(layout.bar_radius + BAR_WIDTH / 2.0),
        }
    }
}

/// Everything needed to paint one frame of the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFrame {
    pub expanded: bool,
    /// Side length of the container box.
    pub extent: f64,
    /// Offset applied to keep the bloom on screen.
    pub shift: Point,
    pub z_index: i32,
    pub transition: Transition,
    pub background: BackgroundVisual,
    pub bar: ColorBarVisual,
    /// Sorted bottom to top.
    pub petals: Vec<PetalVisual>,
    pub slider: Option<ArcSliderVisual>,
    pub core: CoreButtonVisual,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seam::PetalPart;

    #[test]
    fn scene_has_one_element_per_petal_plus_seam_parts() {
        let layout = BloomLayout::new(&[], 32.0, 32.0, true);
        let scene = Scene::build(&layout);
        // 18 petals, two seams with three extra parts each
        assert_eq!(scene.petals.len(), 18 + 6);
        assert!(scene.slider.is_some());
        let seams = scene
            .petals
            .iter()
            .filter(|p| p.part == PetalPart::Interaction)
            .count();
        assert_eq!(seams, 2);
    }

    #[test]
    fn stagger_counts_petals_on_inner_rings() {
        let layout = BloomLayout::new(&[], 32.0, 32.0, false);
        let scene = Scene::build(&layout);
        assert!(scene.slider.is_none());
        let first_outer = scene
            .petals
            .iter()
            .find(|p| p.petal == PetalRef { layer: 1, index: 0 })
            .unwrap();
        assert_eq!(first_outer.stagger_ms(), 6 * PETAL_STAGGER_MS);
    }

    #[test]
    fn instant_transition() {
        assert!(Transition::INSTANT.is_instant());
        assert!(!Transition::new(300, Easing::Bloom).is_instant());
    }
}
