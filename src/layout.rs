//! Radial layout engine.
//!
//! Turns rings of colors into concrete geometry: one radius and one rotation
//! per ring, the color bar radius, and the overall container size. The
//! packing factors below are tuned by eye; changing them changes how dense
//! the bloom looks.

use std::f64::consts::TAU;

use crate::color::{parse_color, ColorInput, Hsl};
use crate::constants::{BAR_GAP, BAR_WIDTH, CONTAINER_PADDING, SLIDER_OFFSET};
use crate::layers::{organize_colors_into_layers, Layer};
use crate::palette::default_colors;

/// Lateral overlap between neighbouring petals; dense rings overlap less.
fn overlap_factor(count: usize) -> f64 {
    if count <= 8 {
        0.45
    } else if count <= 12 {
        0.5
    } else {
        0.55
    }
}

/// Radius of every ring, innermost first.
pub fn layer_radii(layers: &[Layer], core_size: f64, petal_size: f64) -> Vec<f64> {
    let w = petal_size;
    let mut radii: Vec<f64> = Vec::with_capacity(layers.len());

    for (i, layer) in layers.iter().enumerate() {
        let n = layer.len();
        let lateral_gapless = n as f64 * w * overlap_factor(n) / TAU;

        let radius = match radii.last() {
            None => {
                let core_overlap = if n <= 5 { w * 0.35 } else { w * 0.25 };
                let ideal_core = core_size / 2.0 + w / 2.0 - core_overlap;
                ideal_core.max(lateral_gapless)
            }
            Some(&prev_r) => {
                let prev_n = layers[i - 1].len();
                // < 1 means the previous ring leaves gaps to nestle into
                let sparsity = prev_n as f64 * w / (TAU * prev_r);
                let step = if sparsity < 0.85 {
                    w * 0.15
                } else if sparsity > 1.1 {
                    w * 0.45
                } else {
                    w * 0.35
                };
                (prev_r + step)
                    .max(lateral_gapless)
                    .max(prev_r + w * 0.1)
            }
        };
        radii.push(radius);
    }

    radii
}

/// Rotation of every ring in degrees: each ring sits in the valleys of the one inside it.
pub fn layer_rotations(layers: &[Layer]) -> Vec<f64> {
    let mut rotations = Vec::with_capacity(layers.len());
    for i in 0..layers.len() {
        let offset = match i.checked_sub(1).map(|p| layers[p].len()) {
            Some(prev_count) if prev_count > 0 => 360.0 / prev_count as f64 / 2.0,
            _ => 0.0,
        };
        rotations.push(offset);
    }
    rotations
}

/// Radius of the color bar drawn just outside the last ring.
pub fn bar_radius(layer_radii: &[f64], petal_size: f64, core_size: f64, bar_gap: f64) -> f64 {
    match layer_radii.last() {
        Some(outer) => outer + petal_size / 2.0 + bar_gap,
        None => core_size / 2.0 + bar_gap,
    }
}

/// Side length of the square that holds the whole bloom.
pub fn container_size(
    bar_radius: f64,
    bar_width: f64,
    show_slider: bool,
    slider_offset: f64,
) -> f64 {
    let reach = if show_slider {
        bar_radius + slider_offset + bar_width / 2.0
    } else {
        bar_radius + bar_width / 2.0
    };
    reach * 2.0 + CONTAINER_PADDING
}

/// Angle of petal `index` in a ring of `count`, in degrees (0° = 3 o'clock, clockwise).
pub fn petal_angle(index: usize, count: usize, rotation: f64) -> f64 {
    index as f64 / count.max(1) as f64 * 360.0 - 90.0 + rotation
}

/// Everything needed to place the bloom, computed once per configuration.
///
/// Never mutated: a change to colors or sizes produces a fresh layout.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomLayout {
    pub layers: Vec<Layer>,
    pub radii: Vec<f64>,
    pub rotations: Vec<f64>,
    pub bar_radius: f64,
    pub container_size: f64,
    pub core_size: f64,
    pub petal_size: f64,
    pub show_slider: bool,
}

impl BloomLayout {
    /// Lay out `colors`, falling back to the built-in palette when it is empty.
    pub fn new(colors: &[ColorInput], core_size: f64, petal_size: f64, show_slider: bool) -> Self {
        let normalized: Vec<Hsl> = if colors.is_empty() {
            default_colors()
        } else {
            colors.iter().map(parse_color).collect()
        };

        let layers = organize_colors_into_layers(&normalized);
        let radii = layer_radii(&layers, core_size, petal_size);
        let rotations = layer_rotations(&layers);
        let bar_radius = bar_radius(&radii, petal_size, core_size, BAR_GAP);
        let container_size = container_size(bar_radius, BAR_WIDTH, show_slider, SLIDER_OFFSET);

        log::debug!(
            "bloom layout: {} colors in {} rings, bar radius {:.1}, container {:.1}",
            normalized.len(),
            layers.len(),
            bar_radius,
            container_size
        );

        Self {
            layers,
            radii,
            rotations,
            bar_radius,
            container_size,
            core_size,
            petal_size,
            show_slider,
        }
    }

    /// Number of petals on rings inside `layer`.
    pub fn petals_before(&self, layer: usize) -> usize {
        self.layers.iter().take(layer).map(Vec::len).sum()
    }

    /// Swatch at `layer`/`index`, if it exists.
    pub fn color_at(&self, layer: usize, index: usize) -> Option<Hsl> {
        self.layers.get(layer)?.get(index).copied()
    }

    /// First swatch in any ring with exactly this hue.
    pub fn find_by_hue(&self, hue: f64) -> Option<Hsl> {
        self.layers.iter().flatten().find(|c| c.h == hue).copied()
    }

    /// Resting center of a petal relative to the bloom center.
    pub fn petal_offset(&self, layer: usize, index: usize) -> Option<(f64, f64)> {
        let count = self.layers.get(layer)?.len();
        if index >= count {
            return None;
        }
        let angle = petal_angle(index, count, self.rotations[layer]).to_radians();
        let r = self.radii[layer];
        Some((angle.cos() * r, angle.sin() * r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(n: usize) -> Layer {
        vec![Hsl::GRAY; n]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_ring_nestles_against_core() {
        // N=6: overlap 0.45 → lateral = 6*32*0.45/2π ≈ 13.75; ideal = 16 + 16 - 8 = 24
        let radii = layer_radii(&[ring(6)], 32.0, 32.0);
        assert!(close(radii[0], 24.0));

        // N=5 pulls in further: 16 + 16 - 11.2
        let radii = layer_radii(&[ring(5)], 32.0, 32.0);
        assert!(close(radii[0], 20.8));
    }

    #[test]
    fn crowded_first_ring_uses_lateral_radius() {
        // N=20: overlap 0.55 → 20*32*0.55/2π ≈ 56.02 > 24
        let radii = layer_radii(&[ring(20)], 32.0, 32.0);
        assert!(close(radii[0], 20.0 * 32.0 * 0.55 / TAU));
    }

    #[test]
    fn outer_ring_step_depends_on_sparsity() {
        // default palette shape: 6 then 12
        let radii = layer_radii(&[ring(6), ring(12)], 32.0, 32.0);
        // sparsity = 192 / (2π*24) ≈ 1.27 → crowded step 0.45*32 = 14.4
        // lateral for 12: 12*32*0.5/2π ≈ 30.56 < 38.4
        assert!(close(radii[1], 24.0 + 14.4));

        // sparse inner ring: 3 petals on a wide core
        let radii = layer_radii(&[ring(3), ring(6)], 100.0, 20.0);
        // r0 = 50 + 10 - 7 = 53; sparsity = 60 / (2π*53) ≈ 0.18 → step 3
        assert!(close(radii[0], 53.0));
        assert!(close(radii[1], 56.0));
    }

    #[test]
    fn rings_are_strictly_nested() {
        let layers = vec![ring(5), ring(10), ring(15), ring(20)];
        let radii = layer_radii(&layers, 32.0, 32.0);
        for pair in radii.windows(2) {
            assert!(pair[1] >= pair[0] + 3.2 - 1e-9);
        }
    }

    #[test]
    fn rotations_sit_in_previous_valleys() {
        let rotations = layer_rotations(&[ring(6), ring(12), ring(18)]);
        assert_eq!(rotations, vec![0.0, 30.0, 15.0]);
        assert!(layer_rotations(&[]).is_empty());
    }

    #[test]
    fn single_petal_ring_has_no_division_by_zero() {
        let rotations = layer_rotations(&[ring(1), ring(2)]);
        assert_eq!(rotations, vec![0.0, 180.0]);
        assert_eq!(petal_angle(0, 1, 0.0), -90.0);
        assert_eq!(petal_angle(0, 0, 0.0), -90.0);
    }

    #[test]
    fn bar_and_container_sizes() {
        assert_eq!(bar_radius(&[24.0, 38.4], 32.0, 32.0, 20.0), 38.4 + 16.0 + 20.0);
        assert_eq!(bar_radius(&[], 32.0, 32.0, 20.0), 36.0);
        assert_eq!(container_size(50.0, 12.0, false, 30.0), (50.0 + 6.0) * 2.0 + 12.0);
        assert_eq!(container_size(50.0, 12.0, true, 30.0), (50.0 + 30.0 + 6.0) * 2.0 + 12.0);
    }

    #[test]
    fn empty_colors_use_default_palette() {
        let layout = BloomLayout::new(&[], 32.0, 32.0, true);
        assert_eq!(layout.layers.len(), 2);
        assert_eq!(layout.petals_before(1), 6);
        assert!(close(layout.bar_radius, 38.4 + 16.0 + 20.0));
        assert!(layout.find_by_hue(345.0).is_some());
        assert!(layout.color_at(2, 0).is_none());
    }

    #[test]
    fn petal_zero_sits_at_twelve_o_clock() {
        let layout = BloomLayout::new(&[], 32.0, 32.0, false);
        let (x, y) = layout.petal_offset(0, 0).unwrap();
        assert!(x.abs() < 1e-9);
        assert!(close(y, -24.0));
        assert!(layout.petal_offset(0, 6).is_none());
    }
}
