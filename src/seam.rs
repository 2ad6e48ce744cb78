//! Stacking order for petal rings.
//!
//! Each ring is drawn as a "fan": every petal overlaps its counter-clockwise
//! neighbour. The fan has to wrap somewhere, so the petal nearest 6 o'clock is
//! split into an underlay, two clipped halves and one transparent hit target.

use crate::layout::petal_angle;

/// Which part of a petal an element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetalPart {
    /// An ordinary petal, drawn and hit-tested whole.
    Whole,
    /// Full disc under the seam, no ring, not interactive.
    Underlay,
    /// Left half of the seam petal, decorative.
    LeftHalf,
    /// Right half of the seam petal, decorative.
    RightHalf,
    /// Invisible disc on top of the seam petal; the only hit target for it.
    Interaction,
}

impl PetalPart {
    pub fn is_visible(self) -> bool {
        !matches!(self, PetalPart::Interaction)
    }

    pub fn is_interactive(self) -> bool {
        matches!(self, PetalPart::Whole | PetalPart::Interaction)
    }

    pub fn has_ring(self) -> bool {
        !matches!(self, PetalPart::Underlay | PetalPart::Interaction)
    }
}

/// Index of the petal closest to 6 o'clock (90°).
pub fn bottom_petal_index(count: usize, rotation: f64) -> usize {
    let mut best = 0;
    let mut best_diff = f64::INFINITY;
    for i in 0..count {
        let angle = petal_angle(i, count, rotation).rem_euclid(360.0);
        let raw = (angle - 90.0).abs();
        let diff = raw.min(360.0 - raw);
        if diff < best_diff {
            best_diff = diff;
            best = i;
        }
    }
    best
}

/// Base z of a ring: inner rings stack above outer ones.
pub fn ring_base_z(layer: usize, total_layers: usize) -> i32 {
    (total_layers.saturating_sub(layer) * 100) as i32
}

/// z-index of one element of a petal.
pub fn petal_z_index(
    index: usize,
    bottom_index: usize,
    count: usize,
    layer: usize,
    total_layers: usize,
    part: PetalPart,
) -> i32 {
    let base = ring_base_z(layer, total_layers);
    let top_of_ring = count as i32 + 10;
    match part {
        PetalPart::Underlay => base - 1,
        PetalPart::LeftHalf => base,
        PetalPart::RightHalf => base + top_of_ring,
        PetalPart::Interaction => base + count as i32 + 20,
        PetalPart::Whole if index == bottom_index => base,
        PetalPart::Whole => {
            // clockwise steps from the seam
            let steps = (index + count - bottom_index % count.max(1)) % count.max(1);
            base + steps as i32
        }
    }
}

/// One element to draw for a petal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamElement {
    pub index: usize,
    pub part: PetalPart,
    pub z_index: i32,
}

/// Every element of a ring, in construction order. The seam petal yields four.
pub fn ring_elements(layer: usize, total_layers: usize, count: usize, rotation: f64) -> Vec<SeamElement> {
    let bottom = bottom_petal_index(count, rotation);
    let mut out = Vec::with_capacity(count + 3);
    for index in 0..count {
        let parts: &[PetalPart] = if index == bottom {
            &[
                PetalPart::Underlay,
                PetalPart::LeftHalf,
                PetalPart::RightHalf,
                PetalPart::Interaction,
            ]
        } else {
            &[PetalPart::Whole]
        };
        for &part in parts {
            out.push(SeamElement {
                index,
                part,
                z_index: petal_z_index(index, bottom, count, layer, total_layers, part),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_petals_bottom_is_six() {
        assert_eq!(bottom_petal_index(12, 0.0), 6);
    }

    #[test]
    fn rotation_moves_the_seam() {
        // 12 petals rotated by 30° (half of a 6-ring): petal 5 lands on 90°
        assert_eq!(bottom_petal_index(12, 30.0), 5);
        assert_eq!(bottom_petal_index(1, 0.0), 0);
        assert_eq!(bottom_petal_index(0, 0.0), 0);
    }

    #[test]
    fn fan_increases_clockwise_from_seam() {
        let count = 6;
        let bottom = 3;
        let z: Vec<i32> = (0..count)
            .map(|i| petal_z_index(i, bottom, count, 0, 2, PetalPart::Whole))
            .collect();
        assert_eq!(z, vec![203, 204, 205, 200, 201, 202]);
    }

    #[test]
    fn inner_rings_stack_above_outer_rings() {
        let inner = ring_elements(0, 2, 6, 0.0);
        let outer = ring_elements(1, 2, 12, 30.0);
        let inner_min = inner.iter().map(|e| e.z_index).min().unwrap();
        let outer_max = outer
            .iter()
            .filter(|e| e.part.is_visible())
            .map(|e| e.z_index)
            .max()
            .unwrap();
        assert!(inner_min > outer_max);
    }

    #[test]
    fn seam_petal_splits_into_four_layers() {
        let elements = ring_elements(0, 1, 12, 0.0);
        assert_eq!(elements.len(), 15);
        let seam: Vec<_> = elements.iter().filter(|e| e.index == 6).collect();
        assert_eq!(seam.len(), 4);
        let z = |part| seam.iter().find(|e| e.part == part).unwrap().z_index;
        assert_eq!(z(PetalPart::Underlay), 99);
        assert_eq!(z(PetalPart::LeftHalf), 100);
        assert_eq!(z(PetalPart::RightHalf), 122);
        assert_eq!(z(PetalPart::Interaction), 132);
        // the right half covers every whole petal, the hit target covers everything
        let max_whole = elements
            .iter()
            .filter(|e| e.part == PetalPart::Whole)
            .map(|e| e.z_index)
            .max()
            .unwrap();
        assert!(z(PetalPart::RightHalf) > max_whole);
        assert!(z(PetalPart::Interaction) > z(PetalPart::RightHalf));
    }

    #[test]
    fn only_one_hit_target_per_petal() {
        let elements = ring_elements(0, 1, 5, 0.0);
        for index in 0..5 {
            let targets = elements
                .iter()
                .filter(|e| e.index == index && e.part.is_interactive())
                .count();
            assert_eq!(targets, 1);
        }
    }
}
