//! Partitions a flat palette into concentric rings.
//!
//! Lighter colors land on inner rings, darker ones outside. Ring sizes follow
//! a 1:2:…:N split so each ring outward holds more petals than the last, and
//! every ring is ordered by hue.

use std::cmp::Ordering;

use crate::color::Hsl;

/// One ring of petals, innermost first.
pub type Layer = Vec<Hsl>;

/// Number of rings for a palette of `total` colors.
pub(crate) fn ring_count(total: usize) -> usize {
    if total > 42 {
        4
    } else if total > 18 {
        3
    } else {
        2
    }
}

/// Target petal count per ring, summing exactly to `total`.
pub(crate) fn ring_sizes(total: usize) -> Vec<usize> {
    let rings = ring_count(total);
    let denominator = rings * (rings + 1) / 2;

    let mut sizes: Vec<usize> = (0..rings)
        .map(|i| total * (i + 1) / denominator)
        .collect();

    // Remainder goes to the outermost ring first, wrapping back outward.
    let mut remainder = total - sizes.iter().sum::<usize>();
    let mut ring = rings - 1;
    while remainder > 0 {
        sizes[ring] += 1;
        remainder -= 1;
        ring = if ring == 0 { rings - 1 } else { ring - 1 };
    }

    sizes
}

/// Distribute `colors` into rings (innermost first). Empty input yields no rings.
pub fn organize_colors_into_layers(colors: &[Hsl]) -> Vec<Layer> {
    if colors.is_empty() {
        return Vec::new();
    }

    let mut by_lightness = colors.to_vec();
    // stable: equal lightness keeps input order
    by_lightness.sort_by(|a, b| b.l.partial_cmp(&a.l).unwrap_or(Ordering::Equal));

    let mut layers = Vec::new();
    let mut rest = by_lightness.as_slice();
    for size in ring_sizes(colors.len()) {
        let (ring, tail) = rest.split_at(size.min(rest.len()));
        rest = tail;
        if ring.is_empty() {
            continue;
        }
        let mut ring = ring.to_vec();
        ring.sort_by(|a, b| a.h.partial_cmp(&b.h).unwrap_or(Ordering::Equal));
        layers.push(ring);
    }

    layers
}
