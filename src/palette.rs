//! Built-in palette used when no colors are configured.

use crate::color::Hsl;

/// Saturated mid-lightness swatches (12).
pub const OUTER_COLORS: [Hsl; 12] = [
    Hsl::new(47.0, 97.0, 65.0),  // #FCD752
    Hsl::new(37.0, 98.0, 65.0),  // #FDBA50
    Hsl::new(27.0, 95.0, 64.0),  // #FA9C4D
    Hsl::new(14.0, 90.0, 64.0),  // #F6774F
    Hsl::new(0.0, 85.0, 64.0),   // #F15656
    Hsl::new(327.0, 75.0, 62.0), // #E756A6
    Hsl::new(285.0, 51.0, 59.0), // #B261CC
    Hsl::new(257.0, 65.0, 64.0), // #8966DF
    Hsl::new(225.0, 71.0, 65.0), // #6586E5
    Hsl::new(202.0, 68.0, 65.0), // #69B5E2
    Hsl::new(151.0, 43.0, 63.0), // #77C9A2
    Hsl::new(96.0, 49.0, 67.0),  // #A4D483
];

/// Pastel swatches (6).
pub const INNER_COLORS: [Hsl; 6] = [
    Hsl::new(50.0, 95.0, 85.0),  // #FDF1B6
    Hsl::new(26.0, 89.0, 89.0),  // #FCE0CA
    Hsl::new(345.0, 77.0, 88.0), // #F8C8D4
    Hsl::new(283.0, 47.0, 84.0), // #DEC2E9
    Hsl::new(209.0, 70.0, 87.0), // #C6DEF5
    Hsl::new(116.0, 42.0, 87.0), // #D2ECD0
];

/// Pastels followed by the saturated ring: 18 colors, two rings of 6 and 12.
pub fn default_colors() -> Vec<Hsl> {
    INNER_COLORS.iter().chain(OUTER_COLORS.iter()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_has_eighteen_swatches() {
        let colors = default_colors();
        assert_eq!(colors.len(), 18);
        assert_eq!(colors[0], INNER_COLORS[0]);
        assert_eq!(colors[17], OUTER_COLORS[11]);
    }
}
