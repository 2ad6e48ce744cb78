//! Preview ring just outside the outermost petals.

use crate::color::Hsl;

use super::{Easing, Transition};

#[derive(Debug, Clone, PartialEq)]
pub struct ColorBarVisual {
    pub radius: f64,
    pub stroke_width: f64,
    pub color: Hsl,
    /// 0–1.
    pub alpha: f64,
    pub opacity: f64,
    pub scale: f64,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBarRenderer {
    radius: f64,
    stroke_width: f64,
}

impl ColorBarRenderer {
    pub fn new(radius: f64, stroke_width: f64) -> Self {
        Self {
            radius,
            stroke_width,
        }
    }

    /// `alpha` is in percent, as carried by the picker value.
    pub fn visual(&self, expanded: bool, color: Hsl, alpha: f64, duration_ms: u64) -> ColorBarVisual {
        ColorBarVisual {
            radius: self.radius,
            stroke_width: self.stroke_width,
            color,
            alpha: (alpha / 100.0).clamp(0.0, 1.0),
            opacity: if expanded { 1.0 } else { 0.0 },
            scale: if expanded { 1.0 } else { 0.5 },
            transition: Transition::new(duration_ms, Easing::Bloom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_converted_to_fraction() {
        let bar = ColorBarRenderer::new(74.4, 12.0);
        let v = bar.visual(true, Hsl::new(200.0, 50.0, 40.0), 50.0, 300);
        assert_eq!(v.alpha, 0.5);
        assert_eq!(v.opacity, 1.0);
        assert_eq!(v.stroke_width, 12.0);
        assert_eq!(bar.visual(true, Hsl::GRAY, 250.0, 300).alpha, 1.0);
    }

    #[test]
    fn hidden_while_collapsed() {
        let v = ColorBarRenderer::new(50.0, 12.0).visual(false, Hsl::GRAY, 100.0, 300);
        assert_eq!(v.opacity, 0.0);
    }
}
