//! Tinted backdrop disc behind the bloom.

use crate::color::Hsl;

use super::{Easing, Transition};

#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundVisual {
    pub radius: f64,
    pub scale: f64,
    pub opacity: f64,
    pub tint: Hsl,
    /// Alpha of the tint fill, 0–1.
    pub tint_alpha: f64,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundRenderer {
    radius: f64,
}

impl BackgroundRenderer {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn visual(&self, expanded: bool, tint: Hsl, duration_ms: u64) -> BackgroundVisual {
        BackgroundVisual {
            radius: self.radius,
            scale: if expanded { 0.9 } else { 0.98 },
            opacity: if expanded { 1.0 } else { 0.0 },
            tint,
            tint_alpha: 0.15,
            transition: Transition::new(duration_ms, Easing::Bloom),
        }
    }
}
