//! Arc geometry and slider math.
//!
//! Angles are in degrees, measured clockwise from the positive x axis in
//! screen space (y grows downward).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_string, visual_saturation, Hsl};
use crate::constants::{MAX_LIGHTNESS, MIN_LIGHTNESS};

/// Edge of the bloom the arc slider is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderPosition {
    Top,
    Bottom,
    Left,
    #[default]
    Right,
}

impl SliderPosition {
    /// Angle at the middle of the slider sweep.
    pub fn center_angle(self) -> f64 {
        match self {
            SliderPosition::Top => -90.0,
            SliderPosition::Bottom => 90.0,
            SliderPosition::Left => 180.0,
            SliderPosition::Right => 0.0,
        }
    }

    /// Angles at slider value 0 and 100. Reversed on the left edge.
    pub fn value_span(self, half_sweep: f64) -> (f64, f64) {
        let center = self.center_angle();
        let (start, end) = (center - half_sweep, center + half_sweep);
        if self == SliderPosition::Left {
            (end, start)
        } else {
            (start, end)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn polar_to_cartesian(cx: f64, cy: f64, r: f64, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(cx + r * rad.cos(), cy + r * rad.sin())
}

/// A single circular arc, drawn clockwise from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
    pub large_arc: bool,
}

/// Formats as an SVG path (`M … A …`).
impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} A {} {} 0 {} 1 {} {}",
            self.start.x,
            self.start.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            self.end.x,
            self.end.y
        )
    }
}

pub fn describe_arc(cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64) -> ArcPath {
    ArcPath {
        start: polar_to_cartesian(cx, cy, r, start_angle),
        end: polar_to_cartesian(cx, cy, r, end_angle),
        radius: r,
        large_arc: (end_angle - start_angle).abs() > 180.0,
    }
}

/// Map a pointer offset from the bloom center to a slider value (0–100).
pub fn slider_value_from_point(
    dx: f64,
    dy: f64,
    center_angle: f64,
    half_sweep: f64,
    position: SliderPosition,
) -> f64 {
    let angle = dy.atan2(dx).to_degrees();

    let mut relative = angle - center_angle;
    while relative > 180.0 {
        relative -= 360.0;
    }
    while relative <= -180.0 {
        relative += 360.0;
    }
    let relative = relative.clamp(-half_sweep, half_sweep);

    let value = if position == SliderPosition::Left {
        (half_sweep - relative) / (2.0 * half_sweep) * 100.0
    } else {
        (relative + half_sweep) / (2.0 * half_sweep) * 100.0
    };

    value.clamp(0.0, 100.0).round()
}

/// Angle of the slider handle for `value`.
pub fn handle_angle(value: f64, position: SliderPosition, half_sweep: f64) -> f64 {
    let (start, end) = position.value_span(half_sweep);
    start + value / 100.0 * (end - start)
}

/// `steps` evenly spaced colors from bright (slider 0) to dark (slider 100).
pub fn arc_gradient(hue: f64, base_saturation: f64, steps: usize) -> Vec<Hsl> {
    let last = steps.saturating_sub(1).max(1) as f64;
    (0..steps)
        .map(|i| {
            let t = i as f64 / last;
            Hsl::new(
                hue,
                visual_saturation(t * 100.0, base_saturation),
                MAX_LIGHTNESS - t * (MAX_LIGHTNESS - MIN_LIGHTNESS),
            )
        })
        .collect()
}

/// [`arc_gradient`] as CSS `hsl()` stop colors.
pub fn arc_gradient_colors(hue: f64, base_saturation: f64, steps: usize) -> Vec<String> {
    arc_gradient(hue, base_saturation, steps)
        .into_iter()
        .map(|c| hsl_to_string(c.h, c.s, c.l))
        .collect()
}
