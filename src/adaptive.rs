//! Viewport-aware placement of the expanded bloom.

use serde::{Deserialize, Serialize};

use crate::arc::{Point, SliderPosition};
use crate::constants::{BAR_WIDTH, SLIDER_OFFSET, VIEWPORT_PADDING};

/// Screen rectangle of the collapsed widget anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl AnchorRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionInput {
    pub anchor: AnchorRect,
    pub container_size: f64,
    /// Shift already applied to the measured element.
    pub current_shift: Point,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Pinned slider edge; `None` lets the space decide.
    pub slider_position: Option<SliderPosition>,
    pub adaptive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub slider_position: SliderPosition,
    pub shift: Point,
}

impl Placement {
    /// Placement of a collapsed picker: no shift, pinned edge or `right`.
    pub fn resting(pinned: Option<SliderPosition>) -> Self {
        Self {
            slider_position: pinned.unwrap_or_default(),
            shift: Point::ZERO,
        }
    }
}

/// Shift along one axis keeping `[center - half, center + half]` inside the viewport.
fn clamp_axis(center: f64, half: f64, extent: f64) -> f64 {
    if center + half > extent - VIEWPORT_PADDING {
        extent - VIEWPORT_PADDING - (center + half)
    } else if center - half < VIEWPORT_PADDING {
        VIEWPORT_PADDING - (center - half)
    } else {
        0.0
    }
}

pub fn compute_adaptive_position(input: &PositionInput) -> Placement {
    let half = input.container_size / 2.0;
    let measured = input.anchor.center();
    // undo the shift already applied so repeated measurement doesn't feed back
    let cx = measured.x - input.current_shift.x;
    let cy = measured.y - input.current_shift.y;

    let shift = if input.adaptive {
        Point::new(
            clamp_axis(cx, half, input.viewport_width),
            clamp_axis(cy, half, input.viewport_height),
        )
    } else {
        Point::ZERO
    };

    let slider_position = match input.slider_position {
        Some(pinned) => pinned,
        None => {
            let x = cx + shift.x;
            let y = cy + shift.y;
            let right = input.viewport_width - (x + half);
            let left = x - half;
            let top = y - half;
            let bottom = input.viewport_height - (y + half);
            let threshold = SLIDER_OFFSET + BAR_WIDTH + 20.0;

            if right < threshold && left > right {
                SliderPosition::Left
            } else if left < threshold && right > left {
                SliderPosition::Right
            } else if bottom < threshold && top > bottom {
                SliderPosition::Top
            } else if top < threshold && bottom > top {
                SliderPosition::Bottom
            } else {
                SliderPosition::Right
            }
        }
    };

    if shift != Point::ZERO {
        log::debug!("shifting bloom by ({:.1}, {:.1})", shift.x, shift.y);
    }

    Placement {
        slider_position,
        shift,
    }
}
