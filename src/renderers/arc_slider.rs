//! Radial arc slider renderer and hit testing.

use crate::arc::{
    arc_gradient, describe_arc, handle_angle, polar_to_cartesian, slider_value_from_point,
    ArcPath, Point, SliderPosition,
};
use crate::color::{slider_value_to_lightness, visual_saturation, Hsl};
use crate::constants::{ARC_GRADIENT_STEPS, SLIDER_HALF_SWEEP};

use super::{Easing, Transition};

#[derive(Debug, Clone, PartialEq)]
pub struct ArcSliderVisual {
    pub position: SliderPosition,
    pub radius: f64,
    pub stroke_width: f64,
    /// Drawn clockwise from `start_angle` to `end_angle`, degrees.
    pub start_angle: f64,
    pub end_angle: f64,
    pub track: ArcPath,
    /// Bright → dark, laid out from `gradient_start` to `gradient_end`.
    pub gradient: Vec<Hsl>,
    pub gradient_start: Point,
    pub gradient_end: Point,
    pub handle: Point,
    pub handle_radius: f64,
    pub handle_color: Hsl,
    pub handle_transition: Transition,
    pub opacity: f64,
    pub scale: f64,
    pub transition: Transition,
}

/// Geometry is relative to the bloom center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSliderRenderer {
    radius: f64,
    stroke_width: f64,
}

impl ArcSliderRenderer {
    pub fn new(bar_radius: f64, bar_width: f64, slider_offset: f64) -> Self {
        Self {
            radius: bar_radius + slider_offset,
            stroke_width: bar_width,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn handle_radius(&self) -> f64 {
        self.stroke_width / 2.0
    }

    /// Slider value under `pointer`.
    pub fn value_at(&self, pointer: Point, position: SliderPosition) -> f64 {
        slider_value_from_point(
            pointer.x,
            pointer.y,
            position.center_angle(),
            SLIDER_HALF_SWEEP,
            position,
        )
    }

    pub fn handle_center(&self, value: f64, position: SliderPosition) -> Point {
        polar_to_cartesian(
            0.0,
            0.0,
            self.radius,
            handle_angle(value, position, SLIDER_HALF_SWEEP),
        )
    }

    /// Whether `pointer` lies on the track, round caps included.
    pub fn hits_track(&self, pointer: Point, position: SliderPosition) -> bool {
        let half_width = self.stroke_width / 2.0;
        let dist = (pointer.x * pointer.x + pointer.y * pointer.y).sqrt();
        if (dist - self.radius).abs() > half_width {
            return false;
        }
        let mut relative = pointer.y.atan2(pointer.x).to_degrees() - position.center_angle();
        relative = (relative + 180.0).rem_euclid(360.0) - 180.0;
        let cap = (half_width / self.radius).to_degrees();
        relative.abs() <= SLIDER_HALF_SWEEP + cap
    }

    pub fn hits_handle(&self, pointer: Point, value: f64, position: SliderPosition) -> bool {
        let c = self.handle_center(value, position);
        let (dx, dy) = (pointer.x - c.x, pointer.y - c.y);
        (dx * dx + dy * dy).sqrt() <= self.handle_radius() + 2.0
    }

    #[allow(clippy::too_many_arguments)]
    pub fn visual(
        &self,
        value: f64,
        hue: f64,
        base_saturation: f64,
        expanded: bool,
        position: SliderPosition,
        dragging: bool,
        duration_ms: u64,
    ) -> ArcSliderVisual {
        let center = position.center_angle();
        let start_angle = center - SLIDER_HALF_SWEEP;
        let end_angle = center + SLIDER_HALF_SWEEP;
        let (value_start, value_end) = position.value_span(SLIDER_HALF_SWEEP);

        let handle_color = Hsl::new(
            hue,
            visual_saturation(value, base_saturation),
            slider_value_to_lightness(value),
        );

        ArcSliderVisual {
            position,
            radius: self.radius,
            stroke_width: self.stroke_width,
            start_angle,
            end_angle,
            track: describe_arc(0.0, 0.0, self.radius, start_angle, end_angle),
            gradient: arc_gradient(hue, base_saturation, ARC_GRADIENT_STEPS),
            gradient_start: polar_to_cartesian(0.0, 0.0, self.radius, value_start),
            gradient_end: polar_to_cartesian(0.0, 0.0, self.radius, value_end),
            handle: self.handle_center(value, position),
            handle_radius: self.handle_radius(),
            handle_color,
            // dragging must track the pointer with no lag
            handle_transition: if dragging {
                Transition::INSTANT
            } else {
                Transition::new(duration_ms / 3, Easing::Ease)
            },
            opacity: if expanded { 1.0 } else { 0.0 },
            scale: if expanded { 1.0 } else { 0.8 },
            transition: Transition::new(duration_ms, Easing::Bloom).delayed(duration_ms / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> ArcSliderRenderer {
        ArcSliderRenderer::new(74.4, 12.0, 30.0)
    }

    #[test]
    fn radius_sits_outside_bar() {
        assert!((slider().radius() - 104.4).abs() < 1e-9);
        assert_eq!(slider().handle_radius(), 6.0);
    }

    #[test]
    fn handle_tracks_value_on_right_edge() {
        let s = slider();
        let top = s.handle_center(0.0, SliderPosition::Right);
        let bottom = s.handle_center(100.0, SliderPosition::Right);
        assert!(top.y < 0.0 && bottom.y > 0.0);
        assert!((s.value_at(top, SliderPosition::Right) - 0.0).abs() < 1e-9);
        assert_eq!(s.value_at(bottom, SliderPosition::Right), 100.0);
    }

    #[test]
    fn track_hit_testing() {
        let s = slider();
        let on = polar_to_cartesian(0.0, 0.0, s.radius(), 10.0);
        assert!(s.hits_track(on, SliderPosition::Right));
        assert!(!s.hits_track(on, SliderPosition::Left));
        let outside_sweep = polar_to_cartesian(0.0, 0.0, s.radius(), 60.0);
        assert!(!s.hits_track(outside_sweep, SliderPosition::Right));
        let off_radius = polar_to_cartesian(0.0, 0.0, s.radius() + 20.0, 0.0);
        assert!(!s.hits_track(off_radius, SliderPosition::Right));
        let left = polar_to_cartesian(0.0, 0.0, s.radius(), 185.0);
        assert!(s.hits_track(left, SliderPosition::Left));
    }

    #[test]
    fn dragging_makes_handle_instant() {
        let s = slider();
        let v = s.visual(40.0, 200.0, 80.0, true, SliderPosition::Right, true, 300);
        assert!(v.handle_transition.is_instant());
        let v = s.visual(40.0, 200.0, 80.0, true, SliderPosition::Right, false, 300);
        assert_eq!(v.handle_transition.duration_ms, 100);
        assert_eq!(v.transition.delay_ms, 150);
        assert_eq!(v.gradient.len(), ARC_GRADIENT_STEPS);
        assert_eq!(v.handle_color, Hsl::new(200.0, 80.0, 68.0));
    }

    #[test]
    fn left_gradient_runs_the_other_way() {
        let s = slider();
        let v = s.visual(0.0, 0.0, 50.0, true, SliderPosition::Left, false, 300);
        // value 0 (bright) stays on top: 210° rather than 150°
        assert!(v.gradient_start.y < 0.0 && v.gradient_end.y > 0.0);
        assert!(v.gradient_start.x < 0.0);
        assert_eq!(v.handle, v.gradient_start);
    }

    #[test]
    fn hidden_when_collapsed() {
        let v = slider().visual(0.0, 0.0, 50.0, false, SliderPosition::Top, false, 300);
        assert_eq!((v.opacity, v.scale), (0.0, 0.8));
    }
}
