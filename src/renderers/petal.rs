//! Petal renderer.

use crate::arc::Point;
use crate::color::Hsl;
use crate::constants::{PUSH_RADIUS, PUSH_STRENGTH};
use crate::seam::PetalPart;

use super::{Easing, Transition};

/// Weak reference to a petal: ring and position within the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PetalRef {
    pub layer: usize,
    pub index: usize,
}

/// Which half of the disc survives clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfClip {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PetalVisual {
    pub petal: PetalRef,
    pub part: PetalPart,
    /// Center relative to the bloom center, push effect included.
    pub center: Point,
    pub diameter: f64,
    pub scale: f64,
    pub opacity: f64,
    pub fill: Hsl,
    /// 0.0 for the invisible hit target.
    pub fill_alpha: f64,
    pub brightness: f64,
    pub ring: bool,
    pub clip: Option<HalfClip>,
    pub z_index: i32,
    pub interactive: bool,
    pub transform_transition: Transition,
    pub opacity_transition: Transition,
}

pub struct PetalRenderer {
    pub petal: PetalRef,
    pub part: PetalPart,
    pub color: Hsl,
    pub z_index: i32,
    rest: Point,
    diameter: f64,
    stagger_ms: u64,
    last_expanded: bool,
}

impl PetalRenderer {
    pub fn new(
        petal: PetalRef,
        part: PetalPart,
        color: Hsl,
        z_index: i32,
        rest: Point,
        diameter: f64,
        stagger_ms: u64,
    ) -> Self {
        Self {
            petal,
            part,
            color,
            z_index,
            rest,
            diameter,
            stagger_ms,
            last_expanded: false,
        }
    }

    pub fn rest(&self) -> Point {
        self.rest
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn stagger_ms(&self) -> u64 {
        self.stagger_ms
    }

    /// Target visual for the current state. Remembers `expanded` to tell an
    /// opening bloom apart from pointer tracking on an open one.
    pub fn visual(
        &mut self,
        expanded: bool,
        hovered: bool,
        pointer: Option<Point>,
        duration_ms: u64,
    ) -> PetalVisual {
        let expanding = expanded && !self.last_expanded;
        let visible = self.part.is_visible();

        let mut center = self.rest;
        if expanded && !hovered && visible {
            if let Some(p) = pointer {
                let dx = center.x - p.x;
                let dy = center.y - p.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < PUSH_RADIUS {
                    let push = (1.0 - dist / PUSH_RADIUS) * PUSH_STRENGTH;
                    let angle = dy.atan2(dx);
                    center.x += angle.cos() * push;
                    center.y += angle.sin() * push;
                }
            }
        }

        let delay = if expanded && !hovered { self.stagger_ms } else { 0 };
        let transform_transition = if expanded && !expanding && pointer.is_some() && !hovered {
            Transition::new(150, Easing::EaseOut)
        } else {
            Transition::new(duration_ms, Easing::Bloom).delayed(delay)
        };

        self.last_expanded = expanded;

        PetalVisual {
            petal: self.petal,
            part: self.part,
            center: if expanded { center } else { Point::ZERO },
            diameter: self.diameter,
            scale: match (expanded, hovered) {
                (false, _) => 0.0,
                (true, true) => 1.1,
                (true, false) => 1.0,
            },
            opacity: if expanded { 1.0 } else { 0.0 },
            fill: self.color,
            fill_alpha: if visible { 1.0 } else { 0.0 },
            brightness: if hovered && visible { 1.1 } else { 1.0 },
            ring: self.part.has_ring(),
            clip: match self.part {
                PetalPart::LeftHalf => Some(HalfClip::Left),
                PetalPart::RightHalf => Some(HalfClip::Right),
                _ => None,
            },
            z_index: self.z_index,
            interactive: self.part.is_interactive(),
            transform_transition,
            opacity_transition: Transition::new(duration_ms, Easing::Bloom).delayed(delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(part: PetalPart) -> PetalRenderer {
        PetalRenderer::new(
            PetalRef { layer: 0, index: 2 },
            part,
            Hsl::new(120.0, 50.0, 60.0),
            203,
            Point::new(40.0, 0.0),
            32.0,
            40,
        )
    }

    #[test]
    fn collapsed_petals_shrink_to_center() {
        let mut r = renderer(PetalPart::Whole);
        let v = r.visual(false, false, None, 300);
        assert_eq!(v.center, Point::ZERO);
        assert_eq!((v.scale, v.opacity), (0.0, 0.0));
        assert_eq!(v.opacity_transition.delay_ms, 0);
    }

    #[test]
    fn expanding_uses_staggered_bloom_transition() {
        let mut r = renderer(PetalPart::Whole);
        r.visual(false, false, None, 300);
        let v = r.visual(true, false, Some(Point::new(500.0, 500.0)), 300);
        assert_eq!(v.center, Point::new(40.0, 0.0));
        assert_eq!(v.transform_transition.easing, Easing::Bloom);
        assert_eq!(v.transform_transition.delay_ms, 40);

        // already open and tracking the pointer: fast follow
        let v = r.visual(true, false, Some(Point::new(500.0, 500.0)), 300);
        assert_eq!(v.transform_transition, Transition::new(150, Easing::EaseOut));
    }

    #[test]
    fn nearby_pointer_pushes_petal_away() {
        let mut r = renderer(PetalPart::Whole);
        // pointer 30px left of the petal → pushed right by (1 - 30/60) * 6 = 3
        let v = r.visual(true, false, Some(Point::new(10.0, 0.0)), 300);
        assert!((v.center.x - 43.0).abs() < 1e-9);
        assert!(v.center.y.abs() < 1e-9);
    }

    #[test]
    fn hovered_petal_grows_and_is_not_pushed() {
        let mut r = renderer(PetalPart::Whole);
        let v = r.visual(true, true, Some(Point::new(10.0, 0.0)), 300);
        assert_eq!(v.center, Point::new(40.0, 0.0));
        assert_eq!((v.scale, v.brightness), (1.1, 1.1));
    }

    #[test]
    fn seam_parts() {
        let v = renderer(PetalPart::Interaction).visual(true, true, None, 300);
        assert_eq!(v.fill_alpha, 0.0);
        assert_eq!(v.brightness, 1.0);
        assert!(v.interactive && !v.ring);

        let v = renderer(PetalPart::LeftHalf).visual(true, false, None, 300);
        assert_eq!(v.clip, Some(HalfClip::Left));
        assert!(!v.interactive && v.ring);

        let v = renderer(PetalPart::Underlay).visual(true, false, None, 300);
        assert!(!v.ring && v.clip.is_none());
    }
}
