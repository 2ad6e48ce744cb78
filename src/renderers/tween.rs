//! Interpolation between successive [`BloomFrame`]s.
//!
//! Each element keeps its own track: when its target look changes it starts
//! over from wherever it currently is, using the new target's timing. A
//! timing-only change leaves a running track alone.

use std::collections::HashMap;

use crate::arc::Point;
use crate::color::Hsl;
use crate::seam::PetalPart;

use super::{
    ArcSliderVisual, BackgroundVisual, BloomFrame, ColorBarVisual, CoreButtonVisual, Easing,
    PetalRef, PetalVisual, Transition,
};

impl Easing {
    /// Eased progress for linear progress `t` in `0..=1`.
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let (x1, y1, x2, y2) = self.control_points();
        let bezier = |a: f64, b: f64, s: f64| {
            let r = 1.0 - s;
            3.0 * r * r * s * a + 3.0 * r * s * s * b + s * s * s
        };
        // x(s) is monotone for control points inside the unit square
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..40 {
            let mid = (lo + hi) / 2.0;
            if bezier(x1, x2, mid) < t {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        bezier(y1, y2, (lo + hi) / 2.0)
    }
}

impl Transition {
    /// Eased progress `elapsed_ms` after the target changed.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let delay = self.delay_ms as f64;
        if elapsed_ms < delay {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.easing
            .apply((elapsed_ms - delay) / self.duration_ms as f64)
    }

    pub fn end_ms(&self) -> f64 {
        (self.delay_ms + self.duration_ms) as f64
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Hue takes the short way round.
fn lerp_hsl(a: Hsl, b: Hsl, t: f64) -> Hsl {
    if t >= 1.0 || a == b {
        return b;
    }
    let dh = (b.h - a.h + 540.0).rem_euclid(360.0) - 180.0;
    Hsl::new(
        (a.h + dh * t).rem_euclid(360.0),
        lerp(a.s, b.s, t),
        lerp(a.l, b.l, t),
    )
}

/// A visual that knows how to travel towards a new target.
pub trait Animate: Clone + PartialEq {
    /// State `elapsed_ms` into the move from `self` to `to`, timed by `to`.
    fn blend(&self, to: &Self, elapsed_ms: f64) -> Self;

    /// Time after which `self`, as a target, has been reached.
    fn settle_ms(&self) -> f64;

    /// Copy with every transition stripped, for comparing looks.
    fn untimed(&self) -> Self;
}

impl Animate for BackgroundVisual {
    fn blend(&self, to: &Self, elapsed_ms: f64) -> Self {
        let t = to.transition.progress(elapsed_ms);
        Self {
            scale: lerp(self.scale, to.scale, t),
            opacity: lerp(self.opacity, to.opacity, t),
            tint: lerp_hsl(self.tint, to.tint, t),
            tint_alpha: lerp(self.tint_alpha, to.tint_alpha, t),
            ..to.clone()
        }
    }

    fn settle_ms(&self) -> f64 {
        self.transition.end_ms()
    }

    fn untimed(&self) -> Self {
        Self {
            transition: Transition::INSTANT,
            ..self.clone()
        }
    }
}

impl Animate for ColorBarVisual {
    fn blend(&self, to: &Self, elapsed_ms: f64) -> Self {
        let t = to.transition.progress(elapsed_ms);
        Self {
            color: lerp_hsl(self.color, to.color, t),
            alpha: lerp(self.alpha, to.alpha, t),
            opacity: lerp(self.opacity, to.opacity, t),
            scale: lerp(self.scale, to.scale, t),
            ..to.clone()
        }
    }

    fn settle_ms(&self) -> f64 {
        self.transition.end_ms()
    }

    fn untimed(&self) -> Self {
        Self {
            transition: Transition::INSTANT,
            ..self.clone()
        }
    }
}

impl Animate for CoreButtonVisual {
    fn blend(&self, to: &Self, elapsed_ms: f64) -> Self {
        let t = to.transition.progress(elapsed_ms);
        Self {
            fill: lerp_hsl(self.fill, to.fill, t),
            scale: lerp(self.scale, to.scale, t),
            ..to.clone()
        }
    }

    fn settle_ms(&self) -> f64 {
        self.transition.end_ms()
    }

    fn untimed(&self) -> Self {
        Self {
            transition: Transition::INSTANT,
            ..self.clone()
        }
    }
}

impl Animate for ArcSliderVisual {
    fn blend(&self, to: &Self, elapsed_ms: f64) -> Self {
        let t = to.transition.progress(elapsed_ms);
        let h = to.handle_transition.progress(elapsed_ms);
        Self {
            opacity: lerp(self.opacity, to.opacity, t),
            scale: lerp(self.scale, to.scale, t),
            handle: lerp_point(self.handle, to.handle, h),
            handle_color: lerp_hsl(self.handle_color, to.handle_color, h),
            ..to.clone()
        }
    }

    fn settle_ms(&self) -> f64 {
        self.transition.end_ms().max(self.handle_transition.end_ms())
    }

    fn untimed(&self) -> Self {
        Self {
            transition: Transition::INSTANT,
            handle_transition: Transition::INSTANT,
            ..self.clone()
        }
    }
}

impl Animate for PetalVisual {
    fn blend(&self, to: &Self, elapsed_ms: f64) -> Self {
        let t = to.transform_transition.progress(elapsed_ms);
        let o = to.opacity_transition.progress(elapsed_ms);
        Self {
            center: lerp_point(self.center, to.center, t),
            scale: lerp(self.scale, to.scale, t),
            brightness: lerp(self.brightness, to.brightness, t),
            opacity: lerp(self.opacity, to.opacity, o),
            ..to.clone()
        }
    }

    fn settle_ms(&self) -> f64 {
        self.transform_transition
            .end_ms()
            .max(self.opacity_transition.end_ms())
    }

    fn untimed(&self) -> Self {
        Self {
            transform_transition: Transition::INSTANT,
            opacity_transition: Transition::INSTANT,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone)]
struct Track<V> {
    from: V,
    to: V,
    started_ms: f64,
}

impl<V: Animate> Track<V> {
    fn new(visual: V, now_ms: f64) -> Self {
        Self {
            from: visual.clone(),
            to: visual,
            started_ms: now_ms,
        }
    }

    fn sample(&self, now_ms: f64) -> V {
        self.from
            .blend(&self.to, (now_ms - self.started_ms).max(0.0))
    }

    fn retarget(&mut self, target: V, now_ms: f64) {
        if target == self.to || target.untimed() == self.to.untimed() {
            return;
        }
        self.from = self.sample(now_ms);
        self.to = target;
        self.started_ms = now_ms;
    }

    fn settled(&self, now_ms: f64) -> bool {
        self.from == self.to || now_ms - self.started_ms >= self.to.settle_ms()
    }
}

/// Animated view of the picker's frames. Times are milliseconds on any
/// monotonic clock the host likes.
#[derive(Debug, Clone)]
pub struct FrameTween {
    target: BloomFrame,
    background: Track<BackgroundVisual>,
    bar: Track<ColorBarVisual>,
    core: Track<CoreButtonVisual>,
    slider: Option<Track<ArcSliderVisual>>,
    petals: Vec<Track<PetalVisual>>,
}

impl FrameTween {
    /// Starts at rest on `frame`.
    pub fn new(frame: BloomFrame, now_ms: f64) -> Self {
        Self {
            background: Track::new(frame.background.clone(), now_ms),
            bar: Track::new(frame.bar.clone(), now_ms),
            core: Track::new(frame.core.clone(), now_ms),
            slider: frame.slider.clone().map(|s| Track::new(s, now_ms)),
            petals: frame
                .petals
                .iter()
                .map(|p| Track::new(p.clone(), now_ms))
                .collect(),
            target: frame,
        }
    }

    pub fn target(&self) -> &BloomFrame {
        &self.target
    }

    /// Head every element towards `frame`. Petals are matched by ring,
    /// index and part; ones with no match appear at their target.
    pub fn retarget(&mut self, frame: BloomFrame, now_ms: f64) {
        self.background.retarget(frame.background.clone(), now_ms);
        self.bar.retarget(frame.bar.clone(), now_ms);
        self.core.retarget(frame.core.clone(), now_ms);

        match (&mut self.slider, &frame.slider) {
            (Some(track), Some(target)) => track.retarget(target.clone(), now_ms),
            (slot, target) => *slot = target.clone().map(|s| Track::new(s, now_ms)),
        }

        let mut old: HashMap<(PetalRef, PetalPart), Track<PetalVisual>> = self
            .petals
            .drain(..)
            .map(|t| ((t.to.petal, t.to.part), t))
            .collect();
        self.petals = frame
            .petals
            .iter()
            .map(|p| match old.remove(&(p.petal, p.part)) {
                Some(mut track) => {
                    track.retarget(p.clone(), now_ms);
                    track
                }
                None => Track::new(p.clone(), now_ms),
            })
            .collect();

        self.target = frame;
    }

    /// Frame as it should look at `now_ms`. Petal order follows the target.
    pub fn sample(&self, now_ms: f64) -> BloomFrame {
        BloomFrame {
            expanded: self.target.expanded,
            extent: self.target.extent,
            shift: self.target.shift,
            z_index: self.target.z_index,
            transition: self.target.transition,
            background: self.background.sample(now_ms),
            bar: self.bar.sample(now_ms),
            petals: self.petals.iter().map(|t| t.sample(now_ms)).collect(),
            slider: self.slider.as_ref().map(|t| t.sample(now_ms)),
            core: self.core.sample(now_ms),
        }
    }

    /// Whether every element has reached its target.
    pub fn settled(&self, now_ms: f64) -> bool {
        self.background.settled(now_ms)
            && self.bar.settled(now_ms)
            && self.core.settled(now_ms)
            && self.slider.as_ref().map_or(true, |t| t.settled(now_ms))
            && self.petals.iter().all(|t| t.settled(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::SliderPosition;
    use crate::options::PickerOptions;
    use crate::picker::BlossomPicker;
    use crate::renderers::{ArcSliderRenderer, PetalRenderer};

    #[test]
    fn bloom_easing_front_loads_the_motion() {
        assert_eq!(Easing::Bloom.apply(0.0), 0.0);
        assert_eq!(Easing::Bloom.apply(1.0), 1.0);
        let mid = Easing::Bloom.apply(0.5);
        assert!(mid > 0.95 && mid < 0.97, "{mid}");
        let ease = Easing::Ease.apply(0.5);
        assert!((ease - 0.8024).abs() < 0.005, "{ease}");
    }

    #[test]
    fn progress_waits_out_the_delay() {
        let t = Transition::new(300, Easing::Bloom).delayed(100);
        assert_eq!(t.progress(0.0), 0.0);
        assert_eq!(t.progress(100.0), 0.0);
        assert_eq!(t.progress(250.0), Easing::Bloom.apply(0.5));
        assert_eq!(t.progress(400.0), 1.0);
        assert_eq!(t.progress(5000.0), 1.0);
        assert_eq!(t.end_ms(), 400.0);
        assert_eq!(Transition::INSTANT.progress(0.0), 1.0);
    }

    #[test]
    fn staggered_petal_blooms_out_from_center() {
        let mut r = PetalRenderer::new(
            PetalRef { layer: 0, index: 2 },
            PetalPart::Whole,
            Hsl::new(120.0, 50.0, 60.0),
            203,
            Point::new(40.0, 0.0),
            32.0,
            40,
        );
        let closed = r.visual(false, false, None, 300);
        let open = r.visual(true, false, None, 300);
        assert_eq!(open.transform_transition.delay_ms, 40);

        let mut track = Track::new(closed, 0.0);
        track.retarget(open.clone(), 0.0);

        let start = track.sample(40.0);
        assert_eq!(start.center, Point::ZERO);
        assert_eq!((start.scale, start.opacity), (0.0, 0.0));

        let mid = track.sample(190.0);
        let eased = Easing::Bloom.apply(0.5);
        assert!((mid.center.x - 40.0 * eased).abs() < 1e-9);
        assert!((mid.scale - eased).abs() < 1e-9);

        assert_eq!(track.sample(340.0), open);
        assert!(!track.settled(339.0));
        assert!(track.settled(340.0));
    }

    #[test]
    fn dragged_handle_jumps() {
        let s = ArcSliderRenderer::new(74.4, 12.0, 30.0);
        let at_rest = s.visual(10.0, 200.0, 80.0, true, SliderPosition::Right, false, 300);
        let dragged = s.visual(60.0, 200.0, 80.0, true, SliderPosition::Right, true, 300);
        let mut track = Track::new(at_rest.clone(), 0.0);
        track.retarget(dragged.clone(), 0.0);
        assert_eq!(track.sample(0.0).handle, dragged.handle);

        let released = s.visual(90.0, 200.0, 80.0, true, SliderPosition::Right, false, 300);
        track.retarget(released.clone(), 10.0);
        let halfway = track.sample(10.0 + 50.0).handle;
        assert!(halfway != dragged.handle && halfway != released.handle);
    }

    #[test]
    fn timing_change_keeps_a_running_track() {
        let a = BackgroundVisual {
            radius: 80.0,
            scale: 0.98,
            opacity: 0.0,
            tint: Hsl::GRAY,
            tint_alpha: 0.15,
            transition: Transition::new(300, Easing::Bloom),
        };
        let b = BackgroundVisual {
            scale: 0.9,
            opacity: 1.0,
            ..a.clone()
        };
        let mut track = Track::new(a, 0.0);
        track.retarget(b.clone(), 0.0);
        let before = track.sample(100.0);
        track.retarget(
            BackgroundVisual {
                transition: Transition::new(150, Easing::EaseOut),
                ..b
            },
            100.0,
        );
        assert_eq!(track.sample(100.0), before);
        assert_eq!(track.to.transition.duration_ms, 300);
    }

    #[test]
    fn picker_frames_animate_open_and_settle() {
        let mut picker = BlossomPicker::new(PickerOptions::default());
        let mut tween = FrameTween::new(picker.frame().unwrap(), 0.0);
        assert!(tween.settled(0.0));

        picker.expand();
        tween.retarget(picker.frame().unwrap(), 1000.0);
        let mid = tween.sample(1100.0);
        assert!(mid.background.opacity > 0.0 && mid.background.opacity < 1.0);
        assert!(mid.expanded);
        assert!(!tween.settled(1100.0));

        assert!(tween.settled(10_000.0));
        assert_eq!(&tween.sample(10_000.0), tween.target());
    }
}
