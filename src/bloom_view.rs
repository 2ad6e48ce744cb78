//! Floem host for [`BlossomPicker`].
//!
//! Forwards pointer and keyboard events to the headless picker, runs its
//! timers on the Floem event loop and animates between the [`BloomFrame`]s
//! it produces.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use floem::action::exec_after;
use floem::keyboard::{Key, NamedKey};
use floem::kurbo::{self, Arc, Cap, Circle, Rect, Stroke, Vec2};
use floem::peniko::Color;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::adaptive::AnchorRect;
use crate::arc::Point;
use crate::color::Hsl;
use crate::constants::SLIDER_HALF_SWEEP;
use crate::options::PickerOptions;
use crate::picker::{BlossomPicker, PickerKey, TimerId, TimerRequest};
use crate::renderers::{ArcSliderVisual, BloomFrame, FrameTween, HalfClip, PetalVisual};
use crate::value::{PickerColor, PickerValue};

const RING: Color = Color::rgba8(255, 255, 255, 230);
const SHADOW: Color = Color::rgba8(0, 0, 0, 40);
const FRAME: Duration = Duration::from_millis(16);

enum BloomMsg {
    Value(PickerValue),
    Timer(TimerId),
    Tick,
}

pub struct BloomView {
    id: ViewId,
    picker: BlossomPicker,
    value: RwSignal<PickerValue>,
    extent: RwSignal<f64>,
    viewport: Option<Box<dyn Fn() -> (f64, f64)>>,
    inside: bool,
    size: floem::taffy::prelude::Size<f32>,
    epoch: Instant,
    tween: Option<FrameTween>,
    /// The picker changed since its last frame was taken.
    dirty: bool,
    ticking: bool,
}

/// Creates a bloom picker bound to `value`.
///
/// `value` acts as the controlled value: picks are written back to it, and
/// outside writes show up in the picker.
pub(crate) fn bloom_view(value: RwSignal<PickerValue>, mut options: PickerOptions) -> BloomView {
    let id = ViewId::new();
    options.value = Some(value.get_untracked());

    create_effect(move |_| {
        let v = value.get();
        id.update_state(BloomMsg::Value(v));
    });

    let picker = BlossomPicker::new(options).on_change(move |c: &PickerColor| value.set(c.value));
    let extent = RwSignal::new(picker.layout().core_size);
    if picker.is_expanded() {
        extent.set(picker.layout().container_size);
    }

    BloomView {
        id,
        picker,
        value,
        extent,
        viewport: None,
        inside: false,
        size: Default::default(),
        epoch: Instant::now(),
        tween: None,
        dirty: true,
        ticking: false,
    }
    .style(move |s| {
        let side = extent.get();
        s.width(side)
            .height(side)
            .cursor(floem::style::CursorStyle::Pointer)
    })
    .keyboard_navigable()
}

impl BloomView {
    /// Viewport size used to keep the open bloom on screen.
    pub fn viewport(mut self, size: impl Fn() -> (f64, f64) + 'static) -> Self {
        self.viewport = Some(Box::new(size));
        self
    }

    /// Also notify `f` on every change, after the bound signal is updated.
    pub fn on_change(mut self, mut f: impl FnMut(&PickerColor) + 'static) -> Self {
        let value = self.value;
        self.picker.set_on_change(move |c: &PickerColor| {
            value.set(c.value);
            f(c);
        });
        self
    }

    pub fn on_collapse(mut self, f: impl FnMut(&PickerColor) + 'static) -> Self {
        self.picker.set_on_collapse(f);
        self
    }

    fn center(&self) -> kurbo::Point {
        kurbo::Point::new(
            self.size.width as f64 / 2.0,
            self.size.height as f64 / 2.0,
        )
    }

    /// Window position relative to the bloom center.
    fn local(&self, pos: kurbo::Point) -> Point {
        let c = self.center();
        let shift = self.picker.interaction().shift;
        Point::new(pos.x - c.x - shift.x, pos.y - c.y - shift.y)
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Take a fresh frame from the picker on the next paint.
    fn invalidate(&mut self) {
        self.dirty = true;
        self.id.request_paint();
    }

    fn schedule_tick(&mut self) {
        if !self.ticking {
            self.ticking = true;
            let id = self.id;
            exec_after(FRAME, move |_| id.update_state(BloomMsg::Tick));
        }
    }

    fn schedule(&self, request: Option<TimerRequest>) {
        if let Some(req) = request {
            let id = self.id;
            exec_after(req.delay, move |_| id.update_state(BloomMsg::Timer(req.id)));
        }
    }

    /// Sync view size and listeners after any state change. The box grows
    /// at once but only shrinks after the closing animation.
    fn refresh(&mut self) {
        if self.picker.is_expanded() {
            self.sync_extent();
        }
        if self.picker.active_listeners().click_outside {
            self.id.request_focus();
        }
        self.invalidate();
    }

    fn target_extent(&self) -> f64 {
        if self.picker.is_expanded() {
            self.picker.layout().container_size
        } else {
            self.picker.layout().core_size
        }
    }

    fn sync_extent(&mut self) {
        let side = self.target_extent();
        if self.extent.get_untracked() != side {
            self.extent.set(side);
            self.id.request_layout();
        }
    }

    fn measure_environment(&mut self) {
        let Some(viewport) = &self.viewport else {
            return;
        };
        let (vw, vh) = viewport();
        let rect = self.id.layout_rect();
        let core = self.picker.layout().core_size;
        let c = rect.center();
        self.picker.set_environment(
            AnchorRect::new(c.x - core / 2.0, c.y - core / 2.0, core, core),
            vw,
            vh,
        );
    }

    fn key(event: &Event) -> Option<PickerKey> {
        let Event::KeyDown(ke) = event else {
            return None;
        };
        match &ke.key.logical_key {
            Key::Named(NamedKey::Enter) | Key::Named(NamedKey::Space) => Some(PickerKey::Activate),
            Key::Named(NamedKey::Escape) => Some(PickerKey::Escape),
            Key::Named(NamedKey::ArrowDown) | Key::Named(NamedKey::ArrowRight) => {
                Some(PickerKey::Increase)
            }
            Key::Named(NamedKey::ArrowUp) | Key::Named(NamedKey::ArrowLeft) => {
                Some(PickerKey::Decrease)
            }
            _ => None,
        }
    }
}

impl View for BloomView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(msg) = state.downcast::<BloomMsg>() {
            match *msg {
                BloomMsg::Value(v) => {
                    if self.picker.current_value() != v {
                        self.picker.set_value(v);
                    }
                }
                BloomMsg::Timer(t) => {
                    if !self.picker.is_expanded() {
                        self.measure_environment();
                    }
                    self.picker.timer_fired(t);
                }
                BloomMsg::Tick => {
                    self.ticking = false;
                    let now = self.now_ms();
                    if self.tween.as_ref().map_or(true, |t| t.settled(now)) {
                        self.sync_extent();
                    }
                    self.id.request_paint();
                    return;
                }
            }
            self.refresh();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        if let Some(key) = Self::key(event) {
            if !self.picker.is_expanded() {
                self.measure_environment();
            }
            if self.picker.handle_key(key) {
                self.refresh();
                return EventPropagation::Stop;
            }
            return EventPropagation::Continue;
        }

        match event {
            Event::PointerDown(e) => {
                let p = self.local(e.pos);
                if self.picker.begin_drag(p) {
                    cx.update_active(self.id());
                } else if p.x.hypot(p.y) <= self.picker.layout().core_size / 2.0 {
                    // core sits above every petal
                    if !self.picker.is_expanded() {
                        self.measure_environment();
                    }
                    self.picker.click_core();
                } else if let Some(petal) = self.picker.petal_at(p) {
                    self.picker.click_petal(petal);
                } else if !self.picker.contains(p) {
                    self.picker.pointer_down_outside();
                }
                self.refresh();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                let p = self.local(e.pos);
                let inside = self.picker.contains(p);
                if inside && !self.inside {
                    let req = self.picker.pointer_entered();
                    self.schedule(req);
                } else if !inside && self.inside && !self.picker.interaction().dragging {
                    let req = self.picker.pointer_left();
                    self.schedule(req);
                }
                self.inside = inside;
                let dragging = self.picker.interaction().dragging;
                if self.picker.pointer_moved(p) || dragging {
                    self.invalidate();
                }
                if dragging {
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) => {
                if self.picker.interaction().dragging {
                    self.picker.end_drag();
                    self.invalidate();
                }
                EventPropagation::Continue
            }
            Event::PointerLeave => {
                if self.inside && !self.picker.interaction().dragging {
                    self.inside = false;
                    let req = self.picker.pointer_left();
                    self.schedule(req);
                    self.invalidate();
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.picker.end_drag();
                self.picker.pointer_down_outside();
                self.refresh();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        if self.size.width == 0.0 || self.size.height == 0.0 {
            return;
        }
        let now = self.now_ms();
        if self.dirty || self.tween.is_none() {
            self.dirty = false;
            let Some(target) = self.picker.frame() else {
                return;
            };
            if let Some(tween) = &mut self.tween {
                tween.retarget(target, now);
            } else {
                self.tween = Some(FrameTween::new(target, now));
            }
        }
        let Some(tween) = &self.tween else {
            return;
        };
        let frame = tween.sample(now);
        let settled = tween.settled(now);

        let c = self.center();
        let origin = kurbo::Point::new(c.x + frame.shift.x, c.y + frame.shift.y);
        paint_frame(cx, origin, &frame);

        if !settled || self.extent.get_untracked() != self.target_extent() {
            self.schedule_tick();
        }
    }
}

impl Drop for BloomView {
    fn drop(&mut self) {
        self.picker.destroy();
    }
}

fn color(hsl: Hsl, alpha: f64) -> Color {
    let (r, g, b) = hsl.to_rgb8();
    Color::rgba8(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// CSS-style `brightness()`: scale every channel.
fn brightened(hsl: Hsl, factor: f64, alpha: f64) -> Color {
    let (r, g, b) = hsl.to_rgb8();
    let scale = |v: u8| (v as f64 * factor).round().clamp(0.0, 255.0) as u8;
    Color::rgba8(
        scale(r),
        scale(g),
        scale(b),
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn at(origin: kurbo::Point, p: Point) -> kurbo::Point {
    kurbo::Point::new(origin.x + p.x, origin.y + p.y)
}

fn paint_frame(cx: &mut PaintCx, origin: kurbo::Point, frame: &BloomFrame) {
    let bg = &frame.background;
    if bg.opacity > 0.0 {
        let disc = Circle::new(origin, bg.radius * bg.scale);
        cx.fill(&disc, color(bg.tint, bg.tint_alpha * bg.opacity), 0.0);
    }

    let bar = &frame.bar;
    if bar.opacity > 0.0 {
        let ring = Circle::new(origin, bar.radius * bar.scale);
        cx.stroke(
            &ring,
            color(bar.color, bar.alpha * bar.opacity),
            &Stroke::new(bar.stroke_width),
        );
    }

    for petal in &frame.petals {
        paint_petal(cx, origin, petal);
    }

    if let Some(slider) = &frame.slider {
        if slider.opacity > 0.0 {
            paint_slider(cx, origin, slider);
        }
    }

    let core = &frame.core;
    let disc = Circle::new(origin, core.diameter / 2.0 * core.scale);
    cx.fill(&disc, color(core.fill, 1.0), 0.0);
    cx.stroke(&disc, SHADOW, &Stroke::new(1.0));
}

fn paint_petal(cx: &mut PaintCx, origin: kurbo::Point, petal: &PetalVisual) {
    if petal.fill_alpha == 0.0 || petal.opacity == 0.0 || petal.scale == 0.0 {
        return;
    }
    let center = at(origin, petal.center);
    let r = petal.diameter / 2.0 * petal.scale;
    let disc = Circle::new(center, r);

    cx.save();
    match petal.clip {
        Some(HalfClip::Left) => cx.clip(&Rect::new(center.x - r - 2.0, center.y - r - 2.0, center.x, center.y + r + 2.0)),
        Some(HalfClip::Right) => cx.clip(&Rect::new(center.x, center.y - r - 2.0, center.x + r + 2.0, center.y + r + 2.0)),
        None => {}
    }
    cx.fill(
        &disc,
        brightened(petal.fill, petal.brightness, petal.fill_alpha * petal.opacity),
        0.0,
    );
    if petal.ring {
        cx.stroke(&disc, RING, &Stroke::new(1.5));
    }
    cx.restore();
}

fn paint_slider(cx: &mut PaintCx, origin: kurbo::Point, slider: &ArcSliderVisual) {
    let radius = slider.radius * slider.scale;
    let (from, to) = slider.position.value_span(SLIDER_HALF_SWEEP);
    let segments = slider.gradient.len().saturating_sub(1).max(1);
    let step = (to - from) / segments as f64;
    let stroke = Stroke::new(slider.stroke_width).with_caps(Cap::Round);

    for (i, stop) in slider.gradient.iter().enumerate().take(segments) {
        let arc = Arc {
            center: origin,
            radii: Vec2::new(radius, radius),
            start_angle: (from + step * i as f64) * PI / 180.0,
            sweep_angle: step * PI / 180.0,
            x_rotation: 0.0,
        };
        cx.stroke(&arc, color(*stop, slider.opacity), &stroke);
    }

    let handle = Circle::new(at(origin, slider.handle), slider.handle_radius * slider.scale);
    cx.fill(&handle, color(slider.handle_color, slider.opacity), 0.0);
    cx.stroke(&handle, Color::WHITE, &Stroke::new(2.0));
    cx.stroke(&handle, SHADOW, &Stroke::new(0.5));
}
