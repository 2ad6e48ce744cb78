//! Headless picker state machine.
//!
//! [`BlossomPicker`] owns the options, the value, the interaction state and
//! the renderers. It never draws and never sleeps: hosts feed it input events,
//! run the timers it asks for, and paint the [`BloomFrame`]s it produces.

use std::time::Duration;

use crate::adaptive::{compute_adaptive_position, AnchorRect, Placement, PositionInput};
use crate::arc::{Point, SliderPosition};
use crate::color::{lightness_to_slider_value, slider_value_to_lightness, visual_saturation, Hsl};
use crate::constants::{CLOSE_DELAY_MS, FALLBACK_SATURATION, HOVER_DELAY_MS};
use crate::layout::BloomLayout;
use crate::options::{OptionsPatch, PickerOptions};
use crate::renderers::{BloomFrame, Easing, PetalRef, Scene, Transition};
use crate::value::{create_color_output, PetalLayer, PickerColor, PickerValue};

pub type ColorCallback = Box<dyn FnMut(&PickerColor)>;

/// Handle of a timer requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Hover-open delay.
    Open,
    /// Hover-close delay.
    Close,
}

/// Ask the host to call [`BlossomPicker::timer_fired`] with `id` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub id: TimerId,
    pub kind: TimerKind,
    pub delay: Duration,
}

/// Global listeners the host must keep installed for this instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveListeners {
    /// Pointer presses anywhere should reach [`BlossomPicker::pointer_down_outside`].
    pub click_outside: bool,
    /// Pointer moves and releases anywhere belong to the slider drag.
    pub drag: bool,
}

impl ActiveListeners {
    pub fn any(&self) -> bool {
        self.click_outside || self.drag
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub expanded: bool,
    pub hovering: bool,
    pub hovered_petal: Option<PetalRef>,
    pub dragging: bool,
    /// Last pointer position relative to the bloom center.
    pub pointer: Option<Point>,
    pub shift: Point,
    pub slider_position: SliderPosition,
}

/// Keyboard input understood by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKey {
    /// Enter or Space on the core.
    Activate,
    Escape,
    /// One slider step towards dark.
    Increase,
    /// One slider step towards bright.
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Environment {
    anchor: AnchorRect,
    viewport_width: f64,
    viewport_height: f64,
}

pub struct BlossomPicker {
    options: PickerOptions,
    internal: PickerValue,
    controlled: Option<PickerValue>,
    state: InteractionState,
    listeners: ActiveListeners,
    layout: BloomLayout,
    scene: Scene,
    structure_revision: u64,
    environment: Option<Environment>,
    on_change: Option<ColorCallback>,
    on_collapse: Option<ColorCallback>,
    open_timer: Option<TimerId>,
    close_timer: Option<TimerId>,
    next_timer: u64,
    frame_pending: bool,
    destroyed: bool,
}

impl BlossomPicker {
    pub fn new(options: PickerOptions) -> Self {
        let controlled = options.value;
        let internal = options.value.or(options.default_value).unwrap_or_default();
        let expanded = options.initial_expanded;
        let resting = Placement::resting(options.slider_position);

        let layout = BloomLayout::new(
            &options.colors,
            options.core_size,
            options.petal_size,
            options.show_alpha_slider,
        );
        let scene = Scene::build(&layout);

        Self {
            state: InteractionState {
                expanded,
                hovering: false,
                hovered_petal: None,
                dragging: false,
                pointer: None,
                shift: resting.shift,
                slider_position: resting.slider_position,
            },
            listeners: ActiveListeners {
                click_outside: expanded,
                drag: false,
            },
            options,
            internal,
            controlled,
            layout,
            scene,
            structure_revision: 0,
            environment: None,
            on_change: None,
            on_collapse: None,
            open_timer: None,
            close_timer: None,
            next_timer: 0,
            frame_pending: false,
            destroyed: false,
        }
    }

    pub fn on_change(mut self, callback: impl FnMut(&PickerColor) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn on_collapse(mut self, callback: impl FnMut(&PickerColor) + 'static) -> Self {
        self.on_collapse = Some(Box::new(callback));
        self
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&PickerColor) + 'static) {
        if !self.destroyed {
            self.on_change = Some(Box::new(callback));
        }
    }

    pub fn set_on_collapse(&mut self, callback: impl FnMut(&PickerColor) + 'static) {
        if !self.destroyed {
            self.on_collapse = Some(Box::new(callback));
        }
    }

    // --- queries ---

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn layout(&self) -> &BloomLayout {
        &self.layout
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state.expanded
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn active_listeners(&self) -> ActiveListeners {
        self.listeners
    }

    /// Bumped every time the bloom is rebuilt from scratch.
    pub fn structure_revision(&self) -> u64 {
        self.structure_revision
    }

    /// Timers that are still live. Anything else the host fires is ignored.
    pub fn pending_timers(&self) -> Vec<TimerId> {
        self.open_timer.into_iter().chain(self.close_timer).collect()
    }

    /// The controlled value if there is one, the internal value otherwise.
    pub fn current_value(&self) -> PickerValue {
        self.controlled.unwrap_or(self.internal)
    }

    /// Current value with derived color strings.
    pub fn value(&self) -> PickerColor {
        let val = self.current_value();
        let base = self.base_saturation();
        create_color_output(
            val.hue,
            val.saturation,
            visual_saturation(val.saturation, base),
            base,
            self.current_lightness(),
            val.alpha,
            val.layer,
        )
    }

    /// True saturation of the selected swatch.
    fn base_saturation(&self) -> f64 {
        let val = self.current_value();
        val.original_saturation
            .or_else(|| self.layout.find_by_hue(val.hue).map(|c| c.s))
            .unwrap_or(FALLBACK_SATURATION)
    }

    fn current_lightness(&self) -> f64 {
        let val = self.current_value();
        val.lightness
            .unwrap_or_else(|| slider_value_to_lightness(val.saturation))
    }

    // --- value ---

    /// Controlled override: the picker shows `value` until the owner sets another.
    pub fn set_value(&mut self, value: PickerValue) {
        if self.destroyed {
            return;
        }
        self.controlled = Some(value);
        self.internal = value;
    }

    // --- expand state ---

    pub fn expand(&mut self) {
        self.set_expanded(true);
    }

    pub fn collapse(&mut self) {
        self.set_expanded(false);
    }

    pub fn toggle(&mut self) {
        let expanded = self.state.expanded;
        self.set_expanded(!expanded);
    }

    fn set_expanded(&mut self, expanded: bool) {
        if self.destroyed {
            return;
        }
        let was_expanded = self.state.expanded;
        self.state.expanded = expanded;
        self.listeners.click_outside = expanded;

        if expanded {
            if !was_expanded {
                self.cancel_timer(TimerKind::Open);
                self.place();
            }
            return;
        }

        self.cancel_timer(TimerKind::Open);
        self.cancel_timer(TimerKind::Close);
        self.end_drag();
        self.state.hovered_petal = None;
        self.frame_pending = false;
        let resting = Placement::resting(self.options.slider_position);
        self.state.shift = resting.shift;
        self.state.slider_position = resting.slider_position;

        if was_expanded {
            let color = self.value();
            log::debug!("collapsed with {}", color.hex);
            if let Some(cb) = self.on_collapse.as_mut() {
                cb(&color);
            }
        }
    }

    /// Measure-and-clamp step, run once per collapsed → expanded transition.
    fn place(&mut self) {
        let placement = match self.environment {
            Some(env) => compute_adaptive_position(&PositionInput {
                anchor: env.anchor,
                container_size: self.layout.container_size,
                current_shift: Point::ZERO,
                viewport_width: env.viewport_width,
                viewport_height: env.viewport_height,
                slider_position: self.options.slider_position,
                adaptive: self.options.adaptive_positioning,
            }),
            None => Placement::resting(self.options.slider_position),
        };
        if placement.slider_position != self.state.slider_position {
            log::debug!("slider moved to {:?}", placement.slider_position);
        }
        self.state.shift = placement.shift;
        self.state.slider_position = placement.slider_position;
    }

    /// Screen rectangle of the collapsed anchor and the viewport size,
    /// used the next time the picker expands.
    pub fn set_environment(&mut self, anchor: AnchorRect, viewport_width: f64, viewport_height: f64) {
        self.environment = Some(Environment {
            anchor,
            viewport_width,
            viewport_height,
        });
    }

    pub fn update_options(&mut self, patch: OptionsPatch) {
        if self.destroyed {
            return;
        }
        if let Some(v) = patch.value {
            self.controlled = Some(v);
            self.internal = v;
        }

        if self.options.apply(patch) {
            self.layout = BloomLayout::new(
                &self.options.colors,
                self.options.core_size,
                self.options.petal_size,
                self.options.show_alpha_slider,
            );
            self.scene = Scene::build(&self.layout);
            self.structure_revision += 1;
            self.state.hovered_petal = None;
            if self.scene.slider.is_none() {
                self.end_drag();
            }
            log::debug!("rebuilt bloom (revision {})", self.structure_revision);
        }

        if !self.state.expanded {
            let resting = Placement::resting(self.options.slider_position);
            self.state.slider_position = resting.slider_position;
        } else if let Some(pinned) = self.options.slider_position {
            self.state.slider_position = pinned;
        }
    }

    /// Release every timer, listener and callback. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.open_timer = None;
        self.close_timer = None;
        self.listeners = ActiveListeners::default();
        self.state.dragging = false;
        self.state.hovering = false;
        self.state.hovered_petal = None;
        self.frame_pending = false;
        self.on_change = None;
        self.on_collapse = None;
        self.destroyed = true;
        log::trace!("picker destroyed");
    }

    // --- hover timers ---

    fn schedule(&mut self, kind: TimerKind) -> TimerRequest {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        let delay = match kind {
            TimerKind::Open => {
                self.open_timer = Some(id);
                HOVER_DELAY_MS
            }
            TimerKind::Close => {
                self.close_timer = Some(id);
                CLOSE_DELAY_MS
            }
        };
        log::trace!("scheduled {kind:?} timer {id:?} in {delay}ms");
        TimerRequest {
            id,
            kind,
            delay: Duration::from_millis(delay),
        }
    }

    fn cancel_timer(&mut self, kind: TimerKind) {
        let slot = match kind {
            TimerKind::Open => &mut self.open_timer,
            TimerKind::Close => &mut self.close_timer,
        };
        if let Some(id) = slot.take() {
            log::trace!("cancelled {kind:?} timer {id:?}");
        }
    }

    pub fn pointer_entered(&mut self) -> Option<TimerRequest> {
        if self.destroyed {
            return None;
        }
        self.state.hovering = true;
        if self.options.disabled || !self.options.open_on_hover {
            return None;
        }
        self.cancel_timer(TimerKind::Close);
        if self.state.expanded {
            return None;
        }
        Some(self.schedule(TimerKind::Open))
    }

    pub fn pointer_left(&mut self) -> Option<TimerRequest> {
        if self.destroyed {
            return None;
        }
        self.cancel_timer(TimerKind::Open);
        self.state.hovering = false;
        self.state.hovered_petal = None;
        self.state.pointer = None;
        if !self.options.open_on_hover || !self.state.expanded || self.state.dragging {
            return None;
        }
        Some(self.schedule(TimerKind::Close))
    }

    /// Deliver an elapsed timer. Stale ids are ignored.
    pub fn timer_fired(&mut self, id: TimerId) {
        if self.open_timer == Some(id) {
            self.open_timer = None;
            self.set_expanded(true);
        } else if self.close_timer == Some(id) {
            self.close_timer = None;
            self.set_expanded(false);
        } else {
            log::trace!("ignoring stale timer {id:?}");
        }
    }

    // --- pointer ---

    /// Track the pointer (relative to the bloom center). Returns `true` when
    /// the host should schedule a frame; later moves in the same frame
    /// return `false`.
    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        if self.destroyed {
            return false;
        }
        self.state.pointer = Some(pointer);
        if self.state.dragging {
            self.drag_to(pointer);
        }
        if !self.state.expanded {
            return false;
        }
        self.state.hovered_petal = self.petal_at(pointer);
        if self.frame_pending {
            log::trace!("coalesced pointer move");
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Set the hovered petal directly, for hosts doing their own hit testing.
    pub fn hover_petal(&mut self, petal: Option<PetalRef>) {
        if !self.destroyed {
            self.state.hovered_petal = petal;
        }
    }

    /// Topmost interactive petal under `point` (relative to the bloom center).
    pub fn petal_at(&self, point: Point) -> Option<PetalRef> {
        if !self.state.expanded {
            return None;
        }
        self.scene
            .petals
            .iter()
            .filter(|p| p.part.is_interactive())
            .filter(|p| {
                let rest = p.rest();
                let (dx, dy) = (point.x - rest.x, point.y - rest.y);
                (dx * dx + dy * dy).sqrt() <= p.diameter() / 2.0
            })
            .max_by_key(|p| p.z_index)
            .map(|p| p.petal)
    }

    /// Whether `point` (relative to the bloom center) is inside the widget.
    pub fn contains(&self, point: Point) -> bool {
        let radius = if self.state.expanded {
            self.layout.container_size / 2.0
        } else {
            self.layout.core_size / 2.0
        };
        (point.x * point.x + point.y * point.y).sqrt() <= radius
    }

    pub fn click_core(&mut self) {
        if self.destroyed || self.options.disabled {
            return;
        }
        self.toggle();
    }

    /// Commit the swatch behind `petal`. Unknown refs are ignored.
    pub fn click_petal(&mut self, petal: PetalRef) {
        if self.destroyed {
            return;
        }
        let Some(color) = self.layout.color_at(petal.layer, petal.index) else {
            return;
        };
        let slider_value = lightness_to_slider_value(color.l);
        let layer = PetalLayer::from_ring(petal.layer);
        let alpha = self.current_value().alpha;

        if self.controlled.is_none() {
            self.internal = PickerValue {
                hue: color.h,
                saturation: slider_value,
                lightness: Some(color.l),
                original_saturation: Some(color.s),
                alpha,
                layer,
            };
        }

        let output =
            create_color_output(color.h, slider_value, color.s, color.s, color.l, alpha, layer);
        self.emit_change(&output);
    }

    /// A press landed outside [`contains`](Self::contains).
    pub fn pointer_down_outside(&mut self) {
        if self.state.expanded {
            self.collapse();
        }
    }

    // --- slider ---

    /// Start a drag if `point` hits the slider. Returns whether it did.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        if self.destroyed || !self.state.expanded {
            return false;
        }
        let Some(slider) = self.scene.slider else {
            return false;
        };
        let position = self.state.slider_position;
        let value = self.current_value().saturation;
        if !slider.hits_track(point, position) && !slider.hits_handle(point, value, position) {
            return false;
        }
        self.state.dragging = true;
        self.listeners.drag = true;
        self.cancel_timer(TimerKind::Close);
        self.set_slider(slider.value_at(point, position));
        true
    }

    pub fn drag_to(&mut self, point: Point) {
        if !self.state.dragging {
            return;
        }
        if let Some(slider) = self.scene.slider {
            let value = slider.value_at(point, self.state.slider_position);
            self.set_slider(value);
        }
    }

    pub fn end_drag(&mut self) {
        self.state.dragging = false;
        self.listeners.drag = false;
    }

    /// Click on the track without dragging. Returns whether it hit.
    pub fn click_track(&mut self, point: Point) -> bool {
        if self.destroyed || !self.state.expanded {
            return false;
        }
        let Some(slider) = self.scene.slider else {
            return false;
        };
        let position = self.state.slider_position;
        if !slider.hits_track(point, position) {
            return false;
        }
        self.set_slider(slider.value_at(point, position));
        true
    }

    fn set_slider(&mut self, slider_value: f64) {
        let lightness = slider_value_to_lightness(slider_value);
        let base = self.base_saturation();
        let current = self.current_value();

        self.internal = PickerValue {
            saturation: slider_value,
            lightness: Some(lightness),
            original_saturation: Some(base),
            ..current
        };

        let output = create_color_output(
            current.hue,
            slider_value,
            visual_saturation(slider_value, base),
            base,
            lightness,
            current.alpha,
            current.layer,
        );
        self.emit_change(&output);
    }

    fn emit_change(&mut self, color: &PickerColor) {
        if let Some(cb) = self.on_change.as_mut() {
            cb(color);
        }
    }

    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: PickerKey) -> bool {
        if self.destroyed {
            return false;
        }
        match key {
            PickerKey::Activate => {
                if self.options.disabled {
                    return false;
                }
                self.toggle();
                true
            }
            PickerKey::Escape => {
                if !self.state.expanded {
                    return false;
                }
                self.collapse();
                true
            }
            PickerKey::Increase | PickerKey::Decrease => {
                if !self.state.expanded || self.scene.slider.is_none() {
                    return false;
                }
                let step = if key == PickerKey::Increase { 1.0 } else { -1.0 };
                let current = self.current_value().saturation;
                let next = (current.round() + step).clamp(0.0, 100.0);
                if next != current {
                    self.set_slider(next);
                }
                true
            }
        }
    }

    // --- rendering ---

    /// Target visuals for the current state. Clears the pending-frame flag.
    /// `None` once destroyed.
    pub fn frame(&mut self) -> Option<BloomFrame> {
        if self.destroyed {
            return None;
        }
        self.frame_pending = false;

        let val = self.current_value();
        let base = self.base_saturation();
        let lightness = self.current_lightness();
        let duration = self.options.animation_duration;
        let expanded = self.state.expanded;
        let shown = Hsl::new(val.hue, visual_saturation(val.saturation, base), lightness);

        let mut petals: Vec<_> = self
            .scene
            .petals
            .iter_mut()
            .map(|p| {
                let hovered = expanded && self.state.hovered_petal == Some(p.petal);
                p.visual(expanded, hovered, self.state.pointer, duration)
            })
            .collect();
        petals.sort_by_key(|p| p.z_index);

        Some(BloomFrame {
            expanded,
            extent: if expanded {
                self.layout.container_size
            } else {
                self.layout.core_size
            },
            shift: self.state.shift,
            z_index: if expanded { 50 } else { 0 },
            transition: Transition::new(duration, Easing::Bloom),
            background: self.scene.background.visual(expanded, shown, duration),
            bar: self.scene.bar.visual(expanded, shown, val.alpha, duration),
            petals,
            slider: self.scene.slider.map(|s| {
                s.visual(
                    val.saturation,
                    val.hue,
                    base,
                    expanded,
                    self.state.slider_position,
                    self.state.dragging,
                    duration,
                )
            }),
            core: self.scene.core.visual(
                Hsl::new(val.hue, base, lightness),
                expanded,
                self.state.hovering,
                self.options.show_core_color,
                self.options.disabled,
            ),
        })
    }
}

impl Drop for BlossomPicker {
    fn drop(&mut self) {
        self.destroy();
    }
}
