//! # floem-blossom
//!
//! A radial "bloom" color picker widget for [Floem](https://github.com/lapce/floem).
//!
//! A small core button opens into concentric rings of color petals, a
//! preview bar and an arc slider for lightness. The layout and interaction
//! math is headless ([`BlossomPicker`]); the `view` feature adds a Floem
//! view that hosts it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # #[cfg(feature = "view")]
//! # {
//! use floem::prelude::*;
//! use floem_blossom::{blossom_picker, PickerOptions, PickerValue};
//!
//! let value = RwSignal::new(PickerValue::default());
//! let picker = blossom_picker(value, PickerOptions::default());
//! # }
//! ```
//!
//! Without the `view` feature:
//!
//! ```rust
//! use floem_blossom::{BlossomPicker, PetalRef, PickerOptions};
//!
//! let mut picker = BlossomPicker::new(PickerOptions::default())
//!     .on_change(|c| println!("picked {}", c.hex));
//! picker.expand();
//! picker.click_petal(PetalRef { layer: 0, index: 2 });
//! ```

mod adaptive;
mod arc;
#[cfg(feature = "view")]
mod bloom_view;
mod color;
mod constants;
mod layers;
mod layout;
mod math;
mod options;
mod palette;
mod picker;
mod renderers;
mod seam;
mod value;

pub use adaptive::{compute_adaptive_position, AnchorRect, Placement, PositionInput};
pub use arc::{
    arc_gradient, arc_gradient_colors, describe_arc, handle_angle, polar_to_cartesian,
    slider_value_from_point, ArcPath, Point, SliderPosition,
};
#[cfg(feature = "view")]
pub use bloom_view::BloomView;
pub use color::{
    hex_to_hsl, hsl_to_hex, hsl_to_string, hsla_to_string, lightness_to_slider_value,
    parse_color, rgb_to_hsl, slider_value_to_lightness, try_parse_color, visual_saturation,
    ColorInput, ColorParseError, Hsl,
};
pub use layers::{organize_colors_into_layers, Layer};
pub use layout::{bar_radius, container_size, layer_radii, layer_rotations, petal_angle, BloomLayout};
pub use options::{OptionsPatch, PickerOptions};
pub use palette::default_colors;
pub use picker::{
    ActiveListeners, BlossomPicker, ColorCallback, InteractionState, PickerKey, TimerId,
    TimerKind, TimerRequest,
};
pub use renderers::{
    Animate, ArcSliderRenderer, ArcSliderVisual, BackgroundRenderer, BackgroundVisual, BloomFrame,
    ColorBarRenderer, ColorBarVisual, CoreButtonRenderer, CoreButtonVisual, Easing, FrameTween,
    HalfClip, PetalRef, PetalRenderer, PetalVisual, Transition,
};
pub use seam::{bottom_petal_index, petal_z_index, ring_base_z, ring_elements, PetalPart, SeamElement};
pub use value::{create_color_output, PetalLayer, PickerColor, PickerValue};

/// Creates the bloom picker view.
///
/// The picker reads from and writes to `value`. External changes to the
/// signal show up in the picker; picks and slider moves update the signal.
#[cfg(feature = "view")]
pub fn blossom_picker(
    value: floem::reactive::RwSignal<PickerValue>,
    options: PickerOptions,
) -> BloomView {
    bloom_view::bloom_view(value, options)
}
