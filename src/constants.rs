//! Sizing, timing, and layout constants for the bloom.

/// Gap between the outermost petal ring and the color bar
pub const BAR_GAP: f64 = 20.0;

/// Stroke width of the color bar (and the arc slider track)
pub const BAR_WIDTH: f64 = 12.0;

/// Distance from the bar radius to the arc slider radius
pub const SLIDER_OFFSET: f64 = 30.0;

/// Extra room added around the whole bloom
pub const CONTAINER_PADDING: f64 = 12.0;

/// Minimum distance kept between the bloom and the viewport edge
pub const VIEWPORT_PADDING: f64 = 10.0;

/// Number of color stops sampled along the arc slider
pub const ARC_GRADIENT_STEPS: usize = 11;

/// Half of the arc slider sweep, in degrees
pub const SLIDER_HALF_SWEEP: f64 = 30.0;

/// Delay before a hover opens the picker (ms)
pub const HOVER_DELAY_MS: u64 = 100;

/// Delay before leaving the picker closes it (ms)
pub const CLOSE_DELAY_MS: u64 = 200;

/// Per-petal delay of the bloom animation (ms)
pub const PETAL_STAGGER_MS: u64 = 20;

/// Default bloom animation duration (ms)
pub const ANIMATION_DURATION_MS: u64 = 300;

/// Default core button diameter
pub const CORE_SIZE: f64 = 32.0;

/// Default petal diameter
pub const PETAL_SIZE: f64 = 32.0;

/// Saturation assumed when the current hue matches no palette swatch
pub const FALLBACK_SATURATION: f64 = 70.0;

/// Pointer radius inside which petals are pushed aside
pub const PUSH_RADIUS: f64 = 60.0;

/// Maximum push distance applied to a petal
pub const PUSH_STRENGTH: f64 = 6.0;

/// Slider lightness range: slider 0 maps to the max, slider 100 to the min
pub const MIN_LIGHTNESS: f64 = 20.0;
pub const MAX_LIGHTNESS: f64 = 100.0;

/// Below this slider value the swatch saturation ramps down to zero
pub const DESATURATE_BELOW: f64 = 10.0;
