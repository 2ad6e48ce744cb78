//! HSL color model: the canonical representation for floem-blossom.
//!
//! Every palette entry is normalized to an [`Hsl`] triple before layout.
//! Parsing accepts hex, `rgb()`/`rgba()`, `hsl()`/`hsla()` strings or an
//! HSL object, and degrades to neutral gray instead of failing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DESATURATE_BELOW, MAX_LIGHTNESS, MIN_LIGHTNESS};
use crate::math;

/// HSL color: hue in degrees (0–360), saturation and lightness in percent (0–100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Neutral gray used whenever an input cannot be understood.
    pub const GRAY: Hsl = Hsl {
        h: 0.0,
        s: 0.0,
        l: 50.0,
    };

    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        hsl_to_hex(self.h, self.s, self.l)
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let (r, g, b) = math::hsl_to_rgb(self.h, self.s, self.l);
        (
            math::channel_to_u8(r),
            math::channel_to_u8(g),
            math::channel_to_u8(b),
        )
    }
}

impl Default for Hsl {
    fn default() -> Self {
        Self::GRAY
    }
}

/// Anything a palette entry may be written as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    /// `#rgb`, `#rrggbb`, `rgb()`, `rgba()`, `hsl()` or `hsla()`.
    Text(String),
    Hsl(Hsl),
}

impl From<&str> for ColorInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Hsl> for ColorInput {
    fn from(value: Hsl) -> Self {
        Self::Hsl(value)
    }
}

/// Why a color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorParseError {
    #[error("unrecognized color format: {0:?}")]
    UnknownFormat(String),
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("invalid color component {component:?} in {input:?}")]
    InvalidComponent { input: String, component: String },
}

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hsla?\(\s*([\d.]+)[\s,]+([\d.]+)%?[\s,]+([\d.]+)%?")
        .expect("Invalid color regex")
});

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*([\d.]+)[\s,]+([\d.]+)[\s,]+([\d.]+)")
        .expect("Invalid color regex")
});

fn component(input: &str, caps: &regex::Captures<'_>, idx: usize) -> Result<f64, ColorParseError> {
    let raw = caps.get(idx).map(|m| m.as_str()).unwrap_or_default();
    raw.parse::<f64>()
        .map_err(|_| ColorParseError::InvalidComponent {
            input: input.to_string(),
            component: raw.to_string(),
        })
}

/// Parse a color, reporting why it failed.
pub fn try_parse_color(input: &ColorInput) -> Result<Hsl, ColorParseError> {
    let text = match input {
        ColorInput::Hsl(hsl) => return Ok(*hsl),
        ColorInput::Text(text) => text.trim().to_lowercase(),
    };

    if text.starts_with('#') {
        return try_hex_to_hsl(&text);
    }

    if let Some(caps) = HSL_RE.captures(&text) {
        return Ok(Hsl::new(
            component(&text, &caps, 1)?.round(),
            component(&text, &caps, 2)?.round(),
            component(&text, &caps, 3)?.round(),
        ));
    }

    if let Some(caps) = RGB_RE.captures(&text) {
        return Ok(rgb_to_hsl(
            component(&text, &caps, 1)?,
            component(&text, &caps, 2)?,
            component(&text, &caps, 3)?,
        ));
    }

    Err(ColorParseError::UnknownFormat(text))
}

/// Parse any [`ColorInput`] into HSL. Never fails: unknown input becomes gray.
pub fn parse_color(input: &ColorInput) -> Hsl {
    try_parse_color(input).unwrap_or_else(|err| {
        log::debug!("falling back to gray: {err}");
        Hsl::GRAY
    })
}

fn try_hex_to_hsl(hex: &str) -> Result<Hsl, ColorParseError> {
    let normalized =
        math::normalize_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(hex.to_string()))?;
    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&normalized[range], 16)
            .map_err(|_| ColorParseError::InvalidHex(hex.to_string()))
    };
    Ok(rgb_to_hsl(
        byte(0..2)? as f64,
        byte(2..4)? as f64,
        byte(4..6)? as f64,
    ))
}

/// `#rrggbb` (or `#rgb`) → HSL with integer components. Invalid hex is gray.
pub fn hex_to_hsl(hex: &str) -> Hsl {
    try_hex_to_hsl(hex).unwrap_or_else(|err| {
        log::debug!("falling back to gray: {err}");
        Hsl::GRAY
    })
}

/// 0–255 RGB → HSL, rounded to integer degrees and percent.
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let (h, s, l) = math::rgb_to_hsl(r / 255.0, g / 255.0, b / 255.0);
    Hsl::new(
        (h * 360.0).round(),
        (s * 100.0).round(),
        (l * 100.0).round(),
    )
}

/// HSL → lowercase `#rrggbb`, two zero-padded digits per channel.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let (r, g, b) = math::hsl_to_rgb(h, s, l);
    format!(
        "#{:02x}{:02x}{:02x}",
        math::channel_to_u8(r),
        math::channel_to_u8(g),
        math::channel_to_u8(b)
    )
}

/// `hsl(h, s%, l%)` with every component rounded.
pub fn hsl_to_string(h: f64, s: f64, l: f64) -> String {
    format!("hsl({}, {}%, {}%)", h.round(), s.round(), l.round())
}

/// `hsla(h, s%, l%, a)`; `alpha` is given in percent and printed as a fraction.
pub fn hsla_to_string(h: f64, s: f64, l: f64, alpha: f64) -> String {
    format!(
        "hsla({}, {}%, {}%, {:.2})",
        h.round(),
        s.round(),
        l.round(),
        alpha / 100.0
    )
}

/// Lightness (clamped to 20–100) → slider position. 100 → 0, 20 → 100.
pub fn lightness_to_slider_value(l: f64) -> f64 {
    let clamped = l.clamp(MIN_LIGHTNESS, MAX_LIGHTNESS);
    (MAX_LIGHTNESS - clamped) / (MAX_LIGHTNESS - MIN_LIGHTNESS) * 100.0
}

/// Slider position → lightness. Exact inverse of [`lightness_to_slider_value`].
pub fn slider_value_to_lightness(slider_value: f64) -> f64 {
    MAX_LIGHTNESS - slider_value / 100.0 * (MAX_LIGHTNESS - MIN_LIGHTNESS)
}

/// Saturation actually shown for a slider position.
///
/// Near the white end of the slider the swatch fades to gray so the
/// brightest stop never reads as a saturated white.
pub fn visual_saturation(slider_value: f64, base_saturation: f64) -> f64 {
    if slider_value < DESATURATE_BELOW {
        slider_value / DESATURATE_BELOW * base_saturation
    } else {
        base_saturation
    }
}
