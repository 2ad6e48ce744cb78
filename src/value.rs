//! Picker value types.

use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_hex, hsl_to_string, hsla_to_string};

/// Which ring family a value was picked from: the innermost ring or any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetalLayer {
    Inner,
    #[default]
    Outer,
}

impl PetalLayer {
    pub fn from_ring(ring: usize) -> Self {
        if ring == 0 {
            PetalLayer::Inner
        } else {
            PetalLayer::Outer
        }
    }
}

/// The committed state of the picker.
///
/// **`saturation` is not a colorimetric saturation.** It holds the arc
/// slider position: 0 is the brightest end, 100 the darkest. The swatch's
/// real HSL saturation lives in `original_saturation`, cached when a petal is
/// picked so slider moves can recompute the shown color without looking the
/// swatch up again. Both names are part of the public value format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerValue {
    /// Hue in degrees.
    pub hue: f64,
    /// Slider position 0–100 (0 = brightest). See the type docs.
    pub saturation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lightness: Option<f64>,
    /// True HSL saturation of the selected swatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_saturation: Option<f64>,
    /// Opacity in percent.
    pub alpha: f64,
    pub layer: PetalLayer,
}

impl Default for PickerValue {
    fn default() -> Self {
        Self {
            hue: 330.0,
            saturation: 70.0,
            lightness: None,
            original_saturation: None,
            alpha: 50.0,
            layer: PetalLayer::Outer,
        }
    }
}

/// A [`PickerValue`] plus derived CSS outputs. The strings are always
/// recomputed from the numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerColor {
    #[serde(flatten)]
    pub value: PickerValue,
    pub hex: String,
    pub hsl: String,
    pub hsla: String,
}

/// Assemble the output color. `visual_saturation` and `lightness` drive the
/// strings; `slider_value` and `original_saturation` are carried through.
pub fn create_color_output(
    hue: f64,
    slider_value: f64,
    visual_saturation: f64,
    original_saturation: f64,
    lightness: f64,
    alpha: f64,
    layer: PetalLayer,
) -> PickerColor {
    PickerColor {
        value: PickerValue {
            hue,
            saturation: slider_value,
            lightness: Some(lightness),
            original_saturation: Some(original_saturation),
            alpha,
            layer,
        },
        hex: hsl_to_hex(hue, visual_saturation, lightness),
        hsl: hsl_to_string(hue, visual_saturation, lightness),
        hsla: hsla_to_string(hue, visual_saturation, lightness, alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_strings_follow_visual_saturation() {
        let out = create_color_output(0.0, 50.0, 100.0, 85.0, 50.0, 100.0, PetalLayer::Inner);
        assert_eq!(out.hex, "#ff0000");
        assert_eq!(out.hsl, "hsl(0, 100%, 50%)");
        assert_eq!(out.hsla, "hsla(0, 100%, 50%, 1.00)");
        assert_eq!(out.value.saturation, 50.0);
        assert_eq!(out.value.original_saturation, Some(85.0));
        assert_eq!(out.value.layer, PetalLayer::Inner);
    }

    #[test]
    fn layer_from_ring_index() {
        assert_eq!(PetalLayer::from_ring(0), PetalLayer::Inner);
        assert_eq!(PetalLayer::from_ring(3), PetalLayer::Outer);
    }

    #[test]
    fn value_serializes_with_original_field_names() {
        let json = serde_json::to_value(PickerValue {
            original_saturation: Some(40.0),
            ..PickerValue::default()
        })
        .unwrap();
        assert_eq!(json["originalSaturation"], 40.0);
        assert_eq!(json["layer"], "outer");
        assert!(json.get("lightness").is_none());

        let color = create_color_output(10.0, 0.0, 0.0, 50.0, 100.0, 50.0, PetalLayer::Outer);
        let json = serde_json::to_value(&color).unwrap();
        assert_eq!(json["hex"], "#ffffff");
        assert_eq!(json["hue"], 10.0);
    }
}
