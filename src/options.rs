//! Picker configuration.

use serde::{Deserialize, Serialize};

use crate::arc::SliderPosition;
use crate::color::ColorInput;
use crate::constants::{ANIMATION_DURATION_MS, CORE_SIZE, PETAL_SIZE};
use crate::value::PickerValue;

/// Options recognized by the picker. Missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerOptions {
    /// Controlled value; owned by the caller and always wins over internal state.
    pub value: Option<PickerValue>,
    /// Starting value when uncontrolled.
    pub default_value: Option<PickerValue>,
    /// Flat palette; empty means the built-in palette.
    pub colors: Vec<ColorInput>,
    pub disabled: bool,
    pub open_on_hover: bool,
    /// Read at construction only.
    pub initial_expanded: bool,
    pub animation_duration: u64,
    pub show_alpha_slider: bool,
    pub core_size: f64,
    pub petal_size: f64,
    pub show_core_color: bool,
    /// Pin the arc slider to an edge; `None` picks the roomiest edge on expand.
    pub slider_position: Option<SliderPosition>,
    pub adaptive_positioning: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            colors: Vec::new(),
            disabled: false,
            open_on_hover: false,
            initial_expanded: false,
            animation_duration: ANIMATION_DURATION_MS,
            show_alpha_slider: true,
            core_size: CORE_SIZE,
            petal_size: PETAL_SIZE,
            show_core_color: true,
            slider_position: None,
            adaptive_positioning: true,
        }
    }
}

/// Partial update; `None` leaves the option unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsPatch {
    pub value: Option<PickerValue>,
    pub colors: Option<Vec<ColorInput>>,
    pub disabled: Option<bool>,
    pub open_on_hover: Option<bool>,
    pub initial_expanded: Option<bool>,
    pub animation_duration: Option<u64>,
    pub show_alpha_slider: Option<bool>,
    pub core_size: Option<f64>,
    pub petal_size: Option<f64>,
    pub show_core_color: Option<bool>,
    pub slider_position: Option<SliderPosition>,
    pub adaptive_positioning: Option<bool>,
}

impl PickerOptions {
    /// Merge `patch` in. Returns `true` when the bloom has to be rebuilt.
    pub(crate) fn apply(&mut self, patch: OptionsPatch) -> bool {
        let mut rebuild = false;

        if let Some(v) = patch.disabled {
            self.disabled = v;
        }
        if let Some(v) = patch.open_on_hover {
            self.open_on_hover = v;
        }
        if let Some(v) = patch.initial_expanded {
            self.initial_expanded = v;
        }
        if let Some(v) = patch.animation_duration {
            self.animation_duration = v;
        }
        if let Some(v) = patch.show_core_color {
            self.show_core_color = v;
        }
        if let Some(v) = patch.slider_position {
            self.slider_position = Some(v);
        }
        if let Some(v) = patch.adaptive_positioning {
            self.adaptive_positioning = v;
        }
        if let Some(v) = patch.value {
            self.value = Some(v);
        }

        if let Some(colors) = patch.colors {
            if colors != self.colors {
                self.colors = colors;
                rebuild = true;
            }
        }
        if let Some(v) = patch.core_size {
            if v != self.core_size {
                self.core_size = v;
                rebuild = true;
            }
        }
        if let Some(v) = patch.petal_size {
            if v != self.petal_size {
                self.petal_size = v;
                rebuild = true;
            }
        }
        if let Some(v) = patch.show_alpha_slider {
            if v != self.show_alpha_slider {
                self.show_alpha_slider = v;
                rebuild = true;
            }
        }

        rebuild
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let o = PickerOptions::default();
        assert_eq!(o.animation_duration, 300);
        assert_eq!((o.core_size, o.petal_size), (32.0, 32.0));
        assert!(o.show_alpha_slider && o.show_core_color && o.adaptive_positioning);
        assert!(!o.disabled && !o.open_on_hover && !o.initial_expanded);
        assert!(o.colors.is_empty() && o.slider_position.is_none());
    }

    #[test]
    fn only_structural_changes_rebuild() {
        let mut o = PickerOptions::default();
        assert!(!o.apply(OptionsPatch {
            disabled: Some(true),
            slider_position: Some(SliderPosition::Top),
            ..Default::default()
        }));
        assert!(o.disabled);
        assert_eq!(o.slider_position, Some(SliderPosition::Top));

        // same size again is not a change
        assert!(!o.apply(OptionsPatch {
            core_size: Some(32.0),
            ..Default::default()
        }));
        assert!(o.apply(OptionsPatch {
            petal_size: Some(24.0),
            ..Default::default()
        }));
        assert!(o.apply(OptionsPatch {
            colors: Some(vec!["#fff".into()]),
            ..Default::default()
        }));
        assert!(!o.apply(OptionsPatch {
            colors: Some(vec!["#fff".into()]),
            ..Default::default()
        }));
    }

    #[test]
    fn deserializes_partial_config() {
        let o: PickerOptions = serde_json::from_str(
            r##"{"coreSize": 40, "sliderPosition": "left", "colors": ["#f00", "hsl(10, 20%, 30%)"]}"##,
        )
        .unwrap();
        assert_eq!(o.core_size, 40.0);
        assert_eq!(o.slider_position, Some(SliderPosition::Left));
        assert_eq!(o.colors.len(), 2);
        assert_eq!(o.petal_size, 32.0);
    }
}
