//! The always-visible center button.

use crate::color::Hsl;

use super::{Easing, Transition};

/// Stacks above every petal ring.
pub const CORE_Z_INDEX: i32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct CoreButtonVisual {
    pub diameter: f64,
    pub fill: Hsl,
    pub scale: f64,
    pub z_index: i32,
    pub label: &'static str,
    pub expanded: bool,
    pub disabled: bool,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreButtonRenderer {
    diameter: f64,
}

impl CoreButtonRenderer {
    pub fn new(diameter: f64) -> Self {
        Self { diameter }
    }

    pub fn visual(
        &self,
        color: Hsl,
        expanded: bool,
        hovered: bool,
        show_core_color: bool,
        disabled: bool,
    ) -> CoreButtonVisual {
        let fill = if expanded && !show_core_color {
            Hsl::new(0.0, 0.0, 100.0)
        } else {
            color
        };

        CoreButtonVisual {
            diameter: self.diameter,
            fill,
            scale: if hovered && !expanded && !disabled {
                1.05
            } else {
                1.0
            },
            z_index: CORE_Z_INDEX,
            label: if expanded {
                "Color picker, expanded"
            } else {
                "Color picker"
            },
            expanded,
            disabled,
            transition: Transition::new(150, Easing::Ease),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_when_open_without_core_color() {
        let core = CoreButtonRenderer::new(32.0);
        let c = Hsl::new(30.0, 80.0, 50.0);
        assert_eq!(core.visual(c, true, false, false, false).fill, Hsl::new(0.0, 0.0, 100.0));
        assert_eq!(core.visual(c, true, false, true, false).fill, c);
        assert_eq!(core.visual(c, false, false, false, false).fill, c);
    }

    #[test]
    fn hover_grows_only_while_collapsed() {
        let core = CoreButtonRenderer::new(32.0);
        assert_eq!(core.visual(Hsl::GRAY, false, true, true, false).scale, 1.05);
        assert_eq!(core.visual(Hsl::GRAY, true, true, true, false).scale, 1.0);
        assert_eq!(core.visual(Hsl::GRAY, false, true, true, true).scale, 1.0);
    }

    #[test]
    fn labels() {
        let core = CoreButtonRenderer::new(32.0);
        let v = core.visual(Hsl::GRAY, true, false, true, false);
        assert_eq!(v.label, "Color picker, expanded");
        assert!(v.expanded);
        assert_eq!(v.z_index, CORE_Z_INDEX);
        assert_eq!(core.visual(Hsl::GRAY, false, false, true, false).label, "Color picker");
    }
}
