//! Color math: direct conversions without external dependencies.
//! All functions use normalized f64 in 0.0–1.0 for internal use.

/// RGB → HSL. All values 0.0–1.0.
pub(crate) fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let delta = max - min;
    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        ((g - b) / delta + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    (h, s, l)
}

/// HSL → RGB via chroma, intermediate and match offset.
///
/// Hue is in degrees (0–360), saturation and lightness in percent (0–100).
/// Returns channels in 0.0–1.0.
pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let s = s / 100.0;
    let l = l / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Scale a 0.0–1.0 channel to a rounded 0–255 byte.
pub(crate) fn channel_to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Normalize a hex string: lowercase, no `#`, shorthand expanded.
///
/// Returns `None` unless the input holds 3 or 6 hex digits.
pub(crate) fn normalize_hex(hex: &str) -> Option<String> {
    let stripped = hex.trim().trim_start_matches('#');
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match stripped.len() {
        3 => {
            let mut out = String::with_capacity(6);
            for c in stripped.chars() {
                out.push(c);
                out.push(c);
            }
            Some(out.to_lowercase())
        }
        6 => Some(stripped.to_lowercase()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn gray_has_no_hue_or_saturation() {
        let (h, s, l) = rgb_to_hsl(0.5, 0.5, 0.5);
        assert_eq!((h, s), (0.0, 0.0));
        assert!(close(l, 0.5));
    }

    #[test]
    fn primaries_land_on_sector_boundaries() {
        let (h, s, l) = rgb_to_hsl(0.0, 1.0, 0.0);
        assert!(close(h * 360.0, 120.0));
        assert!(close(s, 1.0));
        assert!(close(l, 0.5));

        let (r, g, b) = hsl_to_rgb(240.0, 100.0, 50.0);
        assert!(close(r, 0.0) && close(g, 0.0) && close(b, 1.0));
    }

    #[test]
    fn hue_360_wraps_to_red_sector() {
        let (r, g, b) = hsl_to_rgb(360.0, 100.0, 50.0);
        assert!(close(r, 1.0) && close(g, 0.0) && close(b, 0.0));
    }

    #[test]
    fn shorthand_hex_expands() {
        assert_eq!(normalize_hex("#F0a").as_deref(), Some("ff00aa"));
        assert_eq!(normalize_hex("#12345").as_deref(), None);
        assert_eq!(normalize_hex("#zzzzzz").as_deref(), None);
    }
}
