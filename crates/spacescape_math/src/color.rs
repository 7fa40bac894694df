//! Color helpers

/// Convert HSL (each component in `0..=1`) to RGB
///
/// Hue wraps, saturation and lightness are clamped.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Convert a packed `0xRRGGBB` value to RGB in `0..=1`
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_primary_hues() {
        assert!(approx(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(approx(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(approx(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_grey_when_unsaturated() {
        assert!(approx(hsl_to_rgb(0.42, 0.0, 0.25), [0.25, 0.25, 0.25]));
    }

    #[test]
    fn test_hue_wraps() {
        assert!(approx(hsl_to_rgb(1.25, 0.9, 0.6), hsl_to_rgb(0.25, 0.9, 0.6)));
    }

    #[test]
    fn test_hex() {
        assert!(approx(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]));
        assert!(approx(hex_to_rgb(0x404040), [64.0 / 255.0; 3]));
    }
}
