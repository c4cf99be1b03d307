use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_rgb(Hsl::new(hue, 0.75, 0.45))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sequential ramp for density / count shading
// ---------------------------------------------------------------------------

/// Maps a normalised intensity in `[0, 1]` to a colour on a single-hue
/// light-to-dark ramp (used for heatmap cells and density fields).
pub fn density_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0) as f32;
    hsl_to_rgb(Hsl::new(222.0, 0.65, 0.96 - 0.70 * t))
}

fn hsl_to_rgb(hsl: Hsl) -> RGBColor {
    let rgb: Srgb = hsl.into_color();
    RGBColor(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn palette_colors_are_distinct() {
        let palette = generate_palette(6);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!((a.0, a.1, a.2), (b.0, b.1, b.2));
            }
        }
    }

    #[test]
    fn density_ramp_darkens_with_intensity() {
        let lo = density_color(0.0);
        let hi = density_color(1.0);
        let brightness = |c: &RGBColor| c.0 as u32 + c.1 as u32 + c.2 as u32;
        assert!(brightness(&lo) > brightness(&hi));
    }
}
