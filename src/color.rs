use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::render::ColorScaleBounds;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Region → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per region, assigned over the full table so a region keeps
/// its colour whatever the filter hides.
#[derive(Debug, Clone)]
pub struct RegionColors {
    mapping: Vec<(String, Color32)>,
    default_color: Color32,
}

impl RegionColors {
    pub fn new(regions: &[String]) -> Self {
        let palette = generate_palette(regions.len());
        RegionColors {
            mapping: regions.iter().cloned().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, region: &str) -> Color32 {
        self.mapping
            .iter()
            .find(|(r, _)| r == region)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous Viridis scale
// ---------------------------------------------------------------------------

/// Viridis anchor colours, evenly spaced over [0, 1].
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Colour at `t` in [0, 1], interpolated in linear RGB.
pub fn viridis(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
    let last = VIRIDIS.len() - 1;
    let pos = t * last as f32;
    let i = (pos.floor() as usize).min(last - 1);
    let frac = pos - i as f32;

    let anchor = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = anchor(VIRIDIS[i]).mix(anchor(VIRIDIS[i + 1]), frac);
    to_color32(Srgb::from_linear(mixed))
}

/// Maps values onto Viridis between the legend bounds.
pub struct ContinuousScale {
    pub bounds: ColorScaleBounds,
}

impl ContinuousScale {
    pub fn new(bounds: ColorScaleBounds) -> Self {
        ContinuousScale { bounds }
    }

    /// Position of `value` within the bounds, 0 when they coincide.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.bounds.max - self.bounds.min;
        if span.abs() < f64::EPSILON {
            0.0
        } else {
            (value - self.bounds.min) / span
        }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        if value.is_nan() {
            return Color32::GRAY;
        }
        viridis(self.normalize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_one_colour_per_region() {
        let regions: Vec<String> = ["Asia", "Europe", "Africa"].iter().map(|s| s.to_string()).collect();
        let colors = RegionColors::new(&regions);
        assert_ne!(colors.color_for("Asia"), colors.color_for("Europe"));
        assert_eq!(colors.color_for("Atlantis"), Color32::GRAY);
        assert!(generate_palette(0).is_empty());
    }

    fn close(a: Color32, b: Color32) -> bool {
        let d = |x: u8, y: u8| (x as i16 - y as i16).abs() <= 1;
        d(a.r(), b.r()) && d(a.g(), b.g()) && d(a.b(), b.b())
    }

    #[test]
    fn viridis_endpoints_match_anchors() {
        assert!(close(viridis(0.0), Color32::from_rgb(68, 1, 84)));
        assert!(close(viridis(1.0), Color32::from_rgb(253, 231, 37)));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn scale_normalizes_between_bounds() {
        let scale = ContinuousScale::new(ColorScaleBounds {
            title: "growth",
            min: -2.0,
            max: 6.0,
        });
        assert_eq!(scale.normalize(2.0), 0.5);
        assert_eq!(scale.color_for(6.0), viridis(1.0));

        let flat = ContinuousScale::new(ColorScaleBounds {
            title: "growth",
            min: 1.0,
            max: 1.0,
        });
        assert_eq!(flat.normalize(1.0), 0.0);
    }
}
