use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Location → Color32
// ---------------------------------------------------------------------------

/// Stable per-location colours, so a country keeps its colour across filter changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(locations: &[String]) -> Self {
        let palette = generate_palette(locations.len());
        ColorMap {
            mapping: locations.iter().cloned().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, location: &str) -> Color32 {
        self.mapping
            .get(location)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous scale for the map
// ---------------------------------------------------------------------------

/// Control points of an Inferno-like scale, dark to bright.
const INFERNO: [(u8, u8, u8); 5] = [
    (0x00, 0x00, 0x04),
    (0x57, 0x10, 0x6e),
    (0xbc, 0x37, 0x54),
    (0xf9, 0x8e, 0x09),
    (0xfc, 0xff, 0xa4),
];

/// Colour for `t` in `[0, 1]` (clamped), interpolated in linear RGB.
pub fn inferno(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.0 };
    let segments = (INFERNO.len() - 1) as f32;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(INFERNO.len() - 2);
    let local = pos - idx as f32;

    let lin = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = lin(INFERNO[idx]).mix(lin(INFERNO[idx + 1]), local);
    to_color32(Srgb::from_linear(mixed))
}

/// Map `value` into `[0, 1]` relative to `[min, max]`; a degenerate range maps to 1.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        1.0
    } else {
        (value - min) / range
    }
}
