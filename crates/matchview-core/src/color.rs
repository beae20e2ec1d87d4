use crate::consts::{MARKER_LIGHTNESS, MARKER_SATURATION, OVERLAY_ALPHA, PALETTE_SIZE, PALETTE_STRIDE};
use crate::model::MatchClass;

/// Unpremultiplied 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from RGB bytes and an alpha in [0, 1].
    pub fn with_alpha(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self::new(r, g, b, unit_to_u8(alpha))
    }

    /// HSL to RGB. `hue` in degrees, saturation / lightness / alpha in [0, 1].
    pub fn from_hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        Self::new(
            unit_to_u8(r1 + m),
            unit_to_u8(g1 + m),
            unit_to_u8(b1 + m),
            unit_to_u8(alpha),
        )
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Hue in degrees assigned to feature point `index`.
pub fn palette_hue(index: usize) -> f64 {
    let slot = (index * PALETTE_STRIDE) % PALETTE_SIZE;
    slot as f64 * 360.0 / PALETTE_SIZE as f64
}

/// Marker colour for feature point `index`: a repeating 36-entry hue wheel.
pub fn palette_color(index: usize) -> Rgba {
    Rgba::from_hsla(
        palette_hue(index),
        MARKER_SATURATION,
        MARKER_LIGHTNESS,
        OVERLAY_ALPHA,
    )
}

/// Correspondence line colour for a match class.
pub fn class_color(class: MatchClass) -> Rgba {
    match class {
        MatchClass::Inlier => Rgba::with_alpha(0, 255, 0, OVERLAY_ALPHA),
        MatchClass::Outlier => Rgba::with_alpha(255, 0, 0, OVERLAY_ALPHA),
    }
}
