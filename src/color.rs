//! Color conversion and classification
//!
//! All functions in this module are pure and total over well-formed input;
//! rejecting malformed channel values is the caller's responsibility.

use crate::models::Color;

mod base;
pub use base::BaseColor;

mod psychology;
pub use psychology::ColorPsychology;

/// Hue/saturation/lightness representation
///
/// Hue in integer degrees in `[0, 360)`, saturation and lightness as integer
/// percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u32,
    pub s: u32,
    pub l: u32,
}

impl Hsl {
    pub fn value(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Convert an RGB color to HSL using the standard min/max-channel formula
///
/// Components are rounded half away from zero (`f64::round`) to integer
/// degrees and percentages; a hue rounding up to 360 wraps back to 0.
pub fn rgb_to_hsl(color: Color) -> Hsl {
    let (r, g, b) = color.into_components();
    let r = f64::from(r) / 255.;
    let g = f64::from(g) / 255.;
    let b = f64::from(b) / 255.;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.;

    let (h, s) = if max == min {
        // Achromatic
        (0., 0.)
    } else {
        let delta = max - min;

        let s = if l > 0.5 {
            delta / (2. - max - min)
        } else {
            delta / (max + min)
        };

        let h = if max == r {
            (g - b) / delta + if g < b { 6. } else { 0. }
        } else if max == g {
            (b - r) / delta + 2.
        } else {
            (r - g) / delta + 4.
        };

        (h * 60., s)
    };

    Hsl {
        h: (h.round() as u32) % 360,
        s: (s * 100.).round() as u32,
        l: (l * 100.).round() as u32,
    }
}

/// Perceptual brightness test using the fixed NTSC luma weights
pub fn is_light(color: Color) -> bool {
    let (r, g, b) = color.into_components();
    // Compared at the scaled weighted sum, so the fractional part of the
    // brightness still counts against the 128 threshold
    u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 > 128_000
}
