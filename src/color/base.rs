use parse_display::Display;
use serde_derive::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::Hsl;

/// Coarse color bucket used for psychology lookups
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[display(style = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BaseColor {
    Black,
    White,
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Purple,
    Pink,
    Unknown,
}

/// Hue ranges as `[start, end)` degree intervals, covering the full circle
/// with no gaps or overlaps. A boundary hue belongs to the upper range: hue 20
/// is orange, not red. Red wraps, so it appears twice.
const HUE_RANGES: &[(u32, u32, BaseColor)] = &[
    (0, 20, BaseColor::Red),
    (20, 45, BaseColor::Orange),
    (45, 65, BaseColor::Yellow),
    (65, 165, BaseColor::Green),
    (165, 190, BaseColor::Teal),
    (190, 260, BaseColor::Blue),
    (260, 290, BaseColor::Purple),
    (290, 335, BaseColor::Pink),
    (335, 361, BaseColor::Red),
];

impl BaseColor {
    /// Classify an HSL color into its base bucket
    ///
    /// Lightness extremes win over hue, then desaturated colors are gray, then
    /// the hue table decides. A hue outside `[0, 360]` yields `Unknown`.
    pub fn classify(hsl: Hsl) -> Self {
        if hsl.l <= 10 {
            return BaseColor::Black;
        }

        if hsl.l >= 90 {
            return BaseColor::White;
        }

        if hsl.s <= 10 {
            return BaseColor::Gray;
        }

        HUE_RANGES
            .iter()
            .find(|(start, end, _)| hsl.h >= *start && hsl.h < *end)
            .map(|(_, _, base)| *base)
            .unwrap_or(BaseColor::Unknown)
    }
}
