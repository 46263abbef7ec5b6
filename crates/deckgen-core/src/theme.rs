//! Theme colours
//!
//! Buttons never use literal RGB values. They reference the template's theme
//! so that a restyled template recolours every generated deck.

use serde::{Deserialize, Serialize};

/// A theme colour slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeColor {
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Text1,
    Background1,
}

impl ThemeColor {
    pub const PINK: Self = Self::Accent5;
    pub const GREEN: Self = Self::Accent4;
    pub const BLUE: Self = Self::Accent3;
    pub const PURPLE: Self = Self::Accent6;
    pub const ORANGE: Self = Self::Accent2;
    pub const TEAL: Self = Self::Accent1;
    pub const BLACK: Self = Self::Text1;
    pub const WHITE: Self = Self::Background1;

    /// DrawingML `schemeClr` value
    pub fn scheme_name(self) -> &'static str {
        match self {
            ThemeColor::Accent1 => "accent1",
            ThemeColor::Accent2 => "accent2",
            ThemeColor::Accent3 => "accent3",
            ThemeColor::Accent4 => "accent4",
            ThemeColor::Accent5 => "accent5",
            ThemeColor::Accent6 => "accent6",
            ThemeColor::Text1 => "tx1",
            ThemeColor::Background1 => "bg1",
        }
    }

    /// Friendly palette name, used by the text outline
    pub fn palette_name(self) -> &'static str {
        match self {
            ThemeColor::Accent1 => "teal",
            ThemeColor::Accent2 => "orange",
            ThemeColor::Accent3 => "blue",
            ThemeColor::Accent4 => "green",
            ThemeColor::Accent5 => "pink",
            ThemeColor::Accent6 => "purple",
            ThemeColor::Text1 => "black",
            ThemeColor::Background1 => "white",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.palette_name())
    }
}

/// Brightness adjustment in `-1.0..=1.0`
///
/// Positive values lighten towards white, negative values darken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Brightness(f64);

impl Brightness {
    pub const NONE: Self = Self(0.0);

    pub fn new(value: f64) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0.0
    }

    /// `(lumMod, lumOff)` in DrawingML thousandths of a percent
    pub fn luminance(self) -> (Option<u32>, Option<u32>) {
        if self.0 > 0.0 {
            let lum_mod = ((1.0 - self.0) * 100_000.0).round() as u32;
            let lum_off = (self.0 * 100_000.0).round() as u32;
            (Some(lum_mod), Some(lum_off))
        } else if self.0 < 0.0 {
            let lum_mod = ((1.0 + self.0) * 100_000.0).round() as u32;
            (Some(lum_mod), None)
        } else {
            (None, None)
        }
    }
}
