//! Slide geometry units
//!
//! Office Open XML measures positions in English Metric Units (EMU).
//! Layout constants are authored in centimetres and points, so this module
//! provides the conversions used everywhere else.

use serde::{Deserialize, Serialize};

/// EMU per centimetre
pub const EMU_PER_CM: f64 = 360_000.0;

/// EMU per typographic point
pub const EMU_PER_PT: f64 = 12_700.0;

/// A length in English Metric Units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Emu(pub i64);

impl Emu {
    pub const ZERO: Self = Self(0);

    /// Length from centimetres (rounded to the nearest EMU)
    pub fn cm(cm: f64) -> Self {
        Self((cm * EMU_PER_CM).round() as i64)
    }

    /// Length from points
    pub fn pt(pt: f64) -> Self {
        Self((pt * EMU_PER_PT).round() as i64)
    }

    pub fn as_cm(self) -> f64 {
        self.0 as f64 / EMU_PER_CM
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl std::ops::Add for Emu {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Emu {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul<usize> for Emu {
    type Output = Self;
    fn mul(self, rhs: usize) -> Self {
        Self(self.0 * rhs as i64)
    }
}

/// Font size in whole points
///
/// DrawingML stores run sizes in hundredths of a point (`sz="1100"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSize(pub u32);

impl FontSize {
    pub const fn points(pt: u32) -> Self {
        Self(pt)
    }

    pub fn hundredths(self) -> u32 {
        self.0 * 100
    }
}

/// Slide dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: Emu,
    pub height: Emu,
}

impl SlideSize {
    /// Standard 16:9 widescreen (33.867 cm x 19.05 cm)
    pub const WIDESCREEN: Self = Self {
        width: Emu(12_192_000),
        height: Emu(6_858_000),
    };
}

impl Default for SlideSize {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centimetre_conversion() {
        assert_eq!(Emu::cm(1.0), Emu(360_000));
        assert_eq!(Emu::cm(0.65), Emu(234_000));
        assert_eq!(Emu::cm(7.8).as_cm(), 7.8);
    }

    #[test]
    fn point_conversion() {
        assert_eq!(Emu::pt(1.0), Emu(12_700));
        assert_eq!(FontSize::points(11).hundredths(), 1100);
    }

    #[test]
    fn arithmetic() {
        let step = Emu::cm(7.8) + Emu::cm(0.2);
        assert_eq!(step, Emu::cm(8.0));
        assert_eq!(step * 3, Emu::cm(24.0));
        assert_eq!(Emu::cm(3.0) - Emu::cm(1.0), Emu::cm(2.0));
    }

    #[test]
    fn widescreen_is_default() {
        let size = SlideSize::default();
        assert!((size.height.as_cm() - 19.05).abs() < 1e-9);
    }
}
