//! Display driver interface
//!
//! The adapter never talks to display chips directly. Each backend implements
//! [`DisplayDriver`], and optionally [`Backlight`] when the panel has
//! software brightness control.

use crate::DisplayError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    /// Get rotation angle in degrees
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Normal => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }

    /// Parse a rotation from degrees.
    ///
    /// Angles are taken modulo 360, so `-90` and `450` are accepted. Anything
    /// that is not a quarter turn is rejected.
    pub fn from_degrees(degrees: i32) -> Result<Self, DisplayError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Normal),
            90 => Ok(Rotation::Rotate90),
            180 => Ok(Rotation::Rotate180),
            270 => Ok(Rotation::Rotate270),
            _ => Err(DisplayError::InvalidRotation(degrees)),
        }
    }

    /// Whether this rotation swaps the panel's width and height
    pub fn is_portrait(&self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Display controller behind a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayChip {
    /// ILI9341 TFT controller (2.4" FeatherWing)
    Ili9341,
    /// HX8357 TFT controller (3.5" FeatherWing)
    Hx8357,
    /// Display already owned and initialized by the host
    HostProvided,
}

impl DisplayChip {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayChip::Ili9341 => "ILI9341",
            DisplayChip::Hx8357 => "HX8357",
            DisplayChip::HostProvided => "host",
        }
    }
}

/// Optional brightness control
pub trait Backlight {
    /// Current brightness, 0.0 (off) to 1.0 (full)
    fn brightness(&self) -> f32;

    /// Set brightness, 0.0 (off) to 1.0 (full)
    fn set_brightness(&mut self, level: f32) -> Result<(), DisplayError>;
}

/// A display backend able to present render groups of type `G`
pub trait DisplayDriver<G: ?Sized> {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Overwrite the reported width. Does not reprogram the panel.
    fn set_width(&mut self, width: u32);

    /// Height in pixels
    fn height(&self) -> u32;

    /// Overwrite the reported height. Does not reprogram the panel.
    fn set_height(&mut self, height: u32);

    fn rotation(&self) -> Rotation;

    /// Rotate the panel; the backend re-lays out its framebuffer as needed.
    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError>;

    /// Brightness control, if the panel has one
    fn backlight(&self) -> Option<&dyn Backlight> {
        None
    }

    fn backlight_mut(&mut self) -> Option<&mut dyn Backlight> {
        None
    }

    /// Present a render group on the panel
    fn show(&mut self, group: &G) -> Result<(), DisplayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(Rotation::Normal.degrees(), 0);
        assert_eq!(Rotation::Rotate90.degrees(), 90);
        assert_eq!(Rotation::Rotate180.degrees(), 180);
        assert_eq!(Rotation::Rotate270.degrees(), 270);
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::Normal);
        assert_eq!(Rotation::from_degrees(90).unwrap(), Rotation::Rotate90);
        assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Rotate270);
        assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Rotate90);
    }

    #[test]
    fn test_rotation_rejects_partial_turns() {
        assert!(matches!(
            Rotation::from_degrees(45),
            Err(DisplayError::InvalidRotation(45))
        ));
    }

    #[test]
    fn test_rotation_portrait() {
        assert!(!Rotation::Normal.is_portrait());
        assert!(Rotation::Rotate90.is_portrait());
        assert!(!Rotation::Rotate180.is_portrait());
        assert!(Rotation::Rotate270.is_portrait());
    }

    #[test]
    fn test_display_chip_names() {
        assert_eq!(DisplayChip::Ili9341.name(), "ILI9341");
        assert_eq!(DisplayChip::Hx8357.name(), "HX8357");
    }
}
