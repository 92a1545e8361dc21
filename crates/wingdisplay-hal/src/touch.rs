//! Touch controller interface
//!
//! Touch drivers are configured once at adapter construction. Sampling and
//! calibration math stay inside the driver; the adapter only hands over the
//! parameters below.

use crate::{DisplayError, Rotation};
use serde::{Deserialize, Serialize};

/// Raw-to-screen calibration bounds for each touch axis.
///
/// Values are in the touch controller's raw units; their meaning is defined
/// by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calibration {
    /// Raw (min, max) reading across the X axis
    pub x: (u16, u16),
    /// Raw (min, max) reading across the Y axis
    pub y: (u16, u16),
}

impl Calibration {
    pub const fn new(x: (u16, u16), y: (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// Touch axis inversion for a hardware variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TouchFlip {
    pub x: bool,
    pub y: bool,
}

impl TouchFlip {
    pub const NONE: TouchFlip = TouchFlip { x: false, y: false };

    pub const fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }
}

/// Touch controller chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchChip {
    /// STMPE610 resistive touch controller on SPI
    Stmpe610,
    /// Host-sampled four-wire resistive panel
    Resistive,
}

impl TouchChip {
    /// Calibration used when the caller does not supply one
    pub fn default_calibration(&self) -> Calibration {
        match self {
            TouchChip::Stmpe610 => Calibration::new((357, 3812), (390, 3555)),
            TouchChip::Resistive => Calibration::new((5200, 59000), (5800, 57000)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TouchChip::Stmpe610 => "STMPE610",
            TouchChip::Resistive => "resistive",
        }
    }
}

/// Parameters a touch driver is constructed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchConfig {
    pub calibration: Calibration,
    /// Display size in pixels (width, height)
    pub size: (u32, u32),
    /// Display rotation the touch coordinates should follow
    pub rotation: Rotation,
    pub flip: TouchFlip,
}

/// A touch sample in display pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: u32,
    pub y: u32,
    /// Controller-reported pressure, 0 if not measured
    pub pressure: u16,
}

/// A touch controller backend
pub trait TouchDriver {
    /// Configuration the driver was constructed with
    fn config(&self) -> &TouchConfig;

    /// Current touch, if the panel is being pressed
    fn touch_point(&mut self) -> Result<Option<TouchPoint>, DisplayError>;
}
