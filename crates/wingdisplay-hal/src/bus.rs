//! Bus and pin wiring descriptions
//!
//! These are plain descriptions handed to a [`crate::Platform`]; the platform
//! owns the actual peripherals.

use serde::Serialize;
use std::fmt;

/// A board pin, by its silkscreen name (`D10`, `TOUCH_XL`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pin(pub &'static str);

impl Pin {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Board's default SPI bus
pub const BOARD_SPI: Pin = Pin("SPI");

/// Four-wire (SPI + data/command) display bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FourWireBus {
    pub spi: Pin,
    /// Data/command select line
    pub command: Pin,
    pub chip_select: Pin,
    pub reset: Option<Pin>,
}

/// A peripheral sharing an SPI bus behind its own chip select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpiDevice {
    pub spi: Pin,
    pub chip_select: Pin,
}

/// Four-wire resistive touch panel pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResistivePins {
    pub x_left: Pin,
    pub x_right: Pin,
    pub y_down: Pin,
    pub y_up: Pin,
}
