//! Host platform interface
//!
//! Everything the adapter needs from the board: what it has built in, and
//! constructors for the display and touch drivers of each profile.

use crate::{
    DisplayChip, DisplayDriver, DisplayError, FourWireBus, ResistivePins, SpiDevice, TouchChip,
    TouchConfig, TouchDriver,
};
use serde::{Deserialize, Serialize};

/// What the host board provides on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformCapabilities {
    /// Host has an integrated display it initializes at boot
    pub builtin_display: bool,
    /// Host has an integrated touch panel
    pub builtin_touch: bool,
}

impl PlatformCapabilities {
    /// A board with neither display nor touch (e.g. a bare Feather)
    pub const NONE: PlatformCapabilities = PlatformCapabilities {
        builtin_display: false,
        builtin_touch: false,
    };

    /// A board with an integrated touch display (e.g. a PyPortal)
    pub const BUILTIN: PlatformCapabilities = PlatformCapabilities {
        builtin_display: true,
        builtin_touch: true,
    };

    /// Both display and touch are built in
    pub fn has_builtin(&self) -> bool {
        self.builtin_display && self.builtin_touch
    }
}

/// Board support needed to build a [`crate::DisplayAdapter`]
///
/// `Group` is whatever render-group type the board's graphics stack shows.
///
/// The display bus is exclusive: [`Platform::attach_display`] may fail while
/// an earlier display still holds it, until [`Platform::release_displays`]
/// is called.
pub trait Platform {
    type Group: ?Sized;

    fn capabilities(&self) -> PlatformCapabilities;

    /// Hand over the display the host initialized at boot
    fn builtin_display(&mut self) -> Result<Box<dyn DisplayDriver<Self::Group>>, DisplayError>;

    /// Create a driver for the host's resistive touch panel
    fn builtin_touch(
        &mut self,
        pins: &ResistivePins,
        config: TouchConfig,
    ) -> Result<Box<dyn TouchDriver>, DisplayError>;

    /// Release every display bound to the display bus
    fn release_displays(&mut self);

    /// Bind a display controller to a four-wire bus
    fn attach_display(
        &mut self,
        chip: DisplayChip,
        bus: &FourWireBus,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn DisplayDriver<Self::Group>>, DisplayError>;

    /// Bind a touch controller to its SPI chip select
    fn attach_touch(
        &mut self,
        chip: TouchChip,
        device: &SpiDevice,
        config: TouchConfig,
    ) -> Result<Box<dyn TouchDriver>, DisplayError>;
}
