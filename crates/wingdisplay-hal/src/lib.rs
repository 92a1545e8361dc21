//! Display adapter HAL
//!
//! Lets interchangeable add-on display and touchscreen hardware look the same
//! to application code as a host's built-in display. A [`DisplayAdapter`] is
//! built once from a profile name; afterwards brightness, size, rotation,
//! `show` and `screen_to_rect` all pass through to the selected drivers.
//!
//! # Supported Profiles
//!
//! - Built-in host display with resistive touch
//! - TFT FeatherWing 2.4" 320x240 (ILI9341 + STMPE610)
//! - TFT FeatherWing 3.5" 480x320 (HX8357 + STMPE610)
//!
//! # Example
//!
//! ```no_run
//! use wingdisplay_hal::mock::{MockGroup, MockPlatform};
//! use wingdisplay_hal::{AdapterOptions, DisplayAdapter};
//!
//! fn main() -> wingdisplay_hal::Result<()> {
//!     let mut platform = MockPlatform::feather();
//!     let options = AdapterOptions {
//!         name: "featherwing-2.4".into(),
//!         ..Default::default()
//!     };
//!
//!     let mut display = DisplayAdapter::new(&mut platform, &options)?;
//!     println!("Resolution: {}x{}", display.width(), display.height());
//!
//!     display.show(&MockGroup::new("splash"))?;
//!     let (x, y) = display.screen_to_rect(0.5, 0.5);
//!     println!("Center: ({x}, {y})");
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod bus;
pub mod display;
pub mod mock;
pub mod platform;
pub mod profile;
pub mod touch;

pub use adapter::{AdapterOptions, DisplayAdapter, DisplayError};
pub use bus::{FourWireBus, Pin, ResistivePins, SpiDevice};
pub use display::{Backlight, DisplayChip, DisplayDriver, Rotation};
pub use platform::{Platform, PlatformCapabilities};
pub use profile::{Profile, ProfileSpec, Wiring};
pub use touch::{Calibration, TouchChip, TouchConfig, TouchDriver, TouchFlip, TouchPoint};

/// HAL Result type
pub type Result<T> = std::result::Result<T, DisplayError>;
