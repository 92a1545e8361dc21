//! Display adapter
//!
//! Resolves a profile against the host, instantiates its display and touch
//! drivers, and then forwards every property and operation to them.

use crate::{
    Calibration, DisplayDriver, Platform, Profile, Rotation, TouchConfig, TouchDriver, Wiring,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Display '{0}' is not a supported profile")]
    UnrecognizedProfile(String),

    #[error("Host has no built-in display")]
    NoBuiltInDisplay,

    #[error("Display does not support {0}")]
    UnsupportedCapability(&'static str),

    #[error("Driver initialization failed: {0}")]
    DriverConstruction(String),

    #[error("Invalid rotation: {0} degrees")]
    InvalidRotation(i32),

    #[error("Display bus unavailable: {0}")]
    BusUnavailable(String),

    #[error("Render failed: {0}")]
    Render(String),
}

/// Construction parameters for a [`DisplayAdapter`]
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterOptions {
    /// Profile key or description; empty selects the built-in display
    pub name: String,
    /// Rotation in degrees, a multiple of 90
    pub rotation: i32,
    /// Touch calibration; the touch chip's default when `None`
    pub calibration: Option<Calibration>,
    /// Initial brightness, 0.0 to 1.0
    pub brightness: f32,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            rotation: 0,
            calibration: None,
            brightness: 1.0,
        }
    }
}

/// Brightness reported for panels without brightness control
pub const DEFAULT_BRIGHTNESS: f32 = 1.0;

/// Uniform facade over a built-in or add-on display
pub struct DisplayAdapter<G: ?Sized> {
    profile: Profile,
    display: Box<dyn DisplayDriver<G>>,
    touch: Option<Box<dyn TouchDriver>>,
}

impl<G: ?Sized + 'static> DisplayAdapter<G> {
    /// Resolve the requested profile on `platform` and bring up its drivers
    pub fn new<P>(platform: &mut P, options: &AdapterOptions) -> Result<Self, DisplayError>
    where
        P: Platform<Group = G>,
    {
        let rotation = Rotation::from_degrees(options.rotation)?;
        let capabilities = platform.capabilities();
        let profile = Profile::resolve(&options.name, capabilities)?;
        let spec = profile.spec();

        tracing::info!("Instantiating the {} display", profile);

        let calibration = options
            .calibration
            .unwrap_or_else(|| spec.touch.default_calibration());

        let (display, touch) = match spec.wiring {
            Wiring::Host { touch: pins } => {
                let mut display = platform.builtin_display()?;
                display.set_rotation(rotation)?;

                let touch = if capabilities.builtin_touch {
                    let config = TouchConfig {
                        calibration,
                        size: (display.width(), display.height()),
                        rotation,
                        flip: spec.flip,
                    };
                    Some(platform.builtin_touch(&pins, config)?)
                } else {
                    tracing::info!("Host has no built-in touch panel");
                    None
                };

                (display, touch)
            }
            Wiring::FourWire {
                display: bus,
                touch: device,
            } => {
                // The bus can only be claimed once the previous display lets go
                platform.release_displays();

                let (width, height) = spec.size.ok_or_else(|| {
                    DisplayError::DriverConstruction(format!(
                        "{} has no native size",
                        profile.key()
                    ))
                })?;

                let mut display = platform.attach_display(spec.display, &bus, width, height)?;
                display.set_rotation(rotation)?;
                tracing::debug!(
                    "{} attached on {} (dc={}, cs={})",
                    spec.display.name(),
                    bus.spi,
                    bus.command,
                    bus.chip_select
                );

                let config = TouchConfig {
                    calibration,
                    size: (display.width(), display.height()),
                    rotation,
                    flip: spec.flip,
                };
                let touch = platform.attach_touch(spec.touch, &device, config)?;
                tracing::debug!("{} attached (cs={})", spec.touch.name(), device.chip_select);

                (display, Some(touch))
            }
        };

        let mut adapter = Self {
            profile,
            display,
            touch,
        };
        adapter.set_brightness(options.brightness);

        tracing::info!(
            "Display ready: {}x{} at {}",
            adapter.width(),
            adapter.height(),
            rotation
        );

        Ok(adapter)
    }

    /// The profile this adapter was built for
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Current brightness, or 1.0 when the panel has no brightness control
    pub fn brightness(&self) -> f32 {
        self.display
            .backlight()
            .map(|backlight| backlight.brightness())
            .unwrap_or(DEFAULT_BRIGHTNESS)
    }

    /// Set brightness (clamped to 0.0..=1.0).
    ///
    /// Panels without brightness control only log a warning.
    pub fn set_brightness(&mut self, level: f32) {
        if !level.is_finite() {
            tracing::warn!("Ignoring brightness level {}", level);
            return;
        }
        let level = level.clamp(0.0, 1.0);

        match self.display.backlight_mut() {
            Some(backlight) => match backlight.set_brightness(level) {
                Ok(()) => tracing::debug!("Brightness set to {:.2}", level),
                Err(e) => tracing::warn!("Display brightness not adjustable: {}", e),
            },
            None => tracing::warn!("Display brightness not adjustable"),
        }
    }

    pub fn width(&self) -> u32 {
        self.display.width()
    }

    /// Overwrite the reported width. The panel is not resized.
    pub fn set_width(&mut self, width: u32) {
        self.display.set_width(width);
    }

    pub fn height(&self) -> u32 {
        self.display.height()
    }

    /// Overwrite the reported height. The panel is not resized.
    pub fn set_height(&mut self, height: u32) {
        self.display.set_height(height);
    }

    pub fn rotation(&self) -> Rotation {
        self.display.rotation()
    }

    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.display.set_rotation(rotation)
    }

    /// Present a render group
    pub fn show(&mut self, group: &G) -> Result<(), DisplayError> {
        self.display.show(group)
    }

    /// Map normalized screen position (0.0 to 1.0 on each axis) to pixels.
    ///
    /// Factors are not clamped; values outside 0.0..=1.0 land off screen.
    /// Results beyond the `i32` range saturate at its bounds and NaN maps to 0.
    pub fn screen_to_rect(&self, width_factor: f64, height_factor: f64) -> (i32, i32) {
        let x = (width_factor * f64::from(self.width())).floor() as i32;
        let y = (height_factor * f64::from(self.height())).floor() as i32;
        (x, y)
    }

    pub fn touch(&self) -> Option<&dyn TouchDriver> {
        self.touch.as_deref()
    }

    pub fn touch_mut(&mut self) -> Option<&mut (dyn TouchDriver + 'static)> {
        self.touch.as_deref_mut()
    }
}
