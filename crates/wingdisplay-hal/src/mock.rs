//! Mock implementations for testing without real hardware
//!
//! [`MockPlatform`] stands in for a board: it can pretend to have a built-in
//! display, hands out mock display and touch drivers, and enforces that only
//! one display holds the SPI display bus at a time.
//!
//! # Usage
//!
//! ```no_run
//! use wingdisplay_hal::mock::MockPlatform;
//!
//! // A bare Feather with nothing built in
//! let feather = MockPlatform::feather();
//!
//! // A board with an integrated 320x240 touch display
//! let pyportal = MockPlatform::builtin(320, 240);
//!
//! // Or pick from WINGDISPLAY_MOCK_HOST
//! let host = MockPlatform::from_env();
//! ```

use crate::{
    Backlight, DisplayChip, DisplayDriver, DisplayError, FourWireBus, Platform,
    PlatformCapabilities, ResistivePins, Rotation, SpiDevice, TouchChip, TouchConfig, TouchDriver,
    TouchPoint,
};
use std::sync::{Arc, RwLock};

/// Render group understood by mock displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockGroup {
    pub label: String,
}

impl MockGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Shared mock state for synchronized access
#[derive(Debug)]
pub struct MockState {
    /// What the mock host advertises
    pub capabilities: PlatformCapabilities,
    /// Size of the built-in display
    pub builtin_size: (u32, u32),
    /// Whether the built-in display has brightness control
    pub builtin_backlight: bool,
    /// Backlight present but refusing changes (e.g. PWM pin held by the host)
    pub backlight_locked: bool,
    /// Claim id of the display currently holding the bus
    pub bus_owner: Option<u64>,
    /// Last claim id handed out
    pub last_claim: u64,
    /// Number of `release_displays` calls
    pub releases: u32,
    /// Display chips attached over SPI, in order
    pub attached: Vec<DisplayChip>,
    /// Touch chips created, in order
    pub touch_attached: Vec<TouchChip>,
    /// Last rotation applied to any display
    pub rotation: Rotation,
    /// Current backlight level
    pub brightness: f32,
    /// Labels of groups shown, in order
    pub shown: Vec<String>,
    /// Current touch, if the panel is pressed
    pub touch: Option<TouchPoint>,
    /// Error returned by the next driver construction
    pub fail_next_attach: Option<String>,
}

impl MockState {
    pub fn new(capabilities: PlatformCapabilities) -> Self {
        Self {
            capabilities,
            builtin_size: (320, 240),
            builtin_backlight: true,
            backlight_locked: false,
            bus_owner: None,
            last_claim: 0,
            releases: 0,
            attached: Vec::new(),
            touch_attached: Vec::new(),
            rotation: Rotation::Normal,
            brightness: 1.0,
            shown: Vec::new(),
            touch: None,
            fail_next_attach: None,
        }
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(PlatformCapabilities::NONE)
    }
}

/// Mock host board
pub struct MockPlatform {
    state: Arc<RwLock<MockState>>,
}

impl MockPlatform {
    /// Create a mock host with the given capabilities
    pub fn new(capabilities: PlatformCapabilities) -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState::new(capabilities))),
        }
    }

    /// A board with nothing built in; add-on displays only
    pub fn feather() -> Self {
        Self::new(PlatformCapabilities::NONE)
    }

    /// A board with an integrated touch display of the given size
    pub fn builtin(width: u32, height: u32) -> Self {
        let platform = Self::new(PlatformCapabilities::BUILTIN);
        if let Ok(mut state) = platform.state.write() {
            state.builtin_size = (width, height);
        }
        platform
    }

    /// Create from environment variable or default to a bare Feather
    pub fn from_env() -> Self {
        match std::env::var("WINGDISPLAY_MOCK_HOST")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "pyportal" | "builtin" => Self::builtin(320, 240),
            "titano" | "pyportal-titano" => Self::builtin(480, 320),
            _ => Self::feather(),
        }
    }

    /// Toggle brightness control on the built-in display
    pub fn with_builtin_backlight(self, enabled: bool) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.builtin_backlight = enabled;
        }
        self
    }

    /// Make the backlight reject brightness changes
    pub fn lock_backlight(&self, locked: bool) {
        if let Ok(mut state) = self.state.write() {
            state.backlight_locked = locked;
        }
    }

    /// Make the next display or touch construction fail
    pub fn fail_next_attach(&self, reason: impl Into<String>) {
        if let Ok(mut state) = self.state.write() {
            state.fail_next_attach = Some(reason.into());
        }
    }

    /// Simulate a press on the touch panel
    pub fn press(&self, x: u32, y: u32, pressure: u16) {
        if let Ok(mut state) = self.state.write() {
            state.touch = Some(TouchPoint { x, y, pressure });
        }
    }

    /// Simulate lifting off the touch panel
    pub fn lift(&self) {
        if let Ok(mut state) = self.state.write() {
            state.touch = None;
        }
    }

    /// Get shared state for inspection in tests
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        Arc::clone(&self.state)
    }

    fn take_injected_failure(&self) -> Result<(), DisplayError> {
        let injected = self
            .state
            .write()
            .ok()
            .and_then(|mut state| state.fail_next_attach.take());
        match injected {
            Some(reason) => Err(DisplayError::DriverConstruction(reason)),
            None => Ok(()),
        }
    }
}

impl Platform for MockPlatform {
    type Group = MockGroup;

    fn capabilities(&self) -> PlatformCapabilities {
        self.state
            .read()
            .map(|s| s.capabilities)
            .unwrap_or_default()
    }

    fn builtin_display(&mut self) -> Result<Box<dyn DisplayDriver<MockGroup>>, DisplayError> {
        self.take_injected_failure()?;

        let state = self
            .state
            .read()
            .map_err(|_| DisplayError::DriverConstruction("mock state poisoned".into()))?;
        if !state.capabilities.builtin_display {
            return Err(DisplayError::DriverConstruction(
                "host has no built-in display".into(),
            ));
        }

        let (width, height) = state.builtin_size;
        let backlight = state.builtin_backlight.then(|| MockBacklight {
            level: state.brightness,
            state: Arc::clone(&self.state),
        });
        drop(state);

        tracing::debug!("[MOCK] Built-in display {}x{}", width, height);
        Ok(Box::new(MockDisplay {
            width,
            height,
            rotation: Rotation::Normal,
            claim: None,
            backlight,
            state: Arc::clone(&self.state),
        }))
    }

    fn builtin_touch(
        &mut self,
        pins: &ResistivePins,
        config: TouchConfig,
    ) -> Result<Box<dyn TouchDriver>, DisplayError> {
        self.take_injected_failure()?;

        if let Ok(mut state) = self.state.write() {
            state.touch_attached.push(TouchChip::Resistive);
        }
        tracing::debug!(
            "[MOCK] Resistive touch on {}/{}/{}/{}",
            pins.x_left,
            pins.x_right,
            pins.y_down,
            pins.y_up
        );
        Ok(Box::new(MockTouch {
            config,
            state: Arc::clone(&self.state),
        }))
    }

    fn release_displays(&mut self) {
        if let Ok(mut state) = self.state.write() {
            state.bus_owner = None;
            state.releases += 1;
        }
        tracing::debug!("[MOCK] Displays released");
    }

    fn attach_display(
        &mut self,
        chip: DisplayChip,
        bus: &FourWireBus,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn DisplayDriver<MockGroup>>, DisplayError> {
        self.take_injected_failure()?;

        let mut state = self
            .state
            .write()
            .map_err(|_| DisplayError::DriverConstruction("mock state poisoned".into()))?;
        if let Some(owner) = state.bus_owner {
            return Err(DisplayError::BusUnavailable(format!(
                "{} is held by display #{}",
                bus.spi, owner
            )));
        }

        state.last_claim += 1;
        let claim = state.last_claim;
        state.bus_owner = Some(claim);
        state.attached.push(chip);
        drop(state);

        tracing::debug!(
            "[MOCK] {} #{} attached at {}x{}",
            chip.name(),
            claim,
            width,
            height
        );
        Ok(Box::new(MockDisplay {
            width,
            height,
            rotation: Rotation::Normal,
            claim: Some(claim),
            backlight: None,
            state: Arc::clone(&self.state),
        }))
    }

    fn attach_touch(
        &mut self,
        chip: TouchChip,
        device: &SpiDevice,
        config: TouchConfig,
    ) -> Result<Box<dyn TouchDriver>, DisplayError> {
        self.take_injected_failure()?;

        if let Ok(mut state) = self.state.write() {
            state.touch_attached.push(chip);
        }
        tracing::debug!("[MOCK] {} attached (cs={})", chip.name(), device.chip_select);
        Ok(Box::new(MockTouch {
            config,
            state: Arc::clone(&self.state),
        }))
    }
}

/// Mock backlight
pub struct MockBacklight {
    level: f32,
    state: Arc<RwLock<MockState>>,
}

impl Backlight for MockBacklight {
    fn brightness(&self) -> f32 {
        self.level
    }

    fn set_brightness(&mut self, level: f32) -> Result<(), DisplayError> {
        if self.state.read().map(|s| s.backlight_locked).unwrap_or(false) {
            return Err(DisplayError::UnsupportedCapability("brightness control"));
        }

        self.level = level;
        if let Ok(mut state) = self.state.write() {
            state.brightness = level;
        }
        tracing::debug!("[MOCK] Brightness set to {:.2}", level);
        Ok(())
    }
}

/// Mock display for testing
pub struct MockDisplay {
    width: u32,
    height: u32,
    rotation: Rotation,
    /// Bus claim, `None` for the host-owned display
    claim: Option<u64>,
    backlight: Option<MockBacklight>,
    state: Arc<RwLock<MockState>>,
}

impl MockDisplay {
    fn holds_bus(&self) -> bool {
        match self.claim {
            None => true,
            Some(claim) => self
                .state
                .read()
                .map(|s| s.bus_owner == Some(claim))
                .unwrap_or(false),
        }
    }
}

impl DisplayDriver<MockGroup> for MockDisplay {
    fn width(&self) -> u32 {
        self.width
    }

    fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        if !self.holds_bus() {
            return Err(DisplayError::BusUnavailable("display was released".into()));
        }

        if rotation.is_portrait() != self.rotation.is_portrait() {
            std::mem::swap(&mut self.width, &mut self.height);
        }
        self.rotation = rotation;
        if let Ok(mut state) = self.state.write() {
            state.rotation = rotation;
        }
        tracing::debug!("[MOCK] Rotation set to {} degrees", rotation.degrees());
        Ok(())
    }

    fn backlight(&self) -> Option<&dyn Backlight> {
        self.backlight.as_ref().map(|b| b as &dyn Backlight)
    }

    fn backlight_mut(&mut self) -> Option<&mut dyn Backlight> {
        self.backlight.as_mut().map(|b| b as &mut dyn Backlight)
    }

    fn show(&mut self, group: &MockGroup) -> Result<(), DisplayError> {
        if !self.holds_bus() {
            return Err(DisplayError::BusUnavailable("display was released".into()));
        }

        if let Ok(mut state) = self.state.write() {
            state.shown.push(group.label.clone());
        }
        tracing::debug!("[MOCK] Showing '{}'", group.label);
        Ok(())
    }
}

/// Mock touch controller
pub struct MockTouch {
    config: TouchConfig,
    state: Arc<RwLock<MockState>>,
}

impl TouchDriver for MockTouch {
    fn config(&self) -> &TouchConfig {
        &self.config
    }

    fn touch_point(&mut self) -> Result<Option<TouchPoint>, DisplayError> {
        Ok(self.state.read().ok().and_then(|s| s.touch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::BOARD_SPI;
    use crate::{Calibration, Pin, TouchFlip};

    fn bus() -> FourWireBus {
        FourWireBus {
            spi: BOARD_SPI,
            command: Pin("D10"),
            chip_select: Pin("D9"),
            reset: None,
        }
    }

    fn touch_config() -> TouchConfig {
        TouchConfig {
            calibration: Calibration::new((0, 4095), (0, 4095)),
            size: (320, 240),
            rotation: Rotation::Normal,
            flip: TouchFlip::NONE,
        }
    }

    #[test]
    fn test_mock_platform_capabilities() {
        assert!(!MockPlatform::feather().capabilities().has_builtin());
        assert!(MockPlatform::builtin(320, 240).capabilities().has_builtin());
    }

    #[test]
    fn test_bus_is_exclusive() {
        let mut platform = MockPlatform::feather();
        let _first = platform
            .attach_display(DisplayChip::Ili9341, &bus(), 320, 240)
            .unwrap();

        let second = platform.attach_display(DisplayChip::Hx8357, &bus(), 480, 320);
        assert!(matches!(second, Err(DisplayError::BusUnavailable(_))));

        platform.release_displays();
        assert!(
            platform
                .attach_display(DisplayChip::Hx8357, &bus(), 480, 320)
                .is_ok()
        );
    }

    #[test]
    fn test_released_display_refuses_show() {
        let mut platform = MockPlatform::feather();
        let mut display = platform
            .attach_display(DisplayChip::Ili9341, &bus(), 320, 240)
            .unwrap();
        display.show(&MockGroup::new("before")).unwrap();

        platform.release_displays();
        assert!(matches!(
            display.show(&MockGroup::new("after")),
            Err(DisplayError::BusUnavailable(_))
        ));
        assert_eq!(platform.state().read().unwrap().shown, vec!["before"]);
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let mut platform = MockPlatform::feather();
        let mut display = platform
            .attach_display(DisplayChip::Ili9341, &bus(), 320, 240)
            .unwrap();

        display.set_rotation(Rotation::Rotate90).unwrap();
        assert_eq!((display.width(), display.height()), (240, 320));

        display.set_rotation(Rotation::Rotate270).unwrap();
        assert_eq!((display.width(), display.height()), (240, 320));

        display.set_rotation(Rotation::Rotate180).unwrap();
        assert_eq!((display.width(), display.height()), (320, 240));
    }

    #[test]
    fn test_builtin_backlight_toggle() {
        let mut platform = MockPlatform::builtin(480, 320).with_builtin_backlight(false);
        let display = platform.builtin_display().unwrap();
        assert!(display.backlight().is_none());
        assert_eq!((display.width(), display.height()), (480, 320));
    }

    #[test]
    fn test_injected_failure_is_one_shot() {
        let mut platform = MockPlatform::feather();
        platform.fail_next_attach("no ACK from ILI9341");

        let result = platform.attach_display(DisplayChip::Ili9341, &bus(), 320, 240);
        assert!(matches!(result, Err(DisplayError::DriverConstruction(msg)) if msg.contains("ACK")));
        assert!(
            platform
                .attach_display(DisplayChip::Ili9341, &bus(), 320, 240)
                .is_ok()
        );
    }

    #[test]
    fn test_mock_touch() {
        let mut platform = MockPlatform::feather();
        let device = SpiDevice {
            spi: BOARD_SPI,
            chip_select: Pin("D6"),
        };
        let mut touch = platform
            .attach_touch(TouchChip::Stmpe610, &device, touch_config())
            .unwrap();

        assert_eq!(touch.touch_point().unwrap(), None);

        platform.press(10, 20, 300);
        assert_eq!(
            touch.touch_point().unwrap(),
            Some(TouchPoint {
                x: 10,
                y: 20,
                pressure: 300
            })
        );

        platform.lift();
        assert_eq!(touch.touch_point().unwrap(), None);
        assert_eq!(touch.config().size, (320, 240));
    }

    #[test]
    fn test_mock_host_from_env() {
        // Only this test touches WINGDISPLAY_MOCK_HOST
        unsafe { std::env::set_var("WINGDISPLAY_MOCK_HOST", "pyportal") };
        let mut pyportal = MockPlatform::from_env();
        assert!(pyportal.capabilities().has_builtin());
        let display = pyportal.builtin_display().unwrap();
        assert_eq!((display.width(), display.height()), (320, 240));

        unsafe { std::env::set_var("WINGDISPLAY_MOCK_HOST", "Titano") };
        let mut titano = MockPlatform::from_env();
        let display = titano.builtin_display().unwrap();
        assert_eq!((display.width(), display.height()), (480, 320));

        unsafe { std::env::remove_var("WINGDISPLAY_MOCK_HOST") };
        let feather = MockPlatform::from_env();
        assert_eq!(feather.capabilities(), PlatformCapabilities::NONE);
    }

    #[test]
    fn test_builtin_display_missing() {
        let mut platform = MockPlatform::feather();
        assert!(matches!(
            platform.builtin_display(),
            Err(DisplayError::DriverConstruction(_))
        ));
    }
}
