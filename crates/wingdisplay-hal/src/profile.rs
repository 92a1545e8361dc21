//! Hardware profiles
//!
//! A profile is one display + touch pairing and its wiring. The set is fixed;
//! names are matched exactly against each profile's key or description.

use crate::bus::BOARD_SPI;
use crate::{
    DisplayChip, DisplayError, FourWireBus, Pin, PlatformCapabilities, ResistivePins, SpiDevice,
    TouchChip, TouchFlip,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// The host's own display and resistive touch panel
    BuiltIn,
    /// TFT FeatherWing 2.4" 320x240 touchscreen
    Feather24,
    /// TFT FeatherWing 3.5" 480x320 touchscreen
    Feather35,
}

/// How a profile's drivers are wired to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Wiring {
    /// Display is owned by the host; touch is sampled on host pins
    Host { touch: ResistivePins },
    /// Display and touch controller share the board SPI bus
    FourWire {
        display: FourWireBus,
        touch: SpiDevice,
    },
}

/// Static hardware facts for a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileSpec {
    /// Short lookup key
    pub key: &'static str,
    /// Full product description, also accepted as a lookup name
    pub description: &'static str,
    pub display: DisplayChip,
    /// Native (width, height); `None` when the host reports it
    pub size: Option<(u32, u32)>,
    pub touch: TouchChip,
    pub flip: TouchFlip,
    pub wiring: Wiring,
}

const FEATHER_WIRING: Wiring = Wiring::FourWire {
    display: FourWireBus {
        spi: BOARD_SPI,
        command: Pin("D10"),
        chip_select: Pin("D9"),
        reset: None,
    },
    touch: SpiDevice {
        spi: BOARD_SPI,
        chip_select: Pin("D6"),
    },
};

const BUILT_IN: ProfileSpec = ProfileSpec {
    key: "built-in",
    description: "Built-in display",
    display: DisplayChip::HostProvided,
    size: None,
    touch: TouchChip::Resistive,
    flip: TouchFlip::NONE,
    wiring: Wiring::Host {
        touch: ResistivePins {
            x_left: Pin("TOUCH_XL"),
            x_right: Pin("TOUCH_XR"),
            y_down: Pin("TOUCH_YD"),
            y_up: Pin("TOUCH_YU"),
        },
    },
};

const FEATHER_24: ProfileSpec = ProfileSpec {
    key: "featherwing-2.4",
    description: "TFT FeatherWing - 2.4\" 320x240 Touchscreen",
    display: DisplayChip::Ili9341,
    size: Some((320, 240)),
    touch: TouchChip::Stmpe610,
    flip: TouchFlip::new(false, false),
    wiring: FEATHER_WIRING,
};

const FEATHER_35: ProfileSpec = ProfileSpec {
    key: "featherwing-3.5",
    description: "TFT FeatherWing - 3.5\" 480x320 Touchscreen",
    display: DisplayChip::Hx8357,
    size: Some((480, 320)),
    touch: TouchChip::Stmpe610,
    flip: TouchFlip::new(false, true),
    wiring: FEATHER_WIRING,
};

impl Profile {
    /// All supported profiles
    pub fn all() -> &'static [Profile] {
        &[Profile::BuiltIn, Profile::Feather24, Profile::Feather35]
    }

    pub fn spec(&self) -> &'static ProfileSpec {
        match self {
            Profile::BuiltIn => &BUILT_IN,
            Profile::Feather24 => &FEATHER_24,
            Profile::Feather35 => &FEATHER_35,
        }
    }

    pub fn key(&self) -> &'static str {
        self.spec().key
    }

    /// Look up a profile by its exact key or exact description.
    ///
    /// No trimming or case folding is done. The empty string asks for the
    /// built-in display.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.is_empty() {
            return Some(Profile::BuiltIn);
        }

        Self::all().iter().copied().find(|profile| {
            let spec = profile.spec();
            spec.key == name || spec.description == name
        })
    }

    /// Pick the profile to instantiate on a host.
    ///
    /// A host with both a built-in display and touch panel always gets the
    /// built-in profile, whatever was requested.
    pub fn resolve(name: &str, capabilities: PlatformCapabilities) -> Result<Self, DisplayError> {
        if capabilities.has_builtin() {
            if Self::from_name(name) != Some(Profile::BuiltIn) {
                tracing::info!(
                    "Host has a built-in display, ignoring requested display '{}'",
                    name
                );
            }
            return Ok(Profile::BuiltIn);
        }

        match Self::from_name(name) {
            Some(Profile::BuiltIn) if !capabilities.builtin_display => {
                Err(DisplayError::NoBuiltInDisplay)
            }
            Some(profile) => Ok(profile),
            None => Err(DisplayError::UnrecognizedProfile(name.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_keys() {
        assert_eq!(Profile::from_name("built-in"), Some(Profile::BuiltIn));
        assert_eq!(Profile::from_name("featherwing-2.4"), Some(Profile::Feather24));
        assert_eq!(Profile::from_name("featherwing-3.5"), Some(Profile::Feather35));
        assert_eq!(Profile::from_name(""), Some(Profile::BuiltIn));
    }

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(Profile::from_name("FeatherWing-3.5"), None);
        assert_eq!(Profile::from_name(" featherwing-3.5 "), None);
        assert_eq!(Profile::from_name("BUILT-IN"), None);
        assert_eq!(Profile::from_name(" "), None);
        assert_eq!(
            Profile::from_name("tft featherwing - 2.4\" 320x240 touchscreen"),
            None
        );
    }

    #[test]
    fn test_from_name_descriptions() {
        assert_eq!(
            Profile::from_name("TFT FeatherWing - 2.4\" 320x240 Touchscreen"),
            Some(Profile::Feather24)
        );
        assert_eq!(
            Profile::from_name("TFT FeatherWing - 3.5\" 480x320 Touchscreen"),
            Some(Profile::Feather35)
        );
    }

    #[test]
    fn test_from_name_rejects_fragments() {
        assert_eq!(Profile::from_name("3.5"), None);
        assert_eq!(Profile::from_name("2.4"), None);
        assert_eq!(Profile::from_name("TFT FeatherWing"), None);
        assert_eq!(Profile::from_name("built"), None);
    }

    #[test]
    fn test_resolve_prefers_builtin() {
        let profile = Profile::resolve("featherwing-3.5", PlatformCapabilities::BUILTIN).unwrap();
        assert_eq!(profile, Profile::BuiltIn);

        let profile = Profile::resolve("nonsense", PlatformCapabilities::BUILTIN).unwrap();
        assert_eq!(profile, Profile::BuiltIn);
    }

    #[test]
    fn test_resolve_addon() {
        let profile = Profile::resolve("featherwing-2.4", PlatformCapabilities::NONE).unwrap();
        assert_eq!(profile, Profile::Feather24);
    }

    #[test]
    fn test_resolve_unrecognized() {
        let err = Profile::resolve("3.5", PlatformCapabilities::NONE).unwrap_err();
        assert!(matches!(err, DisplayError::UnrecognizedProfile(name) if name == "3.5"));
    }

    #[test]
    fn test_resolve_builtin_without_host_display() {
        let err = Profile::resolve("", PlatformCapabilities::NONE).unwrap_err();
        assert!(matches!(err, DisplayError::NoBuiltInDisplay));
    }

    #[test]
    fn test_resolve_builtin_display_without_touch() {
        let caps = PlatformCapabilities {
            builtin_display: true,
            builtin_touch: false,
        };
        assert_eq!(Profile::resolve("built-in", caps).unwrap(), Profile::BuiltIn);
        assert_eq!(
            Profile::resolve("featherwing-2.4", caps).unwrap(),
            Profile::Feather24
        );
    }

    #[test]
    fn test_profile_specs() {
        assert_eq!(Profile::Feather24.spec().size, Some((320, 240)));
        assert_eq!(Profile::Feather35.spec().size, Some((480, 320)));
        assert_eq!(Profile::BuiltIn.spec().size, None);

        assert_eq!(Profile::Feather24.spec().flip, TouchFlip::new(false, false));
        assert_eq!(Profile::Feather35.spec().flip, TouchFlip::new(false, true));

        for profile in Profile::all() {
            assert_eq!(Profile::from_name(profile.key()), Some(*profile));
        }
    }

    #[test]
    fn test_spec_serialization() {
        assert_eq!(serde_json::to_string(&Profile::BuiltIn).unwrap(), "\"built-in\"");

        let json = serde_json::to_value(Profile::Feather35.spec()).unwrap();
        assert_eq!(json["key"], "featherwing-3.5");
        assert_eq!(json["size"][0], 480);
        assert_eq!(json["flip"]["y"], true);
        assert_eq!(json["wiring"]["FourWire"]["touch"]["chip_select"], "D6");
    }

    #[test]
    fn test_feather_wiring() {
        let Wiring::FourWire { display, touch } = Profile::Feather35.spec().wiring else {
            panic!("3.5\" FeatherWing should use a four-wire bus");
        };
        assert_eq!(display.command, Pin("D10"));
        assert_eq!(display.chip_select, Pin("D9"));
        assert_eq!(display.reset, None);
        assert_eq!(touch.chip_select, Pin("D6"));
    }
}
