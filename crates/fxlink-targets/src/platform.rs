//! Host target platforms.
//!
//! The set is closed: it mirrors the platforms the host build tool can ask
//! for, whether or not a FaceFX runtime ships for them. Which of these are
//! actually supported is decided by the resolver's layout table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// Coarse grouping of platforms sharing toolchain conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Windows,
    Apple,
    Unix,
    Console,
    Web,
}

/// A host engine target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Win32,
    Win64,
    #[serde(alias = "macos", alias = "osx")]
    Mac,
    Linux,
    Ios,
    TvOs,
    Android,
    XboxOne,
    Ps4,
    Switch,
    Html5,
}

impl TargetPlatform {
    /// Every platform the host can request, in declaration order.
    pub const ALL: [TargetPlatform; 11] = [
        TargetPlatform::Win32,
        TargetPlatform::Win64,
        TargetPlatform::Mac,
        TargetPlatform::Linux,
        TargetPlatform::Ios,
        TargetPlatform::TvOs,
        TargetPlatform::Android,
        TargetPlatform::XboxOne,
        TargetPlatform::Ps4,
        TargetPlatform::Switch,
        TargetPlatform::Html5,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`] and serde.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetPlatform::Win32 => "win32",
            TargetPlatform::Win64 => "win64",
            TargetPlatform::Mac => "mac",
            TargetPlatform::Linux => "linux",
            TargetPlatform::Ios => "ios",
            TargetPlatform::TvOs => "tvos",
            TargetPlatform::Android => "android",
            TargetPlatform::XboxOne => "xboxone",
            TargetPlatform::Ps4 => "ps4",
            TargetPlatform::Switch => "switch",
            TargetPlatform::Html5 => "html5",
        }
    }

    pub fn family(self) -> PlatformFamily {
        match self {
            TargetPlatform::Win32 | TargetPlatform::Win64 => PlatformFamily::Windows,
            TargetPlatform::Mac | TargetPlatform::Ios | TargetPlatform::TvOs => {
                PlatformFamily::Apple
            }
            TargetPlatform::Linux | TargetPlatform::Android => PlatformFamily::Unix,
            TargetPlatform::XboxOne | TargetPlatform::Ps4 | TargetPlatform::Switch => {
                PlatformFamily::Console
            }
            TargetPlatform::Html5 => PlatformFamily::Web,
        }
    }

    /// Short human-readable description used by listings.
    pub fn description(self) -> &'static str {
        match self {
            TargetPlatform::Win32 => "Windows, 32-bit",
            TargetPlatform::Win64 => "Windows, 64-bit",
            TargetPlatform::Mac => "macOS",
            TargetPlatform::Linux => "Linux",
            TargetPlatform::Ios => "iOS (device)",
            TargetPlatform::TvOs => "tvOS",
            TargetPlatform::Android => "Android (multi-ABI)",
            TargetPlatform::XboxOne => "Xbox One",
            TargetPlatform::Ps4 => "PlayStation 4",
            TargetPlatform::Switch => "Nintendo Switch",
            TargetPlatform::Html5 => "HTML5",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetPlatform {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "macos" | "osx" => return Ok(TargetPlatform::Mac),
            _ => {}
        }
        TargetPlatform::ALL
            .into_iter()
            .find(|p| p.as_str() == lowered)
            .ok_or_else(|| TargetError::UnknownPlatform { name: s.to_string() })
    }
}
