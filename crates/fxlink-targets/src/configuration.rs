//! Host build configurations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// The host build configuration of one build request.
///
/// Only [`BuildConfiguration::Debug`] can select debug artifacts; every
/// other configuration links the release runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildConfiguration {
    Debug,
    DebugGame,
    #[default]
    #[serde(alias = "release")]
    Development,
    Shipping,
    Test,
}

impl BuildConfiguration {
    pub const ALL: [BuildConfiguration; 5] = [
        BuildConfiguration::Debug,
        BuildConfiguration::DebugGame,
        BuildConfiguration::Development,
        BuildConfiguration::Shipping,
        BuildConfiguration::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "debug",
            BuildConfiguration::DebugGame => "debug-game",
            BuildConfiguration::Development => "development",
            BuildConfiguration::Shipping => "shipping",
            BuildConfiguration::Test => "test",
        }
    }

    /// Whether this configuration asks for debug artifacts.
    pub fn is_debug(self) -> bool {
        matches!(self, BuildConfiguration::Debug)
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildConfiguration {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "release" => return Ok(BuildConfiguration::Development),
            "debuggame" => return Ok(BuildConfiguration::DebugGame),
            _ => {}
        }
        BuildConfiguration::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| TargetError::UnknownConfiguration { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_debug_is_debug() {
        let debug: Vec<_> = BuildConfiguration::ALL
            .into_iter()
            .filter(|c| c.is_debug())
            .collect();
        assert_eq!(debug, vec![BuildConfiguration::Debug]);
    }

    #[test]
    fn release_is_an_alias_for_development() {
        assert_eq!(
            "Release".parse::<BuildConfiguration>().unwrap(),
            BuildConfiguration::Development
        );
        let parsed: BuildConfiguration = serde_json::from_str("\"release\"").unwrap();
        assert_eq!(parsed, BuildConfiguration::Development);
    }

    #[test]
    fn parse_host_spellings() {
        assert_eq!(
            "DebugGame".parse::<BuildConfiguration>().unwrap(),
            BuildConfiguration::DebugGame
        );
        assert_eq!(
            "Shipping".parse::<BuildConfiguration>().unwrap(),
            BuildConfiguration::Shipping
        );
        assert!("profile".parse::<BuildConfiguration>().is_err());
    }
}
