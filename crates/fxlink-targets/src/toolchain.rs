//! Compiler toolchain generations.
//!
//! Variants are declared oldest first so that the derived ordering matches
//! release order; toolchain bucketing relies on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// A Visual Studio compiler generation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Compiler {
    #[serde(rename = "vs2012")]
    VisualStudio2012,
    #[serde(rename = "vs2013")]
    VisualStudio2013,
    #[default]
    #[serde(rename = "vs2015")]
    VisualStudio2015,
    #[serde(rename = "vs2017")]
    VisualStudio2017,
    #[serde(rename = "vs2019")]
    VisualStudio2019,
    #[serde(rename = "vs2022")]
    VisualStudio2022,
}

impl Compiler {
    pub const ALL: [Compiler; 6] = [
        Compiler::VisualStudio2012,
        Compiler::VisualStudio2013,
        Compiler::VisualStudio2015,
        Compiler::VisualStudio2017,
        Compiler::VisualStudio2019,
        Compiler::VisualStudio2022,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Compiler::VisualStudio2012 => "vs2012",
            Compiler::VisualStudio2013 => "vs2013",
            Compiler::VisualStudio2015 => "vs2015",
            Compiler::VisualStudio2017 => "vs2017",
            Compiler::VisualStudio2019 => "vs2019",
            Compiler::VisualStudio2022 => "vs2022",
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compiler {
    type Err = TargetError;

    /// Accepts `vs2015`, `VisualStudio2015` or the bare year `2015`.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let year = lowered
            .strip_prefix("visualstudio")
            .or_else(|| lowered.strip_prefix("vs"))
            .unwrap_or(&lowered);
        Compiler::ALL
            .into_iter()
            .find(|c| &c.as_str()[2..] == year)
            .ok_or_else(|| TargetError::UnknownCompiler { name: s.to_string() })
    }
}
