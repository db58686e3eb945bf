//! Error types for parsing host build identifiers.

/// Errors that can occur while interpreting host build identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The platform name is not part of the host platform set.
    #[error("unknown target platform: '{name}'")]
    UnknownPlatform {
        /// The name that failed to parse.
        name: String,
    },

    /// The compiler identifier is not a known toolchain generation.
    #[error("unknown compiler: '{name}' (expected vs2012, vs2013, vs2015, vs2017, vs2019 or vs2022)")]
    UnknownCompiler {
        /// The identifier that failed to parse.
        name: String,
    },

    /// The build configuration name is not recognized.
    #[error("unknown build configuration: '{name}'")]
    UnknownConfiguration {
        /// The name that failed to parse.
        name: String,
    },
}

/// Result type for target vocabulary operations.
pub type Result<T> = std::result::Result<T, TargetError>;
