//! Host build vocabulary for FaceFX artifact resolution.
//!
//! Every build request handed to the resolver is expressed in terms of:
//! - **Platform:** the host engine's closed target platform set
//! - **Compiler:** the toolchain generation (Windows-family layouts only)
//! - **Configuration:** the host build configuration
//!
//! These are assembled into a [`TargetDescriptor`].

pub mod configuration;
pub mod descriptor;
pub mod error;
pub mod platform;
pub mod toolchain;

pub use configuration::BuildConfiguration;
pub use descriptor::TargetDescriptor;
pub use error::{Result, TargetError};
pub use platform::{PlatformFamily, TargetPlatform};
pub use toolchain::Compiler;
