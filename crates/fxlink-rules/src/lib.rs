//! FaceFX module rules for host engine builds.
//!
//! The integration is three host modules:
//! - **FaceFXLib:** external module carrying the prebuilt runtime library
//! - **FaceFX:** runtime module
//! - **FaceFXEditor:** editor-only module
//!
//! [`plan`] decides whether the integration is built at all and, if so,
//! produces the rules for each module.

pub mod error;
pub mod integration;
pub mod module;

pub use error::{Result, RulesError};
pub use integration::{
    is_feature_enabled, plan, FailurePolicy, IntegrationOptions, IntegrationPlan,
    IntegrationStatus,
};
pub use module::{ModuleKind, ModuleRules};
