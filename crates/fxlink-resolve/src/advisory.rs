//! One-time advisory for debug runtime libraries.
//!
//! Linking the debug FaceFX runtime is opt-in and easy to forget about, so
//! the first debug selection in a process is announced once. Resolvers
//! share a [`DebugAdvisory`] through an `Arc`; by default every resolver
//! uses the process-wide instance.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use fxlink_targets::TargetPlatform;

/// Claim-once flag guarding the debug-libraries advisory.
#[derive(Debug, Default)]
pub struct DebugAdvisory {
    shown: AtomicBool,
}

impl DebugAdvisory {
    pub const fn new() -> Self {
        Self {
            shown: AtomicBool::new(false),
        }
    }

    /// Returns true for exactly one caller over the flag's lifetime.
    pub fn claim(&self) -> bool {
        self.shown
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn has_fired(&self) -> bool {
        self.shown.load(Ordering::Acquire)
    }

    /// Log the advisory if nobody has yet. Returns whether this call logged it.
    pub fn notify(&self, platform: TargetPlatform, library_directory: &Path) -> bool {
        if !self.claim() {
            return false;
        }
        tracing::info!(
            %platform,
            directory = %library_directory.display(),
            "using debug libs for FaceFX"
        );
        true
    }
}

/// The advisory shared by every resolver that was not given its own.
pub fn process_advisory() -> Arc<DebugAdvisory> {
    static ADVISORY: OnceLock<Arc<DebugAdvisory>> = OnceLock::new();
    ADVISORY
        .get_or_init(|| Arc::new(DebugAdvisory::new()))
        .clone()
}
