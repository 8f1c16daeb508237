//! Module-load initialization.
//!
//! Arms the self-trace tripwire once, process-wide, before `main()` (or
//! before the first JNI call on Android). The outcome is stored so clients
//! can observe it via `veriseal_tripwire_armed()`, but nothing acts on it:
//! initialization proceeds whether or not arming succeeded.
//!
//! ## Platform Mechanisms
//!
//! - **Linux/Android**: `.init_array` section
//! - **macOS/iOS**: `#[ctor::ctor]` attribute

use std::sync::OnceLock;

use veriseal_core::tripwire;

/// Tripwire outcome, set once at module load.
static TRIPWIRE_ARMED: OnceLock<bool> = OnceLock::new();

/// Arm the tripwire exactly once and record the outcome.
pub fn arm_once() -> bool {
    *TRIPWIRE_ARMED.get_or_init(tripwire::arm)
}

/// Whether the tripwire took hold at module load.
///
/// Returns `false` if arming failed or has not run yet.
pub fn tripwire_armed() -> bool {
    TRIPWIRE_ARMED.get().copied().unwrap_or(false)
}

// Linux/Android: .init_array constructor
#[cfg(any(target_os = "linux", target_os = "android"))]
#[cfg(not(any(test, debug_assertions)))]
mod ctor_impl {
    use super::arm_once;

    #[link_section = ".init_array"]
    #[used]
    static CTOR: extern "C" fn() = arm_ctor;

    extern "C" fn arm_ctor() {
        arm_once();
    }
}

// macOS/iOS: ctor crate
#[cfg(any(target_os = "macos", target_os = "ios"))]
#[cfg(not(any(test, debug_assertions)))]
#[ctor::ctor]
fn arm_ctor() {
    arm_once();
}
