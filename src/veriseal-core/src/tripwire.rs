//! Self-trace tripwire.
//!
//! At module load the FFI layer claims the process's single tracer slot via
//! `ptrace(PTRACE_TRACEME)`, so that later attach-based debugger or hook
//! tooling fails to attach. Best-effort: the outcome is recorded and
//! observable, but initialization proceeds regardless of success or failure
//! and nothing ever acts on it.

use tracing::debug;

/// Attempt to arm the self-trace tripwire. Returns whether it took hold.
///
/// Safe to call more than once; only the first successful call has any
/// effect on the process.
pub fn arm() -> bool {
    let armed = arm_impl();
    debug!(armed, "self-trace tripwire");
    armed
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn arm_impl() -> bool {
    // Fails with -1 if a tracer is already attached, which is itself
    // a signal worth recording.
    unsafe { libc::ptrace(libc::PTRACE_TRACEME, 0, 0, 0) != -1 }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn arm_impl() -> bool {
    false
}
