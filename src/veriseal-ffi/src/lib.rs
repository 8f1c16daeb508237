//! # veriseal-ffi
//!
//! C-compatible FFI interface for the veriseal integrity-gated crypto
//! facade.
//!
//! The boundary can only carry strings and integers, so verification
//! failures never cross it as structured errors: the raw check collapses to
//! the 4-valued code and every gated crypto operation collapses to either
//! real output or the sentinel string.
//!
//! ## Usage
//!
//! ```c
//! #include "veriseal.h"
//!
//! int main(void) {
//!     VerisealHandle *handle = veriseal_init();
//!     if (!handle) {
//!         return 1;
//!     }
//!
//!     int code = veriseal_check(handle, "com.example.app", 12345);
//!
//!     char *ct = veriseal_encode(handle, "com.example.app", 12345, "hello");
//!     if (ct) {
//!         /* ... */
//!         veriseal_free_string(ct);
//!     }
//!
//!     veriseal_destroy(handle);
//!     return 0;
//! }
//! ```

#![allow(clippy::missing_safety_doc)] // FFI functions are inherently unsafe

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use veriseal_core::{PackageIdentity, SealEngine};

pub mod constructor;

#[cfg(target_os = "android")]
mod android;

/// Opaque handle to the veriseal engine.
pub struct VerisealHandle {
    engine: SealEngine,
}

/// Result of the raw check when the arguments themselves are unusable.
/// Matches the lookup-failure wire code.
const CODE_LOOKUP_FAILURE: i32 = -3;

/// Initialize the veriseal module.
///
/// Returns a handle that must be passed to all other functions, or NULL on
/// failure. The handle must be freed with `veriseal_destroy`.
#[no_mangle]
pub extern "C" fn veriseal_init() -> *mut VerisealHandle {
    let handle = Box::new(VerisealHandle {
        engine: SealEngine::new(),
    });
    Box::into_raw(handle)
}

/// Destroy a handle from `veriseal_init` and release its resources.
#[no_mangle]
pub unsafe extern "C" fn veriseal_destroy(handle: *mut VerisealHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Build the caller context from host-reported identity.
///
/// Over the plain C ABI the caller context is whatever identity the hosting
/// runtime reports for itself; on Android the JNI bindings resolve it
/// through PackageManager instead.
unsafe fn caller_identity(
    package_name: *const c_char,
    certificate_hash: i32,
) -> Option<PackageIdentity> {
    if package_name.is_null() {
        return None;
    }
    let package_name = CStr::from_ptr(package_name).to_str().ok()?.to_owned();
    Some(PackageIdentity {
        package_name,
        certificate_hashes: vec![certificate_hash],
    })
}

/// Raw signature check.
///
/// Returns `1` on pass, `-1` on identity mismatch, `-2` on certificate
/// mismatch, `-3` on lookup failure (including unusable arguments).
#[no_mangle]
pub unsafe extern "C" fn veriseal_check(
    handle: *const VerisealHandle,
    package_name: *const c_char,
    certificate_hash: i32,
) -> i32 {
    if handle.is_null() {
        return CODE_LOOKUP_FAILURE;
    }
    let handle = &*handle;
    match caller_identity(package_name, certificate_hash) {
        Some(caller) => handle.engine.check(&caller),
        None => CODE_LOOKUP_FAILURE,
    }
}

/// Run one gated string operation and collapse every failure to the
/// sentinel, since the boundary cannot carry structured errors.
unsafe fn gated_string_op(
    handle: *const VerisealHandle,
    package_name: *const c_char,
    certificate_hash: i32,
    input: *const c_char,
    op: impl Fn(&SealEngine, &PackageIdentity, &str) -> Result<String, veriseal_core::SealError>,
) -> *mut c_char {
    if handle.is_null() || input.is_null() {
        return ptr::null_mut();
    }
    let handle = &*handle;

    let sentinel = handle.engine.config().sentinel.clone();
    let output = match (
        caller_identity(package_name, certificate_hash),
        CStr::from_ptr(input).to_str(),
    ) {
        (Some(caller), Ok(input)) => match op(&handle.engine, &caller, input) {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(error = %err, "gated operation failed");
                sentinel
            }
        },
        _ => sentinel,
    };

    match CString::new(output) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Gated AES encrypt. Returns base64 ciphertext, the sentinel string on
/// rejection, or NULL on unusable arguments.
///
/// The returned string must be freed with `veriseal_free_string`.
#[no_mangle]
pub unsafe extern "C" fn veriseal_encode(
    handle: *const VerisealHandle,
    package_name: *const c_char,
    certificate_hash: i32,
    plaintext: *const c_char,
) -> *mut c_char {
    gated_string_op(handle, package_name, certificate_hash, plaintext, |e, c, s| {
        e.encode(c, s)
    })
}

/// Gated AES decrypt of base64 ciphertext. Returns the plaintext, the
/// sentinel string on rejection, or NULL on unusable arguments.
///
/// The returned string must be freed with `veriseal_free_string`.
#[no_mangle]
pub unsafe extern "C" fn veriseal_decode(
    handle: *const VerisealHandle,
    package_name: *const c_char,
    certificate_hash: i32,
    ciphertext: *const c_char,
) -> *mut c_char {
    gated_string_op(handle, package_name, certificate_hash, ciphertext, |e, c, s| {
        e.decode(c, s)
    })
}

/// Gated keyed digest. Returns 32 lowercase hex characters, the sentinel
/// string on rejection, or NULL on unusable arguments.
///
/// The returned string must be freed with `veriseal_free_string`.
#[no_mangle]
pub unsafe extern "C" fn veriseal_sign(
    handle: *const VerisealHandle,
    package_name: *const c_char,
    certificate_hash: i32,
    payload: *const c_char,
) -> *mut c_char {
    gated_string_op(handle, package_name, certificate_hash, payload, |e, c, s| {
        e.sign(c, s)
    })
}

/// Free a string returned by a veriseal function.
#[no_mangle]
pub unsafe extern "C" fn veriseal_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Whether the self-trace tripwire took hold at module load.
///
/// Returns `1` if armed, `0` if arming failed or has not run.
#[no_mangle]
pub extern "C" fn veriseal_tripwire_armed() -> i32 {
    i32::from(constructor::tripwire_armed())
}

/// Library version as a static null-terminated string.
#[no_mangle]
pub extern "C" fn veriseal_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
