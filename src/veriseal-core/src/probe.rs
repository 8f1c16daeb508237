//! Emulator/instrumentation environment probe.
//!
//! The gate consumes this as a boolean oracle: is the process running inside
//! an emulated or virtualized environment? The verdict is recomputed on every
//! call — freshness is deliberately favored over latency.
//!
//! These heuristics raise the bar for casual instrumentation; they are not a
//! verified control. A determined attacker with device control can always
//! defeat software-only probes.

/// Boolean oracle for the execution environment.
pub trait EnvironmentProbe: Send + Sync {
    /// Whether the process appears to run inside an emulator or VM.
    fn is_emulated(&self) -> bool;
}

/// Default probe using platform heuristics.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl EnvironmentProbe for HostProbe {
    fn is_emulated(&self) -> bool {
        #[cfg(target_os = "android")]
        {
            return is_android_emulator();
        }

        #[cfg(all(target_os = "linux", not(target_os = "android")))]
        {
            return is_linux_vm();
        }

        #[allow(unreachable_code)]
        false
    }
}

/// Check for Android emulator artifacts.
#[cfg(target_os = "android")]
fn is_android_emulator() -> bool {
    use std::io::Read;

    // Method 1: qemu/goldfish device nodes only emulators carry
    let emulator_files = [
        "/dev/socket/qemud",
        "/dev/qemu_pipe",
        "/system/lib/libc_malloc_debug_qemu.so",
        "/sys/qemu_trace",
        "/system/bin/qemu-props",
    ];
    for path in emulator_files {
        if std::path::Path::new(path).exists() {
            return true;
        }
    }

    // Method 2: build properties advertising SDK images
    let emulator_props = [
        ("ro.hardware", &["goldfish", "ranchu", "vbox86"][..]),
        ("ro.product.model", &["sdk", "google_sdk", "Emulator"][..]),
        ("ro.product.device", &["generic", "generic_x86", "vbox86p"][..]),
        ("ro.kernel.qemu", &["1"][..]),
    ];
    if let Ok(mut file) = std::fs::File::open("/system/build.prop") {
        let mut contents = String::new();
        if file.read_to_string(&mut contents).is_ok() {
            for (prop, values) in emulator_props {
                for line in contents.lines().filter(|l| l.starts_with(prop)) {
                    if values.iter().any(|v| line.contains(v)) {
                        return true;
                    }
                }
            }
        }
    }

    // Method 3: emulated CPU signatures
    if let Ok(mut file) = std::fs::File::open("/proc/cpuinfo") {
        let mut contents = String::new();
        if file.read_to_string(&mut contents).is_ok() {
            for pattern in ["goldfish", "vbox86", "Android Virtual"] {
                if contents.contains(pattern) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check for virtualization on desktop Linux (development hosts).
#[cfg(all(target_os = "linux", not(target_os = "android")))]
fn is_linux_vm() -> bool {
    use std::io::Read;

    let dmi_paths = [
        "/sys/class/dmi/id/product_name",
        "/sys/class/dmi/id/sys_vendor",
        "/sys/class/dmi/id/board_vendor",
    ];
    let vm_indicators = [
        "VMware",
        "VirtualBox",
        "QEMU",
        "KVM",
        "Xen",
        "Parallels",
        "innotek GmbH",
    ];
    for path in dmi_paths {
        if let Ok(mut file) = std::fs::File::open(path) {
            let mut contents = String::new();
            if file.read_to_string(&mut contents).is_ok()
                && vm_indicators.iter().any(|v| contents.contains(v))
            {
                return true;
            }
        }
    }

    if let Ok(mut file) = std::fs::File::open("/proc/cpuinfo") {
        let mut contents = String::new();
        if file.read_to_string(&mut contents).is_ok() && contents.contains("hypervisor") {
            return true;
        }
    }

    false
}
