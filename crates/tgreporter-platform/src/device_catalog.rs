//! Device model catalog
//!
//! Maps Apple hardware identifiers to marketing names and discovers the
//! identifier of the running host.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

use tracing::debug;

/// Environment variable overriding the detected hardware identifier
pub const MODEL_IDENTIFIER_ENV: &str = "SIMULATOR_MODEL_IDENTIFIER";

const DMI_PRODUCT_NAME: &str = "/sys/class/dmi/id/product_name";

const SYSCTL: &str = "/usr/sbin/sysctl";

const KNOWN_DEVICES: &[(&str, &str)] = &[
    // iPhone
    ("iPhone12,1", "iPhone 11"),
    ("iPhone12,3", "iPhone 11 Pro"),
    ("iPhone12,5", "iPhone 11 Pro Max"),
    ("iPhone12,8", "iPhone SE (2nd generation)"),
    ("iPhone13,1", "iPhone 12 mini"),
    ("iPhone13,2", "iPhone 12"),
    ("iPhone13,3", "iPhone 12 Pro"),
    ("iPhone13,4", "iPhone 12 Pro Max"),
    ("iPhone14,2", "iPhone 13 Pro"),
    ("iPhone14,3", "iPhone 13 Pro Max"),
    ("iPhone14,4", "iPhone 13 mini"),
    ("iPhone14,5", "iPhone 13"),
    ("iPhone14,6", "iPhone SE (3rd generation)"),
    ("iPhone14,7", "iPhone 14"),
    ("iPhone14,8", "iPhone 14 Plus"),
    ("iPhone15,2", "iPhone 14 Pro"),
    ("iPhone15,3", "iPhone 14 Pro Max"),
    ("iPhone15,4", "iPhone 15"),
    ("iPhone15,5", "iPhone 15 Plus"),
    ("iPhone16,1", "iPhone 15 Pro"),
    ("iPhone16,2", "iPhone 15 Pro Max"),
    ("iPhone17,1", "iPhone 16 Pro"),
    ("iPhone17,2", "iPhone 16 Pro Max"),
    ("iPhone17,3", "iPhone 16"),
    ("iPhone17,4", "iPhone 16 Plus"),
    ("iPhone17,5", "iPhone 16e"),
    // iPad
    ("iPad13,1", "iPad Air (4th generation)"),
    ("iPad13,2", "iPad Air (4th generation)"),
    ("iPad13,4", "iPad Pro 11-inch (3rd generation)"),
    ("iPad13,5", "iPad Pro 11-inch (3rd generation)"),
    ("iPad13,6", "iPad Pro 11-inch (3rd generation)"),
    ("iPad13,7", "iPad Pro 11-inch (3rd generation)"),
    ("iPad13,8", "iPad Pro 12.9-inch (5th generation)"),
    ("iPad13,9", "iPad Pro 12.9-inch (5th generation)"),
    ("iPad13,10", "iPad Pro 12.9-inch (5th generation)"),
    ("iPad13,11", "iPad Pro 12.9-inch (5th generation)"),
    ("iPad13,16", "iPad Air (5th generation)"),
    ("iPad13,17", "iPad Air (5th generation)"),
    ("iPad13,18", "iPad (10th generation)"),
    ("iPad13,19", "iPad (10th generation)"),
    ("iPad14,1", "iPad mini (6th generation)"),
    ("iPad14,2", "iPad mini (6th generation)"),
    ("iPad14,3", "iPad Pro 11-inch (4th generation)"),
    ("iPad14,4", "iPad Pro 11-inch (4th generation)"),
    ("iPad14,5", "iPad Pro 12.9-inch (6th generation)"),
    ("iPad14,6", "iPad Pro 12.9-inch (6th generation)"),
    ("iPad14,8", "iPad Air 11-inch (M2)"),
    ("iPad14,9", "iPad Air 11-inch (M2)"),
    ("iPad14,10", "iPad Air 13-inch (M2)"),
    ("iPad14,11", "iPad Air 13-inch (M2)"),
    ("iPad16,1", "iPad mini (A17 Pro)"),
    ("iPad16,2", "iPad mini (A17 Pro)"),
    ("iPad16,3", "iPad Pro 11-inch (M4)"),
    ("iPad16,4", "iPad Pro 11-inch (M4)"),
    ("iPad16,5", "iPad Pro 13-inch (M4)"),
    ("iPad16,6", "iPad Pro 13-inch (M4)"),
    // Mac
    ("MacBookAir10,1", "MacBook Air (M1, 2020)"),
    ("MacBookPro17,1", "MacBook Pro (13-inch, M1, 2020)"),
    ("Macmini9,1", "Mac mini (M1, 2020)"),
    ("iMac21,1", "iMac (24-inch, M1, 2021)"),
    ("iMac21,2", "iMac (24-inch, M1, 2021)"),
    ("Mac13,1", "Mac Studio (M1 Max, 2022)"),
    ("Mac13,2", "Mac Studio (M1 Ultra, 2022)"),
    ("Mac14,2", "MacBook Air (M2, 2022)"),
    ("Mac14,3", "Mac mini (M2, 2023)"),
    ("Mac14,7", "MacBook Pro (13-inch, M2, 2022)"),
    ("Mac14,15", "MacBook Air (15-inch, M2, 2023)"),
    ("Mac15,3", "MacBook Pro (14-inch, M3, Nov 2023)"),
    ("Mac15,12", "MacBook Air (13-inch, M3, 2024)"),
    ("Mac15,13", "MacBook Air (15-inch, M3, 2024)"),
];

static DEVICE_NAMES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| KNOWN_DEVICES.iter().copied().collect());

/// Marketing name for `identifier`, or `None` when it is not catalogued
pub fn known_model_name(identifier: &str) -> Option<&'static str> {
    DEVICE_NAMES.get(identifier).copied()
}

/// Marketing name for `identifier`, falling back to the identifier itself
pub fn resolve_model_name(identifier: &str) -> String {
    let name = known_model_name(identifier).unwrap_or(identifier);
    debug!(identifier, mapped_name = name, "Resolved device model");
    name.to_string()
}

/// Hardware identifier of the running host, if one can be determined.
///
/// A non-empty `SIMULATOR_MODEL_IDENTIFIER` wins. Otherwise macOS reports
/// `hw.model` through `sysctl` and Linux the DMI product name.
pub fn hardware_model_identifier() -> Option<String> {
    identifier_from(
        std::env::var(MODEL_IDENTIFIER_ENV).ok(),
        Path::new(DMI_PRODUCT_NAME),
    )
}

fn identifier_from(env_override: Option<String>, dmi_path: &Path) -> Option<String> {
    if let Some(id) = env_override.as_deref().and_then(non_blank) {
        debug!(identifier = %id, "Using hardware identifier override");
        return Some(id);
    }

    if cfg!(target_os = "macos") {
        return sysctl_hw_model();
    }
    if !cfg!(target_os = "linux") {
        return None;
    }

    let product = std::fs::read_to_string(dmi_path).ok()?;
    non_blank(&product)
}

fn sysctl_hw_model() -> Option<String> {
    let output = match Command::new(SYSCTL).args(["-n", "hw.model"]).output() {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            debug!(status = %output.status, "sysctl hw.model failed");
            return None;
        }
        Err(e) => {
            debug!(error = %e, "Could not run sysctl");
            return None;
        }
    };
    non_blank(&String::from_utf8_lossy(&output.stdout))
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
