//! Host environment provider
//!
//! Application metadata comes from the host through [`AppInfo`]. OS, locale
//! and device are read from the system each time a snapshot is taken.

use std::path::Path;

use tgreporter_core::{
    domain::{DeviceIdiom, DistributionChannel, EnvironmentSnapshot},
    ports::IEnvironmentProvider,
};
use tracing::debug;

use crate::device_catalog::{hardware_model_identifier, resolve_model_name};

const OS_RELEASE: &str = "/etc/os-release";
const KERNEL_RELEASE: &str = "/proc/sys/kernel/osrelease";

/// Locale variables in lookup order
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

// ============================================================================
// AppInfo
// ============================================================================

/// Application metadata supplied by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppInfo {
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub build: Option<String>,
    /// Detected from the build profile when `None`
    pub channel: Option<DistributionChannel>,
}

impl AppInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
            ..Default::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    pub fn with_channel(mut self, channel: DistributionChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Explicit channel, else `Debug` for debug builds and `Production` otherwise
    pub fn resolved_channel(&self) -> DistributionChannel {
        self.channel.unwrap_or(if cfg!(debug_assertions) {
            DistributionChannel::Debug
        } else {
            DistributionChannel::Production
        })
    }
}

// ============================================================================
// SystemEnvironment
// ============================================================================

/// [`IEnvironmentProvider`] reading the running system
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    app: AppInfo,
}

impl SystemEnvironment {
    pub fn new(app: AppInfo) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &AppInfo {
        &self.app
    }
}

impl IEnvironmentProvider for SystemEnvironment {
    fn snapshot(&self) -> EnvironmentSnapshot {
        let (os_name, os_version) = detect_os();
        let (language_code, region_code) = detect_locale(|key| std::env::var(key).ok());
        let hardware = hardware_model_identifier();

        let idiom = hardware
            .as_deref()
            .map(DeviceIdiom::from_model_identifier)
            .filter(|idiom| *idiom != DeviceIdiom::Unknown)
            .unwrap_or_else(host_idiom);
        let device_model = hardware.as_deref().map(resolve_model_name);

        let snapshot = EnvironmentSnapshot {
            app_display_name: self.app.display_name.clone(),
            app_name: self.app.name.clone(),
            app_version: self.app.version.clone(),
            app_build: self.app.build.clone(),
            channel: Some(self.app.resolved_channel()),
            idiom,
            device_model,
            os_name,
            os_version,
            language_code,
            region_code,
        };
        debug!(?snapshot, "Captured environment snapshot");
        snapshot
    }
}

/// Idiom of the compilation target when the hardware says nothing
fn host_idiom() -> DeviceIdiom {
    if cfg!(target_os = "macos") {
        DeviceIdiom::Mac
    } else if cfg!(any(target_os = "linux", target_os = "windows", target_os = "freebsd")) {
        DeviceIdiom::Desktop
    } else {
        DeviceIdiom::Unknown
    }
}

// ============================================================================
// OS detection
// ============================================================================

fn detect_os() -> (Option<String>, Option<String>) {
    let (name, version) = std::fs::read_to_string(Path::new(OS_RELEASE))
        .map(|content| parse_os_release(&content))
        .unwrap_or((None, None));

    let name = name.or_else(|| Some(std::env::consts::OS.to_string()));
    let version = version.or_else(|| {
        std::fs::read_to_string(Path::new(KERNEL_RELEASE))
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    });
    (name, version)
}

/// Extracts `NAME` and `VERSION_ID` from os-release content
fn parse_os_release(content: &str) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut version = None;

    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        if value.is_empty() {
            continue;
        }
        match key {
            "NAME" => name = Some(value.to_string()),
            "VERSION_ID" => version = Some(value.to_string()),
            _ => {}
        }
    }
    (name, version)
}

// ============================================================================
// Locale detection
// ============================================================================

/// First non-empty locale variable, split into language and region codes
fn detect_locale<F>(lookup: F) -> (Option<String>, Option<String>)
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.trim().is_empty())
        .map(|value| parse_locale(&value))
        .unwrap_or((None, None))
}

/// Splits a POSIX locale (`en_US.UTF-8`, `de_DE@euro`, `pt-BR`) into codes
fn parse_locale(value: &str) -> (Option<String>, Option<String>) {
    let base = value
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return (None, None);
    }

    let mut parts = base.split(['_', '-']);
    let language = parts
        .next()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_ascii_lowercase());
    let region = parts
        .next()
        .filter(|r| !r.is_empty())
        .map(|r| r.to_ascii_uppercase());
    (language, region)
}
