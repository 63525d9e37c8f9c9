//! Environment snapshot
//!
//! Read-only bundle of application, OS, device and locale metadata captured
//! fresh for every report. Every field may be missing; the composer renders
//! placeholders instead of dropping lines.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Application name used when neither display name nor name is available
pub const UNKNOWN_APP_NAME: &str = "Unknown App";

// ============================================================================
// DistributionChannel
// ============================================================================

/// How the running build was distributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionChannel {
    /// Local development build
    Debug,
    /// Beta / test distribution
    Test,
    /// Public release
    Production,
}

impl DistributionChannel {
    /// Human-readable label shown in reports
    pub fn label(&self) -> &'static str {
        match self {
            DistributionChannel::Debug => "Debug",
            DistributionChannel::Test => "Test",
            DistributionChannel::Production => "Production",
        }
    }
}

impl Display for DistributionChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DistributionChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "xcode" => Ok(DistributionChannel::Debug),
            "test" | "testflight" | "beta" => Ok(DistributionChannel::Test),
            "production" | "appstore" | "release" => Ok(DistributionChannel::Production),
            other => Err(format!("unknown distribution channel '{}'", other)),
        }
    }
}

// ============================================================================
// DeviceIdiom
// ============================================================================

/// Broad device category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceIdiom {
    Phone,
    Tablet,
    Mac,
    Desktop,
    Tv,
    Vision,
    #[default]
    Unknown,
}

impl DeviceIdiom {
    /// Human-readable label shown in reports
    pub fn label(&self) -> &'static str {
        match self {
            DeviceIdiom::Phone => "iPhone",
            DeviceIdiom::Tablet => "iPad",
            DeviceIdiom::Mac => "Mac",
            DeviceIdiom::Desktop => "Desktop",
            DeviceIdiom::Tv => "Apple TV",
            DeviceIdiom::Vision => "Vision",
            DeviceIdiom::Unknown => "Unknown",
        }
    }

    /// Infers the idiom from an Apple-style hardware identifier (`iPhone17,1`, `iPad16,5`...).
    ///
    /// Returns [`DeviceIdiom::Unknown`] for anything unrecognised.
    pub fn from_model_identifier(identifier: &str) -> Self {
        let id = identifier.trim();
        if id.starts_with("iPhone") || id.starts_with("iPod") {
            DeviceIdiom::Phone
        } else if id.starts_with("iPad") {
            DeviceIdiom::Tablet
        } else if id.starts_with("AppleTV") {
            DeviceIdiom::Tv
        } else if id.starts_with("RealityDevice") {
            DeviceIdiom::Vision
        } else if id.starts_with("Mac") || id.starts_with("iMac") {
            DeviceIdiom::Mac
        } else {
            DeviceIdiom::Unknown
        }
    }
}

impl Display for DeviceIdiom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// EnvironmentSnapshot
// ============================================================================

/// Metadata about the host application and device at report time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentSnapshot {
    /// User-facing application name
    pub app_display_name: Option<String>,
    /// Internal application/bundle name, used when the display name is missing
    pub app_name: Option<String>,
    /// Marketing version, e.g. `1.4.0`
    pub app_version: Option<String>,
    /// Build number
    pub app_build: Option<String>,
    /// Distribution channel of this build
    pub channel: Option<DistributionChannel>,
    /// Device category
    pub idiom: DeviceIdiom,
    /// Marketing name (or raw identifier) of the device model
    pub device_model: Option<String>,
    /// Operating system name
    pub os_name: Option<String>,
    /// Operating system version
    pub os_version: Option<String>,
    /// ISO-639-1 language code of the preferred language
    pub language_code: Option<String>,
    /// ISO-3166-1 alpha-2 region code
    pub region_code: Option<String>,
}

impl EnvironmentSnapshot {
    /// Returns the display name, else the name, else [`UNKNOWN_APP_NAME`].
    ///
    /// Empty strings count as missing.
    pub fn resolved_app_name(&self) -> &str {
        non_empty(self.app_display_name.as_deref())
            .or_else(|| non_empty(self.app_name.as_deref()))
            .unwrap_or(UNKNOWN_APP_NAME)
    }

    /// Returns the region code or `"Unknown"`
    pub fn resolved_region_code(&self) -> &str {
        non_empty(self.region_code.as_deref()).unwrap_or("Unknown")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
