//! Event intents
//!
//! An [`EventIntent`] names the logical report a caller asks for. It carries
//! no identity and is consumed once by the reporting pipeline.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Title used for custom events submitted without a usable title
pub const DEFAULT_CUSTOM_TITLE: &str = "Custom Event";

/// Discriminant of [`EventIntent`], used by the public entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The first launch of an install
    FirstLaunch,
    /// The application moved to the foreground
    BecameActive,
    /// An ad-hoc event with a caller-supplied title and details
    Custom,
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::FirstLaunch => "first_launch",
            EventKind::BecameActive => "became_active",
            EventKind::Custom => "custom",
        };
        write!(f, "{}", s)
    }
}

/// The report being requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventIntent {
    /// First launch for an install
    FirstLaunch,
    /// Application became active
    BecameActive,
    /// Custom event. Detail keys are unique and iterate in ascending order.
    Custom {
        title: String,
        details: BTreeMap<String, String>,
    },
}

impl EventIntent {
    /// Creates a custom event from any key/value collection
    pub fn custom<I, K, V>(title: impl Into<String>, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EventIntent::Custom {
            title: title.into(),
            details: details
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builds an intent from the loose arguments of the public `report` entry point.
    ///
    /// `title` and `details` are only meaningful for [`EventKind::Custom`]; a
    /// missing or blank title falls back to [`DEFAULT_CUSTOM_TITLE`].
    pub fn from_parts(
        kind: EventKind,
        title: Option<String>,
        details: Option<BTreeMap<String, String>>,
    ) -> Self {
        match kind {
            EventKind::FirstLaunch => EventIntent::FirstLaunch,
            EventKind::BecameActive => EventIntent::BecameActive,
            EventKind::Custom => EventIntent::Custom {
                title: title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CUSTOM_TITLE.to_string()),
                details: details.unwrap_or_default(),
            },
        }
    }

    /// Returns the discriminant of this intent
    pub fn kind(&self) -> EventKind {
        match self {
            EventIntent::FirstLaunch => EventKind::FirstLaunch,
            EventIntent::BecameActive => EventKind::BecameActive,
            EventIntent::Custom { .. } => EventKind::Custom,
        }
    }

    /// Short label for diagnostics. Never includes detail values.
    pub fn log_name(&self) -> String {
        match self {
            EventIntent::FirstLaunch => "firstLaunch".to_string(),
            EventIntent::BecameActive => "appDidBecomeActive".to_string(),
            EventIntent::Custom { title, details } => {
                format!("custom(title: {}, detailsCount: {})", title, details.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_collects_details_in_key_order() {
        let event = EventIntent::custom("Sync Failed", [("zeta", "1"), ("alpha", "2")]);
        match event {
            EventIntent::Custom { title, details } => {
                assert_eq!(title, "Sync Failed");
                let keys: Vec<&str> = details.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["alpha", "zeta"]);
            }
            other => panic!("expected custom event, got {other:?}"),
        }
    }

    #[test]
    fn test_from_parts_ignores_title_for_builtin_kinds() {
        let event = EventIntent::from_parts(
            EventKind::BecameActive,
            Some("ignored".to_string()),
            None,
        );
        assert_eq!(event, EventIntent::BecameActive);

        let event = EventIntent::from_parts(EventKind::FirstLaunch, None, None);
        assert_eq!(event, EventIntent::FirstLaunch);
    }

    #[test]
    fn test_from_parts_defaults_blank_custom_title() {
        let event = EventIntent::from_parts(EventKind::Custom, Some("   ".to_string()), None);
        assert_eq!(
            event,
            EventIntent::Custom {
                title: DEFAULT_CUSTOM_TITLE.to_string(),
                details: BTreeMap::new(),
            }
        );
    }

    #[test]
    fn test_kind_round_trips() {
        assert_eq!(EventIntent::FirstLaunch.kind(), EventKind::FirstLaunch);
        assert_eq!(EventIntent::BecameActive.kind(), EventKind::BecameActive);
        assert_eq!(
            EventIntent::custom("x", Vec::<(String, String)>::new()).kind(),
            EventKind::Custom
        );
    }

    #[test]
    fn test_log_name() {
        assert_eq!(EventIntent::FirstLaunch.log_name(), "firstLaunch");
        assert_eq!(EventIntent::BecameActive.log_name(), "appDidBecomeActive");
        let event = EventIntent::custom("Ping", [("a", "b")]);
        assert_eq!(event.log_name(), "custom(title: Ping, detailsCount: 1)");
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::FirstLaunch.to_string(), "first_launch");
        assert_eq!(EventKind::BecameActive.to_string(), "became_active");
        assert_eq!(EventKind::Custom.to_string(), "custom");
    }
}
