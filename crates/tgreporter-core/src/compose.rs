//! Message composition
//!
//! Renders an [`EventIntent`] plus an [`EnvironmentSnapshot`] into the text
//! posted to the chat. Composition is a pure function of its inputs: no I/O,
//! no clock, and it cannot fail. Missing metadata renders as a placeholder so
//! every report of a given kind has the same shape.
//!
//! ```text
//! ✅ First Launch
//! 📱 App: Notes • QA
//! 📦 Version: 1.4.0 (42)
//! 🚚 Source: Production
//! 📲 Device: iPhone • iPhone 16 Pro
//! 🧠 OS: iOS 18.1
//! 🌍 Locale: English
//! 🗺️ Region: United States (US)
//!
//! #notes
//! ```

use std::collections::BTreeMap;

use crate::domain::{
    locale::{language_display_name, region_display_name},
    EnvironmentSnapshot, EventIntent,
};

/// Tag used when the app name has no alphanumeric characters
pub const FALLBACK_TAG: &str = "unknownapp";

const UNKNOWN: &str = "Unknown";
const UNKNOWN_VALUE: &str = "?";
const UNKNOWN_DEVICE: &str = "Unknown Device";

/// Header line for each event kind
fn header(event: &EventIntent) -> String {
    match event {
        EventIntent::FirstLaunch => "✅ First Launch".to_string(),
        EventIntent::BecameActive => "▶️ App Became Active".to_string(),
        EventIntent::Custom { title, .. } => format!("🧩 {}", title),
    }
}

/// Stateless renderer for report messages
pub struct MessageComposer;

impl MessageComposer {
    /// Builds the full message text.
    ///
    /// `additional_note` is trimmed and, when non-empty, appended to the app
    /// line as ` • <note>`.
    pub fn compose(
        event: &EventIntent,
        environment: &EnvironmentSnapshot,
        additional_note: &str,
    ) -> String {
        let mut lines = vec![header(event)];
        lines.extend(Self::metadata_lines(environment, additional_note));

        if let EventIntent::Custom { details, .. } = event {
            if !details.is_empty() {
                lines.push(String::new());
                lines.push("📋 Details:".to_string());
                lines.extend(Self::detail_lines(details));
            }
        }

        lines.push(String::new());
        lines.push(format!("#{}", Self::hashtag(environment.resolved_app_name())));

        lines.join("\n")
    }

    /// The seven metadata lines shared by every event kind
    fn metadata_lines(env: &EnvironmentSnapshot, additional_note: &str) -> Vec<String> {
        let note = additional_note.trim();
        let app_line = if note.is_empty() {
            format!("📱 App: {}", env.resolved_app_name())
        } else {
            format!("📱 App: {} • {}", env.resolved_app_name(), note)
        };

        let locale_name = env
            .language_code
            .as_deref()
            .and_then(language_display_name)
            .unwrap_or(UNKNOWN);
        let region_name = env
            .region_code
            .as_deref()
            .and_then(region_display_name)
            .unwrap_or(UNKNOWN);

        vec![
            app_line,
            format!(
                "📦 Version: {} ({})",
                or_placeholder(env.app_version.as_deref(), UNKNOWN_VALUE),
                or_placeholder(env.app_build.as_deref(), UNKNOWN_VALUE)
            ),
            format!(
                "🚚 Source: {}",
                env.channel.map(|c| c.label()).unwrap_or(UNKNOWN)
            ),
            format!(
                "📲 Device: {} • {}",
                env.idiom.label(),
                or_placeholder(env.device_model.as_deref(), UNKNOWN_DEVICE)
            ),
            format!(
                "🧠 OS: {} {}",
                or_placeholder(env.os_name.as_deref(), UNKNOWN),
                or_placeholder(env.os_version.as_deref(), UNKNOWN_VALUE)
            ),
            format!("🌍 Locale: {}", locale_name),
            format!(
                "🗺️ Region: {} ({})",
                region_name,
                env.resolved_region_code()
            ),
        ]
    }

    /// One `• key: value` line per entry, in ascending key order
    fn detail_lines(details: &BTreeMap<String, String>) -> impl Iterator<Item = String> + '_ {
        details
            .iter()
            .map(|(key, value)| format!("• {}: {}", key, Self::normalize_detail_value(value)))
    }

    /// Collapses embedded newlines to spaces and trims surrounding whitespace
    pub fn normalize_detail_value(value: &str) -> String {
        value
            .replace("\r\n", " ")
            .replace('\n', " ")
            .trim()
            .to_string()
    }

    /// Lowercased, alphanumeric-only collapse of `app_name`, or [`FALLBACK_TAG`]
    pub fn hashtag(app_name: &str) -> String {
        let tag: String = app_name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        if tag.is_empty() {
            FALLBACK_TAG.to_string()
        } else {
            tag
        }
    }
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceIdiom, DistributionChannel};

    fn full_environment() -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            app_display_name: Some("Notes Pro".to_string()),
            app_name: Some("NotesPro".to_string()),
            app_version: Some("1.4.0".to_string()),
            app_build: Some("42".to_string()),
            channel: Some(DistributionChannel::Production),
            idiom: DeviceIdiom::Phone,
            device_model: Some("iPhone 16 Pro".to_string()),
            os_name: Some("iOS".to_string()),
            os_version: Some("18.1".to_string()),
            language_code: Some("en".to_string()),
            region_code: Some("US".to_string()),
        }
    }

    fn line_starting_with<'a>(message: &'a str, prefix: &str) -> &'a str {
        message
            .lines()
            .find(|l| l.starts_with(prefix))
            .unwrap_or_else(|| panic!("missing line starting with {prefix:?} in:\n{message}"))
    }

    #[test]
    fn test_first_launch_full_layout() {
        let message = MessageComposer::compose(&EventIntent::FirstLaunch, &full_environment(), "QA");
        let expected = [
            "✅ First Launch",
            "📱 App: Notes Pro • QA",
            "📦 Version: 1.4.0 (42)",
            "🚚 Source: Production",
            "📲 Device: iPhone • iPhone 16 Pro",
            "🧠 OS: iOS 18.1",
            "🌍 Locale: English",
            "🗺️ Region: United States (US)",
            "",
            "#notespro",
        ]
        .join("\n");
        assert_eq!(message, expected);
    }

    #[test]
    fn test_became_active_header() {
        let message =
            MessageComposer::compose(&EventIntent::BecameActive, &full_environment(), "");
        assert!(message.starts_with("▶️ App Became Active\n"));
    }

    #[test]
    fn test_custom_event_sorts_and_normalizes_details() {
        let event = EventIntent::custom(
            "Sync Failed",
            [("zeta", "line1\nline2"), ("alpha", " ok ")],
        );
        let message = MessageComposer::compose(&event, &full_environment(), "");

        assert!(message.starts_with("🧩 Sync Failed\n"));
        assert!(message.contains("\n\n📋 Details:\n"));

        let alpha = message.find("• alpha: ok\n").expect("alpha line");
        let zeta = message.find("• zeta: line1 line2\n").expect("zeta line");
        assert!(alpha < zeta);
    }

    #[test]
    fn test_custom_event_without_details_omits_section() {
        let event = EventIntent::custom("Ping", Vec::<(String, String)>::new());
        let message = MessageComposer::compose(&event, &full_environment(), "");

        assert!(message.starts_with("🧩 Ping\n"));
        assert!(!message.contains("📋 Details:"));
        assert_eq!(message.lines().count(), 10);
    }

    #[test]
    fn test_additional_note_is_trimmed() {
        let message = MessageComposer::compose(
            &EventIntent::FirstLaunch,
            &full_environment(),
            "   QA Team  ",
        );
        assert_eq!(
            line_starting_with(&message, "📱 App: "),
            "📱 App: Notes Pro • QA Team"
        );
    }

    #[test]
    fn test_blank_additional_note_is_not_rendered() {
        let message = MessageComposer::compose(
            &EventIntent::FirstLaunch,
            &full_environment(),
            "   \n\t ",
        );
        let app_line = line_starting_with(&message, "📱 App: ");
        assert!(!app_line.contains(" • "));
    }

    #[test]
    fn test_missing_metadata_renders_placeholders() {
        let message = MessageComposer::compose(
            &EventIntent::FirstLaunch,
            &EnvironmentSnapshot::default(),
            "",
        );
        let expected = [
            "✅ First Launch",
            "📱 App: Unknown App",
            "📦 Version: ? (?)",
            "🚚 Source: Unknown",
            "📲 Device: Unknown • Unknown Device",
            "🧠 OS: Unknown ?",
            "🌍 Locale: Unknown",
            "🗺️ Region: Unknown (Unknown)",
            "",
            "#unknownapp",
        ]
        .join("\n");
        assert_eq!(message, expected);
    }

    #[test]
    fn test_line_count_is_stable_for_a_kind() {
        let full = MessageComposer::compose(&EventIntent::FirstLaunch, &full_environment(), "QA");
        let empty = MessageComposer::compose(
            &EventIntent::FirstLaunch,
            &EnvironmentSnapshot::default(),
            "",
        );
        assert_eq!(full.lines().count(), empty.lines().count());
    }

    #[test]
    fn test_unknown_region_code_keeps_code() {
        let env = EnvironmentSnapshot {
            region_code: Some("QZ".to_string()),
            ..full_environment()
        };
        let message = MessageComposer::compose(&EventIntent::FirstLaunch, &env, "");
        assert_eq!(
            line_starting_with(&message, "🗺️ Region: "),
            "🗺️ Region: Unknown (QZ)"
        );
    }

    #[test]
    fn test_message_ends_with_hashtag_line() {
        let message =
            MessageComposer::compose(&EventIntent::BecameActive, &full_environment(), "");
        assert!(message.ends_with("\n\n#notespro"));
    }

    #[test]
    fn test_hashtag_collapses_to_lowercase_alphanumerics() {
        assert_eq!(MessageComposer::hashtag("My App 2!"), "myapp2");
        assert_eq!(MessageComposer::hashtag("Café Über"), "caféüber");
        assert_eq!(MessageComposer::hashtag("--- !!! ---"), FALLBACK_TAG);
        assert_eq!(MessageComposer::hashtag(""), FALLBACK_TAG);
    }

    #[test]
    fn test_normalize_detail_value() {
        assert_eq!(MessageComposer::normalize_detail_value(" ok "), "ok");
        assert_eq!(
            MessageComposer::normalize_detail_value("line1\nline2"),
            "line1 line2"
        );
        assert_eq!(
            MessageComposer::normalize_detail_value("\r\nwindows\r\nstyle\n"),
            "windows style"
        );
    }
}
