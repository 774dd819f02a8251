//! Display rows handed to the display adapter.

use serde::Serialize;

use crate::network::{AddressFamily, InterfaceAddress};

/// Label shown when no interface has a usable address.
pub const NO_CONNECTIONS: &str = "No active connections";

/// Label shown when the interface listing could not be obtained.
pub const DISCOVERY_FAILED: &str = "Error reading network status";

/// Delimiter between a row's caption and the copyable value.
const COPY_DELIMITER: &str = ": ";

/// A single rendering-ready row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    /// Text shown to the user.
    pub label: String,
    /// Value stored for copying, if the row is copyable.
    pub copy_value: Option<String>,
    /// Whether the row can be selected.
    pub enabled: bool,
}

impl DisplayRow {
    /// Creates an enabled row for a discovered interface address.
    #[must_use]
    pub fn interface(record: &InterfaceAddress) -> Self {
        Self {
            label: record.to_string(),
            copy_value: Some(record.address.clone()),
            enabled: true,
        }
    }

    /// Creates the disabled placeholder for a pending public lookup.
    #[must_use]
    pub fn public_loading(family: AddressFamily) -> Self {
        Self::notice(format!("Public {family}: Loading..."))
    }

    /// Creates the final row for a public lookup.
    ///
    /// A found address gives an enabled, copyable row; `None` gives a
    /// disabled "Unavailable" row.
    #[must_use]
    pub fn public_result(family: AddressFamily, value: Option<&str>) -> Self {
        match value {
            Some(address) => Self {
                label: format!("Public {family}: {address}"),
                copy_value: Some(address.to_string()),
                enabled: true,
            },
            None => Self::notice(format!("Public {family}: Unavailable")),
        }
    }

    /// Creates a disabled, non-copyable row.
    #[must_use]
    pub fn notice(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            copy_value: None,
            enabled: false,
        }
    }

    /// Returns the text to place on the clipboard when this row is chosen.
    ///
    /// Disabled rows and rows without a copy value return `None`.
    #[must_use]
    pub fn clipboard_text(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.copy_value.as_deref().map(extract_copy_text)
    }
}

/// One entry in the rendered menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuEntry {
    /// A selectable or informational row.
    Row(DisplayRow),
    /// A visual divider.
    Separator,
}

impl MenuEntry {
    /// Returns the row, if this entry is one.
    #[must_use]
    pub const fn as_row(&self) -> Option<&DisplayRow> {
        match self {
            Self::Row(row) => Some(row),
            Self::Separator => None,
        }
    }
}

impl From<DisplayRow> for MenuEntry {
    fn from(row: DisplayRow) -> Self {
        Self::Row(row)
    }
}

/// Returns the text after the last `": "` in `stored`, or all of it.
///
/// IPv6 addresses contain colons but never a colon followed by a space,
/// so bare addresses pass through unchanged.
///
/// # Examples
///
/// ```
/// use shownet::status::extract_copy_text;
///
/// assert_eq!(extract_copy_text("en0: 192.168.1.50"), "192.168.1.50");
/// assert_eq!(extract_copy_text("2001:db8::1"), "2001:db8::1");
/// ```
#[must_use]
pub fn extract_copy_text(stored: &str) -> &str {
    stored
        .rsplit_once(COPY_DELIMITER)
        .map_or(stored, |(_, tail)| tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod extract {
        use super::*;

        #[test]
        fn takes_text_after_delimiter() {
            assert_eq!(extract_copy_text("en0: 192.168.1.50"), "192.168.1.50");
        }

        #[test]
        fn uses_last_delimiter() {
            assert_eq!(extract_copy_text("Public IPv6: 2001:db8::1"), "2001:db8::1");
            assert_eq!(extract_copy_text("a: b: c"), "c");
        }

        #[test]
        fn passes_through_without_delimiter() {
            assert_eq!(extract_copy_text("192.168.1.50"), "192.168.1.50");
            assert_eq!(extract_copy_text("fd00::1:2"), "fd00::1:2");
        }
    }

    mod display_row {
        use super::*;

        #[test]
        fn interface_row_is_enabled_and_copies_address() {
            let row = DisplayRow::interface(&InterfaceAddress::v4("en0", "192.168.1.50"));

            assert_eq!(row.label, "en0: 192.168.1.50");
            assert_eq!(row.copy_value.as_deref(), Some("192.168.1.50"));
            assert!(row.enabled);
            assert_eq!(row.clipboard_text(), Some("192.168.1.50"));
        }

        #[test]
        fn loading_placeholder_is_disabled() {
            let row = DisplayRow::public_loading(AddressFamily::V4);

            assert_eq!(row.label, "Public IPv4: Loading...");
            assert!(!row.enabled);
            assert_eq!(row.clipboard_text(), None);
        }

        #[test]
        fn found_public_row_is_enabled() {
            let row = DisplayRow::public_result(AddressFamily::V6, Some("2001:db8::1"));

            assert_eq!(row.label, "Public IPv6: 2001:db8::1");
            assert!(row.enabled);
            assert_eq!(row.clipboard_text(), Some("2001:db8::1"));
        }

        #[test]
        fn unavailable_public_row_is_disabled() {
            let row = DisplayRow::public_result(AddressFamily::V4, None);

            assert_eq!(row.label, "Public IPv4: Unavailable");
            assert!(!row.enabled);
            assert_eq!(row.copy_value, None);
        }

        #[test]
        fn disabled_row_with_value_does_not_copy() {
            let mut row = DisplayRow::interface(&InterfaceAddress::v4("en0", "10.0.0.1"));
            row.enabled = false;

            assert_eq!(row.clipboard_text(), None);
        }

        #[test]
        fn stored_caption_is_stripped_on_copy() {
            let row = DisplayRow {
                label: "en0: 192.168.1.50".to_string(),
                copy_value: Some("en0: 192.168.1.50".to_string()),
                enabled: true,
            };

            assert_eq!(row.clipboard_text(), Some("192.168.1.50"));
        }
    }

    mod menu_entry {
        use super::*;

        #[test]
        fn separator_has_no_row() {
            assert!(MenuEntry::Separator.as_row().is_none());
        }

        #[test]
        fn serializes_with_type_tag() {
            let entry = MenuEntry::from(DisplayRow::notice(NO_CONNECTIONS));
            let json = serde_json::to_value(&entry).unwrap();

            assert_eq!(json["type"], "row");
            assert_eq!(json["label"], "No active connections");
            assert_eq!(json["enabled"], false);

            let json = serde_json::to_value(MenuEntry::Separator).unwrap();
            assert_eq!(json["type"], "separator");
        }
    }
}
