//! Display-date formatting shared by every record date field.
//!
//! Rows are presentation artefacts, so their date fields carry the
//! human-readable form rather than the stored ISO representation. A single
//! format/parse pair keeps the transformation consistent and reversible for
//! editing flows.

use chrono::NaiveDate;

/// Pattern applied to every date shown in a joined row, e.g. `05 Mar 2024`.
pub const DISPLAY_FORMAT: &str = "%d %b %Y";

/// Render a date in the display format.
pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parse a display-formatted date back into its stored representation.
///
/// # Errors
///
/// Returns a [`chrono::ParseError`] when the input does not match
/// [`DISPLAY_FORMAT`].
pub fn parse_display(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, DISPLAY_FORMAT)
}

/// Serde adapter serialising dates through the display format.
///
/// Attach with `#[serde(with = "crate::domain::dates::display_date")]`.
pub mod display_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_display(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_display(&raw).map_err(de::Error::custom)
    }
}
