//! The versioned options schema.
//!
//! The current schema keeps every user-facing setting plus the ordered
//! section collection. The legacy V1 schema predates sections and stored a
//! single `labels` text blob; `rolod0x-storage` upgrades it on read.

use serde::{Deserialize, Serialize};

use crate::section::{labels_to_section, AddressBookSection};

/// Default rendering template for exact label matches.
/// Placeholders (`%n`, `%4l`, `%4r`) are interpreted by display layers, not here.
pub const DEFAULT_DISPLAY_LABEL_FORMAT: &str = "%n (0x%4l…%4r)";

/// Default rendering template for guessed (abbreviation-based) matches.
pub const DEFAULT_DISPLAY_GUESS_FORMAT: &str = "? %n ? (0x%4l…%4r)";

/// UI color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

/// In-memory form of the options: `sections` is a live array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsDeserialized {
    pub theme_name: ThemeName,
    pub display_label_format: String,
    pub display_guess_format: String,
    pub has_seen_tour: bool,
    pub sections: Vec<AddressBookSection>,
}

/// Persisted form of the options: the backend only accepts scalar values,
/// so `sections` is a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsSerialized {
    pub theme_name: ThemeName,
    pub display_label_format: String,
    pub display_guess_format: String,
    pub has_seen_tour: bool,
    pub sections: String,
}

/// Legacy schema: a single `labels` blob instead of sections.
/// Identified by the presence of `labels` and absence of `sections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsV1 {
    pub theme_name: ThemeName,
    pub labels: String,
    pub display_label_format: String,
    pub display_guess_format: String,
}

impl Default for OptionsDeserialized {
    /// One empty section, light theme, tour not yet seen.
    /// Each call mints a fresh section id.
    fn default() -> Self {
        Self {
            theme_name: ThemeName::Light,
            display_label_format: DEFAULT_DISPLAY_LABEL_FORMAT.to_string(),
            display_guess_format: DEFAULT_DISPLAY_GUESS_FORMAT.to_string(),
            has_seen_tour: false,
            sections: vec![labels_to_section("")],
        }
    }
}

impl Default for OptionsSerialized {
    fn default() -> Self {
        serialize_options(&OptionsDeserialized::default())
            .expect("default options always serialize")
    }
}

/// Converts the in-memory form to the persisted form by JSON-encoding the
/// section array into a string.
pub fn serialize_options(options: &OptionsDeserialized) -> serde_json::Result<OptionsSerialized> {
    Ok(OptionsSerialized {
        theme_name: options.theme_name,
        display_label_format: options.display_label_format.clone(),
        display_guess_format: options.display_guess_format.clone(),
        has_seen_tour: options.has_seen_tour,
        sections: serde_json::to_string(&options.sections)?,
    })
}

/// Converts the persisted form back to the in-memory form.
///
/// Fails when the `sections` string is not valid JSON, which is exactly
/// what happens to a blob left behind by a failed legacy migration.
pub fn deserialize_options(options: &OptionsSerialized) -> serde_json::Result<OptionsDeserialized> {
    Ok(OptionsDeserialized {
        theme_name: options.theme_name,
        display_label_format: options.display_label_format.clone(),
        display_guess_format: options.display_guess_format.clone(),
        has_seen_tour: options.has_seen_tour,
        sections: serde_json::from_str(&options.sections)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serialize_deserialize_round_trips() {
        let mut options = OptionsDeserialized::default();
        options.theme_name = ThemeName::Dark;
        options.has_seen_tour = true;
        options.sections[0].labels =
            "0x89205a3a3b2a69de6dbf7f01ed13b2108b2c43e7 Uniswap token".to_string();

        let serialized = serialize_options(&options).unwrap();
        let round_tripped = deserialize_options(&serialized).unwrap();
        assert_eq!(round_tripped, options);
    }

    #[test]
    fn persisted_form_uses_camel_case_keys_and_string_sections() {
        let serialized = OptionsSerialized::default();
        let json = serde_json::to_value(&serialized).unwrap();
        assert_eq!(json["themeName"], "light");
        assert_eq!(json["hasSeenTour"], false);
        assert_eq!(json["displayLabelFormat"], DEFAULT_DISPLAY_LABEL_FORMAT);
        assert_eq!(json["displayGuessFormat"], DEFAULT_DISPLAY_GUESS_FORMAT);
        assert!(json["sections"].is_string());
    }

    #[test]
    fn deserialize_fails_on_garbage_sections() {
        let mut serialized = OptionsSerialized::default();
        serialized.sections = "not json".to_string();
        assert!(deserialize_options(&serialized).is_err());
    }

    #[test]
    fn v1_schema_has_labels_and_no_sections() {
        let v1 = OptionsV1 {
            theme_name: ThemeName::Light,
            labels: "abc".to_string(),
            display_label_format: DEFAULT_DISPLAY_LABEL_FORMAT.to_string(),
            display_guess_format: DEFAULT_DISPLAY_GUESS_FORMAT.to_string(),
        };
        let json = serde_json::to_value(&v1).unwrap();
        assert_eq!(json["labels"], "abc");
        assert!(json.get("sections").is_none());
    }
}
