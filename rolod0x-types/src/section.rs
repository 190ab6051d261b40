//! Address-book sections, the unit of user-facing organization.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Title given to sections synthesized by migration or as defaults.
pub const DEFAULT_SECTION_TITLE: &str = "Personal addressbook";

/// Strongly-typed section identifier (NewType pattern).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub Uuid);

impl SectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format of a section's label text. Only the native format exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionFormat {
    #[default]
    Rolod0x,
}

/// Where a section's label text comes from. Only pasted text exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionSource {
    #[default]
    Text,
}

/// A named, self-contained block of address-label text plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBookSection {
    pub id: SectionId,
    pub title: String,
    pub format: SectionFormat,
    pub source: SectionSource,
    /// Raw label text, one `<address> <label> [// comment]` entry per line.
    pub labels: String,
    pub url: Option<String>,
}

/// Wraps a raw label-text blob in a fresh section with a new random id.
/// Used both for defaults and when migrating the legacy single-blob schema.
pub fn labels_to_section(labels: impl Into<String>) -> AddressBookSection {
    AddressBookSection {
        id: SectionId::new(),
        title: DEFAULT_SECTION_TITLE.to_string(),
        format: SectionFormat::Rolod0x,
        source: SectionSource::Text,
        labels: labels.into(),
        url: None,
    }
}
