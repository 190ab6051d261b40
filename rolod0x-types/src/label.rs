//! Label records produced by parsing address-book text.

use std::collections::HashMap;

/// A human-readable label attached to an address, with an optional comment.
///
/// Entries keyed by a full address carry the label verbatim; entries keyed
/// by an abbreviated address carry a trailing `?` on the label, because
/// abbreviations are not unique and the match is only a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLabel {
    pub label: String,
    pub comment: Option<String>,
}

impl AddressLabel {
    pub fn new(label: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            label: label.into(),
            comment,
        }
    }
}

/// Lookup table from address strings (full or abbreviated) to labels.
/// Lookups are exact string matches.
pub type LabelMap = HashMap<String, AddressLabel>;
