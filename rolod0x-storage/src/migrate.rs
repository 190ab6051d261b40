//! Legacy schema detection and upgrade.
//!
//! The pre-section schema stored the whole address book as one `labels`
//! text blob. The upgrade wraps that blob in a single fresh section and
//! stores the section array as a JSON string under `sections`.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use rolod0x_types::{labels_to_section, OptionsSerialized};

/// Result type for migration steps.
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Failure upgrading a raw options map.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to serialize migrated sections: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A load-time upgrade step applied to the raw stored blob.
pub type Migration = fn(&mut Map<String, Value>, &OptionsSerialized);

/// Which shape a raw options map is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Legacy: single `labels` text blob.
    V1,
    /// Current: section-based schema.
    V2,
}

/// Classifies a raw map purely on field presence: `labels` means V1.
///
/// A map carrying neither `labels` nor `sections` does not occur in
/// practice (the compiled-in defaults always include `sections`) and is
/// treated as current.
pub fn detect_version(raw: &Map<String, Value>) -> SchemaVersion {
    if raw.contains_key("labels") {
        SchemaVersion::V1
    } else {
        SchemaVersion::V2
    }
}

/// Upgrades a V1 map in place: wraps the old `labels` blob (missing or
/// non-text values count as empty) in one fresh section, stores the
/// one-element section array as a JSON string under `sections`, and
/// removes the top-level `labels` field.
pub fn migrate_v1_to_v2(raw: &mut Map<String, Value>) -> MigrationResult<()> {
    let labels = raw
        .get("labels")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let sections = vec![labels_to_section(labels)];
    let serialized = serde_json::to_string(&sections)?;
    raw.insert("sections".to_string(), Value::String(serialized));
    raw.remove("labels");
    Ok(())
}

/// Migration-list entry point: upgrade a pre-section blob if needed.
///
/// An upgrade failure is logged and *discarded*, deliberately and at this
/// one call site only, leaving the map without `sections`. Deserializing
/// such a map later fails, and resetting to defaults is the recovery path.
/// Known weak point, kept visible here rather than hidden in a catch-all.
pub fn migrate_to_sections(raw: &mut Map<String, Value>, _defaults: &OptionsSerialized) {
    debug!("checking migration to sections");
    if raw.contains_key("sections") {
        debug!("labels already migrated to a section");
        return;
    }

    info!("migrating legacy labels to a default section");
    if let Err(err) = migrate_v1_to_v2(raw) {
        warn!("migration to sections failed: {err}");
    }
}

/// Drops stored keys that no longer exist in the compiled-in defaults.
///
/// Listed after [`migrate_to_sections`] in the default migration list so
/// the legacy `labels` field is consumed before cleanup would discard it.
pub fn remove_unused(raw: &mut Map<String, Value>, defaults: &OptionsSerialized) {
    let known = match serde_json::to_value(defaults) {
        Ok(Value::Object(map)) => map,
        _ => return,
    };
    raw.retain(|key, _| known.contains_key(key));
}
