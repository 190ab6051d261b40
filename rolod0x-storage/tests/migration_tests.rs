use pretty_assertions::assert_eq;
use rolod0x_storage::{
    detect_version, migrate_to_sections, migrate_v1_to_v2, remove_unused, SchemaVersion,
};
use rolod0x_types::{
    AddressBookSection, OptionsSerialized, OptionsV1, ThemeName, DEFAULT_SECTION_TITLE,
};
use serde_json::{json, Map, Value};

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn v1_raw(labels: &str) -> Map<String, Value> {
    as_map(
        serde_json::to_value(OptionsV1 {
            theme_name: ThemeName::Light,
            labels: labels.to_string(),
            display_label_format: "X".to_string(),
            display_guess_format: "Y".to_string(),
        })
        .unwrap(),
    )
}

fn stored_sections(raw: &Map<String, Value>) -> Vec<AddressBookSection> {
    let serialized = raw["sections"].as_str().expect("sections is a string");
    serde_json::from_str(serialized).unwrap()
}

// ── Version detection ───────────────────────────────────────────

#[test]
fn detection_keys_on_field_presence() {
    assert_eq!(detect_version(&v1_raw("abc")), SchemaVersion::V1);

    let v2 = as_map(json!({ "themeName": "light", "sections": "[]" }));
    assert_eq!(detect_version(&v2), SchemaVersion::V2);

    // A half-merged map carrying both fields still reads as legacy, so the
    // old labels win over a stale default section blob.
    let both = as_map(json!({ "labels": "abc", "sections": "[]" }));
    assert_eq!(detect_version(&both), SchemaVersion::V1);
}

// ── V1 → V2 ─────────────────────────────────────────────────────

#[test]
fn upgrade_preserves_labels_and_other_fields() {
    let mut raw = v1_raw("abc");
    migrate_v1_to_v2(&mut raw).unwrap();

    assert!(raw.get("labels").is_none());
    assert_eq!(raw["themeName"], "light");
    assert_eq!(raw["displayLabelFormat"], "X");
    assert_eq!(raw["displayGuessFormat"], "Y");

    let sections = stored_sections(&raw);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].labels, "abc");
    assert_eq!(sections[0].title, DEFAULT_SECTION_TITLE);
    assert_eq!(sections[0].url, None);
}

#[test]
fn missing_labels_become_an_empty_section() {
    let mut raw = as_map(json!({ "themeName": "dark" }));
    migrate_v1_to_v2(&mut raw).unwrap();
    assert_eq!(stored_sections(&raw)[0].labels, "");
}

#[test]
fn non_text_labels_count_as_empty() {
    let mut raw = as_map(json!({ "labels": 42 }));
    migrate_v1_to_v2(&mut raw).unwrap();
    assert_eq!(stored_sections(&raw)[0].labels, "");
}

// ── Entry point ─────────────────────────────────────────────────

#[test]
fn entry_point_upgrades_a_legacy_map() {
    let defaults = OptionsSerialized::default();
    let mut raw = v1_raw("0x89205a3a3b2a69de6dbf7f01ed13b2108b2c43e7 UNI");
    migrate_to_sections(&mut raw, &defaults);

    assert!(raw.get("labels").is_none());
    assert_eq!(
        stored_sections(&raw)[0].labels,
        "0x89205a3a3b2a69de6dbf7f01ed13b2108b2c43e7 UNI"
    );
}

#[test]
fn remigration_is_a_byte_identical_noop() {
    let defaults = OptionsSerialized::default();
    let mut raw = v1_raw("abc");
    migrate_to_sections(&mut raw, &defaults);

    let before = serde_json::to_string(&raw).unwrap();
    migrate_to_sections(&mut raw, &defaults);
    assert_eq!(serde_json::to_string(&raw).unwrap(), before);
}

// ── Cleanup ─────────────────────────────────────────────────────

#[test]
fn remove_unused_drops_keys_absent_from_defaults() {
    let defaults = OptionsSerialized::default();
    let mut raw = as_map(json!({
        "themeName": "dark",
        "sections": "[]",
        "obsoleteSetting": true,
    }));
    remove_unused(&mut raw, &defaults);

    assert!(raw.get("obsoleteSetting").is_none());
    assert_eq!(raw["themeName"], "dark");
    assert_eq!(raw["sections"], "[]");
}
