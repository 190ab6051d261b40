//! The options store: schema access and section CRUD over the backend.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use rolod0x_types::{
    deserialize_options, labels_to_section, AddressBookSection, OptionsDeserialized,
    OptionsSerialized, SectionId, ThemeName,
};

use crate::error::{StorageError, StorageResult};
use crate::kv::KeyValueStore;
use crate::migrate::{
    detect_version, migrate_to_sections, migrate_v1_to_v2, remove_unused, Migration, SchemaVersion,
};

/// Backend key the whole options blob lives under.
const DEFAULT_NAMESPACE: &str = "options";

/// Configuration for an [`OptionsStore`]: compiled-in defaults, the ordered
/// load-time migration list, and the backend key to store under.
#[derive(Clone)]
pub struct OptionsStoreConfig {
    /// Defaults merged underneath whatever is stored.
    pub defaults: OptionsSerialized,
    /// Upgrades applied to the raw stored blob at load time, in order.
    pub migrations: Vec<Migration>,
    /// Backend key the blob is stored under.
    pub namespace: String,
}

impl Default for OptionsStoreConfig {
    fn default() -> Self {
        Self {
            defaults: OptionsSerialized::default(),
            migrations: vec![migrate_to_sections, remove_unused],
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Partial update of the options; `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct OptionsPatch {
    pub theme_name: Option<ThemeName>,
    pub display_label_format: Option<String>,
    pub display_guess_format: Option<String>,
    pub has_seen_tour: Option<bool>,
    pub sections: Option<Vec<AddressBookSection>>,
}

impl OptionsPatch {
    /// Patch carrying only a replacement section collection.
    pub fn sections(sections: Vec<AddressBookSection>) -> Self {
        Self {
            sections: Some(sections),
            ..Self::default()
        }
    }
}

/// Partial update of a single section; `None` fields are untouched.
/// `format` and `source` have a single variant each, so patching them
/// would be a no-op and they are omitted.
#[derive(Debug, Clone, Default)]
pub struct SectionPatch {
    pub id: Option<SectionId>,
    pub title: Option<String>,
    pub labels: Option<String>,
    /// `Some(None)` clears the url; `None` leaves it untouched.
    pub url: Option<Option<String>>,
}

impl SectionPatch {
    /// Patch carrying only a new title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Patch carrying only new label text.
    pub fn labels(labels: impl Into<String>) -> Self {
        Self {
            labels: Some(labels.into()),
            ..Self::default()
        }
    }

    fn apply_to(&self, section: &mut AddressBookSection) {
        if let Some(id) = self.id {
            section.id = id;
        }
        if let Some(title) = &self.title {
            section.title = title.clone();
        }
        if let Some(labels) = &self.labels {
            section.labels = labels.clone();
        }
        if let Some(url) = &self.url {
            section.url = url.clone();
        }
    }
}

/// Handle to the persisted options.
///
/// Explicitly constructed via [`OptionsStore::load`]; callers own its
/// lifetime and there is no implicit teardown. Every operation below is a
/// full read-modify-write round trip of the single blob, so two concurrent
/// writers produce last-write-wins results with silent loss of the other
/// writer's change.
#[derive(Clone)]
pub struct OptionsStore {
    backend: Arc<dyn KeyValueStore>,
    config: OptionsStoreConfig,
}

impl fmt::Debug for OptionsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsStore")
            .field("namespace", &self.config.namespace)
            .field("migrations", &self.config.migrations.len())
            .finish()
    }
}

impl OptionsStore {
    /// Loads (or initializes) the options from `backend` with the standard
    /// defaults and migration list.
    pub async fn load(backend: Arc<dyn KeyValueStore>) -> StorageResult<Self> {
        Self::with_config(backend, OptionsStoreConfig::default()).await
    }

    /// Loads with explicit configuration, applying any pending schema
    /// migrations to the stored blob before returning the handle.
    pub async fn with_config(
        backend: Arc<dyn KeyValueStore>,
        config: OptionsStoreConfig,
    ) -> StorageResult<Self> {
        let store = Self { backend, config };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> StorageResult<()> {
        let mut raw = self.read_raw().await?;
        let before = raw.clone();
        for migration in &self.config.migrations {
            migration(&mut raw, &self.config.defaults);
        }
        if raw != before {
            debug!(namespace = %self.config.namespace, "writing back migrated options");
            self.write_raw(raw).await?;
        }
        Ok(())
    }

    /// Raw stored blob, without defaults. A missing blob reads as empty.
    async fn read_raw(&self) -> StorageResult<Map<String, Value>> {
        match self.backend.get(&self.config.namespace).await? {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(StorageError::Backend(format!(
                "expected an object under key {:?}",
                self.config.namespace
            ))),
            None => Ok(Map::new()),
        }
    }

    async fn write_raw(&self, raw: Map<String, Value>) -> StorageResult<()> {
        self.backend
            .set(&self.config.namespace, Value::Object(raw))
            .await
    }

    /// Stored values layered over the compiled-in defaults.
    async fn merged_raw(&self) -> StorageResult<Map<String, Value>> {
        let mut merged = to_raw(&self.config.defaults)?;
        merged.extend(self.read_raw().await?);
        Ok(merged)
    }

    /// The full schema in its persisted (serialized) form.
    pub async fn get_all(&self) -> StorageResult<OptionsSerialized> {
        let merged = self.merged_raw().await?;
        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    /// Overwrites the whole blob.
    pub async fn set_all(&self, options: &OptionsSerialized) -> StorageResult<()> {
        self.write_raw(to_raw(options)?).await
    }

    /// The full schema in its in-memory form, upgrading a legacy blob on
    /// the fly. Unlike the load-time migration list, an upgrade failure
    /// here does propagate to the caller.
    pub async fn get_all_deserialized(&self) -> StorageResult<OptionsDeserialized> {
        let mut merged = self.merged_raw().await?;
        if detect_version(&merged) == SchemaVersion::V1 {
            migrate_v1_to_v2(&mut merged)?;
        }
        let serialized: OptionsSerialized = serde_json::from_value(Value::Object(merged))?;
        Ok(deserialize_options(&serialized)?)
    }

    /// Merge-writes a partial update: present fields overwrite, absent
    /// fields are untouched. A `sections` array is re-serialized to its
    /// JSON string form before persisting.
    pub async fn set_deserialized(&self, patch: &OptionsPatch) -> StorageResult<()> {
        let mut merged = self.merged_raw().await?;
        if let Some(theme_name) = patch.theme_name {
            merged.insert("themeName".to_string(), serde_json::to_value(theme_name)?);
        }
        if let Some(format) = &patch.display_label_format {
            merged.insert("displayLabelFormat".to_string(), Value::String(format.clone()));
        }
        if let Some(format) = &patch.display_guess_format {
            merged.insert("displayGuessFormat".to_string(), Value::String(format.clone()));
        }
        if let Some(has_seen_tour) = patch.has_seen_tour {
            merged.insert("hasSeenTour".to_string(), Value::Bool(has_seen_tour));
        }
        if let Some(sections) = &patch.sections {
            merged.insert(
                "sections".to_string(),
                Value::String(serde_json::to_string(sections)?),
            );
        }
        self.write_raw(merged).await
    }

    /// Finds a section by id. Absence is `None`, not an error.
    pub async fn get_section(&self, id: SectionId) -> StorageResult<Option<AddressBookSection>> {
        let options = self.get_all_deserialized().await?;
        Ok(options.sections.into_iter().find(|section| section.id == id))
    }

    /// Field-merges `patch` into the section with `id` and persists the
    /// whole schema. Every other section is left untouched.
    pub async fn set_section(&self, id: SectionId, patch: &SectionPatch) -> StorageResult<()> {
        let mut options = self.get_all_deserialized().await?;
        let section = options
            .sections
            .iter_mut()
            .find(|section| section.id == id)
            .ok_or(StorageError::SectionNotFound(id))?;
        patch.apply_to(section);
        self.set_deserialized(&OptionsPatch::sections(options.sections))
            .await
    }

    /// Appends a fresh empty section with the given title and persists it.
    pub async fn add_section(&self, title: &str) -> StorageResult<AddressBookSection> {
        let mut options = self.get_all_deserialized().await?;
        let mut section = labels_to_section("");
        section.title = title.to_string();
        options.sections.push(section.clone());
        self.set_deserialized(&OptionsPatch::sections(options.sections))
            .await?;
        Ok(section)
    }

    /// Removes the section with `id`. The collection never goes empty:
    /// deleting the last section synthesizes a fresh empty one in its
    /// place. Deleting an unknown id rewrites the collection unchanged.
    pub async fn delete_section(&self, id: SectionId) -> StorageResult<()> {
        let mut options = self.get_all_deserialized().await?;
        options.sections.retain(|section| section.id != id);
        if options.sections.is_empty() {
            options.sections.push(labels_to_section(""));
        }
        self.set_deserialized(&OptionsPatch::sections(options.sections))
            .await
    }

    /// Overwrites everything with the compiled-in defaults and returns the
    /// freshly read-back blob, surfacing any backend transformation.
    pub async fn reset_to_defaults(&self) -> StorageResult<OptionsSerialized> {
        self.set_all(&self.config.defaults).await?;
        self.get_all().await
    }
}

/// A typed options blob as a raw JSON map.
fn to_raw(options: &OptionsSerialized) -> StorageResult<Map<String, Value>> {
    match serde_json::to_value(options)? {
        Value::Object(map) => Ok(map),
        _ => unreachable!("a struct with named fields serializes to an object"),
    }
}
