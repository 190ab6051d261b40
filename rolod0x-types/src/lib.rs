//! Shared data model for the rolod0x address-label core.
//!
//! Defines the address-book section, the versioned options schema, and the
//! label records produced by the parser. The options schema exists in two
//! shapes: the in-memory (deserialized) form carries `sections` as a live
//! array, while the persisted (serialized) form carries it as a JSON string,
//! because the key/value backend only accepts scalar values.

mod label;
mod options;
mod section;

pub use label::{AddressLabel, LabelMap};
pub use options::{
    deserialize_options, serialize_options, OptionsDeserialized, OptionsSerialized, OptionsV1,
    ThemeName, DEFAULT_DISPLAY_GUESS_FORMAT, DEFAULT_DISPLAY_LABEL_FORMAT,
};
pub use section::{
    labels_to_section, AddressBookSection, SectionFormat, SectionId, SectionSource,
    DEFAULT_SECTION_TITLE,
};
