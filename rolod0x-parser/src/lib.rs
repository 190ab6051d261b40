//! Label-text parsing for rolod0x.
//!
//! Turns a free-form text block of `<address> <label> [// comment]` lines
//! into a lookup table keyed by every string form under which the address
//! may later be seen: the EIP-55 mixed-case form, the all-lowercase form,
//! and the truncated renderings used by third-party UIs.
//!
//! Parsing is synchronous and side-effect-free; any bad line aborts the
//! whole parse with enough context to show the user what to fix.

mod abbrev;
mod address;
mod error;
mod parser;

pub use abbrev::{abbreviations, truncate, TRUNCATION_SCHEMES};
pub use address::{canonicalize, CanonicalAddress};
pub use error::{AddressError, ParseError, ParserResult};
pub use parser::{parse_labels, parse_sections};
