//! The line-oriented label-text parser.

use regex_lite::Regex;

use rolod0x_types::{AddressBookSection, AddressLabel, LabelMap};

use crate::abbrev::abbreviations;
use crate::address::canonicalize;
use crate::error::{AddressError, ParseError, ParserResult};

/// Comment or blank line: optional leading whitespace, then `//` or nothing.
const COMMENT_OR_BLANK_PATTERN: &str = r"^\s*(//|$)";

/// An entry line: address, one or more spaces, label, optional ` // comment`.
///
/// NB: the leading `s*` is historical; it does NOT accept indentation, and
/// address lines with leading whitespace are rejected (pinned by tests).
const LABEL_LINE_PATTERN: &str = r"(?i)^s*(0x[0-9a-f]{40})\s+(.+?)(?:\s+//\s*(.*?)\s*)?$";

/// Parses a multi-line label-text block.
///
/// Returns the number of entry lines parsed and the lookup table mapping
/// every full and abbreviated address form to its label. Comment and blank
/// lines are skipped without counting. The first bad line aborts the parse.
///
/// Later lines overwrite earlier ones that map to the same key, including
/// cross-address abbreviation collisions. That is an accepted limitation
/// of approximate matching, not an error.
pub fn parse_labels(text: &str) -> ParserResult<(usize, LabelMap)> {
    let comment_or_blank =
        Regex::new(COMMENT_OR_BLANK_PATTERN).expect("hard-coded pattern compiles");
    let label_line = Regex::new(LABEL_LINE_PATTERN).expect("hard-coded pattern compiles");

    let mut label_map = LabelMap::new();
    let mut lines_parsed = 0;

    for (i, line) in text.split('\n').enumerate() {
        if comment_or_blank.is_match(line) {
            continue;
        }

        let malformed = || ParseError::MalformedLine {
            line: i + 1,
            text: line.to_string(),
        };
        let caps = label_line.captures(line).ok_or_else(malformed)?;
        let (Some(address), Some(label)) = (caps.get(1), caps.get(2)) else {
            return Err(malformed());
        };
        let comment = caps.get(3).map(|m| m.as_str().to_string());

        add_label(
            &mut label_map,
            i + 1,
            line,
            address.as_str(),
            label.as_str(),
            comment,
        )?;
        lines_parsed += 1;
    }

    Ok((lines_parsed, label_map))
}

/// Parses every section's label text into one combined lookup table.
///
/// Sections are parsed in order and merged with the same last-write-wins
/// rule that applies within a single block, so a later section's entry for
/// an address shadows an earlier section's.
pub fn parse_sections(sections: &[AddressBookSection]) -> ParserResult<(usize, LabelMap)> {
    let mut combined = LabelMap::new();
    let mut total_parsed = 0;
    for section in sections {
        let (lines_parsed, label_map) = parse_labels(&section.labels)?;
        total_parsed += lines_parsed;
        combined.extend(label_map);
    }
    Ok((total_parsed, combined))
}

/// Inserts one parsed line into the map under every form of its address.
fn add_label(
    label_map: &mut LabelMap,
    line_number: usize,
    line: &str,
    address: &str,
    label: &str,
    comment: Option<String>,
) -> ParserResult<()> {
    let canonical = match canonicalize(address) {
        Ok(canonical) => canonical,
        Err(AddressError::BadChecksum(_)) => {
            return Err(ParseError::BadChecksum {
                line: line_number,
                text: line.to_string(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    // The address as typed, plus whichever canonical form it isn't.
    let mut addresses = vec![address.to_string()];
    if address == canonical.mixed_case {
        addresses.push(canonical.lowercase);
    } else {
        addresses.push(canonical.mixed_case);
    }

    for full in &addresses {
        label_map.insert(full.clone(), AddressLabel::new(label, comment.clone()));

        // The abbreviated forms risk collisions, so a match on them is only
        // a well-educated guess; the `?` suffix signals the uncertainty.
        let guess = AddressLabel::new(format!("{label}?"), comment.clone());
        for abbreviated in abbreviations(full) {
            label_map.insert(abbreviated, guess.clone());
        }
    }

    Ok(())
}
