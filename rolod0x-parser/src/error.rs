//! Error types for address handling and label parsing.

use thiserror::Error;

/// Result type for parser operations.
pub type ParserResult<T> = Result<T, ParseError>;

/// Failures canonicalizing a single address string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Not `0x` followed by exactly 40 hex digits.
    #[error("invalid address: {0}")]
    Malformed(String),

    /// Mixed-case input whose capitalization does not match the EIP-55 digest.
    #[error("bad address checksum: {0}")]
    BadChecksum(String),
}

/// Failures parsing a label-text block. Any error aborts the whole parse;
/// no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A non-comment, non-blank line that does not match
    /// `<address> <label> [// comment]`.
    #[error("Failed to parse line {line}:\n{text}")]
    MalformedLine { line: usize, text: String },

    /// EIP-55 checksum failure, reported with the offending line so the
    /// caller can show the user exactly what to fix.
    #[error("Bad address checksum on line {line}:\n{text}")]
    BadChecksum { line: usize, text: String },

    /// Any other address failure, propagated unchanged.
    #[error(transparent)]
    Address(#[from] AddressError),
}
