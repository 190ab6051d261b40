//! EIP-55 address canonicalization.
//!
//! The checksum encodes validation information in the capitalization of the
//! hex letters: letter `i` is uppercased iff nibble `i` of the Keccak-256
//! digest of the lowercase hex body is >= 8.

use sha3::{Digest, Keccak256};

use crate::error::AddressError;

/// The two full-length forms every address resolves to.
///
/// Both are stored as distinct lookup keys: pages render addresses either
/// checksummed or all-lowercase, and lookups are exact string matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalAddress {
    /// EIP-55 checksummed form, `0x`-prefixed.
    pub mixed_case: String,
    /// All-lowercase form, `0x`-prefixed.
    pub lowercase: String,
}

/// Validates `address` and produces its canonical forms.
///
/// Inputs that are entirely lowercase or entirely uppercase carry no
/// checksum information and always pass; only *inconsistent* mixed case is
/// rejected with [`AddressError::BadChecksum`].
pub fn canonicalize(address: &str) -> Result<CanonicalAddress, AddressError> {
    let malformed = || AddressError::Malformed(address.to_string());

    let body = address.strip_prefix("0x").ok_or_else(malformed)?;
    if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    let lower = body.to_ascii_lowercase();
    let digest = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(40);
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            digest[i / 2] >> 4
        } else {
            digest[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    if has_upper && has_lower && body != checksummed {
        return Err(AddressError::BadChecksum(address.to_string()));
    }

    Ok(CanonicalAddress {
        mixed_case: format!("0x{checksummed}"),
        lowercase: format!("0x{lower}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Checksummed test addresses from the EIP-55 reference set.
    const CHECKSUMMED: &[&str] = &[
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn checksummed_inputs_round_trip() {
        for address in CHECKSUMMED {
            let canonical = canonicalize(address).unwrap();
            assert_eq!(canonical.mixed_case, *address);
            assert_eq!(canonical.lowercase, address.to_lowercase());
        }
    }

    #[test]
    fn lowercase_input_is_checksummed() {
        for address in CHECKSUMMED {
            let canonical = canonicalize(&address.to_lowercase()).unwrap();
            assert_eq!(canonical.mixed_case, *address);
        }
    }

    #[test]
    fn uppercase_hex_body_carries_no_checksum() {
        // Uppercase hex digits after a lowercase 0x prefix.
        let address = "0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED";
        let canonical = canonicalize(address).unwrap();
        assert_eq!(canonical.mixed_case, CHECKSUMMED[0]);
    }

    #[test]
    fn inconsistent_mixed_case_is_rejected() {
        // First letter's case flipped relative to the valid checksum.
        let address = "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert_eq!(
            canonicalize(address),
            Err(AddressError::BadChecksum(address.to_string()))
        );
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for address in [
            "",
            "0x",
            "0x12345",
            "0xZZ6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            // Uppercase prefix is not recognized.
            "0X5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed00",
        ] {
            assert_eq!(
                canonicalize(address),
                Err(AddressError::Malformed(address.to_string())),
                "expected {address:?} to be malformed"
            );
        }
    }
}
