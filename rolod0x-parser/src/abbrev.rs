//! Truncated address forms used by third-party UIs.
//!
//! Each scheme is a fixed-offset truncation `first N + "..." + last M`,
//! applied to whichever address string is passed in; callers expand the
//! mixed-case and lowercase forms separately.

/// The truncation widths `(prefix, suffix)` observed in the wild.
pub const TRUNCATION_SCHEMES: [(usize, usize); 3] = [
    // Tenderly, defender.openzeppelin.com, Gnosis Safe: 0x12345678...1234
    (10, 4),
    // Etherscan: 0x123456...12345678
    (8, 8),
    // Coinbase: 0x123...12345
    (5, 5),
];

/// Fixed-offset truncation: first `prefix` characters, `...`, last `suffix`.
/// Inputs too short to truncate are returned unchanged.
pub fn truncate(address: &str, prefix: usize, suffix: usize) -> String {
    if address.len() <= prefix + suffix {
        return address.to_string();
    }
    match (address.get(..prefix), address.get(address.len() - suffix..)) {
        (Some(head), Some(tail)) => format!("{head}...{tail}"),
        _ => address.to_string(),
    }
}

/// All abbreviated forms of `address`, one per scheme, in scheme order.
pub fn abbreviations(address: &str) -> [String; 3] {
    TRUNCATION_SCHEMES.map(|(prefix, suffix)| truncate(address, prefix, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_match_known_renderings() {
        let address = "0x89205a3a3b2a69de6dbf7f01ed13b2108b2c43e7";
        assert_eq!(
            abbreviations(address),
            [
                "0x89205a3a...43e7".to_string(),
                "0x89205a...8b2c43e7".to_string(),
                "0x892...c43e7".to_string(),
            ]
        );
    }

    #[test]
    fn truncation_preserves_case() {
        let address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert_eq!(truncate(address, 10, 4), "0x5aAeb605...eAed");
    }

    #[test]
    fn short_inputs_pass_through() {
        assert_eq!(truncate("0x1234", 10, 4), "0x1234");
        assert_eq!(truncate("", 5, 5), "");
    }
}
