//! Hex byte strings.
//!
//! Patterns are written either contiguously (`"1B001D3C"`) or as
//! whitespace-separated pairs (`"1B 00 1D 3C"`); both parse to the same bytes.

use crate::{Error, Result};

/// Parse a hex string into bytes.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();

    if digits.is_empty() {
        return Err(Error::InvalidHex("pattern is empty".to_string()));
    }
    if digits.len() % 2 != 0 {
        return Err(Error::InvalidHex(format!(
            "odd number of hex digits in '{}'",
            text
        )));
    }

    digits
        .chunks_exact(2)
        .map(|pair| {
            let token: String = pair.iter().collect();
            u8::from_str_radix(&token, 16)
                .map_err(|e| Error::InvalidHex(format!("invalid token '{}': {}", token, e)))
        })
        .collect()
}

/// Format bytes as contiguous upper-case hex.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
