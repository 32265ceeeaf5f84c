//! Hex digit helpers shared by nibble writes, hex search and address input.

use crate::error::{EditError, Result};

/// Value of a single hex digit, case-insensitive.
#[inline]
pub const fn nibble_value(digit: char) -> Option<u8> {
    match digit {
        '0'..='9' => Some(digit as u8 - b'0'),
        'a'..='f' => Some(digit as u8 - b'a' + 10),
        'A'..='F' => Some(digit as u8 - b'A' + 10),
        _ => None,
    }
}

/// Parse a string of hex digit pairs into bytes.
///
/// ASCII whitespace is ignored. A trailing unpaired digit is dropped, so
/// `"2030f"` yields `[0x20, 0x30]`. Any non-hex character rejects the whole
/// string.
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>> {
    let mut nibbles = Vec::with_capacity(text.len());
    for c in text.chars().filter(|c| !c.is_ascii_whitespace()) {
        let value =
            nibble_value(c).ok_or_else(|| EditError::invalid(format!("'{c}' is not a hex digit")))?;
        nibbles.push(value);
    }
    Ok(nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Parse a byte address typed as hex, with or without a `0x` prefix.
pub fn parse_address(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u64::from_str_radix(digits, 16)
        .map_err(|_| EditError::invalid(format!("'{trimmed}' is not a hex address")))
}
