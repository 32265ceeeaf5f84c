//! Forward search over buffer content.
//!
//! Searches start one byte after the cursor's byte and never wrap.

use crate::buffer::hex::parse_hex_bytes;
use crate::error::{EditError, Result};

/// How a pattern is matched against the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchStrategy {
    /// Single-pass scan that resets its match counter to zero on a
    /// mismatch without re-testing the mismatched byte.
    ///
    /// This reproduces the classic hexedit results exactly, including its
    /// misses: a match that starts inside a failed partial match is
    /// skipped, e.g. `"ab"` in `"aab"`.
    #[default]
    GreedyReset,
    /// Correct substring search; finds the first occurrence.
    Substring,
}

/// Find `pattern` in `haystack` at or after `start`.
///
/// Returns the offset of the first byte of the match. An empty pattern
/// never matches.
pub fn find_forward(
    haystack: &[u8],
    pattern: &[u8],
    start: usize,
    strategy: SearchStrategy,
) -> Option<usize> {
    if pattern.is_empty() || start >= haystack.len() {
        return None;
    }
    let window = &haystack[start..];
    let found = match strategy {
        SearchStrategy::GreedyReset => greedy_reset(window, pattern),
        SearchStrategy::Substring => window
            .windows(pattern.len())
            .position(|candidate| candidate == pattern),
    };
    found.map(|offset| offset + start)
}

fn greedy_reset(haystack: &[u8], pattern: &[u8]) -> Option<usize> {
    let mut matched = 0;
    for (i, &byte) in haystack.iter().enumerate() {
        if byte == pattern[matched] {
            matched += 1;
        } else {
            matched = 0;
        }
        if matched == pattern.len() {
            return Some(i + 1 - matched);
        }
    }
    None
}

/// Turn hex search text into a byte pattern.
///
/// Rejects text with no complete digit pair, since an empty pattern cannot
/// be searched for.
pub fn hex_pattern(text: &str) -> Result<Vec<u8>> {
    let pattern = parse_hex_bytes(text)?;
    if pattern.is_empty() {
        return Err(EditError::invalid("hex search needs at least one digit pair"));
    }
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: [SearchStrategy; 2] = [SearchStrategy::GreedyReset, SearchStrategy::Substring];

    #[test]
    fn test_find_simple() {
        let data = [0x10, 0x20, 0x30, 0x40];
        for strategy in BOTH {
            assert_eq!(find_forward(&data, &[0x20, 0x30], 1, strategy), Some(1));
            assert_eq!(find_forward(&data, &[0x40], 0, strategy), Some(3));
            assert_eq!(find_forward(&data, &[0x50], 0, strategy), None);
        }
    }

    #[test]
    fn test_find_respects_start() {
        let data = b"abcabc";
        for strategy in BOTH {
            assert_eq!(find_forward(data, b"abc", 1, strategy), Some(3));
            assert_eq!(find_forward(data, b"abc", 4, strategy), None);
            assert_eq!(find_forward(data, b"abc", 99, strategy), None);
        }
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        for strategy in BOTH {
            assert_eq!(find_forward(b"abc", b"", 0, strategy), None);
        }
    }

    #[test]
    fn test_match_at_end_of_buffer() {
        for strategy in BOTH {
            assert_eq!(find_forward(b"xxab", b"ab", 0, strategy), Some(2));
            assert_eq!(find_forward(b"xxa", b"ab", 0, strategy), None);
        }
    }

    #[test]
    fn test_greedy_reset_skips_overlap() {
        assert_eq!(find_forward(b"aab", b"ab", 0, SearchStrategy::GreedyReset), None);
        assert_eq!(find_forward(b"aab", b"ab", 0, SearchStrategy::Substring), Some(1));

        assert_eq!(find_forward(b"aaab", b"aab", 0, SearchStrategy::GreedyReset), None);
        assert_eq!(find_forward(b"aaab", b"aab", 0, SearchStrategy::Substring), Some(1));
    }

    #[test]
    fn test_greedy_reset_repeatable() {
        let data = b"the cat sat on the mat";
        let first = find_forward(data, b"at", 6, SearchStrategy::GreedyReset);
        for _ in 0..3 {
            assert_eq!(find_forward(data, b"at", 6, SearchStrategy::GreedyReset), first);
        }
        assert_eq!(first, Some(9));
    }

    #[test]
    fn test_hex_pattern() {
        assert_eq!(hex_pattern("2030").unwrap(), vec![0x20, 0x30]);
        assert_eq!(hex_pattern("20304").unwrap(), vec![0x20, 0x30]);
        assert!(hex_pattern("2").is_err());
        assert!(hex_pattern("2x").is_err());
    }
}
