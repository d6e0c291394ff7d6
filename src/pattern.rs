//! Unlock pattern parsing
//!
//! A sequence string such as `".-."` becomes an ordered list of is-long
//! flags. `-` is long, `.` is short, every other character is skipped
//! without taking a slot.

use crate::press::{PressKind, LONG_SYMBOL, SHORT_SYMBOL};
use std::fmt;

/// Target pattern of short/long presses, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    symbols: Vec<bool>,
}

impl Pattern {
    /// Parse a sequence string. Never fails; unrecognized characters are ignored.
    ///
    /// # Example
    /// ```
    /// use morsegate::pattern::Pattern;
    ///
    /// let pattern = Pattern::parse("-.-");
    /// assert_eq!(pattern.as_slice(), &[true, false, true]);
    /// ```
    pub fn parse(sequence: &str) -> Self {
        let symbols = sequence
            .chars()
            .filter_map(|c| match c {
                LONG_SYMBOL => Some(true),
                SHORT_SYMBOL => Some(false),
                _ => None,
            })
            .collect();

        Self { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Is-long flags in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.symbols.iter().copied()
    }

    pub fn kinds(&self) -> impl Iterator<Item = PressKind> + '_ {
        self.iter().map(PressKind::from_is_long)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.symbols
    }
}

impl From<Vec<bool>> for Pattern {
    fn from(symbols: Vec<bool>) -> Self {
        Self { symbols }
    }
}

/// Renders the parsed flags back as `-`/`.`; skipped characters are not reproduced
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in self.kinds() {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let pattern = Pattern::parse("");
        assert!(pattern.is_empty());
        assert_eq!(pattern.len(), 0);
    }

    #[test]
    fn test_parse_no_symbols() {
        assert!(Pattern::parse("abc").is_empty());
    }

    #[test]
    fn test_parse_mixed() {
        assert_eq!(Pattern::parse(".-.").as_slice(), &[false, true, false]);
    }

    #[test]
    fn test_parse_skips_unrecognized() {
        // Separators and whitespace do not consume a slot
        let pattern = Pattern::parse(" . / - x . ");
        assert_eq!(pattern.as_slice(), &[false, true, false]);
    }

    #[test]
    fn test_display_normalizes() {
        assert_eq!(Pattern::parse("- . -").to_string(), "-.-");
        assert_eq!(Pattern::parse("").to_string(), "");
    }

    #[test]
    fn test_kinds() {
        let kinds: Vec<_> = Pattern::parse("-.").kinds().collect();
        assert_eq!(kinds, vec![PressKind::Long, PressKind::Short]);
    }

    #[test]
    fn test_from_flags_matches_parse() {
        let pattern = Pattern::from(vec![true, false, true]);
        assert_eq!(pattern, Pattern::parse("-.-"));
        assert_eq!(pattern.to_string(), "-.-");
    }

    #[test]
    fn test_non_ascii_is_skipped() {
        // Unicode dashes are not the long symbol
        assert_eq!(Pattern::parse("–·-").as_slice(), &[true]);
    }
}
