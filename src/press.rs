//! Classified button presses
//!
//! A press arrives already classified as short or long, stamped with the
//! monotonic tick at which it was recognized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic time unit in milliseconds
pub type Tick = u64;

/// Symbol that denotes a long press in a sequence string
pub const LONG_SYMBOL: char = '-';

/// Symbol that denotes a short press in a sequence string
pub const SHORT_SYMBOL: char = '.';

/// Kind of a classified press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum PressKind {
    Short,
    Long,
}

impl PressKind {
    /// Kind for an is-long flag
    pub fn from_is_long(is_long: bool) -> Self {
        if is_long {
            PressKind::Long
        } else {
            PressKind::Short
        }
    }

    pub fn is_long(self) -> bool {
        matches!(self, PressKind::Long)
    }

    /// Sequence symbol for this kind (`-` or `.`)
    pub fn symbol(self) -> char {
        match self {
            PressKind::Long => LONG_SYMBOL,
            PressKind::Short => SHORT_SYMBOL,
        }
    }
}

/// One classified press with its timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct PressEvent {
    /// Tick at which the press was recognized
    pub timestamp: Tick,
    /// Whether the press was held past the hold threshold
    pub is_long: bool,
}

impl PressEvent {
    pub fn new(timestamp: Tick, is_long: bool) -> Self {
        Self { timestamp, is_long }
    }

    pub fn short(timestamp: Tick) -> Self {
        Self::new(timestamp, false)
    }

    pub fn long(timestamp: Tick) -> Self {
        Self::new(timestamp, true)
    }

    pub fn kind(&self) -> PressKind {
        PressKind::from_is_long(self.is_long)
    }
}

impl fmt::Display for PressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.kind().symbol())
    }
}
