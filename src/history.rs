//! Bounded history of recent presses
//!
//! Oldest press at the front, newest at the back. The history itself does not
//! enforce a capacity; the controller trims it to the pattern length after
//! every push.

use crate::press::PressEvent;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// Errors from history operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Cannot pop from an empty press history")]
    Empty,
}

/// FIFO window of recent press events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventHistory {
    events: VecDeque<PressEvent>,
}

impl EventHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history with room for `capacity` events before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an event at the tail (no capacity check)
    pub fn push_back(&mut self, event: PressEvent) {
        self.events.push_back(event);
    }

    /// Remove and return the oldest event
    ///
    /// # Errors
    /// Returns [`HistoryError::Empty`] if there is nothing to pop.
    pub fn pop_front(&mut self) -> Result<PressEvent, HistoryError> {
        self.events.pop_front().ok_or(HistoryError::Empty)
    }

    /// Drop every event; a no-op when already empty
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events oldest to newest
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PressEvent> + '_ {
        self.events.iter()
    }

    /// Oldest event, if any
    pub fn first(&self) -> Option<&PressEvent> {
        self.events.front()
    }

    /// Newest event, if any
    pub fn last(&self) -> Option<&PressEvent> {
        self.events.back()
    }

    /// Pop from the front until at most `max_len` events remain
    ///
    /// Returns the number of evicted events.
    pub fn truncate_front(&mut self, max_len: usize) -> usize {
        let mut evicted = 0;
        while self.events.len() > max_len {
            if self.pop_front().is_err() {
                break;
            }
            evicted += 1;
        }
        evicted
    }
}

impl<'a> IntoIterator for &'a EventHistory {
    type Item = &'a PressEvent;
    type IntoIter = std::collections::vec_deque::Iter<'a, PressEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl FromIterator<PressEvent> for EventHistory {
    fn from_iter<I: IntoIterator<Item = PressEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

/// Diagnostic dump: a header line followed by one `[tick] symbol` line per event
impl fmt::Display for EventHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "History (length = {})", self.events.len())?;
        for event in &self.events {
            write!(f, "\n  {}", event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let history = EventHistory::new();
        assert_eq!(history.len(), 0);
        assert!(history.is_empty());
        assert!(history.first().is_none());
    }

    #[test]
    fn test_push_preserves_fifo_order() {
        let mut history = EventHistory::new();
        history.push_back(PressEvent::short(10));
        history.push_back(PressEvent::long(20));
        history.push_back(PressEvent::short(30));

        let ticks: Vec<_> = history.iter().map(|e| e.timestamp).collect();
        assert_eq!(ticks, vec![10, 20, 30]);
        assert_eq!(history.first(), Some(&PressEvent::short(10)));
        assert_eq!(history.last(), Some(&PressEvent::short(30)));
    }

    #[test]
    fn test_pop_front_returns_oldest() {
        let mut history = EventHistory::new();
        history.push_back(PressEvent::long(1));
        history.push_back(PressEvent::short(2));

        assert_eq!(history.pop_front(), Ok(PressEvent::long(1)));
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop_front(), Ok(PressEvent::short(2)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_pop_front_empty_is_error() {
        let mut history = EventHistory::new();
        assert_eq!(history.pop_front(), Err(HistoryError::Empty));
    }

    #[test]
    fn test_clear_twice() {
        let mut history: EventHistory = [PressEvent::short(1), PressEvent::short(2)]
            .into_iter()
            .collect();
        history.clear();
        assert!(history.is_empty());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_truncate_front() {
        let mut history: EventHistory = (0..5).map(PressEvent::short).collect();
        assert_eq!(history.truncate_front(2), 3);
        let ticks: Vec<_> = history.iter().map(|e| e.timestamp).collect();
        assert_eq!(ticks, vec![3, 4]);
        assert_eq!(history.truncate_front(5), 0);
        assert_eq!(history.truncate_front(0), 2);
        assert!(history.is_empty());
    }

    #[test]
    fn test_iteration_is_non_destructive() {
        let history: EventHistory = (0..3).map(PressEvent::long).collect();
        assert_eq!(history.iter().count(), 3);
        assert_eq!((&history).into_iter().count(), 3);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_display_dump() {
        let history: EventHistory = [PressEvent::long(0), PressEvent::short(300)]
            .into_iter()
            .collect();
        assert_eq!(
            history.to_string(),
            "History (length = 2)\n  [0] -\n  [300] ."
        );
    }
}
