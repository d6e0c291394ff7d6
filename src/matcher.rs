//! Sequence matching against the press history
//!
//! A candidate window matches when every press has the expected kind, in
//! order, and every press lies within `timeout` of the FIRST press in the
//! window. The window is measured from its start, not between neighbours.

use crate::history::EventHistory;
use crate::pattern::Pattern;
use crate::press::Tick;
use std::time::Duration;

/// Compare the oldest `pattern.len()` presses of `history` against `pattern`
///
/// Returns `false` when the history is shorter than the pattern. An empty
/// pattern matches any history; callers decide whether that should trigger.
///
/// # Example
/// ```
/// use morsegate::history::EventHistory;
/// use morsegate::matcher::evaluate;
/// use morsegate::pattern::Pattern;
/// use morsegate::press::PressEvent;
/// use std::time::Duration;
///
/// let pattern = Pattern::parse("..");
/// let history: EventHistory = [PressEvent::short(0), PressEvent::short(400)]
///     .into_iter()
///     .collect();
/// assert!(evaluate(&pattern, &history, Duration::from_millis(500)));
/// ```
pub fn evaluate(pattern: &Pattern, history: &EventHistory, timeout: Duration) -> bool {
    if pattern.len() > history.len() {
        return false;
    }

    let Some(start) = history.first().map(|e| e.timestamp) else {
        // Empty history only gets here with an empty pattern
        return true;
    };
    let timeout_ms = duration_to_ticks(timeout);

    for (expected_long, event) in pattern.iter().zip(history.iter()) {
        if expected_long != event.is_long {
            tracing::trace!(
                "Press at {} has wrong kind (expected long = {})",
                event.timestamp,
                expected_long
            );
            return false;
        }

        // Out-of-order ticks saturate to zero rather than wrapping
        if event.timestamp.saturating_sub(start) > timeout_ms {
            tracing::trace!(
                "Press at {} is outside the {}ms window starting at {}",
                event.timestamp,
                timeout_ms,
                start
            );
            return false;
        }
    }

    true
}

/// [`evaluate`] for callers holding optional views; `None` never matches
pub fn evaluate_optional(
    pattern: Option<&Pattern>,
    history: Option<&EventHistory>,
    timeout: Duration,
) -> bool {
    match (pattern, history) {
        (Some(pattern), Some(history)) => evaluate(pattern, history, timeout),
        _ => false,
    }
}

/// Milliseconds in `duration`, clamped to the tick range
pub fn duration_to_ticks(duration: Duration) -> Tick {
    Tick::try_from(duration.as_millis()).unwrap_or(Tick::MAX)
}
