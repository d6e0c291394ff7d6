//! Press classification from raw button edges
//!
//! The doorbell button reports a `down` edge when pressed and an `up` edge on
//! release. A press held for at least the hold threshold is long, anything
//! shorter is short. Either way the classified press is stamped with the
//! release tick. Debouncing happens upstream; edges arriving here are clean.

use crate::press::{PressEvent, Tick};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default boundary between a short and a long press
pub const DEFAULT_HOLD_THRESHOLD: Duration = Duration::from_millis(500);

/// Raw button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonEdge {
    Down,
    Up,
}

/// Counters kept alongside classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressCounters {
    /// Short presses seen
    pub clicks: u64,
    /// Long presses seen
    pub holds: u64,
    /// Duration of the most recent long press in milliseconds
    pub last_hold_ms: Option<u64>,
}

/// Turns down/up edge pairs into classified presses
#[derive(Debug, Clone)]
pub struct PressClassifier {
    hold_threshold_ms: Tick,
    pressed_at: Option<Tick>,
    counters: PressCounters,
}

impl PressClassifier {
    pub fn new(hold_threshold: Duration) -> Self {
        Self {
            hold_threshold_ms: crate::matcher::duration_to_ticks(hold_threshold),
            pressed_at: None,
            counters: PressCounters::default(),
        }
    }

    /// Feed one edge; returns the classified press on release
    ///
    /// A second `down` without an `up` restarts the press. An `up` without a
    /// preceding `down` is ignored.
    pub fn edge(&mut self, edge: ButtonEdge, tick: Tick) -> Option<PressEvent> {
        match edge {
            ButtonEdge::Down => {
                if let Some(previous) = self.pressed_at.replace(tick) {
                    tracing::debug!(
                        "Button down at {} while already down since {}; restarting press",
                        tick,
                        previous
                    );
                }
                None
            }
            ButtonEdge::Up => {
                let Some(start) = self.pressed_at.take() else {
                    tracing::debug!("Ignoring button up at {} with no matching down", tick);
                    return None;
                };

                let held = tick.saturating_sub(start);
                let is_long = held >= self.hold_threshold_ms;
                if is_long {
                    self.counters.holds += 1;
                    self.counters.last_hold_ms = Some(held);
                    tracing::debug!(
                        "Long press #{} held for {}ms",
                        self.counters.holds,
                        held
                    );
                } else {
                    self.counters.clicks += 1;
                    tracing::debug!("Short press #{}", self.counters.clicks);
                }

                Some(PressEvent::new(tick, is_long))
            }
        }
    }

    /// Whether a `down` edge is waiting for its `up`
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn counters(&self) -> PressCounters {
        self.counters
    }

    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }
}

impl Default for PressClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_THRESHOLD)
    }
}
