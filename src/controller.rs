//! Sequence controller
//!
//! Owns the parsed pattern, the press history and the timeout. Every press is
//! one transition: push, trim to the pattern length, evaluate, and on a match
//! fire the trigger and clear the history. A failed evaluation keeps the
//! history so the window can slide forward on the next press.
//!
//! The controller is single-writer. Use [`crate::shared::SharedController`]
//! when several threads need to drive the same instance.

use crate::history::EventHistory;
use crate::matcher;
use crate::pattern::Pattern;
use crate::press::{PressEvent, Tick};
use crate::trigger::TriggerAction;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Behaviour when the configured sequence has no recognized symbols
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPatternPolicy {
    /// Matching is switched off; no press ever triggers
    #[default]
    Disabled,
    /// Every press matches the empty pattern and triggers
    AlwaysMatch,
}

/// What happens to buffered presses when the sequence changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconfigurePolicy {
    /// Discard presses collected against the previous sequence
    #[default]
    ClearHistory,
    /// Keep them; they take part in the first evaluation against the new sequence
    KeepHistory,
}

/// Result of feeding one press to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressOutcome {
    /// The history matched; the trigger fired and the history was cleared
    Triggered,
    /// No match yet; the press stays in the window
    Pending,
    /// The pattern is empty and matching is disabled
    Disabled,
}

impl PressOutcome {
    pub fn is_triggered(self) -> bool {
        matches!(self, PressOutcome::Triggered)
    }
}

/// Recognizes the unlock sequence in a stream of presses
#[derive(Debug)]
pub struct SequenceController<A: TriggerAction> {
    sequence: String,
    pattern: Pattern,
    history: EventHistory,
    timeout: Duration,
    action: A,
    empty_pattern: EmptyPatternPolicy,
    reconfigure: ReconfigurePolicy,
    trigger_count: u64,
    manual_opens: u64,
}

impl<A: TriggerAction> SequenceController<A> {
    /// Create a controller with default policies
    pub fn new(sequence: &str, timeout: Duration, action: A) -> Self {
        let pattern = Pattern::parse(sequence);
        tracing::info!(
            "Initializing unlock pattern from config: {:?} ({} presses)",
            sequence,
            pattern.len()
        );

        Self {
            sequence: sequence.to_string(),
            history: EventHistory::with_capacity(pattern.len() + 1),
            pattern,
            timeout,
            action,
            empty_pattern: EmptyPatternPolicy::default(),
            reconfigure: ReconfigurePolicy::default(),
            trigger_count: 0,
            manual_opens: 0,
        }
    }

    pub fn with_empty_pattern_policy(mut self, policy: EmptyPatternPolicy) -> Self {
        self.empty_pattern = policy;
        self
    }

    pub fn with_reconfigure_policy(mut self, policy: ReconfigurePolicy) -> Self {
        self.reconfigure = policy;
        self
    }

    /// Feed one classified press
    pub fn notify_press(&mut self, is_long: bool, timestamp: Tick) -> PressOutcome {
        self.ingest(PressEvent::new(timestamp, is_long))
    }

    /// Feed one press event
    pub fn ingest(&mut self, event: PressEvent) -> PressOutcome {
        tracing::trace!("Press received: {}", event);

        if self.pattern.is_empty() && self.empty_pattern == EmptyPatternPolicy::Disabled {
            self.history.clear();
            return PressOutcome::Disabled;
        }

        self.history.push_back(event);
        let evicted = self.history.truncate_front(self.pattern.len());
        if evicted > 0 {
            tracing::trace!("Evicted {} oldest press(es) from history", evicted);
        }

        tracing::debug!("{}", self.history);

        if self.history.len() < self.pattern.len() {
            return PressOutcome::Pending;
        }

        if matcher::evaluate(&self.pattern, &self.history, self.timeout) {
            tracing::info!(
                "Unlock sequence {:?} matched at tick {}",
                self.sequence,
                event.timestamp
            );
            self.trigger_count += 1;
            self.action.trigger();
            self.history.clear();
            PressOutcome::Triggered
        } else {
            tracing::debug!("History does not match {}", self.pattern);
            PressOutcome::Pending
        }
    }

    /// Replace the unlock sequence; the pattern is re-parsed from scratch
    pub fn set_sequence(&mut self, text: &str) {
        self.sequence = text.to_string();
        self.pattern = Pattern::parse(text);

        if self.pattern.is_empty() {
            tracing::warn!("Unlock sequence {:?} contains no presses", text);
        }

        match self.reconfigure {
            ReconfigurePolicy::ClearHistory => self.history.clear(),
            ReconfigurePolicy::KeepHistory => {}
        }

        tracing::info!("Sequence is set to: {}", self.sequence);
    }

    /// Fire the trigger directly, bypassing the sequence
    ///
    /// Used for the door-open command and the service button. The press
    /// history is left untouched, so a sequence in progress can still complete.
    pub fn open(&mut self) {
        self.manual_opens += 1;
        tracing::info!("Manual open requested (#{})", self.manual_opens);
        self.action.trigger();
    }

    /// Replace the window timeout; applies from the next evaluation
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
        tracing::info!("Sequence timeout is set to {}ms", timeout.as_millis());
    }

    /// The most recently configured sequence string, byte for byte
    pub fn current_sequence(&self) -> &str {
        &self.sequence
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn history(&self) -> &EventHistory {
        &self.history
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Total successful matches since construction
    pub fn trigger_count(&self) -> u64 {
        self.trigger_count
    }

    /// Triggers fired through [`SequenceController::open`]
    pub fn manual_opens(&self) -> u64 {
        self.manual_opens
    }

    pub fn empty_pattern_policy(&self) -> EmptyPatternPolicy {
        self.empty_pattern
    }

    pub fn reconfigure_policy(&self) -> ReconfigurePolicy {
        self.reconfigure
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn action_mut(&mut self) -> &mut A {
        &mut self.action
    }

    /// Tear down, handing back the trigger action
    pub fn into_action(self) -> A {
        self.action
    }
}
