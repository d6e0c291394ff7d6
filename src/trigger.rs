//! Outbound unlock signal
//!
//! The controller raises a single no-argument signal on a match. How it is
//! delivered (relay pulse, status publish, test counter) is up to the
//! [`TriggerAction`] implementation.

use std::time::Duration;

/// Relay pulse length when opening the door
pub const DEFAULT_RELAY_PULSE: Duration = Duration::from_millis(1000);

/// LED pulse length acknowledging an unlock
pub const DEFAULT_LED_PULSE: Duration = Duration::from_millis(750);

/// Receiver of the unlock signal
pub trait TriggerAction {
    /// Called once per successful match
    fn trigger(&mut self);
}

impl<F: FnMut()> TriggerAction for F {
    fn trigger(&mut self) {
        self()
    }
}

/// Counts triggers without side effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingTrigger {
    count: u64,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl TriggerAction for RecordingTrigger {
    fn trigger(&mut self) {
        self.count += 1;
    }
}

/// Door relay driven by a timed pulse
///
/// No hardware is attached on a host build; each pulse is logged and counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPulse {
    relay_pulse: Duration,
    led_pulse: Duration,
    pulses: u64,
}

impl RelayPulse {
    pub fn new(relay_pulse: Duration, led_pulse: Duration) -> Self {
        Self {
            relay_pulse,
            led_pulse,
            pulses: 0,
        }
    }

    pub fn relay_pulse(&self) -> Duration {
        self.relay_pulse
    }

    pub fn led_pulse(&self) -> Duration {
        self.led_pulse
    }

    /// Number of pulses issued so far
    pub fn pulses(&self) -> u64 {
        self.pulses
    }
}

impl Default for RelayPulse {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_PULSE, DEFAULT_LED_PULSE)
    }
}

impl TriggerAction for RelayPulse {
    fn trigger(&mut self) {
        self.pulses += 1;
        tracing::info!(
            "Pulsing LED for {}ms and relay for {}ms (pulse #{})",
            self.led_pulse.as_millis(),
            self.relay_pulse.as_millis(),
            self.pulses
        );
    }
}
