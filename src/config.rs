//! Gate configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file)
//! yields the factory configuration: sequence ".-.", 30s window, 500ms hold.

use crate::classify::{PressClassifier, DEFAULT_HOLD_THRESHOLD};
use crate::controller::{EmptyPatternPolicy, ReconfigurePolicy, SequenceController};
use crate::trigger::TriggerAction;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Factory unlock sequence
pub const DEFAULT_SEQUENCE: &str = ".-.";

/// Factory window for a whole sequence, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30 * 1000;

/// Unlock gate configuration
///
/// # Example TOML
/// ```toml
/// sequence = "-.-"
/// timeout_ms = 2000
/// hold_threshold_ms = 500
/// clear_history_on_reconfigure = true
/// allow_empty_sequence = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Unlock sequence; `.` short, `-` long, other characters ignored
    pub sequence: String,

    /// Maximum span from the first to the last press of a sequence
    pub timeout_ms: u64,

    /// Presses held at least this long count as long
    pub hold_threshold_ms: u64,

    /// Drop buffered presses when the sequence changes
    ///
    /// Default: true. Set to false to let presses collected against the old
    /// sequence count toward the new one.
    pub clear_history_on_reconfigure: bool,

    /// Let an empty sequence match every press
    ///
    /// Default: false, so an empty sequence disables the gate.
    pub allow_empty_sequence: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            sequence: DEFAULT_SEQUENCE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            hold_threshold_ms: DEFAULT_HOLD_THRESHOLD.as_millis() as u64,
            clear_history_on_reconfigure: true,
            allow_empty_sequence: false,
        }
    }
}

impl GateConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file can't be read, isn't valid TOML, or fails
    /// [`GateConfig::validate`].
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read gate config: {}", path.as_ref().display())
        })?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid gate config: {}", path.as_ref().display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GateConfig =
            toml::from_str(content).context("Failed to parse TOML gate configuration")?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize gate configuration")
    }

    /// Write configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        fs::write(path.as_ref(), content).with_context(|| {
            format!("Failed to write gate config: {}", path.as_ref().display())
        })
    }

    /// Validate configuration
    ///
    /// A zero `timeout_ms` is allowed: only presses sharing the first press's
    /// tick fit the window, the same as [`SequenceController::set_timeout`].
    pub fn validate(&self) -> Result<(), String> {
        if self.hold_threshold_ms == 0 {
            return Err("hold_threshold_ms must be > 0".to_string());
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    pub fn empty_pattern_policy(&self) -> EmptyPatternPolicy {
        if self.allow_empty_sequence {
            EmptyPatternPolicy::AlwaysMatch
        } else {
            EmptyPatternPolicy::Disabled
        }
    }

    pub fn reconfigure_policy(&self) -> ReconfigurePolicy {
        if self.clear_history_on_reconfigure {
            ReconfigurePolicy::ClearHistory
        } else {
            ReconfigurePolicy::KeepHistory
        }
    }

    /// Build a controller wired to `action`
    pub fn build_controller<A: TriggerAction>(&self, action: A) -> SequenceController<A> {
        SequenceController::new(&self.sequence, self.timeout(), action)
            .with_empty_pattern_policy(self.empty_pattern_policy())
            .with_reconfigure_policy(self.reconfigure_policy())
    }

    pub fn build_classifier(&self) -> PressClassifier {
        PressClassifier::new(self.hold_threshold())
    }
}
