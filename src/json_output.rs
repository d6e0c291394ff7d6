//! JSON output format for replay reports
//!
//! `--format json` implementation

use crate::classify::PressCounters;
use crate::controller::PressOutcome;
use crate::press::{PressKind, Tick};
use crate::replay::ReplayReport;
use serde::{Deserialize, Serialize};

/// A single press fed to the controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPress {
    pub tick: Tick,
    pub kind: PressKind,
    pub outcome: PressOutcome,
}

/// Summary of the replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub total_presses: usize,
    pub total_triggers: usize,
    /// Presses ignored because the pattern was empty
    pub disabled_presses: usize,
    /// Sequence string configured at the end, as given
    pub final_sequence: String,
    /// Parsed pattern at the end, as `-`/`.`
    pub final_pattern: String,
    /// Presses still buffered at the end
    pub history_len: usize,
}

/// Complete JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub presses: Vec<JsonPress>,
    /// Ticks at which the unlock trigger fired
    pub triggers: Vec<Tick>,
    /// Ticks of manual door-open commands
    pub opens: Vec<Tick>,
    pub summary: JsonSummary,
    /// Classifier counters, present only when raw edges were replayed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counters: Option<PressCounters>,
}

impl JsonOutput {
    /// Build the JSON structure from a replay report
    pub fn from_report(report: &ReplayReport) -> Self {
        let presses = report
            .presses
            .iter()
            .map(|p| JsonPress {
                tick: p.event.timestamp,
                kind: p.event.kind(),
                outcome: p.outcome,
            })
            .collect();

        let counters = if report.counters == PressCounters::default() {
            None
        } else {
            Some(report.counters)
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "morsegate-json-v1".to_string(),
            presses,
            triggers: report.triggers.clone(),
            opens: report.opens.clone(),
            summary: JsonSummary {
                total_presses: report.presses.len(),
                total_triggers: report.trigger_count(),
                disabled_presses: report.disabled_presses(),
                final_sequence: report.final_sequence.clone(),
                final_pattern: report.final_pattern.clone(),
                history_len: report.history_len,
            },
            counters,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
