//! Event log replay
//!
//! Drives a [`SequenceController`] from a recorded log so a gate can be
//! exercised on a host machine. One entry per line, `<tick> <token>`:
//!
//! ```text
//! # knock knock
//! 0     -          classified long press
//! 300   .          classified short press
//! 900   long
//! 1500  down       raw edge, classified on the matching `up`
//! 1620  up
//! 2000  sequence -.-
//! 2000  timeout 5000
//! 2100  open       door-open command, fires the trigger directly
//! ```
//!
//! Anything after the token of a press or edge line is ignored, so lines can
//! carry trailing notes. Blank lines and `#` comments are skipped.

use crate::classify::{ButtonEdge, PressClassifier, PressCounters};
use crate::controller::{PressOutcome, SequenceController};
use crate::press::{PressEvent, PressKind, Tick};
use crate::trigger::TriggerAction;
use std::io::BufRead;
use std::time::Duration;
use thiserror::Error;

/// Errors while reading or parsing an event log
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a log line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogAction {
    /// Already classified press
    Press(PressKind),
    /// Raw button edge
    Edge(ButtonEdge),
    /// Replace the unlock sequence
    Sequence(String),
    /// Replace the window timeout
    Timeout(Duration),
    /// Fire the trigger without evaluating the sequence
    Open,
}

/// One parsed log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// 1-based line number in the source log
    pub line: usize,
    pub tick: Tick,
    pub action: LogAction,
}

/// Parse one line; `Ok(None)` for blank lines and comments
pub fn parse_line(text: &str) -> Result<Option<(Tick, LogAction)>, String> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let (tick_str, rest) = text
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("Expected '<tick> <event>', got '{}'", text))?;

    let tick: Tick = tick_str
        .parse()
        .map_err(|_| format!("Invalid tick '{}'", tick_str))?;

    let rest = rest.trim_start();
    let (token, argument) = match rest.split_once(char::is_whitespace) {
        Some((token, argument)) => (token, argument.trim()),
        None => (rest, ""),
    };

    let action = match token {
        "." | "short" => LogAction::Press(PressKind::Short),
        "-" | "long" => LogAction::Press(PressKind::Long),
        "down" => LogAction::Edge(ButtonEdge::Down),
        "up" => LogAction::Edge(ButtonEdge::Up),
        "open" => LogAction::Open,
        "sequence" => LogAction::Sequence(argument.to_string()),
        "timeout" => {
            let ms: u64 = argument
                .parse()
                .map_err(|_| format!("Invalid timeout '{}' (expected milliseconds)", argument))?;
            LogAction::Timeout(Duration::from_millis(ms))
        }
        other => return Err(format!("Unknown event '{}'", other)),
    };

    Ok(Some((tick, action)))
}

/// Parse a whole log held in memory
pub fn parse_log(text: &str) -> Result<Vec<LogEntry>, ReplayError> {
    let mut entries = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        push_parsed(&mut entries, idx + 1, line)?;
    }
    Ok(entries)
}

/// Parse a log from any buffered reader (file, stdin)
///
/// A line that is not valid UTF-8 is a parse error for that line, not an IO error.
pub fn read_log<R: BufRead>(reader: R) -> Result<Vec<LogEntry>, ReplayError> {
    let mut entries = Vec::new();
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let line = idx + 1;
        let text = String::from_utf8(raw?).map_err(|e| ReplayError::Parse {
            line,
            message: format!("Invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        })?;
        push_parsed(&mut entries, line, &text)?;
    }
    Ok(entries)
}

fn push_parsed(entries: &mut Vec<LogEntry>, line: usize, text: &str) -> Result<(), ReplayError> {
    match parse_line(text) {
        Ok(Some((tick, action))) => {
            entries.push(LogEntry { line, tick, action });
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(message) => Err(ReplayError::Parse { line, message }),
    }
}

/// One press as the controller saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressRecord {
    pub event: PressEvent,
    pub outcome: PressOutcome,
}

/// Summary of a replay
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplayReport {
    /// Every press fed to the controller, in order
    pub presses: Vec<PressRecord>,
    /// Ticks at which the trigger fired
    pub triggers: Vec<Tick>,
    /// Ticks of manual `open` entries
    pub opens: Vec<Tick>,
    /// Sequence configured when the log ended
    pub final_sequence: String,
    /// Normalized form of the final pattern
    pub final_pattern: String,
    /// Presses still buffered when the log ended
    pub history_len: usize,
    /// Classifier counters for raw edges
    pub counters: PressCounters,
}

impl ReplayReport {
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn disabled_presses(&self) -> usize {
        self.presses
            .iter()
            .filter(|p| p.outcome == PressOutcome::Disabled)
            .count()
    }
}

/// Feed parsed entries through a controller and classifier
pub fn replay<A: TriggerAction>(
    controller: &mut SequenceController<A>,
    classifier: &mut PressClassifier,
    entries: &[LogEntry],
) -> ReplayReport {
    let mut report = ReplayReport::default();

    for entry in entries {
        let event = match &entry.action {
            LogAction::Press(kind) => Some(PressEvent::new(entry.tick, kind.is_long())),
            LogAction::Edge(edge) => classifier.edge(*edge, entry.tick),
            LogAction::Sequence(text) => {
                controller.set_sequence(text);
                None
            }
            LogAction::Timeout(timeout) => {
                controller.set_timeout(*timeout);
                None
            }
            LogAction::Open => {
                controller.open();
                report.opens.push(entry.tick);
                None
            }
        };

        if let Some(event) = event {
            let outcome = controller.ingest(event);
            if outcome.is_triggered() {
                report.triggers.push(event.timestamp);
            }
            report.presses.push(PressRecord { event, outcome });
        }
    }

    report.final_sequence = controller.current_sequence().to_string();
    report.final_pattern = controller.pattern().to_string();
    report.history_len = controller.history().len();
    report.counters = classifier.counters();

    tracing::info!(
        "Replayed {} log entries: {} presses, {} triggers, {} manual opens",
        entries.len(),
        report.presses.len(),
        report.triggers.len(),
        report.opens.len()
    );

    report
}
