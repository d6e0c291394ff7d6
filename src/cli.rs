//! CLI argument parsing for morsegate

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for replay results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "morsegate")]
#[command(version)]
#[command(about = "Replay doorbell button presses through a Morse-style unlock gate", long_about = None)]
pub struct Cli {
    /// Event log to replay ('-' or omitted reads stdin)
    #[arg(value_name = "EVENTS")]
    pub events: Option<PathBuf>,

    /// Gate configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Unlock sequence, e.g. ".-." (overrides config)
    #[arg(short = 's', long = "sequence", value_name = "SEQ", allow_hyphen_values = true)]
    pub sequence: Option<String>,

    /// Sequence window in milliseconds (overrides config)
    #[arg(short = 't', long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Long-press threshold for raw down/up edges in milliseconds (overrides config)
    #[arg(long = "hold-threshold-ms", value_name = "MS")]
    pub hold_threshold_ms: Option<u64>,

    /// Keep buffered presses when the log changes the sequence
    #[arg(long = "keep-history-on-reconfigure")]
    pub keep_history_on_reconfigure: bool,

    /// Let an empty sequence match every press
    #[arg(long = "allow-empty-sequence")]
    pub allow_empty_sequence: bool,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print the parsed unlock pattern before replaying
    #[arg(long = "show-pattern")]
    pub show_pattern: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
