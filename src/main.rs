use anyhow::{Context, Result};
use clap::Parser;
use morsegate::cli::{Cli, OutputFormat};
use morsegate::config::GateConfig;
use morsegate::json_output::JsonOutput;
use morsegate::replay::{self, LogEntry, ReplayReport};
use morsegate::trigger::RelayPulse;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the config file (or defaults) and apply command-line overrides
fn load_config(args: &Cli) -> Result<GateConfig> {
    let mut config = match &args.config {
        Some(path) => GateConfig::from_toml(path)?,
        None => GateConfig::default(),
    };

    if let Some(sequence) = &args.sequence {
        config.sequence = sequence.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(hold_threshold_ms) = args.hold_threshold_ms {
        config.hold_threshold_ms = hold_threshold_ms;
    }
    if args.keep_history_on_reconfigure {
        config.clear_history_on_reconfigure = false;
    }
    if args.allow_empty_sequence {
        config.allow_empty_sequence = true;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    Ok(config)
}

/// Read the event log from a file, or stdin for `-`/no path
fn load_events(path: Option<&Path>) -> Result<Vec<LogEntry>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event log: {}", path.display()))?;
            replay::read_log(BufReader::new(file))
                .with_context(|| format!("Failed to read event log: {}", path.display()))
        }
        _ => replay::read_log(io::stdin().lock()).context("Failed to read event log from stdin"),
    }
}

/// Print replay results as text
fn print_text_report(report: &ReplayReport) {
    for tick in &report.triggers {
        println!("TRIGGER at {}", tick);
    }
    for tick in &report.opens {
        println!("OPEN at {}", tick);
    }
    println!(
        "{} presses, {} triggers, {} buffered (sequence: {:?})",
        report.presses.len(),
        report.trigger_count(),
        report.history_len,
        report.final_sequence
    );
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let entries = load_events(args.events.as_deref())?;

    let mut controller = config.build_controller(RelayPulse::default());
    let mut classifier = config.build_classifier();

    if args.show_pattern {
        println!(
            "Pattern: {} ({} presses, {}ms window)",
            controller.pattern(),
            controller.pattern().len(),
            config.timeout_ms
        );
    }

    let report = replay::replay(&mut controller, &mut classifier, &entries);

    match args.format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", JsonOutput::from_report(&report).to_json()?),
    }

    Ok(())
}
