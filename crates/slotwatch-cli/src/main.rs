//! `slotwatch` CLI — track recurring weekly slots against booking snapshots.
//!
//! ## Usage
//!
//! ```sh
//! # Show the occurrences currently in the planning window
//! slotwatch plan -c schedule.json
//!
//! # Run one reconciliation cycle against a snapshot and print the changes
//! slotwatch check -c schedule.json -d snapshot.json
//!
//! # Same, as JSON lines, with a fixed clock
//! slotwatch check -c schedule.json -d snapshot.json --now 2024-01-01T08:00 --json
//!
//! # Poll the snapshot every 30 seconds
//! slotwatch watch -c schedule.json -d snapshot.json --interval 30
//! ```
//!
//! Logs go to stderr; `RUST_LOG` sets the level (default: info).

mod snapshot;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use slot_engine::{run_cycle, ChangeSink, ScheduleConfig, ScheduleWindow, StateChange, WeeklyTemplate};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::snapshot::{Snapshot, SnapshotSource};

#[derive(Parser)]
#[command(
    name = "slotwatch",
    version,
    about = "Watch recurring reservation slots for state changes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the occurrences in the planning window
    Plan {
        /// Schedule configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,
        /// Clock override, YYYY-MM-DDTHH:MM[:SS] (defaults to local time)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },
    /// Run one reconciliation cycle and print state changes
    Check {
        /// Schedule configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,
        /// Booking snapshot (JSON)
        #[arg(short, long)]
        data: PathBuf,
        /// Clock override, YYYY-MM-DDTHH:MM[:SS] (defaults to local time)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
        /// Print changes as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Poll the snapshot on a fixed interval and print state changes
    Watch {
        /// Schedule configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,
        /// Booking snapshot (JSON), re-read every cycle
        #[arg(short, long)]
        data: PathBuf,
        /// Seconds between cycles
        #[arg(long, default_value_t = 30)]
        interval: u64,
        /// Stop after this many cycles (runs forever if omitted)
        #[arg(long)]
        cycles: Option<u64>,
        /// Print changes as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Plan { config, now } => {
            let now = now.unwrap_or_else(local_now);
            let mut window = load_window(&config)?;
            window.advance(now);
            for occ in window.occurrences() {
                println!(
                    "{}  {}  {}",
                    occ.datetime().format("%a %Y-%m-%d %H:%M"),
                    occ.area().unwrap_or("-"),
                    occ.state()
                );
            }
        }
        Commands::Check {
            config,
            data,
            now,
            json,
        } => {
            let now = now.unwrap_or_else(local_now);
            let mut window = load_window(&config)?;
            let mut source = Snapshot::load(&data)?;
            let mut sink = ConsoleSink { json };
            let report = run_cycle(&mut window, &mut source, &mut sink, now);
            info!(
                checked = report.checked,
                skipped = report.skipped,
                changed = report.changed,
                "check finished"
            );
        }
        Commands::Watch {
            config,
            data,
            interval,
            cycles,
            json,
        } => {
            let mut window = load_window(&config)?;
            let mut source = SnapshotSource::new(data);
            let mut sink = ConsoleSink { json };
            let mut cycle = 0u64;
            loop {
                let report = run_cycle(&mut window, &mut source, &mut sink, local_now());
                cycle += 1;
                info!(cycle, changed = report.changed, skipped = report.skipped, "cycle done");
                if cycles.is_some_and(|limit| cycle >= limit) {
                    break;
                }
                thread::sleep(Duration::from_secs(interval));
            }
        }
    }

    Ok(())
}

/// Prints each transition to stdout.
struct ConsoleSink {
    json: bool,
}

impl ChangeSink for ConsoleSink {
    fn notify(&mut self, change: &StateChange) {
        if self.json {
            match serde_json::to_string(change) {
                Ok(line) => println!("{}", line),
                Err(err) => warn!(error = %err, "could not serialize change"),
            }
        } else {
            println!("{}", change);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn load_window(path: &Path) -> Result<ScheduleWindow> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = ScheduleConfig::from_json(&raw)
        .with_context(|| format!("Invalid schedule config: {}", path.display()))?;
    let template = WeeklyTemplate::load(&config)
        .with_context(|| format!("Invalid schedule config: {}", path.display()))?;
    info!(
        gym = config.gym.as_deref().unwrap_or("-"),
        entries = template.len(),
        days = config.days,
        "schedule loaded"
    );
    Ok(ScheduleWindow::new(template, config.days))
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse_now(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM[:SS]: {}", e))
}
