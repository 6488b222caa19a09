//! vsep - command-line boundary over the resolution-advisory engine.
//!
//! ```text
//! vsep decide --separation 601 --own-alt 1000 --own-rate 600 --other-alt 1000 --up-sep 10 --down-sep 5
//! vsep batch --input tracks.jsonl      # JSON lines in, JSON lines out
//! vsep sweep                           # boundary grid + invariant checks
//! vsep sample --seed 7 --count 100000  # random sweep
//! ```
//!
//! stdout carries results only; logs go to stderr (`RUST_LOG` filters them).

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vsep_core::sweep::{self, SweepReport, SweepSpace};
use vsep_core::{AdvisoryTally, Engine, EngineConfig, InhibitPolicy, TrackInput};

#[derive(Debug, Parser)]
#[command(
    name = "vsep",
    version,
    about = "Vertical-separation resolution-advisory engine"
)]
struct Cli {
    /// JSON engine configuration (envelope and inhibit policy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured inhibit policy: `degrade` or `issue-and-report`.
    #[arg(long, global = true)]
    inhibit_policy: Option<InhibitPolicy>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decide one track tuple given on the command line.
    Decide(DecideArgs),

    /// Decide JSON-lines track tuples from a file or stdin.
    Batch {
        /// Input file; stdin when omitted or `-`.
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Sweep the envelope boundary grid and check invariants.
    Sweep,

    /// Sweep seeded random tuples and check invariants.
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, default_value_t = 10_000)]
        count: usize,
    },
}

#[derive(Debug, Args)]
struct DecideArgs {
    #[arg(long = "separation", allow_hyphen_values = true)]
    current_vertical_separation: i32,

    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    high_confidence: i32,

    #[arg(long = "own-alt", allow_hyphen_values = true)]
    own_tracked_altitude: i32,

    #[arg(long = "own-rate", allow_hyphen_values = true)]
    own_tracked_altitude_rate: i32,

    #[arg(long = "other-alt", allow_hyphen_values = true)]
    other_tracked_altitude: i32,

    #[arg(long = "up-sep", allow_hyphen_values = true)]
    up_separation: i32,

    #[arg(long = "down-sep", allow_hyphen_values = true)]
    down_separation: i32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    climb_inhibit: i32,

    /// Print the full decision record as JSON.
    #[arg(long)]
    explain: bool,
}

impl From<&DecideArgs> for TrackInput {
    fn from(a: &DecideArgs) -> Self {
        TrackInput {
            current_vertical_separation: a.current_vertical_separation,
            high_confidence: a.high_confidence,
            own_tracked_altitude: a.own_tracked_altitude,
            own_tracked_altitude_rate: a.own_tracked_altitude_rate,
            other_tracked_altitude: a.other_tracked_altitude,
            up_separation: a.up_separation,
            down_separation: a.down_separation,
            climb_inhibit: a.climb_inhibit,
        }
    }
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(env_filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(env_filter)
            .init(),
    }
}

/// File config first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(policy) = cli.inhibit_policy {
        config.inhibit_policy = policy;
    }
    Ok(config)
}

/// Evaluate every non-blank line; one JSON record per line out.
fn run_batch<R: BufRead, W: Write>(
    engine: &Engine,
    reader: R,
    mut writer: W,
) -> Result<AdvisoryTally> {
    let mut tally = AdvisoryTally::default();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("reading line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let input: TrackInput = serde_json::from_str(&line)
            .with_context(|| format!("line {line_no}: invalid track tuple"))?;

        let record = engine.evaluate(&input);
        tally.record(&record);
        serde_json::to_writer(&mut writer, &record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(tally)
}

fn print_report(report: &SweepReport) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;

    if !report.is_clean() {
        bail!("{} invariant violation(s) found", report.violations.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = load_config(&cli)?;
    let engine = Engine::from_config(&config).context("building engine")?;
    tracing::debug!(policy = %engine.inhibit_policy(), "engine ready");

    match &cli.command {
        Command::Decide(args) => {
            let record = engine.evaluate(&TrackInput::from(args));
            if args.explain {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", record.advisory);
            }
        }
        Command::Batch { input } => {
            let stdout = io::stdout();
            let writer = BufWriter::new(stdout.lock());
            let tally = match input {
                Some(path) if path.as_os_str() != "-" => {
                    let file = File::open(path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    run_batch(&engine, BufReader::new(file), writer)?
                }
                _ => run_batch(&engine, io::stdin().lock(), writer)?,
            };
            tracing::info!(
                evaluated = tally.evaluated,
                upward = tally.upward,
                downward = tally.downward,
                unresolved = tally.unresolved,
                rejected = tally.rejected,
                "batch finished"
            );
        }
        Command::Sweep => {
            let space = SweepSpace::boundary(engine.envelope());
            tracing::info!(tuples = space.len(), "sweeping boundary grid");
            print_report(&sweep::run(&engine, space.iter()))?;
        }
        Command::Sample { seed, count } => {
            tracing::info!(seed, count, "sweeping random sample");
            let inputs = sweep::sample(*seed, *count, engine.envelope())
                .context("sampling track tuples")?;
            print_report(&sweep::run(&engine, inputs))?;
        }
    }
    Ok(())
}
