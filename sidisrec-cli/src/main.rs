//!
//! Command-line driver for the SIDIS event reconstruction pipeline.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use clap::{Parser, Subcommand, ValueEnum};

use sidisrec_io::{load_calibration, MappedEventReader, RowWriter};
use sidisrec_recon::{EventProcessor, PidMatrix};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    SidisIo(#[from] sidisrec_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] sidisrec_core::Error),
}

impl CliError {
    /// Process exit code, stable for scripting: 2 for an unknown calorimeter
    /// layer, 3 for an unknown Cherenkov detector, 8 for bad calibration,
    /// 1 otherwise.
    fn exit_code(&self) -> u8 {
        let core = match self {
            Self::Core(err) | Self::SidisIo(sidisrec_io::Error::Core(err)) => err,
            _ => return 1,
        };
        match core {
            sidisrec_core::Error::UnknownCalorimeterLayer { .. } => 2,
            sidisrec_core::Error::UnknownCherenkovDetector { .. } => 3,
            sidisrec_core::Error::Calibration(_) => 8,
            _ => 1,
        }
    }
}

/// Output row format selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Comma-separated text with a header line
    Csv,
    /// Packed little-endian f64 rows
    Bin,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Bin => "bin",
        }
    }
}

/// SIDIS event reconstruction and classification.
#[derive(Parser)]
#[command(name = "sidisrec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct an event store into per-hypothesis row streams
    Process {
        /// Input event store (line-delimited JSON banks)
        input: PathBuf,

        /// Sampling-fraction calibration file for this run
        #[arg(short, long)]
        calibration: PathBuf,

        /// Run number stamped into every output row
        #[arg(short, long)]
        run: u32,

        /// Beam energy in GeV
        #[arg(short, long)]
        beam_energy: f64,

        /// Stop after this many events
        #[arg(short = 'n', long)]
        max_events: Option<usize>,

        /// Directory for the two output streams
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Output row format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Process events across threads
        #[arg(short, long)]
        parallel: bool,

        /// Tally and print the pid hint-versus-assignment matrix
        #[arg(short, long)]
        debug: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about an event store
    Info {
        /// Input event store
        input: PathBuf,
    },
}

fn stream_path(dir: &Path, input: &Path, stream: &str, format: Format) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("events");
    dir.join(format!("{}_{}.{}", stem, stream, format.extension()))
}

fn write_rows(path: &Path, rows: &[sidisrec_core::SidisRow], format: Format) -> Result<()> {
    let mut writer = RowWriter::create(path)?;
    match format {
        Format::Csv => writer.write_csv(rows)?,
        Format::Bin => writer.write_binary(rows)?,
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn process(
    input: &Path,
    calibration: &Path,
    run: u32,
    beam_energy: f64,
    max_events: Option<usize>,
    output_dir: &Path,
    format: Format,
    parallel: bool,
    debug: bool,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("Reading: {}", input.display());
        eprintln!("Calibration: {}", calibration.display());
        eprintln!("Run {} at {} GeV", run, beam_energy);
    }

    let start = Instant::now();
    let table = load_calibration(calibration)?;
    let reader = MappedEventReader::open(input)?;
    let events = reader.read_all()?;
    if verbose {
        eprintln!("{} events loaded", events.len());
    }

    let processor = EventProcessor::new(run, beam_energy, table);
    let mut qa = PidMatrix::default();
    // The QA tally needs deterministic sequential order.
    let rows = if parallel && !debug {
        processor.process_events_par(&events, max_events)?
    } else {
        let tally = debug.then_some(&mut qa);
        processor.process_events(&events, max_events, tally)?
    };

    let central_path = stream_path(output_dir, input, "central", format);
    let forward_path = stream_path(output_dir, input, "forward", format);
    write_rows(&central_path, &rows.central, format)?;
    write_rows(&forward_path, &rows.forward, format)?;

    let elapsed = start.elapsed();
    println!(
        "Processed {} events in {:.2}s",
        max_events.map_or(events.len(), |n| n.min(events.len())),
        elapsed.as_secs_f64()
    );
    println!("Central rows: {} -> {}", rows.central.len(), central_path.display());
    println!("Forward rows: {} -> {}", rows.forward.len(), forward_path.display());

    if debug {
        println!("\nClassification summary ({} tracks tallied):", qa.total());
        println!("{}", qa.render());
    }
    Ok(())
}

fn info(input: &Path) -> Result<()> {
    let reader = MappedEventReader::open(input)?;
    println!("File: {}", input.display());
    println!(
        "Size: {} bytes ({:.2} MB)",
        reader.len(),
        reader.len() as f64 / 1_000_000.0
    );
    println!("Events: {}", reader.event_count());

    let mut particles = 0usize;
    let mut tracks = 0usize;
    let mut with_banks = 0usize;
    for event in reader.events() {
        let event = event?;
        particles += event.particles.len();
        tracks += event.tracks.len();
        if !event.missing_banks() {
            with_banks += 1;
        }
    }
    println!("Events with banks: {}", with_banks);
    println!("Particles: {}", particles);
    println!("Tracks: {}", tracks);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            input,
            calibration,
            run,
            beam_energy,
            max_events,
            output_dir,
            format,
            parallel,
            debug,
            verbose,
        } => process(
            &input,
            &calibration,
            run,
            beam_energy,
            max_events,
            &output_dir,
            format,
            parallel,
            debug,
            verbose,
        ),
        Commands::Info { input } => info(&input),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
