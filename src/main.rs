use std::path::PathBuf;

use anyhow::{Context, Result};
use bar_cutter::input::{self, Columns, DEFAULT_DEMAND_COLUMN, DEFAULT_LENGTH_COLUMN};
use bar_cutter::report::{self, Report};
use bar_cutter::solver::Solver;
use bar_cutter::types::CutJob;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bar_cutter",
    about = "1D cutting stock optimizer: cut demanded pieces from fixed-length bars"
)]
struct Cli {
    /// Raw bar length (required unless a JSON input provides it)
    #[arg(long)]
    raw_length: Option<u32>,

    /// Cut pieces as LEN or LEN:qty (e.g. 2800:1 1050:3)
    #[arg(long = "cuts", num_args = 1.., conflicts_with = "input", required_unless_present = "input")]
    cuts: Vec<String>,

    /// Read pieces from a CSV table or a JSON job file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// CSV column holding the piece lengths
    #[arg(long, default_value = DEFAULT_LENGTH_COLUMN)]
    length_column: String,

    /// CSV column holding the quantity of each length
    #[arg(long, default_value = DEFAULT_DEMAND_COLUMN)]
    demand_column: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Show an ASCII layout of each bar
    #[arg(long)]
    layout: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Parses `LEN` or `LEN:qty`; a missing quantity is `None`.
fn parse_cut(s: &str) -> Result<(u32, Option<u32>), String> {
    let (len, qty) = match s.split_once(':') {
        Some((len, qty)) => (len, Some(qty)),
        None => (s, None),
    };
    let length = len
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid length in '{}'", s))?;
    if length == 0 {
        return Err(format!("length must be non-zero in '{}'", s));
    }
    let qty = qty
        .map(|q| {
            q.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid quantity in '{}'", s))
        })
        .transpose()?;
    Ok((length, qty))
}

fn job_from_cuts(raw_length: u32, cuts: &[String]) -> Result<CutJob> {
    let parsed = cuts
        .iter()
        .map(|c| parse_cut(c))
        .collect::<Result<Vec<_>, _>>()
        .map_err(anyhow::Error::msg)?;

    let piece_lengths = parsed.iter().map(|&(l, _)| l).collect();
    // Without any quantity the solver assumes one of each
    let demand = parsed
        .iter()
        .any(|(_, q)| q.is_some())
        .then(|| parsed.iter().map(|(_, q)| q.unwrap_or(1)).collect());
    Ok(CutJob::new(raw_length, piece_lengths, demand))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let job = match &cli.input {
        Some(path) => {
            let columns = Columns::new(&cli.length_column, &cli.demand_column);
            tracing::info!("Reading: {}", path.display());
            input::load_job(path, cli.raw_length, &columns)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => {
            let raw_length = cli
                .raw_length
                .context("--raw-length is required with --cuts")?;
            job_from_cuts(raw_length, &cli.cuts)?
        }
    };

    let solution = Solver::new(job).solve().context("Failed to solve")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&Report::from(&solution))?);
    } else {
        print!("{}", report::render_text(&solution, cli.layout));
    }

    Ok(())
}
