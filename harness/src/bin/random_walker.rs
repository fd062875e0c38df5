//! random_walker - search for ribbon bands by random walk
//!
//! Examples:
//!
//! ```text
//! random_walker --links K6a3 --verbose 2
//! random_walker --links K6a3 --max-bands 5 --max-size 20 --max-steps 100
//! random_walker --links K6a3 --use-checks
//! random_walker --links K6a3 --weights '[1,3,1,1,0]' --max-tries -1
//! random_walker --file links.txt --save-images --output-dir solved
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ribbon_harness::input::{read_link_file, LinkSpec};
use ribbon_harness::runner::{run, RunConfigV1};
use ribbon_search::oracle::ObstructionVerdictV1;
use ribbon_search::policy::WalkPolicyV1;
use ribbon_search::sampler::parse_weights;

/// Random-walk search for ribbon bands
#[derive(Parser, Debug)]
#[command(name = "random_walker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// File with one link per line (name, PD code, or braid word)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Links given by name, PD code, or braid word
    #[arg(long, num_args = 0..)]
    links: Vec<String>,

    /// Maximum number of bands (also bounds twists per band)
    #[arg(long, default_value_t = 5)]
    max_bands: usize,

    /// Crossing ceiling; defaults to one more than the largest input
    #[arg(long)]
    max_size: Option<usize>,

    /// Steps per attempt before resetting
    #[arg(long, default_value_t = 50)]
    max_steps: u64,

    /// Attempts per link; -1 tries forever
    #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
    max_tries: i64,

    /// Check slice obstructions on the solved link (single link only)
    #[arg(long)]
    use_checks: bool,

    /// Save solved diagrams
    #[arg(long)]
    save_images: bool,

    /// Directory for saved diagrams
    #[arg(long, default_value = "solved")]
    output_dir: PathBuf,

    /// Verbosity: 0 errors, 1 warnings, 2 progress, 3 every move
    #[arg(long, default_value_t = 1)]
    verbose: u8,

    /// Category weights [start, attach, over, under, twist]; all ones is uniform
    #[arg(long, default_value = "[1,17,1,1,3]")]
    weights: String,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write the walk report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

fn level(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(cli.verbose)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut specs = Vec::new();
    if let Some(path) = &cli.file {
        tracing::debug!(path = %path.display(), "reading links from file");
        specs.extend(read_link_file(path).context("failed to read link file")?);
    }
    for text in &cli.links {
        specs.push(LinkSpec::parse(text).with_context(|| format!("bad link {text}"))?);
    }
    if specs.is_empty() {
        bail!("no links given; use --links or --file");
    }

    let weights = parse_weights(&cli.weights).context("bad --weights")?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "rng seed");

    let config = RunConfigV1 {
        specs,
        policy: WalkPolicyV1 {
            max_bands: cli.max_bands,
            max_size: cli.max_size,
            max_steps: cli.max_steps,
            max_tries: cli.max_tries,
            single_link: false,
        },
        weights,
        seed,
        use_checks: cli.use_checks,
        save_solved: cli.save_images,
        output_dir: cli.output_dir,
    };
    let out = run(&config).context("random walk failed")?;

    if let Some(path) = &cli.report {
        let bytes = out
            .report
            .to_canonical_json_bytes()
            .context("failed to serialize report")?;
        std::fs::write(path, bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let report = &out.report;
    println!(
        "Succeeded {} times for: {:?}",
        report.success_count(),
        report.succeeded()
    );
    println!(
        "Failed    {} times for: {:?}",
        out.links.len() - report.success_count(),
        report.failed()
    );
    for outcome in report.links.iter().filter(|o| o.is_solved()) {
        println!("  {}: {}", outcome.name, outcome.band_string());
    }
    match out.obstruction {
        Some(ObstructionVerdictV1::Obstructed { determinant }) => {
            println!("Obstructed: determinant {determinant} is not a square");
        }
        Some(ObstructionVerdictV1::NoObstruction { determinant }) => match determinant {
            Some(d) => println!("No obstruction: determinant {d} is a square"),
            None => println!("No obstruction: determinant check applies to knots only"),
        },
        None => {}
    }
    Ok(())
}
