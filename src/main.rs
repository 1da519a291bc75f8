//! `nearby` command line tool
//!
//! Reads a dataset from a file or stdin and writes one answer line per query
//! to stdout. Diagnostics go to stderr.
//!
//! ```bash
//! nearby < input.txt
//! nearby input.txt --parallel --max-candidate-topics 5000 -vv
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use nearby::{DEFAULT_MAX_CANDIDATE_TOPICS, EngineConfig};

#[derive(Parser, Debug)]
#[command(name = "nearby", version, about = "Nearest topic and question queries")]
struct Cli {
    /// Input dataset. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Proximity-ranked topics considered by question queries.
    #[arg(long, default_value_t = DEFAULT_MAX_CANDIDATE_TOPICS)]
    max_candidate_topics: usize,

    /// Evaluate queries in parallel.
    #[arg(long)]
    parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = EngineConfig::default()
        .with_max_candidate_topics(cli.max_candidate_topics)
        .with_parallel(cli.parallel);

    let input = open_input(cli.input.as_ref())?;
    let mut out = BufWriter::new(io::stdout().lock());

    let start = Instant::now();
    let answered = nearby::run(input, &mut out, config).context("answering queries")?;
    tracing::info!(
        queries = answered,
        parallel = config.parallel,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "done"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("nearby: {err:#}");
        process::exit(1);
    }
}
