//! Command line entry point.

use std::io::{self, BufWriter};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use competitor_sqlgen::logger::setup_logger;
use competitor_sqlgen::{
    DEFAULT_BATCH_SIZE, Generator, GeneratorConfig, MetricsMode, SnapshotDate, Target,
};
use tracing::error;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "competitor-sqlgen",
    version,
    about = "Generate upsert SQL for the jewellery competitor knowledge base"
)]
struct Cli {
    /// The knowledge base CSV export.
    #[clap(long, short, global = true, env = "COMPETITOR_KB_CSV")]
    input: Option<PathBuf>,

    /// Log debug output to stderr.
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert every competitor as one VALUES list.
    ///
    /// Example:
    /// `competitor-sqlgen -i kb.csv competitors --limit 100`
    Competitors {
        /// optional - Insert only the first N competitors; totals still count every row.
        #[clap(long)]
        limit: Option<usize>,
    },
    /// Upsert review metrics per competitor, in UNION ALL batches.
    Metrics {
        /// `deduplicated` keeps the last row per competitor, `per-row` keeps every row.
        #[clap(long, default_value_t = MetricsMode::Deduplicated)]
        mode: MetricsMode,

        /// Selects per statement.
        #[clap(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: NonZeroUsize,

        /// optional - Record snapshots under this date instead of CURRENT_DATE.
        #[clap(long)]
        snapshot_date: Option<NaiveDate>,
    },
    /// Insert competitor locations, in UNION ALL batches.
    Locations {
        /// Selects per statement.
        #[clap(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: NonZeroUsize,
    },
}

impl Cli {
    fn into_parts(self) -> Result<(Target, GeneratorConfig), String> {
        let input = self
            .input
            .ok_or_else(|| "No input given: pass --input or set COMPETITOR_KB_CSV".to_owned())?;
        let base = GeneratorConfig::new(input);
        Ok(match self.command {
            Commands::Competitors { limit } => (Target::Competitors, base.competitor_limit(limit)),
            Commands::Metrics {
                mode,
                batch_size,
                snapshot_date,
            } => {
                let snapshot_date =
                    snapshot_date.map_or(SnapshotDate::CurrentDate, SnapshotDate::Fixed);
                let config = base
                    .metrics_mode(mode)
                    .batch_size(batch_size)
                    .snapshot_date(snapshot_date);
                (Target::Metrics, config)
            }
            Commands::Locations { batch_size } => (Target::Locations, base.batch_size(batch_size)),
        })
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit like every other failure; help and version succeed.
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };
    setup_logger(if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    });

    let (target, config) = match cli.into_parts() {
        Ok(parts) => parts,
        Err(message) => {
            error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut out = BufWriter::new(io::stdout().lock());
    match Generator::new(&config).run(target, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
