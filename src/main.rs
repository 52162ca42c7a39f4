use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use club_ranking::ranking::{self, RankingFilters};
use club_ranking::scoring;
use club_ranking::store::JsonFileStore;
use club_ranking::{output, RankingError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Show the stored snapshot of a past year instead of recomputing
    #[arg(long)]
    year: Option<i32>,

    /// Only teams from this region id
    #[arg(long)]
    region: Option<u64>,

    /// Maximum number of teams to show
    #[arg(long)]
    limit: Option<usize>,

    /// Number of teams to skip
    #[arg(long)]
    offset: Option<usize>,

    /// Print the per-year breakdown under each team
    #[arg(long)]
    details: bool,

    /// Tab-separated output for scripting
    #[arg(long, conflicts_with = "details")]
    tsv: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective scoring configuration as YAML
    Show,
    /// Validate and store a scoring configuration from a YAML file
    Set {
        file: PathBuf,
    },
    /// Remove the stored scoring configuration (built-in defaults apply)
    Reset,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the ranking (default if no subcommand)
    List(ListArgs),
    /// Recompute the current year's ranking and store its snapshot
    Recalculate,
    /// Summary statistics of the current ranking
    Stats {
        /// Number of top teams to include
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List years with a stored ranking snapshot
    History,
    /// Inspect or change the scoring configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Parser, Debug)]
#[command(name = "club-ranking")]
#[command(about = "Multi-year club ranking with temporal decay and regional coefficients", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to settings file (defaults to ~/.config/club-ranking/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the ranking data file
    #[arg(short, long, global = true)]
    data: Option<String>,

    /// Rank as of this year instead of the current calendar year
    #[arg(long, global = true)]
    year_now: Option<i32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match club_ranking::config::load_config(cli.config.map(PathBuf::from)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let data_path = settings.resolve_data_path(cli.data.map(PathBuf::from));
    let current_year = settings.resolve_current_year(cli.year_now);
    debug!("Data file {}, ranking year {}", data_path.display(), current_year);

    let mut store = match JsonFileStore::open(&data_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Data error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let command = cli.command.unwrap_or(Commands::List(ListArgs::default()));
    let code = match run(command, &mut store, current_year, settings.page_size) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    };

    std::process::exit(code);
}

fn report_error(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<RankingError>() {
        Some(RankingError::InvalidConfiguration(errors)) => {
            eprintln!("Scoring config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            EXIT_CONFIG
        }
        _ => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

fn run(
    command: Commands,
    store: &mut JsonFileStore,
    current_year: i32,
    page_size: Option<usize>,
) -> Result<()> {
    let use_colors = output::should_use_colors();

    match command {
        Commands::List(args) => {
            let filters = RankingFilters {
                year: args.year,
                region_id: args.region,
                limit: args.limit.or(page_size),
                offset: args.offset,
            };
            let entries = ranking::get_ranking(store, &filters, current_year)?;

            if args.tsv {
                println!("{}", output::format_tsv(&entries));
            } else if args.details && !entries.is_empty() {
                for entry in &entries {
                    println!("{}", output::format_entry_detail(entry, use_colors));
                    println!();
                }
            } else {
                println!("{}", output::format_ranking_table(&entries, use_colors));
            }
        }
        Commands::Recalculate => {
            let report = ranking::recalculate_ranking(store, current_year)?;
            println!(
                "Recalculated {} ranking: {} teams processed",
                report.year, report.teams_processed
            );
            if report.zero_filled > 0 {
                println!("  {} team-years could not be scored and count as 0", report.zero_filled);
            }
        }
        Commands::Stats { top, json } => {
            let stats = ranking::get_ranking_stats(store, current_year, top)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?
                );
            } else {
                println!("{}", output::format_stats(&stats, use_colors));
            }
        }
        Commands::History => {
            let years = ranking::snapshot_years(&*store)?;
            if years.is_empty() {
                println!("No ranking snapshots stored.");
            } else {
                for year in years {
                    println!("{}", year);
                }
            }
        }
        Commands::Config { action } => run_config(action, store)?,
    }

    Ok(())
}

fn run_config(action: ConfigAction, store: &mut JsonFileStore) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if scoring::stored_configuration(&*store)?.is_none() {
                eprintln!("# built-in defaults");
            }
            let config = scoring::get_configuration(&*store);
            let yaml = serde_saphyr::to_string(&config)
                .context("Failed to serialize scoring configuration")?;
            print!("{}", yaml);
        }
        ConfigAction::Set { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let config: scoring::ScoringConfiguration = serde_saphyr::from_str(&content)
                .with_context(|| format!("Failed to parse scoring configuration in {}", file.display()))?;
            scoring::save_configuration(store, &config)?;
            println!("Scoring configuration stored in {}", store.path().display());
        }
        ConfigAction::Reset => {
            if scoring::reset_configuration(store)? {
                println!("Stored scoring configuration removed; built-in defaults apply.");
            } else {
                println!("No stored scoring configuration; built-in defaults already apply.");
            }
        }
    }
    Ok(())
}
