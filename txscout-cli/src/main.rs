use clap::{Parser, Subcommand};
use colored::Colorize;
use std::{num::NonZeroUsize, path::PathBuf};
use tracing_subscriber::EnvFilter;
use txscout::{
    analysis::{MatchResult, PatternMatcher},
    config::{AnalysisConfig, CliOverrides},
    loader::load_text,
    results::AnalysisReport,
    AnalysisError, Verdict,
};

type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliAnalyzeConfig {
    /// Directory input file names are resolved against
    #[arg(short = 'd', long)]
    root: Option<PathBuf>,

    /// Transmission file (give exactly two)
    #[arg(short = 't', long = "transmission")]
    transmissions: Vec<PathBuf>,

    /// Reference code file (can be specified multiple times)
    #[arg(short = 'c', long = "code")]
    codes: Vec<PathBuf>,

    /// Flag codes whose encoded length exceeds this multiple of the expected length
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Configuration file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze two transmissions against a set of reference codes
    Analyze(Box<CliAnalyzeConfig>),

    /// Search one file for a single pattern
    Search {
        /// File to search in
        text: PathBuf,

        /// Pattern to search for
        pattern: String,

        /// Treat PATTERN as a path and search for that file's contents
        #[arg(short = 'f', long)]
        pattern_file: bool,

        /// Report every occurrence instead of only the first
        #[arg(short = 'a', long)]
        all: bool,

        /// Log level (trace, debug, info, warn, error)
        #[arg(long, default_value = "warn")]
        log_level: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Analyze(args) => {
            let args = *args;
            let overrides = CliOverrides {
                root_path: args.root,
                transmissions: args.transmissions,
                codes: args.codes,
                suspicion_threshold: args.threshold,
                thread_count: args.threads,
                log_level: args.log_level,
            };

            let config = AnalysisConfig::load_from(args.config.as_deref())?
                .merge_with_cli(overrides);
            init_logging(&config.log_level);
            tracing::debug!("Effective configuration: {:?}", config);
            config.validate()?;

            let report = txscout::analyze(&config)?;
            if args.json {
                println!("{}", report.to_json()?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Commands::Search {
            text,
            pattern,
            pattern_file,
            all,
            log_level,
        } => {
            init_logging(&log_level);
            tracing::debug!("Searching {} (all: {})", text.display(), all);

            let haystack = load_text(&text)?;
            let pattern = if pattern_file {
                load_text(&PathBuf::from(pattern))?
            } else {
                pattern.into_bytes()
            };

            let matcher = PatternMatcher::new(pattern);
            if all {
                let positions = matcher.find_all(&haystack);
                if positions.is_empty() {
                    println!("{}", "not-found".red());
                }
                for pos in positions {
                    print_match(MatchResult::Found(pos));
                }
            } else {
                print_match(matcher.find(&haystack));
            }
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins over the level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_match(result: MatchResult) {
    match result {
        MatchResult::Found(pos) => println!("{} {}", "found".green(), pos),
        MatchResult::NotFound => println!("{}", "not-found".red()),
    }
}

fn print_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Suspicious { .. } => println!("{}", verdict.to_string().red()),
        Verdict::NotSuspicious { .. } => println!("{}", verdict.to_string().green()),
        _ => println!("{}", verdict.to_string().yellow()),
    }
}

fn print_report(report: &AnalysisReport) {
    for transmission in &report.transmissions {
        for result in &transmission.matches {
            print_match(*result);
        }
    }

    for transmission in &report.transmissions {
        println!("{}", transmission.palindrome);
    }

    println!("{}", report.common_substring);

    for transmission in &report.transmissions {
        for verdict in &transmission.verdicts {
            print_verdict(verdict);
        }
    }
}
