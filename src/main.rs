// LogAnalyzer - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Settings loading (config.toml) and logging initialisation
// 3. Task list loading, concurrent analysis, summary and JSON export

use clap::{Args, Parser, Subcommand};
use loganalyzer::app::engine::{Concurrency, Engine, EngineConfig};
use loganalyzer::core::analysis::{RandomDelay, SimulatedAnalysis};
use loganalyzer::core::{export, report};
use loganalyzer::platform::config::{self, PlatformPaths, Settings};
use loganalyzer::platform::tasks;
use loganalyzer::util::constants::{self, ABSOLUTE_MAX_CHANNEL_CAPACITY};
use loganalyzer::util::error::{LogAnalyzerError, Result};
use loganalyzer::util::logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// LogAnalyzer - analyse many log files concurrently.
///
/// Reads a JSON list of log files, checks and analyses each one in
/// parallel, and reports a per-file result.
#[derive(Parser, Debug)]
#[command(name = "loganalyzer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file to use instead of the platform default config.toml.
    #[arg(short = 's', long = "settings", global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse the log files listed in a JSON task list.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to the JSON task list.
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// Path to the JSON report file (parent directories are created).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Maximum worker threads (0 = one per task).
    #[arg(short = 'w', long = "workers")]
    workers: Option<usize>,

    /// Result channel capacity (0 = synchronous handoff).
    #[arg(long = "channel-capacity")]
    channel_capacity: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Settings come first: they may carry the log level.
    let loaded = match &cli.settings {
        Some(path) => config::read_settings(path).map_err(LogAnalyzerError::from),
        None => Ok(config::load_settings(
            &PlatformPaths::resolve().settings_file(),
        )),
    };

    let (settings, warnings) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            logging::init(cli.debug, None);
            tracing::error!(error = %e, "Failed to load settings");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(cli.debug, settings.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "LogAnalyzer starting"
    );
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Settings warning");
    }

    let result = match cli.command {
        Command::Analyze(args) => run_analyze(args, &settings),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Analysis aborted");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load tasks, run them all, print the summary, and optionally export.
///
/// Failed tasks are part of a normal run and do not make this return `Err`.
fn run_analyze(args: AnalyzeArgs, settings: &Settings) -> Result<()> {
    println!("Loading configuration from: {}", args.config.display());
    let tasks = tasks::load_tasks(&args.config)?;
    println!("Found {} log(s) to analyze", tasks.len());

    let mut channel_capacity = args.channel_capacity.unwrap_or(settings.channel_capacity);
    if channel_capacity > ABSOLUTE_MAX_CHANNEL_CAPACITY {
        tracing::warn!(
            requested = channel_capacity,
            max = ABSOLUTE_MAX_CHANNEL_CAPACITY,
            "Channel capacity too large; clamping"
        );
        channel_capacity = ABSOLUTE_MAX_CHANNEL_CAPACITY;
    }

    let engine_config = EngineConfig {
        channel_capacity,
        concurrency: Concurrency::from_max_workers(args.workers.unwrap_or(settings.max_workers)),
    };
    let engine = Engine::new(engine_config).with_analysis(SimulatedAnalysis::new(
        RandomDelay::from_millis(settings.min_delay_ms, settings.max_delay_ms),
    ));

    println!("Starting concurrent log analysis...");
    let outcomes = engine.run(&tasks);

    report::write_summary(&outcomes, std::io::stdout().lock()).map_err(|source| {
        LogAnalyzerError::Io {
            operation: "writing summary",
            source,
        }
    })?;

    if let Some(output) = args.output {
        println!("\nExporting results to: {}", output.display());
        export::export_json_file(&outcomes, &output)?;
        println!("Results exported successfully!");
    }

    Ok(())
}
