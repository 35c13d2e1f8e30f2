// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod batch;
mod cancellation;
mod errors;
mod file_utils;
mod subtitle_renderer;
mod transcript;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert whisper transcription JSON files to SRT subtitles (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for whisub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Directory to scan for transcript .json files
    #[arg(value_name = "INPUT_DIR", default_value = ".")]
    input_dir: PathBuf,

    /// Maximum number of files converted concurrently (default: CPU count)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// whisub - whisper transcription to SRT subtitles
///
/// Converts whisper-cli JSON transcripts into SRT subtitle files with
/// word-level caption timing, processing every .json file in a directory.
#[derive(Parser, Debug)]
#[command(name = "whisub")]
#[command(version = "0.1.0")]
#[command(about = "Convert whisper transcription JSON to SRT subtitles")]
#[command(long_about = "whisub scans a directory for whisper-cli JSON transcripts and converts each
one to an SRT subtitle file next to it, using word-level token timing where
available and segment timing otherwise.

EXAMPLES:
    whisub                          # Convert every .json in the current directory
    whisub /recordings              # Convert every .json in /recordings
    whisub -j 2 /recordings         # Limit to 2 concurrent conversions
    whisub --log-level debug        # Verbose per-file logging
    whisub completions bash         # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory to scan for transcript .json files
    #[arg(value_name = "INPUT_DIR", default_value = ".")]
    input_dir: PathBuf,

    /// Maximum number of files converted concurrently (default: CPU count)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll raise or lower it once arguments are parsed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "whisub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let convert_args = ConvertArgs {
                input_dir: cli.input_dir,
                jobs: cli.jobs,
                log_level: cli.log_level,
            };
            run_convert(convert_args).await
        }
    }
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    let config = Config {
        log_level: options
            .log_level
            .map(Into::into)
            .unwrap_or_default(),
        max_concurrent_tasks: options.jobs,
    };

    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::with_config(config)?;
    controller.run(options.input_dir).await?;

    Ok(())
}
