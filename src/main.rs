// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::{CheckProvider, Config, Language};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod document;
mod errors;
mod pipeline;
mod providers;
mod report;

/// CLI Wrapper for CheckProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliCheckProvider {
    OpenAI,
    Gemini,
}

impl From<CliCheckProvider> for CheckProvider {
    fn from(cli_provider: CliCheckProvider) -> Self {
        match cli_provider {
            CliCheckProvider::OpenAI => CheckProvider::OpenAI,
            CliCheckProvider::Gemini => CheckProvider::Gemini,
        }
    }
}

/// CLI Wrapper for Language to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLanguage {
    Chinese,
    English,
}

impl From<CliLanguage> for Language {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::Chinese => Language::Chinese,
            CliLanguage::English => Language::English,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// docproof - AI grammar checking for documents
///
/// Reads a paragraph-structured document, reviews each paragraph with a
/// remote AI provider (grammar plus optional user-defined checks), and
/// writes the results as a CSV report, one row per paragraph.
#[derive(Parser, Debug)]
#[command(name = "docproof")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered document grammar checking")]
#[command(long_about = "docproof reads a text document, sends each paragraph to an AI provider \
for grammar review plus optional supplementary checks, and writes a CSV report.

EXAMPLES:
    docproof thesis.txt                              # Check using default config
    docproof -p gemini -m gemini-pro thesis.txt      # Use a specific provider and model
    docproof -l english thesis.txt                   # English prompts and responses
    docproof -a 'check tone' -a 'check logic' thesis.txt
    docproof -o report.csv thesis.txt                # Custom output path

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

CREDENTIALS:
    API keys are read from the environment, never from the config file:
    OPENAI_API_KEY for the openai provider, GEMINI_API_KEY for gemini.")]
struct CommandLineOptions {
    /// Input document to check
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output CSV file path (defaults next to the input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Check provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliCheckProvider>,

    /// Model name to use for checking
    #[arg(short, long)]
    model: Option<String>,

    /// Target language for prompts and responses
    #[arg(short, long, value_enum)]
    language: Option<CliLanguage>,

    /// Supplementary check requirement (repeatable)
    #[arg(short = 'a', long = "additional-check")]
    additional_checks: Vec<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
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

    // @returns: ANSI color for log level
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
    // Initialize the logger once with info level by default;
    // the level is updated after the CLI and config are read
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        log::set_max_level(level.clone().into());
    }

    let config = load_config(&cli)?;
    if cli.log_level.is_none() {
        log::set_max_level(level_filter_from_config(&config.log_level));
    }
    let controller = Controller::with_config(config)
        .context("Invalid configuration")?;
    controller.run(&cli.input_path, cli.output.clone()).await
}

fn level_filter_from_config(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Load the configuration file, creating a default one when missing, and
/// apply CLI overrides on top
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = Path::new(&cli.config_path);
    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            cli.config_path
        );
        let config = Config::default();
        config.save_to_file(config_path).unwrap_or_else(|e| {
            warn!("Could not write default config: {}", e);
        });
        config
    };

    if let Some(provider) = &cli.provider {
        config.provider = provider.clone().into();
        // A provider switch without an explicit model falls back to that
        // provider's default model
        if cli.model.is_none() {
            config.model = config.provider.default_model();
        }
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(language) = &cli.language {
        config.language = language.clone().into();
    }
    if !cli.additional_checks.is_empty() {
        config.additional_checks = cli.additional_checks.clone();
    }

    config.validate()?;
    Ok(config)
}
