// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};

use parlance::app_config::{self, Config};
use parlance::providers::ProviderRegistry;
use parlance::translation::{BatchTranslator, PipelineController, SessionStore, TranslationRequest};

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

/// Options shared by the translating subcommands
#[derive(Args, Debug, Clone)]
struct PipelineArgs {
    /// Source language code (e.g., 'en', 'fr') or 'auto'
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'es', 'de')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Conversation session id; a fresh one is generated when omitted.
    /// Session memory lives in this process only and is not kept between runs
    #[arg(long, env = "PARLANCE_SESSION")]
    session: Option<String>,

    /// Translation provider type (e.g., 'libretranslate', 'mock')
    #[arg(short, long)]
    provider: Option<String>,

    /// Provider endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate one text and print the summary with its stage trace
    Translate {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Translate every non-empty line of a file within one session
    Batch {
        /// File with one text per line
        #[arg(value_name = "FILE")]
        input_path: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Generate shell completions for parlance
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Parlance - conversational translation pipeline
///
/// Routes text through classification, context resolution, translation and
/// quality assessment, keeping per-session memory for consistent phrasing.
#[derive(Parser, Debug)]
#[command(name = "parlance")]
#[command(version)]
#[command(about = "Conversational translation pipeline")]
#[command(long_about = "Parlance translates text through a staged pipeline with quality checks and conversation memory.

EXAMPLES:
    parlance translate \"Hello, how are you today?\"        # Translate to the configured target
    parlance translate -t de \"Good morning\"              # Translate to German
    parlance translate --session chat-1 \"See you soon\"   # Tag the run with a session id
    parlance batch -t fr lines.txt                       # Translate a file line by line
    parlance completions bash > parlance.bash            # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SESSIONS:
    Conversation memory is held in memory for a single invocation. A batch run
    shares one session across all of its lines; separate invocations start empty.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
        // The active level is narrowed later through log::set_max_level
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install the logger at the most verbose level; the effective level is
    // applied once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "parlance", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate { text, pipeline } => run_translate(text, pipeline).await,
        Commands::Batch { input_path, pipeline } => run_batch(&input_path, pipeline).await,
    }
}

// Load the config and apply command line overrides
fn load_config(options: &PipelineArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(provider) = &options.provider {
        config.provider.provider_type = provider.clone();
    }
    if let Some(endpoint) = &options.endpoint {
        config.provider.endpoint = endpoint.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

fn session_id(options: &PipelineArgs) -> String {
    options
        .session
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn build_controller(config: &Config) -> Result<PipelineController> {
    let registry = ProviderRegistry::with_defaults();
    PipelineController::from_config(config, &registry)
        .with_context(|| format!("Failed to set up provider '{}'", config.provider.provider_type))
}

async fn run_translate(text: String, options: PipelineArgs) -> Result<()> {
    let config = load_config(&options)?;
    let controller = build_controller(&config)?;
    let session = session_id(&options);
    let store = SessionStore::new();

    debug!("Translating in session {}", session);
    let request = TranslationRequest::new(text, session)
        .with_source_language(config.source_language.clone())
        .with_target_language(config.target_language.clone());

    let outcome = controller.run(request, &store).await?;
    info!("Translation {} with quality {:.2}", outcome.summary.status, outcome.summary.quality_score);

    let output = json!({
        "summary": outcome.summary,
        "trace": outcome.trace,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

async fn run_batch(input_path: &Path, options: PipelineArgs) -> Result<()> {
    let config = load_config(&options)?;
    let controller = build_controller(&config)?;
    let session = session_id(&options);

    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read input file: {}", input_path.display()))?;
    let texts: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if texts.is_empty() {
        return Err(anyhow!("No text found in {}", input_path.display()));
    }

    info!("Translating {} lines from {}", texts.len(), input_path.display());

    let progress_bar = ProgressBar::new(texts.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} texts ({percent}%) {msg} {eta}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▓▒░"));

    let batch = BatchTranslator::from_settings(controller, SessionStore::new(), &config.pipeline);
    let bar = progress_bar.clone();
    let results = batch
        .translate_texts(
            &texts,
            &config.source_language,
            &config.target_language,
            &session,
            move |done, _total| bar.set_position(done as u64),
        )
        .await?;
    progress_bar.finish_with_message("done");

    let output: Vec<serde_json::Value> = texts
        .iter()
        .zip(results)
        .map(|(text, result)| match result {
            Ok(outcome) => json!({ "source": text, "summary": outcome.summary }),
            Err(e) => json!({ "source": text, "error": e.to_string() }),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
