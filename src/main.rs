// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use sscout::app_config::{self, Config};
use sscout::app_controller::{Controller, ScanOptions, ScanReport};
use sscout::database::SessionStatus;
use sscout::file_utils::FileManager;
use sscout::language_utils::Language;
use sscout::session::{SessionInfo, SessionWordItem};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the most frequent unknown words of a file or directory
    Scan {
        /// Subtitle file, or directory searched for .ass/.srt files
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Style to read from .ass files
        #[arg(short, long)]
        style: Option<String>,

        /// Process as this language instead of detecting it (e.g. 'en', 'ja')
        #[arg(short, long)]
        language: Option<String>,

        /// Number of words to print
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Show the format and styles of a subtitle file
    Styles {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Store a subtitle file and open a review session
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Extract the unknown words of a session
    Process {
        /// Session id
        id: String,

        /// Style to read from .ass files
        #[arg(short, long)]
        style: Option<String>,
    },

    /// List the words of a session
    Words {
        /// Session id
        id: String,
    },

    /// Mark words of a session as already known
    Strike {
        /// Session id
        id: String,

        /// Words to strike
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Learn the struck words and print the remaining top words
    Finalize {
        /// Session id
        id: String,
    },

    /// List sessions, newest first
    Sessions {
        /// Only sessions in this status (uploaded, processed, finalized)
        #[arg(long)]
        status: Option<String>,
    },

    /// Add words to the known-word list used by `scan`
    Learn {
        /// Language of the words (e.g. 'en', 'ja')
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Words to add
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Generate shell completions for sscout
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// sscout - subtitle vocabulary scout
///
/// Finds the words of a subtitle file that you do not know yet, ranked by
/// how often they are spoken.
#[derive(Parser, Debug)]
#[command(name = "sscout")]
#[command(version)]
#[command(about = "Rank the unknown words of subtitle files")]
#[command(long_about = "sscout reads .ass and .srt subtitles and lists the words you do not know yet.

EXAMPLES:
    sscout scan episode.srt                     # Top unknown words of a file
    sscout scan -s Default show.ass             # Only dialogue of the 'Default' style
    sscout scan --top 50 ~/subs/                # Every subtitle file under a directory
    sscout styles show.ass                      # List the styles of a file
    sscout learn -l en hello world              # Mark words as known
    sscout upload show.ass                      # Start a review session
    sscout process <ID> -s Default              # Extract the session's unknown words
    sscout strike <ID> hello world              # Strike words you already know
    sscout finalize <ID>                        # Learn struck words, print top words
    sscout completions bash > sscout.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
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

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, color) = Self::decoration_for_level(record.level());

            // stdout is reserved for command output
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at trace so the level can be lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "sscout", &mut std::io::stdout());
        return Ok(());
    }

    // Apply the command line level right away so config loading is logged at it
    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    let mut config = Config::load_or_create(&cli.config)?;

    match cli.log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.into()),
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command, cli.json).await
}

async fn run_command(controller: &Controller, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Scan { path, style, language, top } => {
            let options = ScanOptions {
                style,
                language: parse_language(language.as_deref())?,
                top,
            };
            let reports = controller.scan(&path, &options).await?;
            if json {
                print_json(&reports)
            } else {
                reports.iter().for_each(print_scan_report);
                Ok(())
            }
        }
        Commands::Styles { file } => {
            let info = controller.styles(&file)?;
            if json {
                return print_json(&info);
            }
            println!("Format: {}", info.format);
            if info.styles.is_empty() {
                println!("No styles");
            }
            for style in &info.styles {
                println!("  - {}", style);
            }
            Ok(())
        }
        Commands::Upload { file } => {
            let manager = controller.session_manager()?;
            let content = FileManager::read_bytes(&file)?;
            let result = manager.upload(&display_name(&file), &content).await?;
            if json {
                return print_json(&result);
            }
            println!("Session {} ({}, {})", result.id, result.filename, result.language);
            if !result.styles.is_empty() {
                println!("Styles: {}", result.styles.join(", "));
            }
            Ok(())
        }
        Commands::Process { id, style } => {
            let manager = controller.session_manager()?;
            let extraction = manager.process(&id, style.as_deref()).await?;
            if json {
                return print_json(&extraction);
            }
            println!(
                "{} unknown word(s), {} known word(s) skipped",
                extraction.words.len(),
                extraction.filtered_known.len()
            );
            Ok(())
        }
        Commands::Words { id } => {
            let words = controller.session_manager()?.words(&id).await?;
            if json {
                print_json(&words)
            } else {
                words.iter().enumerate().for_each(|(i, w)| print_word_item(i, w));
                Ok(())
            }
        }
        Commands::Strike { id, words } => {
            let updated = controller.session_manager()?.strike(&id, &words).await?;
            if json {
                return print_json(&serde_json::json!({ "updated": updated }));
            }
            println!("Struck {} word(s)", updated);
            Ok(())
        }
        Commands::Finalize { id } => {
            let summary = controller.session_manager()?.finalize(&id).await?;
            if json {
                return print_json(&summary);
            }
            println!("Learned {} of {} word(s). Top unknown words:", summary.learned_count, summary.total_count);
            for (i, word) in summary.top_words.iter().enumerate() {
                println!("{:>3}. {}", i + 1, word);
            }
            Ok(())
        }
        Commands::Sessions { status } => {
            let status = status
                .as_deref()
                .map(str::parse::<SessionStatus>)
                .transpose()?;
            let sessions = controller.session_manager()?.list_sessions(status).await?;
            if json {
                print_json(&sessions)
            } else {
                sessions.iter().for_each(print_session);
                Ok(())
            }
        }
        Commands::Learn { language, words } => {
            let language: Language = language.parse()?;
            let added = controller.learn(language, &words).await?;
            if json {
                return print_json(&serde_json::json!({ "added": added }));
            }
            println!("Added {} new {} word(s)", added, language.name());
            Ok(())
        }
        // Handled before the configuration is loaded
        Commands::Completions { .. } => Ok(()),
    }
}

fn parse_language(language: Option<&str>) -> Result<Option<Language>> {
    language.map(str::parse::<Language>).transpose()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn print_scan_report(report: &ScanReport) {
    println!(
        "{} ({}, {} unknown, {} known)",
        report.file.display(),
        report.language.name(),
        report.unknown_count,
        report.known_count
    );
    for (i, token) in report.top_words.iter().enumerate() {
        println!("{:>3}. {} ({})", i + 1, token.word, token.frequency);
    }
}

fn print_word_item(index: usize, item: &SessionWordItem) {
    let mark = if item.is_removed { "x" } else { " " };
    println!("[{}] {:>3}. {} ({})", mark, index + 1, item.word, item.frequency);
}

fn print_session(session: &SessionInfo) {
    println!(
        "{}  {:<16} {:<3} {}  {}",
        session.id,
        session.status_display(),
        session.language,
        session.filename,
        session.created_at
    );
}
