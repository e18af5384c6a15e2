use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors (default)
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for run summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON report
    Json,
}

/// Output format for the alias export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AliasFormat {
    /// JavaScript `BOOK_NAMES` literal plus `getBookName`
    #[default]
    Js,
    /// JSON object with `aliases` and `names`
    Json,
}

#[derive(Parser)]
#[command(name = "lectio")]
#[command(
    about = "lectio - normalize heterogeneous Bible text dumps into one canonical JSON schema"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// RUST_LOG takes precedence when set
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ./lectio.toml when present)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Effective log level after applying `--verbose`.
    pub fn level(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert, validate and persist translations
    Normalize {
        /// Translation code for a single ad hoc source (requires --source)
        #[arg(long, requires = "source")]
        code: Option<String>,

        /// Source document for a single ad hoc translation (requires --code)
        #[arg(long, requires = "code")]
        source: Option<PathBuf>,

        /// Output directory (overrides the config file)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Exit non-zero on any warning or violation, not just on failures
        #[arg(long)]
        strict: bool,

        /// Write compact JSON instead of two-space indentation
        #[arg(long)]
        compact: bool,

        /// Summary format
        #[arg(short, long, value_enum, default_value_t)]
        format: SummaryFormat,
    },

    /// Convert and validate a source document without writing anything
    Validate {
        /// Source document in any supported shape
        path: PathBuf,

        /// Translation code used in the report (defaults to the file stem)
        #[arg(long)]
        code: Option<String>,

        /// Print every warning and violation
        #[arg(short, long)]
        details: bool,

        /// Summary format
        #[arg(short, long, value_enum, default_value_t)]
        format: SummaryFormat,
    },

    /// Export the alias table for a consumer application
    Aliases {
        /// Export format
        #[arg(short, long, value_enum, default_value_t)]
        format: AliasFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the text of a reference from a canonical document
    Lookup {
        /// Canonical JSON document
        corpus: PathBuf,

        /// Reference such as "John 3:16" or "1 Cor 13:4-7"
        reference: String,
    },
}
