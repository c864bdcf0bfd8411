//! CLI argument definitions for the assay aligner.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sensi_core::DEFAULT_DATE_FORMAT;
use sensi_model::{CatalogOrder, MergeMode};
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "sensi-align",
    version,
    about = "Align Sensititre assay exports into one wide CSV",
    long_about = "Align tabular Sensititre instrument exports into a single wide CSV.\n\n\
                  Each file is anchored on its first date column; the assay triplets\n\
                  that follow are re-emitted so every assay lands in the same columns\n\
                  across all files, optionally merged in chronological order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps (pretty and compact formats).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Allow cell values from the exports to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Build logging configuration from CLI flags with consistent precedence.
    ///
    /// `--log-level` beats `-v`/`-q`; `RUST_LOG` only applies when neither is given.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig::default()
            .with_level_filter(self.verbosity.tracing_level_filter())
            .with_format(self.log_format.into())
            .with_timestamps(self.log_timestamps)
            .with_log_file(self.log_file.clone())
            .with_log_data(self.log_data);
        config.use_env_filter = !(self.verbosity.is_present() || self.log_level.is_some());
        if let Some(level) = self.log_level {
            config = config.with_level_filter(level.into());
        }
        let ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        config.with_ansi(ansi)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Align assay columns and write the combined CSV.
    Align(AlignArgs),

    /// Show detected date columns and the assay catalog without writing.
    Inspect(InspectArgs),
}

/// Options shared by every command that reads exports.
#[derive(Args)]
pub struct InputArgs {
    /// Input file, or a directory whose files are all processed.
    #[arg(short = 'i', long = "input", value_name = "PATH", default_value = "sensititre.txt")]
    pub input: PathBuf,

    /// Character encoding of the input (e.g. utf-8, utf16le, windows-1252).
    #[arg(short = 'e', long = "encoding", value_name = "LABEL", default_value = "utf-8")]
    pub encoding: String,

    /// Field delimiter of the input.
    #[arg(short = 'd', long = "delimiter", value_enum, default_value = "comma")]
    pub delimiter: DelimiterArg,

    /// Date format of the anchor column (repeat to accept several).
    #[arg(
        short = 'f',
        long = "date-format",
        value_name = "FORMAT",
        default_value = DEFAULT_DATE_FORMAT
    )]
    pub date_formats: Vec<String>,

    /// Ordering of the assay catalog.
    #[arg(long = "catalog-order", value_enum, default_value = "sorted")]
    pub catalog_order: CatalogOrderArg,
}

#[derive(Args)]
pub struct AlignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output CSV path (overwritten).
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "output.csv")]
    pub output: PathBuf,

    /// Copy leading columns verbatim instead of padding to the widest offset.
    ///
    /// All input files must then share the same assay offset.
    #[arg(long = "no-align")]
    pub no_align: bool,

    /// Keep files in input order instead of sorting rows by date.
    #[arg(long = "no-sort")]
    pub no_sort: bool,

    /// Run every stage but do not write the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a JSON run report (catalog, per-file counts, years).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// CLI field delimiter choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum DelimiterArg {
    Tab,
    Comma,
}

impl DelimiterArg {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Tab => b'\t',
            Self::Comma => b',',
        }
    }
}

/// CLI catalog ordering choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum CatalogOrderArg {
    Sorted,
    FirstSeen,
}

impl From<CatalogOrderArg> for CatalogOrder {
    fn from(value: CatalogOrderArg) -> Self {
        match value {
            CatalogOrderArg::Sorted => Self::Sorted,
            CatalogOrderArg::FirstSeen => Self::FirstSeen,
        }
    }
}

impl AlignArgs {
    pub fn merge_mode(&self) -> MergeMode {
        if self.no_sort {
            MergeMode::Concatenate
        } else {
            MergeMode::Chronological
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_align_defaults() {
        let cli = Cli::parse_from(["sensi-align", "align"]);
        let Command::Align(args) = cli.command else {
            panic!("expected align command");
        };
        assert_eq!(args.input.input, PathBuf::from("sensititre.txt"));
        assert_eq!(args.output, PathBuf::from("output.csv"));
        assert_eq!(args.input.encoding, "utf-8");
        assert_eq!(args.input.date_formats, vec![DEFAULT_DATE_FORMAT.to_string()]);
        assert_eq!(args.input.delimiter.as_byte(), b',');
        assert_eq!(args.merge_mode(), MergeMode::Chronological);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_log_config_defaults() {
        let cli = Cli::parse_from(["sensi-align", "align"]);
        let config = cli.log_config();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.with_timestamps);
        assert!(config.log_file.is_none());
        assert!(!config.log_data);
    }

    #[test]
    fn test_log_config_from_flags() {
        let cli = Cli::parse_from([
            "sensi-align",
            "--log-level",
            "debug",
            "--log-format",
            "compact",
            "--log-timestamps",
            "--log-file",
            "run.log",
            "--log-data",
            "--color",
            "never",
            "align",
        ]);
        let config = cli.log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.with_timestamps);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert!(config.log_data);
        assert!(!config.with_ansi);
    }

    #[test]
    fn test_verbosity_flag_disables_env_filter() {
        let cli = Cli::parse_from(["sensi-align", "-vv", "align"]);
        let config = cli.log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_repeated_date_formats_replace_default() {
        let cli = Cli::parse_from([
            "sensi-align",
            "align",
            "-f",
            "YYYY-MM-DD",
            "--date-format",
            "YYYY-MM-DD HH:mm:ss",
            "-d",
            "tab",
            "--no-sort",
        ]);
        let Command::Align(args) = cli.command else {
            panic!("expected align command");
        };
        assert_eq!(args.input.date_formats, vec!["YYYY-MM-DD", "YYYY-MM-DD HH:mm:ss"]);
        assert_eq!(args.input.delimiter.as_byte(), b'\t');
        assert_eq!(args.merge_mode(), MergeMode::Concatenate);
    }
}
