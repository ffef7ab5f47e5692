//! Command-line arguments of `slap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use slap_etl::DEFAULT_SQL_PREFIX;
use slap_model::LookupName;

#[derive(Parser)]
#[command(
    name = "slap",
    version,
    about = "Describe coded cancer registry tables using the registry lookup tables",
    long_about = "Build canonical lookup tables from the raw registry release and use them\n\
                  to append human-readable description columns to clinical tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the canonical lookup files [env: SLAP_LOOKUP_DIR].
    #[arg(long = "lookup-dir", value_name = "DIR", global = true)]
    pub lookup_dir: Option<PathBuf>,

    /// File name prefix of the lookup files (default: z).
    #[arg(long = "lookup-prefix", value_name = "PREFIX", global = true)]
    pub lookup_prefix: Option<String>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered lookup tables and whether their files exist.
    Lookups,

    /// Print the description of each code.
    Resolve(ResolveArgs),

    /// Append description columns to a clinical table CSV.
    Describe(DescribeArgs),

    /// Build canonical lookup files from raw sources.
    #[command(subcommand)]
    Convert(ConvertCommand),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Lookup name or route alias (DEATHCAUSE, HISTOLOGY).
    #[arg(long = "lookup", short = 'l', value_name = "NAME")]
    pub lookup: String,

    /// Codes to resolve.
    #[arg(value_name = "CODE", required = true)]
    pub codes: Vec<String>,

    /// Print JSON instead of tab-separated text.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Clinical table CSV to describe.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Clinical table name (default: inferred from the file name).
    #[arg(long = "table", short = 't', value_name = "NAME")]
    pub table: Option<String>,

    /// Only describe these columns.
    #[arg(long = "columns", value_name = "A,B", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Skip the composite histology description.
    #[arg(long = "no-histology")]
    pub no_histology: bool,

    /// Output CSV (default: <CSV stem>_described.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Column mapping TOML replacing the built-in mappings.
    #[arg(long = "mappings", value_name = "PATH")]
    pub mappings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConvertCommand {
    /// Convert per-table SQL insert dumps.
    Sql(SqlArgs),

    /// Convert an ICD-O-2 morphology dump.
    Morphology(DumpArgs),

    /// Convert an ICD-10 dump into the full-code and three-character tables.
    Icd(DumpArgs),
}

#[derive(Args)]
pub struct SqlArgs {
    /// Directory of the release's SQL dumps.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// File name prefix of the dumps.
    #[arg(long = "sql-prefix", value_name = "PREFIX", default_value = DEFAULT_SQL_PREFIX)]
    pub sql_prefix: String,

    /// Lookups to convert (default: every dump-sourced lookup).
    #[arg(long = "lookup", short = 'l', value_name = "NAME", value_delimiter = ',')]
    pub lookups: Vec<LookupName>,
}

#[derive(Args)]
pub struct DumpArgs {
    /// Classification text file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
