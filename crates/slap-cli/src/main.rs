//! `slap`: registry lookup tables and description columns.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use slap_cli::commands::{
    DescribeRequest, run_convert_icd, run_convert_morphology, run_convert_sql, run_describe,
    run_lookups, run_resolve,
};
use slap_cli::logging::{LogConfig, LogFormat, init_logging};
use slap_cli::settings::LookupSettings;
use slap_etl::SqlSource;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, ConvertCommand, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = LookupSettings::resolve(cli.lookup_dir, cli.lookup_prefix);
    let store = settings.store();

    match cli.command {
        Command::Lookups => run_lookups(&store),
        Command::Resolve(args) => run_resolve(&store, &args.lookup, &args.codes, args.json),
        Command::Describe(args) => {
            let request = DescribeRequest {
                input: args.input,
                table: args.table,
                columns: args.columns,
                histology: !args.no_histology,
                output: args.output,
                mappings: args.mappings,
            };
            let summary = run_describe(&store, &request)?;
            println!(
                "{}: {} rows, added {} -> {}",
                summary.table,
                summary.rows,
                if summary.appended.is_empty() {
                    "no columns".to_string()
                } else {
                    summary.appended.join(", ")
                },
                summary.output.display()
            );
            Ok(())
        }
        Command::Convert(convert) => {
            let written = match convert {
                ConvertCommand::Sql(args) => {
                    let source = SqlSource::new(args.dir).with_prefix(args.sql_prefix);
                    run_convert_sql(&store, &source, &args.lookups)?
                }
                ConvertCommand::Morphology(args) => {
                    vec![run_convert_morphology(&store, &args.input)?]
                }
                ConvertCommand::Icd(args) => run_convert_icd(&store, &args.input)?,
            };
            for path in written {
                println!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
