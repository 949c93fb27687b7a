use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod commands;

use commands::IoParameters;
use commands::{info, summary, table};

#[derive(Parser, Debug)]
#[command(
    name = "biocol",
    about = "A command-line tool for inspecting and exporting per-atom columns of hierarchical macromolecular structure records.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Input record file (JSON). When omitted, stdin is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,
    /// Output file path. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,
    /// Visit every model instead of only the first one.
    #[arg(long, global = true)]
    all_models: bool,
    /// TOML file with accessor settings (e.g. `first-model-only = false`).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report chain and entity-type composition of one record.
    Info(info::InfoArgs),
    /// Export the per-atom table of one record as CSV or TSV.
    Table(table::TableArgs),
    /// Summarize many record files in parallel.
    Summary(summary::SummaryArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let io_params = IoParameters {
        input: cli.input.clone(),
        output: cli.output.clone(),
        config: cli.config.clone(),
        all_models: cli.all_models,
    };
    let config = commands::load_config(&io_params)?;

    match cli.command {
        Command::Info(args) => {
            let record = commands::load_input(&io_params)?;
            info::run(&record, config, &args)?;
        }
        Command::Table(args) => {
            commands::ensure_noninteractive_stdout("table", &io_params, args.force)?;
            let record = commands::load_input(&io_params)?;
            table::run(&record, config, &args, &io_params)?;
        }
        Command::Summary(args) => {
            summary::run(&args, config)?;
        }
    }

    Ok(())
}
