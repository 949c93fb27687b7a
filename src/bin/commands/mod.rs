use std::fs::{self, File};
use std::io::{self as stdio, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

use bio_columnar::io::read_record;
use bio_columnar::{ColumnarConfig, StructureRecord};

pub mod info;
pub mod summary;
pub mod table;

/// Aggregated IO and accessor parameters shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct IoParameters {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub all_models: bool,
}

/// Resolves the accessor configuration from `--config` and `--all-models`.
///
/// The flag wins over the file so a shared config can be overridden per invocation.
pub fn load_config(params: &IoParameters) -> Result<ColumnarConfig> {
    let mut config = match &params.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            ColumnarConfig::from_toml_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => ColumnarConfig::default(),
    };
    if params.all_models {
        config.first_model_only = false;
    }
    log::debug!("accessor configuration: {:?}", config);
    Ok(config)
}

/// Loads a structure record from the configured input source.
pub fn load_input(params: &IoParameters) -> Result<StructureRecord> {
    let record = if let Some(path) = &params.input {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        read_record(BufReader::new(file))
            .with_context(|| format!("Failed to parse record from {}", path.display()))?
    } else {
        let stdin = stdio::stdin();
        if stdin.is_terminal() {
            bail!(
                "No --input provided and stdin is a TTY. Provide -i/--input or pipe a record into biocol."
            );
        }
        read_record(BufReader::new(stdin.lock())).context("Failed to parse record from stdin")?
    };

    log::info!("loaded {}", record);
    Ok(record)
}

/// Runs `write` against the configured output destination and flushes it.
pub fn with_output<F>(params: &IoParameters, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    match &params.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write(&mut writer)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            writer.flush().context("Failed to flush output writer")?;
        }
        None => {
            let stdout = stdio::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write(&mut writer).context("Failed to write output to stdout")?;
            writer.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

/// Draws a rounded box around a section title.
pub fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> stdio::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}

/// Returns true when stdout is a TTY and no explicit output file was supplied.
pub fn interactive_stdout_requested(params: &IoParameters) -> bool {
    params.output.is_none() && stdio::stdout().is_terminal()
}

/// Ensures bulk output is not dumped into an interactive terminal unless forced.
pub fn ensure_noninteractive_stdout(command: &str, params: &IoParameters, force: bool) -> Result<()> {
    if !force && interactive_stdout_requested(params) {
        bail!(
            "Refusing to stream {command} results to an interactive terminal. Use -o/--output, pipe the command into a file, or pass --force."
        );
    }
    Ok(())
}
