use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use prettytable::{Table, format, row};

use bio_columnar::io::read_record_file;
use bio_columnar::ops::{RecordSummary, summarize_records};
use bio_columnar::{ColumnarConfig, StructureRecord};

use crate::commands::{print_boxed_label, run_with_spinner};

/// Summarizes a batch of record files.
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Record files (JSON) to summarize.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
    /// Print the summaries as JSON lines on stdout instead of a report table.
    #[arg(long)]
    pub json: bool,
}

/// Loads every file, summarizes the readable records in parallel, and reports the results.
pub fn run(args: &SummaryArgs, config: ColumnarConfig) -> Result<()> {
    let (loaded, failures) = run_with_spinner("Reading records", || Ok(load_all(&args.files)))?;
    let (paths, records): (Vec<PathBuf>, Vec<StructureRecord>) = loaded.into_iter().unzip();

    let results = run_with_spinner("Summarizing records", || {
        Ok(summarize_records(&records, config))
    })?;

    let mut rows: Vec<(PathBuf, Result<RecordSummary, String>)> = failures;
    rows.extend(
        paths
            .into_iter()
            .zip(results)
            .map(|(path, result)| (path, result.map_err(|e| e.to_string()))),
    );
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    if args.json {
        print_json(&rows)?;
    } else {
        print_report(&rows)?;
    }

    if rows.iter().all(|(_, r)| r.is_err()) {
        bail!("None of the {} record files could be summarized", rows.len());
    }
    Ok(())
}

type Loaded = (Vec<(PathBuf, StructureRecord)>, Vec<(PathBuf, Result<RecordSummary, String>)>);

fn load_all(files: &[PathBuf]) -> Loaded {
    let mut loaded = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for path in files {
        match read_record_file(path) {
            Ok(record) => loaded.push((path.clone(), record)),
            Err(err) => {
                log::warn!("{}", err);
                failures.push((path.clone(), Err(err.to_string())));
            }
        }
    }
    (loaded, failures)
}

fn print_json(rows: &[(PathBuf, Result<RecordSummary, String>)]) -> Result<()> {
    for (path, result) in rows {
        let line = match result {
            Ok(summary) => serde_json::to_string(summary)?,
            Err(message) => serde_json::json!({
                "file": path.display().to_string(),
                "error": message,
            })
            .to_string(),
        };
        println!("{line}");
    }
    Ok(())
}

fn print_report(rows: &[(PathBuf, Result<RecordSummary, String>)]) -> Result<()> {
    let mut stderr = io::stderr().lock();
    print_boxed_label(&mut stderr, "Batch Summary")?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["File", "ID", "Chains", "Groups", "Atoms", "Polymer Atoms", "Types"]);
    for (path, result) in rows {
        let file = path.display().to_string();
        match result {
            Ok(summary) => {
                let types = summary
                    .entity_types
                    .iter()
                    .map(|(ty, count)| format!("{} {}", ty, count.groups))
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(row![
                    file,
                    summary.structure_id,
                    summary.chains,
                    summary.groups,
                    summary.atoms,
                    summary.polymer_atoms,
                    types
                ]);
            }
            Err(message) => {
                table.add_row(row![file, "-", "-", "-", "-", "-", format!("error: {message}")]);
            }
        }
    }
    table
        .print(&mut stderr)
        .context("Failed to render batch summary")?;
    Ok(())
}
