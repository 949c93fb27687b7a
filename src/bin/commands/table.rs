use anyhow::{Context, Result};
use clap::Args;

use bio_columnar::io::{TableFormat, write_table};
use bio_columnar::{ColumnarConfig, ColumnarStructure, StructureRecord};

use crate::commands::{IoParameters, run_with_spinner, with_output};

/// Exports the per-atom table of a record.
#[derive(Debug, Args)]
pub struct TableArgs {
    /// Output delimiter flavor (csv or tsv).
    #[arg(long = "table-format", default_value = "csv")]
    pub format: TableFormat,
    /// Key rows by (chain name, group number, group name, atom name, alt-loc) and write
    /// those columns first.
    #[arg(long)]
    pub composite_index: bool,
    /// Allow writing the table to an interactive terminal.
    #[arg(long)]
    pub force: bool,
}

/// Builds the table through a columnar accessor and streams it to the output.
pub fn run(
    record: &StructureRecord,
    config: ColumnarConfig,
    args: &TableArgs,
    params: &IoParameters,
) -> Result<()> {
    let accessor = ColumnarStructure::with_config(record, config);
    let table = run_with_spinner("Expanding atom columns", || {
        accessor
            .to_table(args.composite_index)
            .with_context(|| format!("Failed to assemble table for '{}'", record.structure_id))
    })?;

    log::info!(
        "assembled {} rows ({} atoms in record)",
        table.len(),
        record.num_atoms()
    );

    with_output(params, |writer| {
        write_table(writer, &table, args.format)
            .with_context(|| format!("Failed to write {} table", args.format))
    })
}
