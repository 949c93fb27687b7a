//! Delimited-text export of an [`AtomTable`].
//!
//! Ordinal tables are written with the table's own column order. Tables keyed by the
//! composite index lead with the key columns, followed by the remaining columns.

use super::error::Error;
use crate::columnar::{AtomRow, AtomTable, COLUMNS, KEY_COLUMNS, TableIndex};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Delimited text flavors supported by [`write_table`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableFormat {
    #[default]
    Csv,
    Tsv,
}

impl TableFormat {
    pub fn delimiter(&self) -> u8 {
        match self {
            TableFormat::Csv => b',',
            TableFormat::Tsv => b'\t',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TableFormat::Csv => "CSV",
            TableFormat::Tsv => "TSV",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(TableFormat::Csv),
            "tsv" | "tab" => Ok(TableFormat::Tsv),
            _ => Err(format!("Unknown table format: {}", s)),
        }
    }
}

/// Header row for a table in the given index mode.
pub fn table_headers(index: TableIndex) -> Vec<&'static str> {
    match index {
        TableIndex::Ordinal => COLUMNS.to_vec(),
        TableIndex::Composite => KEY_COLUMNS
            .iter()
            .chain(COLUMNS.iter().filter(|c| !KEY_COLUMNS.contains(*c)))
            .copied()
            .collect(),
    }
}

/// Writes every row of `table` as delimited text with a header line.
///
/// # Arguments
///
/// * `writer` - Destination stream.
/// * `table` - Table to export.
/// * `format` - Delimiter flavor.
///
/// # Returns
///
/// `Ok(())` once all rows are flushed, or an [`Error`] describing the failed write.
pub fn write_table<W: Write>(writer: W, table: &AtomTable<'_>, format: TableFormat) -> Result<(), Error> {
    let fail = |e: csv::Error| Error::from_csv(e, format.name(), None);
    let headers = table_headers(table.index());

    let mut out = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(writer);

    out.write_record(&headers).map_err(fail)?;
    for row in table.rows() {
        let fields = row_fields(&row);
        let ordered = headers.iter().filter_map(|h| {
            COLUMNS
                .iter()
                .position(|c| c == h)
                .map(|i| fields[i].as_str())
        });
        out.write_record(ordered).map_err(fail)?;
    }
    out.flush().map_err(|e| Error::from_io(e, None))?;

    log::debug!("wrote {} {} rows", table.len(), format);
    Ok(())
}

fn row_fields(row: &AtomRow<'_>) -> [String; 13] {
    [
        row.chain_name.to_string(),
        row.chain_id.to_string(),
        row.group_number.to_string(),
        row.group_name.to_string(),
        row.atom_name.to_string(),
        row.alt_loc.to_string(),
        format!("{:.3}", row.x),
        format!("{:.3}", row.y),
        format!("{:.3}", row.z),
        format!("{:.2}", row.occupancy),
        format!("{:.2}", row.b_factor),
        row.element.to_string(),
        row.polymer.to_string(),
    ]
}
