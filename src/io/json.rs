//! JSON (de)serialization of [`StructureRecord`]s.
//!
//! Field names follow the record's camelCase serde layout, so a record file looks like
//! `{"structureId": "1STP", "chainsPerModel": [1], ...}`.

use super::error::Error;
use crate::model::record::StructureRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Reads one record from a JSON stream.
pub fn read_record<R: Read>(reader: R) -> Result<StructureRecord, Error> {
    serde_json::from_reader(reader).map_err(|e| Error::from_json(e, None))
}

/// Reads one record from a JSON file, attaching the path to any error.
pub fn read_record_file(path: &Path) -> Result<StructureRecord, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    let record = read_record(BufReader::new(file)).map_err(|e| e.with_path(path.to_path_buf()))?;
    log::debug!("read {} from {}", record, path.display());
    Ok(record)
}

/// Writes one record as JSON.
///
/// # Arguments
///
/// * `writer` - Destination stream.
/// * `record` - Record to serialize.
/// * `pretty` - Indent the output for human reading.
pub fn write_record<W: Write>(mut writer: W, record: &StructureRecord, pretty: bool) -> Result<(), Error> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut writer, record)
    } else {
        serde_json::to_writer(&mut writer, record)
    };
    result.map_err(|e| Error::from_json(e, None))?;
    writer.flush().map_err(|e| Error::from_io(e, None))
}

/// Writes one record to a JSON file.
pub fn write_record_file(path: &Path, record: &StructureRecord, pretty: bool) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    write_record(BufWriter::new(file), record, pretty).map_err(|e| e.with_path(path.to_path_buf()))
}
