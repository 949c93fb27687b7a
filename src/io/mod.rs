//! Serialization of structure records and export of atom tables.
//!
//! Records are exchanged as JSON documents; atom tables are written as CSV or TSV.

mod error;
mod json;
mod table;

pub use json::{
    read_record, read_record_file, write_record, write_record_file,
};

pub use table::{TableFormat, table_headers, write_table};

pub use error::Error;
