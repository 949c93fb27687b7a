//! Record-level operations built on the columnar accessor.
//!
//! Each operation creates its own accessor per record and reports failures through the
//! columnar error type.

mod summary;

pub use summary::{RecordSummary, TypeCount, summarize, summarize_record, summarize_records};
