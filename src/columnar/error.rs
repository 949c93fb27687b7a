//! Error types raised while indexing and expanding a structure record.
//!
//! Both variants are fatal: the accessor works over trusted structural data, so a violated
//! invariant aborts the computation instead of producing misaligned columns.

use std::fmt;
use thiserror::Error;

/// Granularity of an offset range that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexUnit {
    Group,
    Chain,
}

impl fmt::Display for IndexUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexUnit::Group => write!(f, "group"),
            IndexUnit::Chain => write!(f, "chain"),
        }
    }
}

/// Error conditions surfaced by the columnar accessor.
#[derive(Debug, Error)]
pub enum Error {
    /// The input record is malformed or internally inconsistent.
    #[error("inconsistent structure '{structure_id}': {details}")]
    StructureConsistency {
        structure_id: String,
        details: String,
    },

    /// An offset range computed by the index builder does not fit the output buffer.
    #[error("internal index fault at {unit} {ordinal}: range {start}..{end} exceeds {len} atoms")]
    InternalIndexFault {
        unit: IndexUnit,
        ordinal: usize,
        start: usize,
        end: usize,
        len: usize,
    },
}

impl Error {
    /// Helper for constructing an [`Error::StructureConsistency`] variant.
    ///
    /// # Arguments
    ///
    /// * `structure_id` - Identifier of the offending record.
    /// * `details` - Description of the violated invariant.
    pub fn inconsistent(structure_id: impl Into<String>, details: impl Into<String>) -> Self {
        Self::StructureConsistency {
            structure_id: structure_id.into(),
            details: details.into(),
        }
    }

    /// Helper for a group whose template ordinal is absent from the dictionary.
    pub fn missing_template(structure_id: impl Into<String>, group: usize, template: usize) -> Self {
        Self::inconsistent(
            structure_id,
            format!("group {group} references missing template {template}"),
        )
    }

    /// Helper for constructing an [`Error::InternalIndexFault`] variant.
    pub fn index_fault(unit: IndexUnit, ordinal: usize, start: usize, end: usize, len: usize) -> Self {
        Self::InternalIndexFault {
            unit,
            ordinal,
            start,
            end,
            len,
        }
    }

    pub fn is_consistency(&self) -> bool {
        matches!(self, Self::StructureConsistency { .. })
    }

    pub fn is_index_fault(&self) -> bool {
        matches!(self, Self::InternalIndexFault { .. })
    }
}
