//! Columnar access to hierarchical structure records.
//!
//! The submodules split the work into an offset index over the record hierarchy, range-fill
//! helpers that broadcast group- and chain-level values onto atoms, an entity-type
//! classifier, and a tabular view. [`ColumnarStructure`] composes them behind lazily
//! populated, compute-once caches.

mod accessor;
mod classify;
mod error;
mod expand;
mod index;
mod memo;
mod table;

#[cfg(test)]
mod fixtures;

pub use accessor::{ColumnarConfig, ColumnarStructure, GroupPositions};

pub use classify::classify_group;

pub use error::{Error, IndexUnit};

pub use expand::{broadcast, fill_ranges, owners, scatter};

pub use index::{StructureIndex, entity_chain_index};

pub use memo::Memo;

pub use table::{AtomKey, AtomRow, AtomTable, COLUMNS, KEY_COLUMNS, TableIndex};
