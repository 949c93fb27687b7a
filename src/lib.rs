//! # BioColumnar
//!
//! **BioColumnar** turns hierarchy-encoded macromolecular structure records into flat, per-atom columns. A record stores models, chains, groups, and atoms as count arrays over a shared dictionary of group templates; the columnar accessor walks that hierarchy once, derives offset indices, and expands every group- and chain-level label onto the atoms it covers.
//!
//! ## Features
//!
//! - **Lazy, compute-once columns** – `ColumnarStructure` builds its offset index on first use and populates each derived column independently, never recomputing a populated column.
//! - **First-model restriction** – By default only the first model is visited, so ensemble records yield the same columns as their first member.
//! - **Entity-type classification** – Every atom receives one of `PRO`, `DNA`, `RNA`, `PSR`, `UNK`, `WAT`, `SAC`, `LGO`, or `LGI` from a fixed, order-sensitive heuristic over polymer membership, component type, group name, and elements.
//! - **Tabular view** – `AtomTable` presents the cached columns as rows, optionally keyed by a composite `(chain, group number, group, atom, alt-loc)` label, and exports to CSV or TSV.
//! - **Batch summaries** – `ops::summarize_records` runs one accessor per record in parallel and keeps per-record failures isolated.

mod model;
mod utils;

pub mod columnar;
pub mod io;
pub mod ops;

pub use columnar::{
    AtomKey, AtomRow, AtomTable, ColumnarConfig, ColumnarStructure, GroupPositions,
    StructureIndex, TableIndex,
};
pub use model::builder::{AtomSite, RecordBuilder};
pub use model::entity::Entity;
pub use model::record::StructureRecord;
pub use model::template::GroupTemplate;
pub use model::types::{EntityKind, EntityType, Point};
