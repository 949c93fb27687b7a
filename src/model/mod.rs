//! Input data model for hierarchy-encoded macromolecular structures.
//!
//! A [`record::StructureRecord`] stores models, chains, groups, and atoms as flat count and
//! value arrays that reference a shared dictionary of [`template::GroupTemplate`]s. The
//! [`builder::RecordBuilder`] assembles consistent records incrementally.

pub mod builder;
pub mod entity;
pub mod record;
pub mod template;
pub mod types;
