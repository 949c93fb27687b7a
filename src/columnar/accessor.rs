//! Lazily populated columnar view over one structure record.
//!
//! [`ColumnarStructure`] wraps a borrowed [`StructureRecord`] and exposes every derived
//! per-atom attribute as a flat slice. Nothing is computed at construction: the offset
//! index is built on first use, and each attribute is expanded independently the first
//! time it is requested. Populated columns are never recomputed for the lifetime of the
//! accessor.

use super::classify::classify_group;
use super::error::{Error, IndexUnit};
use super::expand::{broadcast, fill_ranges, owners, scatter};
use super::index::{StructureIndex, entity_chain_index};
use super::memo::Memo;
use super::table::{AtomKey, AtomTable, Columns};
use crate::model::record::StructureRecord;
use crate::model::template::GroupTemplate;
use crate::model::types::{EntityType, Point};
use serde::Deserialize;
use smol_str::SmolStr;
use std::cell::Cell;

/// Construction options for a [`ColumnarStructure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ColumnarConfig {
    /// Restrict every column to the first model of the record.
    pub first_model_only: bool,
}

impl Default for ColumnarConfig {
    fn default() -> Self {
        Self {
            first_model_only: true,
        }
    }
}

impl ColumnarConfig {
    /// Configuration that visits every model of the record.
    pub fn all_models() -> Self {
        Self {
            first_model_only: false,
        }
    }

    /// Parses a configuration from TOML text; absent keys keep their defaults.
    ///
    /// # Arguments
    ///
    /// * `text` - TOML document, e.g. `first-model-only = false`.
    ///
    /// # Returns
    ///
    /// The parsed configuration or the TOML deserialization error.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Coordinates of one visited group, labelled by chain name and group number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupPositions<'s> {
    pub chain_name: &'s str,
    pub group_number: &'s str,
    pub positions: &'s [Point],
}

/// Columnar accessor that derives flat per-atom arrays from a hierarchical record.
///
/// The accessor is a single-owner object: its caches are filled through shared references
/// using non-thread-safe cells, so it is `Send` but not `Sync`. Process many records in
/// parallel by giving each worker its own accessor.
pub struct ColumnarStructure<'a> {
    record: &'a StructureRecord,
    config: ColumnarConfig,
    computations: Cell<usize>,

    index: Memo<StructureIndex>,
    atom_to_group: Memo<Vec<usize>>,
    atom_to_chain: Memo<Vec<usize>>,
    chain_to_entity: Memo<Vec<usize>>,

    atom_names: Memo<Vec<SmolStr>>,
    elements: Memo<Vec<SmolStr>>,
    group_names: Memo<Vec<SmolStr>>,
    chem_comp_types: Memo<Vec<SmolStr>>,
    group_numbers: Memo<Vec<SmolStr>>,
    sequence_positions: Memo<Vec<i32>>,

    chain_ids: Memo<Vec<SmolStr>>,
    chain_names: Memo<Vec<SmolStr>>,
    polymer_flags: Memo<Vec<bool>>,
    entity_indices: Memo<Vec<usize>>,

    entity_types: Memo<Vec<EntityType>>,
    positions: Memo<Vec<Point>>,
    keys: Memo<Vec<AtomKey>>,
}

impl<'a> ColumnarStructure<'a> {
    /// Wraps a record using the default configuration (first model only).
    pub fn new(record: &'a StructureRecord) -> Self {
        Self::with_config(record, ColumnarConfig::default())
    }

    pub fn with_config(record: &'a StructureRecord, config: ColumnarConfig) -> Self {
        Self {
            record,
            config,
            computations: Cell::new(0),
            index: Memo::new(),
            atom_to_group: Memo::new(),
            atom_to_chain: Memo::new(),
            chain_to_entity: Memo::new(),
            atom_names: Memo::new(),
            elements: Memo::new(),
            group_names: Memo::new(),
            chem_comp_types: Memo::new(),
            group_numbers: Memo::new(),
            sequence_positions: Memo::new(),
            chain_ids: Memo::new(),
            chain_names: Memo::new(),
            polymer_flags: Memo::new(),
            entity_indices: Memo::new(),
            entity_types: Memo::new(),
            positions: Memo::new(),
            keys: Memo::new(),
        }
    }

    pub fn record(&self) -> &'a StructureRecord {
        self.record
    }

    pub fn config(&self) -> ColumnarConfig {
        self.config
    }

    /// Number of memoized values populated so far.
    pub fn computations(&self) -> usize {
        self.computations.get()
    }

    fn memoize<'s, T>(
        &'s self,
        memo: &'s Memo<T>,
        name: &str,
        compute: impl FnOnce() -> Result<T, Error>,
    ) -> Result<&'s T, Error> {
        memo.get_or_try_init(|| {
            let value = compute()?;
            self.computations.set(self.computations.get() + 1);
            log::trace!("{}: populated {}", self.record.structure_id, name);
            Ok(value)
        })
    }

    /// Offset index of the visited hierarchy, built on first call.
    pub fn index(&self) -> Result<&StructureIndex, Error> {
        self.memoize(&self.index, "index", || {
            StructureIndex::build(self.record, self.config.first_model_only)
        })
    }

    pub fn num_atoms(&self) -> Result<usize, Error> {
        Ok(self.index()?.num_atoms())
    }

    pub fn num_groups(&self) -> Result<usize, Error> {
        Ok(self.index()?.num_groups())
    }

    pub fn num_chains(&self) -> Result<usize, Error> {
        Ok(self.index()?.num_chains())
    }

    pub fn num_models(&self) -> Result<usize, Error> {
        Ok(self.index()?.num_models())
    }

    pub fn group_to_atom_indices(&self) -> Result<&[usize], Error> {
        Ok(self.index()?.group_to_atom())
    }

    pub fn chain_to_atom_indices(&self) -> Result<&[usize], Error> {
        Ok(self.index()?.chain_to_atom())
    }

    pub fn chain_to_group_indices(&self) -> Result<&[usize], Error> {
        Ok(self.index()?.chain_to_group())
    }

    /// Group ordinal owning each atom.
    pub fn atom_to_group_indices(&self) -> Result<&[usize], Error> {
        self.memoize(&self.atom_to_group, "atomToGroup", || {
            let index = self.index()?;
            owners(index.group_to_atom(), index.num_atoms(), IndexUnit::Group)
        })
        .map(Vec::as_slice)
    }

    /// Chain ordinal owning each atom.
    pub fn atom_to_chain_indices(&self) -> Result<&[usize], Error> {
        self.memoize(&self.atom_to_chain, "atomToChain", || {
            let index = self.index()?;
            owners(index.chain_to_atom(), index.num_atoms(), IndexUnit::Chain)
        })
        .map(Vec::as_slice)
    }

    /// Entity ordinal claiming each visited chain.
    pub fn chain_to_entity_indices(&self) -> Result<&[usize], Error> {
        self.memoize(&self.chain_to_entity, "chainToEntity", || {
            entity_chain_index(self.record, self.index()?.num_chains())
        })
        .map(Vec::as_slice)
    }

    fn template_column<'s, F>(
        &'s self,
        memo: &'s Memo<Vec<SmolStr>>,
        name: &str,
        pick: F,
    ) -> Result<&'s [SmolStr], Error>
    where
        F: Fn(&'a GroupTemplate) -> &'a [String],
    {
        self.memoize(memo, name, || {
            let index = self.index()?;
            scatter(
                index.group_to_atom(),
                index.num_atoms(),
                IndexUnit::Group,
                |group| Ok(pick(self.template(group)?)),
                |value| SmolStr::new(value),
            )
        })
        .map(Vec::as_slice)
    }

    fn template(&self, group: usize) -> Result<&'a GroupTemplate, Error> {
        let record = self.record;
        record.template_of(group).ok_or_else(|| {
            let template = record.group_type_index.get(group).copied().unwrap_or(usize::MAX);
            Error::missing_template(record.structure_id.as_str(), group, template)
        })
    }

    pub fn atom_names(&self) -> Result<&[SmolStr], Error> {
        self.template_column(&self.atom_names, "atomNames", |t| t.atom_names.as_slice())
    }

    pub fn elements(&self) -> Result<&[SmolStr], Error> {
        self.template_column(&self.elements, "elements", |t| t.elements.as_slice())
    }

    pub fn group_names(&self) -> Result<&[SmolStr], Error> {
        self.memoize(&self.group_names, "groupNames", || {
            let index = self.index()?;
            broadcast(index.group_to_atom(), index.num_atoms(), IndexUnit::Group, |group| {
                Ok(SmolStr::new(&self.template(group)?.group_name))
            })
        })
        .map(Vec::as_slice)
    }

    pub fn chem_comp_types(&self) -> Result<&[SmolStr], Error> {
        self.memoize(&self.chem_comp_types, "chemCompTypes", || {
            let index = self.index()?;
            broadcast(index.group_to_atom(), index.num_atoms(), IndexUnit::Group, |group| {
                Ok(SmolStr::new(&self.template(group)?.chem_comp_type))
            })
        })
        .map(Vec::as_slice)
    }

    /// Group id concatenated with the insertion code, e.g. `"52"` or `"52A"`.
    pub fn group_numbers(&self) -> Result<&[SmolStr], Error> {
        self.memoize(&self.group_numbers, "groupNumbers", || {
            let index = self.index()?;
            let record = self.record;
            broadcast(index.group_to_atom(), index.num_atoms(), IndexUnit::Group, |group| {
                Ok(smol_str::format_smolstr!(
                    "{}{}",
                    record.group_ids[group],
                    record.insertion_codes[group]
                ))
            })
        })
        .map(Vec::as_slice)
    }

    /// Sequence position of each atom's group; `-1` for groups outside the sequence.
    pub fn sequence_positions(&self) -> Result<&[i32], Error> {
        self.memoize(&self.sequence_positions, "sequencePositions", || {
            let index = self.index()?;
            let record = self.record;
            broadcast(index.group_to_atom(), index.num_atoms(), IndexUnit::Group, |group| {
                Ok(record.sequence_indices[group])
            })
        })
        .map(Vec::as_slice)
    }

    pub fn chain_ids(&self) -> Result<&[SmolStr], Error> {
        self.memoize(&self.chain_ids, "chainIds", || {
            let index = self.index()?;
            let record = self.record;
            broadcast(index.chain_to_atom(), index.num_atoms(), IndexUnit::Chain, |chain| {
                Ok(SmolStr::new(&record.chain_ids[chain]))
            })
        })
        .map(Vec::as_slice)
    }

    pub fn chain_names(&self) -> Result<&[SmolStr], Error> {
        self.memoize(&self.chain_names, "chainNames", || {
            let index = self.index()?;
            let record = self.record;
            broadcast(index.chain_to_atom(), index.num_atoms(), IndexUnit::Chain, |chain| {
                Ok(SmolStr::new(&record.chain_names[chain]))
            })
        })
        .map(Vec::as_slice)
    }

    /// Whether each atom's chain belongs to a polymer entity.
    pub fn polymer_flags(&self) -> Result<&[bool], Error> {
        self.memoize(&self.polymer_flags, "polymerFlags", || {
            let index = self.index()?;
            let chain_entities = self.chain_to_entity_indices()?;
            let entities = &self.record.entities;
            broadcast(index.chain_to_atom(), index.num_atoms(), IndexUnit::Chain, |chain| {
                Ok(entities[chain_entities[chain]].is_polymer())
            })
        })
        .map(Vec::as_slice)
    }

    /// Entity ordinal of each atom's chain.
    pub fn entity_indices(&self) -> Result<&[usize], Error> {
        self.memoize(&self.entity_indices, "entityIndices", || {
            let index = self.index()?;
            let chain_entities = self.chain_to_entity_indices()?;
            broadcast(index.chain_to_atom(), index.num_atoms(), IndexUnit::Chain, |chain| {
                Ok(chain_entities[chain])
            })
        })
        .map(Vec::as_slice)
    }

    /// Entity-type code of each atom, classified once per group.
    ///
    /// Forces the polymer flag, component type, element, and group name columns.
    pub fn entity_types(&self) -> Result<&[EntityType], Error> {
        self.memoize(&self.entity_types, "entityTypes", || {
            let polymer = self.polymer_flags()?;
            let chem_comp_types = self.chem_comp_types()?;
            let elements = self.elements()?;
            let group_names = self.group_names()?;
            let index = self.index()?;
            let offsets = index.group_to_atom();

            fill_ranges(offsets, index.num_atoms(), IndexUnit::Group, |group, slot| {
                if slot.is_empty() {
                    return Ok(());
                }
                let start = offsets[group];
                let end = start + slot.len();
                slot.fill(classify_group(
                    polymer[start],
                    &chem_comp_types[start],
                    &group_names[start],
                    &elements[start..end],
                ));
                Ok(())
            })
        })
        .map(Vec::as_slice)
    }

    fn atom_slice<T>(&self, values: &'a [T], name: &str) -> Result<&'a [T], Error> {
        let n = self.num_atoms()?;
        values.get(..n).ok_or_else(|| {
            Error::inconsistent(
                self.record.structure_id.as_str(),
                format!("{name} has {} entries but {n} atoms are visited", values.len()),
            )
        })
    }

    pub fn x_coords(&self) -> Result<&'a [f32], Error> {
        self.atom_slice(&self.record.x_coords, "xCoords")
    }

    pub fn y_coords(&self) -> Result<&'a [f32], Error> {
        self.atom_slice(&self.record.y_coords, "yCoords")
    }

    pub fn z_coords(&self) -> Result<&'a [f32], Error> {
        self.atom_slice(&self.record.z_coords, "zCoords")
    }

    pub fn occupancies(&self) -> Result<&'a [f32], Error> {
        self.atom_slice(&self.record.occupancies, "occupancies")
    }

    pub fn b_factors(&self) -> Result<&'a [f32], Error> {
        self.atom_slice(&self.record.b_factors, "bFactors")
    }

    /// Alternate-location code of each atom; empty when the atom has none.
    pub fn alt_locs(&self) -> Result<&'a [String], Error> {
        self.atom_slice(&self.record.alt_locs, "altLocs")
    }

    /// Atom coordinates as double-precision points.
    pub fn positions(&self) -> Result<&[Point], Error> {
        self.memoize(&self.positions, "positions", || {
            let (x, y, z) = (self.x_coords()?, self.y_coords()?, self.z_coords()?);
            Ok(x.iter()
                .zip(y)
                .zip(z)
                .map(|((&x, &y), &z)| Point::new(f64::from(x), f64::from(y), f64::from(z)))
                .collect())
        })
        .map(Vec::as_slice)
    }

    /// Positions split per group in hierarchy order; groups without atoms are skipped.
    pub fn group_positions(&self) -> Result<Vec<GroupPositions<'_>>, Error> {
        let positions = self.positions()?;
        let chain_names = self.chain_names()?;
        let group_numbers = self.group_numbers()?;
        let index = self.index()?;

        Ok((0..index.num_groups())
            .filter_map(|group| index.group_atoms(group))
            .filter(|range| !range.is_empty())
            .map(|range| GroupPositions {
                chain_name: &chain_names[range.start],
                group_number: &group_numbers[range.start],
                positions: &positions[range],
            })
            .collect())
    }

    fn columns(&self) -> Result<Columns<'_>, Error> {
        Ok(Columns {
            chain_names: self.chain_names()?,
            chain_ids: self.chain_ids()?,
            group_numbers: self.group_numbers()?,
            group_names: self.group_names()?,
            atom_names: self.atom_names()?,
            alt_locs: self.alt_locs()?,
            x: self.x_coords()?,
            y: self.y_coords()?,
            z: self.z_coords()?,
            occupancies: self.occupancies()?,
            b_factors: self.b_factors()?,
            elements: self.elements()?,
            polymer: self.polymer_flags()?,
        })
    }

    /// Composite `(chain name, group number, group name, atom name, alt-loc)` key per atom.
    pub fn composite_keys(&self) -> Result<&[AtomKey], Error> {
        self.memoize(&self.keys, "compositeKeys", || Ok(self.columns()?.keys()))
            .map(Vec::as_slice)
    }

    /// Assembles the row-per-atom table.
    ///
    /// # Arguments
    ///
    /// * `use_composite_index` - Key rows by [`AtomKey`] instead of their atom ordinal.
    ///
    /// # Returns
    ///
    /// A table borrowing the accessor's cached columns. Repeated calls reuse every column.
    pub fn to_table(&self, use_composite_index: bool) -> Result<AtomTable<'_>, Error> {
        let columns = self.columns()?;
        let keys = if use_composite_index {
            Some(self.composite_keys()?)
        } else {
            None
        };
        Ok(AtomTable::new(columns, keys))
    }
}
