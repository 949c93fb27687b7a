//! Row-per-atom tabular view assembled from cached accessor columns.
//!
//! An [`AtomTable`] borrows every column from its [`crate::ColumnarStructure`], so building
//! a table twice never recomputes or copies a column. Entity types and sequence positions
//! are not table columns; read them from the accessor.

use serde::Serialize;
use smol_str::SmolStr;
use std::fmt;

/// Column headers in table order.
pub const COLUMNS: [&str; 13] = [
    "chain_name",
    "chain_id",
    "group_number",
    "group_name",
    "atom_name",
    "altloc",
    "x",
    "y",
    "z",
    "o",
    "b",
    "element",
    "polymer",
];

/// Columns forming the composite row key, in key order.
pub const KEY_COLUMNS: [&str; 5] = [
    "chain_name",
    "group_number",
    "group_name",
    "atom_name",
    "altloc",
];

/// How rows of an [`AtomTable`] are keyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableIndex {
    /// Rows are addressed by their atom ordinal.
    #[default]
    Ordinal,
    /// Rows are addressed by an [`AtomKey`].
    Composite,
}

/// Composite atom label `(chain name, group number, group name, atom name, alt-loc)`.
///
/// The alternate-location code is part of the key so that alternate conformations of the
/// same atom remain distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AtomKey {
    pub chain_name: SmolStr,
    pub group_number: SmolStr,
    pub group_name: SmolStr,
    pub atom_name: SmolStr,
    pub alt_loc: SmolStr,
}

impl AtomKey {
    pub fn new(
        chain_name: &str,
        group_number: &str,
        group_name: &str,
        atom_name: &str,
        alt_loc: &str,
    ) -> Self {
        Self {
            chain_name: SmolStr::new(chain_name),
            group_number: SmolStr::new(group_number),
            group_name: SmolStr::new(group_name),
            atom_name: SmolStr::new(atom_name),
            alt_loc: SmolStr::new(alt_loc),
        }
    }
}

impl fmt::Display for AtomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.chain_name, self.group_number, self.group_name, self.atom_name
        )?;
        if !self.alt_loc.is_empty() {
            write!(f, ":{}", self.alt_loc)?;
        }
        Ok(())
    }
}

/// One atom row of an [`AtomTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomRow<'a> {
    pub chain_name: &'a str,
    pub chain_id: &'a str,
    pub group_number: &'a str,
    pub group_name: &'a str,
    pub atom_name: &'a str,
    #[serde(rename = "altloc")]
    pub alt_loc: &'a str,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(rename = "o")]
    pub occupancy: f32,
    #[serde(rename = "b")]
    pub b_factor: f32,
    pub element: &'a str,
    pub polymer: bool,
}

impl AtomRow<'_> {
    pub fn key(&self) -> AtomKey {
        AtomKey::new(
            self.chain_name,
            self.group_number,
            self.group_name,
            self.atom_name,
            self.alt_loc,
        )
    }
}

/// Borrowed column set shared by every table built from one accessor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Columns<'a> {
    pub chain_names: &'a [SmolStr],
    pub chain_ids: &'a [SmolStr],
    pub group_numbers: &'a [SmolStr],
    pub group_names: &'a [SmolStr],
    pub atom_names: &'a [SmolStr],
    pub alt_locs: &'a [String],
    pub x: &'a [f32],
    pub y: &'a [f32],
    pub z: &'a [f32],
    pub occupancies: &'a [f32],
    pub b_factors: &'a [f32],
    pub elements: &'a [SmolStr],
    pub polymer: &'a [bool],
}

impl Columns<'_> {
    /// Builds the composite key of every row.
    pub fn keys(&self) -> Vec<AtomKey> {
        (0..self.chain_names.len())
            .map(|i| AtomKey {
                chain_name: self.chain_names[i].clone(),
                group_number: self.group_numbers[i].clone(),
                group_name: self.group_names[i].clone(),
                atom_name: self.atom_names[i].clone(),
                alt_loc: SmolStr::new(&self.alt_locs[i]),
            })
            .collect()
    }
}

/// Row-per-atom table over the columns of one accessor.
#[derive(Debug, Clone, Copy)]
pub struct AtomTable<'a> {
    columns: Columns<'a>,
    keys: Option<&'a [AtomKey]>,
}

impl<'a> AtomTable<'a> {
    pub(crate) fn new(columns: Columns<'a>, keys: Option<&'a [AtomKey]>) -> Self {
        Self { columns, keys }
    }

    pub fn len(&self) -> usize {
        self.columns.chain_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index(&self) -> TableIndex {
        if self.keys.is_some() {
            TableIndex::Composite
        } else {
            TableIndex::Ordinal
        }
    }

    /// Returns the row at atom ordinal `i`, or `None` when out of range.
    pub fn row(&self, i: usize) -> Option<AtomRow<'a>> {
        if i >= self.len() {
            return None;
        }
        let c = &self.columns;
        Some(AtomRow {
            chain_name: &c.chain_names[i],
            chain_id: &c.chain_ids[i],
            group_number: &c.group_numbers[i],
            group_name: &c.group_names[i],
            atom_name: &c.atom_names[i],
            alt_loc: &c.alt_locs[i],
            x: c.x[i],
            y: c.y[i],
            z: c.z[i],
            occupancy: c.occupancies[i],
            b_factor: c.b_factors[i],
            element: &c.elements[i],
            polymer: c.polymer[i],
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = AtomRow<'a>> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }

    /// Composite key of row `i`; `None` for ordinal-indexed tables.
    pub fn key(&self, i: usize) -> Option<&'a AtomKey> {
        self.keys.and_then(|keys| keys.get(i))
    }

    pub fn keys(&self) -> Option<&'a [AtomKey]> {
        self.keys
    }

    /// Finds the first row carrying `key`, regardless of the table's index mode.
    pub fn position(&self, key: &AtomKey) -> Option<usize> {
        match self.keys {
            Some(keys) => keys.iter().position(|k| k == key),
            None => self.rows().position(|row| {
                row.chain_name == key.chain_name
                    && row.group_number == key.group_number
                    && row.group_name == key.group_name
                    && row.atom_name == key.atom_name
                    && row.alt_loc == key.alt_loc
            }),
        }
    }

    pub fn x(&self) -> &'a [f32] {
        self.columns.x
    }

    pub fn y(&self) -> &'a [f32] {
        self.columns.y
    }

    pub fn z(&self) -> &'a [f32] {
        self.columns.z
    }

    pub fn polymer(&self) -> &'a [bool] {
        self.columns.polymer
    }
}
