//! Flat, hierarchy-encoded macromolecular structure record.
//!
//! A `StructureRecord` stores a structure the way compact interchange formats do: the
//! model → chain → group → atom hierarchy is encoded as count arrays, group occurrences
//! point into a shared dictionary of [`GroupTemplate`]s, and per-atom coordinates live in
//! parallel arrays. The record is read-only input for the columnar accessor.

use super::entity::Entity;
use super::template::GroupTemplate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable hierarchical structure consumed by [`crate::ColumnarStructure`].
///
/// Counts are implied by array lengths: `chains_per_model.len()` is the model count,
/// `groups_per_chain.len()` the chain count, `group_type_index.len()` the group count, and
/// `x_coords.len()` the total atom count across every model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureRecord {
    /// Identifier of the structure (typically a PDB ID such as `1STP`).
    #[serde(default)]
    pub structure_id: String,
    /// Number of chains in each model, in model order.
    pub chains_per_model: Vec<usize>,
    /// Number of groups in each chain, in chain order across all models.
    pub groups_per_chain: Vec<usize>,
    /// Template ordinal referenced by each group occurrence.
    pub group_type_index: Vec<usize>,
    /// Shared dictionary of group templates.
    pub group_templates: Vec<GroupTemplate>,
    /// Author group (residue) number of each group occurrence.
    pub group_ids: Vec<i32>,
    /// Insertion code of each group occurrence; empty when absent.
    pub insertion_codes: Vec<String>,
    /// Position of each group in its entity sequence, or `-1` when unaligned.
    pub sequence_indices: Vec<i32>,
    /// Internal (label) chain identifier of each chain.
    pub chain_ids: Vec<String>,
    /// External (author) chain name of each chain.
    pub chain_names: Vec<String>,
    pub entities: Vec<Entity>,
    pub x_coords: Vec<f32>,
    pub y_coords: Vec<f32>,
    pub z_coords: Vec<f32>,
    pub occupancies: Vec<f32>,
    pub b_factors: Vec<f32>,
    /// Alternate location code of each atom; empty when absent.
    pub alt_locs: Vec<String>,
}

impl StructureRecord {
    pub fn num_models(&self) -> usize {
        self.chains_per_model.len()
    }

    pub fn num_chains(&self) -> usize {
        self.groups_per_chain.len()
    }

    pub fn num_groups(&self) -> usize {
        self.group_type_index.len()
    }

    /// Total atom count over every model, as declared by the coordinate arrays.
    pub fn num_atoms(&self) -> usize {
        self.x_coords.len()
    }

    /// Looks up the template referenced by a group occurrence.
    ///
    /// # Arguments
    ///
    /// * `group` - Group ordinal across the whole record.
    ///
    /// # Returns
    ///
    /// `Some(&GroupTemplate)` when both the group ordinal and its template ordinal resolve,
    /// otherwise `None`.
    pub fn template_of(&self, group: usize) -> Option<&GroupTemplate> {
        self.group_type_index
            .get(group)
            .and_then(|&template| self.group_templates.get(template))
    }

    pub fn is_empty(&self) -> bool {
        self.chains_per_model.is_empty()
    }
}

impl fmt::Display for StructureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StructureRecord {{ id: \"{}\", models: {}, chains: {}, groups: {}, atoms: {} }}",
            self.structure_id,
            self.num_models(),
            self.num_chains(),
            self.num_groups(),
            self.num_atoms()
        )
    }
}
