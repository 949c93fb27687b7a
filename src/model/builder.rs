//! Incremental construction of consistent [`StructureRecord`]s.
//!
//! Readers and tests describe a structure top-down (models, then chains, then groups) and
//! the builder derives every count array and per-atom array, so the resulting record obeys
//! the hierarchy invariants without hand-maintained bookkeeping.

use super::entity::Entity;
use super::record::StructureRecord;
use super::template::GroupTemplate;
use super::types::EntityKind;

/// Per-atom coordinate and quality data attached to a group occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomSite {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub occupancy: f32,
    pub b_factor: f32,
    pub alt_loc: Option<char>,
}

impl AtomSite {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            ..Self::default()
        }
    }

    pub fn with_alt_loc(mut self, alt_loc: char) -> Self {
        self.alt_loc = Some(alt_loc);
        self
    }
}

impl Default for AtomSite {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            occupancy: 1.0,
            b_factor: 0.0,
            alt_loc: None,
        }
    }
}

/// Builder producing a [`StructureRecord`] in depth-first hierarchy order.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: StructureRecord,
}

impl RecordBuilder {
    pub fn new(structure_id: &str) -> Self {
        Self {
            record: StructureRecord {
                structure_id: structure_id.to_string(),
                ..StructureRecord::default()
            },
        }
    }

    /// Registers a group template and returns its ordinal.
    pub fn add_template(&mut self, template: GroupTemplate) -> usize {
        self.record.group_templates.push(template);
        self.record.group_templates.len() - 1
    }

    /// Opens a new model; subsequent chains belong to it.
    pub fn begin_model(&mut self) -> &mut Self {
        self.record.chains_per_model.push(0);
        self
    }

    /// Opens a new chain in the current model and returns its ordinal.
    ///
    /// A model is opened implicitly when none exists yet.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - Internal (label) chain identifier.
    /// * `chain_name` - External (author) chain name.
    pub fn begin_chain(&mut self, chain_id: &str, chain_name: &str) -> usize {
        if self.record.chains_per_model.is_empty() {
            self.begin_model();
        }
        if let Some(count) = self.record.chains_per_model.last_mut() {
            *count += 1;
        }
        self.record.groups_per_chain.push(0);
        self.record.chain_ids.push(chain_id.to_string());
        self.record.chain_names.push(chain_name.to_string());
        self.record.groups_per_chain.len() - 1
    }

    /// Appends a group whose atoms all take default sites.
    pub fn add_group(
        &mut self,
        template: usize,
        group_id: i32,
        insertion_code: &str,
        sequence_index: i32,
    ) -> usize {
        let atom_count = self
            .record
            .group_templates
            .get(template)
            .map_or(0, GroupTemplate::atom_count);
        let sites = vec![AtomSite::default(); atom_count];
        self.add_group_with_sites(template, group_id, insertion_code, sequence_index, &sites)
    }

    /// Appends a group to the current chain together with explicit atom sites.
    ///
    /// # Arguments
    ///
    /// * `template` - Ordinal returned by [`RecordBuilder::add_template`].
    /// * `group_id` - Author group number.
    /// * `insertion_code` - Insertion code, empty when absent.
    /// * `sequence_index` - Sequence alignment position or `-1`.
    /// * `sites` - One site per template atom, in template order.
    ///
    /// # Returns
    ///
    /// The ordinal of the new group across the whole record.
    pub fn add_group_with_sites(
        &mut self,
        template: usize,
        group_id: i32,
        insertion_code: &str,
        sequence_index: i32,
        sites: &[AtomSite],
    ) -> usize {
        debug_assert!(
            self.record
                .group_templates
                .get(template)
                .is_none_or(|t| t.atom_count() == sites.len()),
            "Site count {} does not match template {} of '{}'",
            sites.len(),
            template,
            self.record.structure_id
        );
        if self.record.groups_per_chain.is_empty() {
            self.begin_chain("", "");
        }
        if let Some(count) = self.record.groups_per_chain.last_mut() {
            *count += 1;
        }

        self.record.group_type_index.push(template);
        self.record.group_ids.push(group_id);
        self.record.insertion_codes.push(insertion_code.to_string());
        self.record.sequence_indices.push(sequence_index);

        for site in sites {
            self.record.x_coords.push(site.x);
            self.record.y_coords.push(site.y);
            self.record.z_coords.push(site.z);
            self.record.occupancies.push(site.occupancy);
            self.record.b_factors.push(site.b_factor);
            self.record
                .alt_locs
                .push(site.alt_loc.map(String::from).unwrap_or_default());
        }

        self.record.group_type_index.len() - 1
    }

    /// Declares an entity over the given chain ordinals and returns its ordinal.
    pub fn add_entity(&mut self, kind: EntityKind, chain_indices: Vec<usize>) -> usize {
        self.record.entities.push(Entity::new(kind, chain_indices));
        self.record.entities.len() - 1
    }

    pub fn build(self) -> StructureRecord {
        self.record
    }
}
