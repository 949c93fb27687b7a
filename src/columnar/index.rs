//! Offset index mapping groups and chains onto contiguous atom and group ranges.
//!
//! The index is produced by a single depth-first walk over the record hierarchy. Each
//! offset array has one entry per unit plus a trailing sentinel, so unit `i` spans the
//! half-open range `offsets[i]..offsets[i + 1]`.

use super::error::Error;
use crate::model::record::StructureRecord;
use std::ops::Range;

/// Group and chain boundary offsets for the visited part of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIndex {
    group_to_atom: Vec<usize>,
    chain_to_atom: Vec<usize>,
    chain_to_group: Vec<usize>,
    num_models: usize,
}

impl StructureIndex {
    /// Walks the record hierarchy and records every group and chain start offset.
    ///
    /// Models are visited in order; with `first_model_only` the walk stops after model 0
    /// and nothing beyond it is read. Atom counts are taken from the template referenced
    /// by each group occurrence.
    ///
    /// # Arguments
    ///
    /// * `record` - Structure record to index.
    /// * `first_model_only` - Restrict the index to the first model.
    ///
    /// # Returns
    ///
    /// The populated index, or [`Error::StructureConsistency`] when the hierarchy refers
    /// past the end of an array, a template is missing or malformed, or the per-group,
    /// per-chain, or per-atom arrays are too short for the visited hierarchy. When every
    /// model is visited, arrays must match the walked counts exactly.
    pub fn build(record: &StructureRecord, first_model_only: bool) -> Result<Self, Error> {
        let id = record.structure_id.as_str();
        let num_models = if first_model_only {
            record.num_models().min(1)
        } else {
            record.num_models()
        };

        let mut group_to_atom = Vec::with_capacity(record.num_groups() + 1);
        let mut chain_to_atom = Vec::with_capacity(record.num_chains() + 1);
        let mut chain_to_group = Vec::with_capacity(record.num_chains() + 1);

        let (mut chain_count, mut group_count, mut atom_count) = (0usize, 0usize, 0usize);

        for &chains in &record.chains_per_model[..num_models] {
            for _ in 0..chains {
                chain_to_atom.push(atom_count);
                chain_to_group.push(group_count);

                let groups = *record.groups_per_chain.get(chain_count).ok_or_else(|| {
                    Error::inconsistent(
                        id,
                        format!(
                            "chain {chain_count} is outside groupsPerChain (length {})",
                            record.num_chains()
                        ),
                    )
                })?;

                for _ in 0..groups {
                    let template_id = *record.group_type_index.get(group_count).ok_or_else(|| {
                        Error::inconsistent(
                            id,
                            format!(
                                "group {group_count} is outside groupTypeIndex (length {})",
                                record.num_groups()
                            ),
                        )
                    })?;
                    let template = record
                        .group_templates
                        .get(template_id)
                        .ok_or_else(|| Error::missing_template(id, group_count, template_id))?;
                    if !template.is_consistent() {
                        return Err(Error::inconsistent(
                            id,
                            format!(
                                "template {template_id} ('{}') lists {} atom names but {} elements",
                                template.group_name,
                                template.atom_names.len(),
                                template.elements.len()
                            ),
                        ));
                    }

                    group_to_atom.push(atom_count);
                    group_count += 1;
                    atom_count += template.atom_count();
                }

                chain_count += 1;
            }
        }

        group_to_atom.push(atom_count);
        chain_to_atom.push(atom_count);
        chain_to_group.push(group_count);

        check_lengths(record, chain_count, group_count, atom_count, !first_model_only)?;

        if atom_count < record.num_atoms() {
            log::debug!(
                "{}: restricted to {} of {} atoms ({} models)",
                id,
                atom_count,
                record.num_atoms(),
                num_models
            );
            group_to_atom.shrink_to_fit();
            chain_to_atom.shrink_to_fit();
            chain_to_group.shrink_to_fit();
        }

        log::debug!(
            "{}: indexed {} atoms, {} groups, {} chains",
            id,
            atom_count,
            group_count,
            chain_count
        );

        Ok(Self {
            group_to_atom,
            chain_to_atom,
            chain_to_group,
            num_models,
        })
    }

    pub fn group_to_atom(&self) -> &[usize] {
        &self.group_to_atom
    }

    pub fn chain_to_atom(&self) -> &[usize] {
        &self.chain_to_atom
    }

    pub fn chain_to_group(&self) -> &[usize] {
        &self.chain_to_group
    }

    pub fn num_atoms(&self) -> usize {
        self.group_to_atom.last().copied().unwrap_or(0)
    }

    pub fn num_groups(&self) -> usize {
        self.group_to_atom.len() - 1
    }

    pub fn num_chains(&self) -> usize {
        self.chain_to_atom.len() - 1
    }

    pub fn num_models(&self) -> usize {
        self.num_models
    }

    /// Atom range of a group, or `None` when the ordinal is out of range.
    pub fn group_atoms(&self, group: usize) -> Option<Range<usize>> {
        span(&self.group_to_atom, group)
    }

    pub fn chain_atoms(&self, chain: usize) -> Option<Range<usize>> {
        span(&self.chain_to_atom, chain)
    }

    pub fn chain_groups(&self, chain: usize) -> Option<Range<usize>> {
        span(&self.chain_to_group, chain)
    }
}

fn span(offsets: &[usize], unit: usize) -> Option<Range<usize>> {
    let start = *offsets.get(unit)?;
    let end = *offsets.get(unit + 1)?;
    Some(start..end)
}

fn check_lengths(
    record: &StructureRecord,
    chains: usize,
    groups: usize,
    atoms: usize,
    exact: bool,
) -> Result<(), Error> {
    let group_arrays = [
        ("groupTypeIndex", record.group_type_index.len()),
        ("groupIds", record.group_ids.len()),
        ("insertionCodes", record.insertion_codes.len()),
        ("sequenceIndices", record.sequence_indices.len()),
    ];
    let chain_arrays = [
        ("groupsPerChain", record.groups_per_chain.len()),
        ("chainIds", record.chain_ids.len()),
        ("chainNames", record.chain_names.len()),
    ];
    let atom_arrays = [
        ("xCoords", record.x_coords.len()),
        ("yCoords", record.y_coords.len()),
        ("zCoords", record.z_coords.len()),
        ("occupancies", record.occupancies.len()),
        ("bFactors", record.b_factors.len()),
        ("altLocs", record.alt_locs.len()),
    ];

    let checks = group_arrays
        .into_iter()
        .map(|(name, len)| (name, len, groups))
        .chain(chain_arrays.into_iter().map(|(name, len)| (name, len, chains)))
        .chain(atom_arrays.into_iter().map(|(name, len)| (name, len, atoms)));

    for (name, len, needed) in checks {
        if len < needed {
            return Err(Error::inconsistent(
                record.structure_id.as_str(),
                format!("{name} has {len} entries but the hierarchy needs {needed}"),
            ));
        }
        if exact && len > needed {
            return Err(Error::inconsistent(
                record.structure_id.as_str(),
                format!("{name} has {len} entries but the full hierarchy covers only {needed}"),
            ));
        }
    }
    Ok(())
}

/// Maps every visited chain to the entity that claims it.
///
/// # Arguments
///
/// * `record` - Structure record whose entity list is consulted.
/// * `num_chains` - Number of chains covered by the index.
///
/// # Returns
///
/// One entity ordinal per visited chain, or [`Error::StructureConsistency`] when an entity
/// names a chain outside the record or a visited chain is claimed by zero or several
/// entities.
pub fn entity_chain_index(record: &StructureRecord, num_chains: usize) -> Result<Vec<usize>, Error> {
    let id = record.structure_id.as_str();
    let mut owners: Vec<Option<usize>> = vec![None; num_chains];

    for (entity_index, entity) in record.entities.iter().enumerate() {
        for &chain in &entity.chain_indices {
            if chain >= record.num_chains() {
                return Err(Error::inconsistent(
                    id,
                    format!(
                        "entity {entity_index} references chain {chain} but the record has {} chains",
                        record.num_chains()
                    ),
                ));
            }
            let Some(slot) = owners.get_mut(chain) else {
                continue;
            };
            if let Some(previous) = slot.replace(entity_index) {
                return Err(Error::inconsistent(
                    id,
                    format!("chain {chain} is claimed by entities {previous} and {entity_index}"),
                ));
            }
        }
    }

    owners
        .into_iter()
        .enumerate()
        .map(|(chain, owner)| {
            owner.ok_or_else(|| {
                Error::inconsistent(id, format!("chain {chain} does not belong to any entity"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columnar::fixtures;

    #[test]
    fn build_indexes_two_chain_scenario() {
        let record = fixtures::two_chain();

        let index = StructureIndex::build(&record, true).unwrap();

        assert_eq!(index.num_atoms(), 6);
        assert_eq!(index.num_groups(), 2);
        assert_eq!(index.num_chains(), 2);
        assert_eq!(index.num_models(), 1);
        assert_eq!(index.group_to_atom(), &[0, 5, 6]);
        assert_eq!(index.chain_to_atom(), &[0, 5, 6]);
        assert_eq!(index.chain_to_group(), &[0, 1, 2]);
    }

    #[test]
    fn build_first_model_only_ignores_later_models() {
        let single = StructureIndex::build(&fixtures::two_chain(), true).unwrap();
        let multi = StructureIndex::build(&fixtures::two_chain_two_models(), true).unwrap();

        assert_eq!(single, multi);
        assert_eq!(multi.group_to_atom().len(), multi.num_groups() + 1);
        assert_eq!(multi.chain_to_atom().len(), multi.num_chains() + 1);
    }

    #[test]
    fn build_first_model_only_never_reads_later_models() {
        let mut record = fixtures::two_chain_two_models();
        // Group 2 lives in model 1 only; a dangling template there must go unnoticed.
        record.group_type_index[2] = 99;

        assert!(StructureIndex::build(&record, true).is_ok());
        assert!(StructureIndex::build(&record, false).is_err());
    }

    #[test]
    fn build_all_models_covers_every_atom() {
        let record = fixtures::two_chain_two_models();

        let index = StructureIndex::build(&record, false).unwrap();

        assert_eq!(index.num_models(), 2);
        assert_eq!(index.num_chains(), 3);
        assert_eq!(index.num_groups(), 3);
        assert_eq!(index.num_atoms(), 11);
        assert_eq!(index.group_to_atom(), &[0, 5, 6, 11]);
        assert_eq!(index.chain_to_atom(), &[0, 5, 6, 11]);
        assert_eq!(index.chain_to_group(), &[0, 1, 2, 3]);
    }

    #[test]
    fn build_sentinels_equal_totals() {
        let record = fixtures::mixed_ligands();

        let index = StructureIndex::build(&record, true).unwrap();

        assert_eq!(index.group_to_atom()[index.num_groups()], index.num_atoms());
        assert_eq!(index.chain_to_atom()[index.num_chains()], index.num_atoms());
        assert_eq!(index.chain_to_group()[index.num_chains()], index.num_groups());
        assert_eq!(index.num_atoms(), record.num_atoms());
    }

    #[test]
    fn build_group_ranges_match_template_sizes() {
        let record = fixtures::mixed_ligands();

        let index = StructureIndex::build(&record, true).unwrap();

        for group in 0..index.num_groups() {
            let range = index.group_atoms(group).unwrap();
            let template = record.template_of(group).unwrap();
            assert_eq!(range.len(), template.atom_names.len());
        }
    }

    #[test]
    fn build_offsets_are_monotonic() {
        let index = StructureIndex::build(&fixtures::mixed_ligands(), true).unwrap();

        for offsets in [index.group_to_atom(), index.chain_to_atom(), index.chain_to_group()] {
            assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(offsets[0], 0);
        }
    }

    #[test]
    fn build_handles_empty_chain() {
        let mut record = fixtures::two_chain();
        record.chains_per_model = vec![3];
        record.groups_per_chain.push(0);
        record.chain_ids.push("C".into());
        record.chain_names.push("C".into());

        let index = StructureIndex::build(&record, true).unwrap();

        assert_eq!(index.chain_to_atom(), &[0, 5, 6, 6]);
        assert_eq!(index.chain_atoms(2), Some(6..6));
    }

    #[test]
    fn build_handles_empty_record() {
        let record = StructureRecord::default();

        let index = StructureIndex::build(&record, true).unwrap();

        assert_eq!(index.num_atoms(), 0);
        assert_eq!(index.num_groups(), 0);
        assert_eq!(index.num_chains(), 0);
        assert_eq!(index.num_models(), 0);
        assert_eq!(index.group_to_atom(), &[0]);
    }

    #[test]
    fn build_fails_on_missing_template() {
        let mut record = fixtures::two_chain();
        record.group_type_index[1] = 7;

        let err = StructureIndex::build(&record, true).unwrap_err();

        assert!(err.is_consistency());
        assert!(err.to_string().contains("group 1 references missing template 7"));
    }

    #[test]
    fn build_fails_when_hierarchy_overruns_group_types() {
        let mut record = fixtures::two_chain();
        record.groups_per_chain[1] = 2;

        let err = StructureIndex::build(&record, true).unwrap_err();

        assert!(err.is_consistency());
        assert!(err.to_string().contains("groupTypeIndex"));
    }

    #[test]
    fn build_fails_when_hierarchy_overruns_chains() {
        let mut record = fixtures::two_chain();
        record.chains_per_model[0] = 3;

        let err = StructureIndex::build(&record, true).unwrap_err();

        assert!(err.to_string().contains("groupsPerChain"));
    }

    #[test]
    fn build_fails_on_malformed_template() {
        let mut record = fixtures::two_chain();
        record.group_templates[0].elements.pop();

        let err = StructureIndex::build(&record, true).unwrap_err();

        assert!(err.is_consistency());
        assert!(err.to_string().contains("'ALA'"));
    }

    #[test]
    fn build_fails_when_coordinates_are_short() {
        let mut record = fixtures::two_chain();
        record.z_coords.pop();

        let err = StructureIndex::build(&record, true).unwrap_err();

        assert!(err.to_string().contains("zCoords has 5 entries but the hierarchy needs 6"));
    }

    #[test]
    fn build_fails_when_chain_labels_are_short() {
        let mut record = fixtures::two_chain();
        record.chain_names.pop();

        let err = StructureIndex::build(&record, true).unwrap_err();

        assert!(err.to_string().contains("chainNames"));
    }

    #[test]
    fn build_all_models_rejects_trailing_atoms() {
        let mut record = fixtures::two_chain();
        for column in [&mut record.x_coords, &mut record.y_coords, &mut record.z_coords] {
            column.push(0.0);
        }

        assert!(StructureIndex::build(&record, true).is_ok());
        let err = StructureIndex::build(&record, false).unwrap_err();

        assert!(err.is_consistency());
        assert!(err.to_string().contains("xCoords has 7 entries"));
    }

    #[test]
    fn build_all_models_rejects_unvisited_chain() {
        let mut record = fixtures::two_chain();
        record.groups_per_chain.push(0);

        let err = StructureIndex::build(&record, false).unwrap_err();

        assert!(err.is_consistency());
        assert!(err.to_string().contains("groupsPerChain has 3 entries"));
    }

    #[test]
    fn build_all_models_rejects_unvisited_group() {
        let mut record = fixtures::two_chain();
        record.group_type_index.push(0);

        let err = StructureIndex::build(&record, false).unwrap_err();

        assert!(err.is_consistency());
        assert!(err.to_string().contains("groupTypeIndex has 3 entries"));
    }

    #[test]
    fn span_helpers_return_half_open_ranges() {
        let index = StructureIndex::build(&fixtures::two_chain(), true).unwrap();

        assert_eq!(index.group_atoms(0), Some(0..5));
        assert_eq!(index.group_atoms(1), Some(5..6));
        assert_eq!(index.group_atoms(2), None);
        assert_eq!(index.chain_groups(1), Some(1..2));
    }

    #[test]
    fn entity_chain_index_maps_chains() {
        let record = fixtures::two_chain();

        assert_eq!(entity_chain_index(&record, 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn entity_chain_index_ignores_chains_outside_index() {
        let record = fixtures::two_chain_two_models();

        assert_eq!(entity_chain_index(&record, 2).unwrap(), vec![0, 1]);
        assert_eq!(entity_chain_index(&record, 3).unwrap(), vec![0, 1, 0]);
    }

    #[test]
    fn entity_chain_index_rejects_unclaimed_chain() {
        let mut record = fixtures::two_chain();
        record.entities.pop();

        let err = entity_chain_index(&record, 2).unwrap_err();

        assert!(err.to_string().contains("chain 1 does not belong to any entity"));
    }

    #[test]
    fn entity_chain_index_rejects_doubly_claimed_chain() {
        let mut record = fixtures::two_chain();
        record.entities[1].chain_indices.push(0);

        let err = entity_chain_index(&record, 2).unwrap_err();

        assert!(err.to_string().contains("claimed by entities 0 and 1"));
    }

    #[test]
    fn entity_chain_index_rejects_out_of_range_chain() {
        let mut record = fixtures::two_chain();
        record.entities[0].chain_indices.push(9);

        let err = entity_chain_index(&record, 2).unwrap_err();

        assert!(err.is_consistency());
    }
}
