//! Per-record composition statistics derived from the columnar accessor.
//!
//! Summaries run one [`ColumnarStructure`] per record, so a batch of records can be
//! summarized in parallel without sharing any accessor between threads.

use crate::columnar::{ColumnarConfig, ColumnarStructure, Error};
use crate::model::record::StructureRecord;
use crate::model::types::EntityType;
use crate::utils::parallel::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Group and atom tally for one entity type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub groups: usize,
    pub atoms: usize,
}

/// Composition of the visited part of one structure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub structure_id: String,
    pub models: usize,
    pub chains: usize,
    pub groups: usize,
    pub atoms: usize,
    pub polymer_atoms: usize,
    /// Per-type tallies; groups without atoms carry no type and are not counted here.
    pub entity_types: BTreeMap<EntityType, TypeCount>,
}

impl RecordSummary {
    /// Tally for one type, zero when the type does not occur.
    pub fn count(&self, entity_type: EntityType) -> TypeCount {
        self.entity_types
            .get(&entity_type)
            .copied()
            .unwrap_or_default()
    }
}

impl fmt::Display for RecordSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecordSummary {{ id: \"{}\", models: {}, chains: {}, groups: {}, atoms: {} }}",
            self.structure_id, self.models, self.chains, self.groups, self.atoms
        )
    }
}

/// Summarizes one record through a fresh columnar accessor.
///
/// # Arguments
///
/// * `record` - Structure record to summarize.
/// * `config` - Accessor configuration (model restriction).
///
/// # Returns
///
/// The composition summary, or the accessor error raised while indexing or classifying.
pub fn summarize_record(
    record: &StructureRecord,
    config: ColumnarConfig,
) -> Result<RecordSummary, Error> {
    summarize(&ColumnarStructure::with_config(record, config))
}

/// Summarizes the record behind an existing accessor, reusing its populated columns.
pub fn summarize(accessor: &ColumnarStructure<'_>) -> Result<RecordSummary, Error> {
    let record = accessor.record();
    let index = accessor.index()?;
    let types = accessor.entity_types()?;
    let polymer = accessor.polymer_flags()?;

    let mut entity_types: BTreeMap<EntityType, TypeCount> = BTreeMap::new();
    for group in 0..index.num_groups() {
        let Some(range) = index.group_atoms(group) else {
            continue;
        };
        if range.is_empty() {
            continue;
        }
        let tally = entity_types.entry(types[range.start]).or_default();
        tally.groups += 1;
        tally.atoms += range.len();
    }

    let summary = RecordSummary {
        structure_id: record.structure_id.clone(),
        models: index.num_models(),
        chains: index.num_chains(),
        groups: index.num_groups(),
        atoms: index.num_atoms(),
        polymer_atoms: polymer.iter().filter(|&&p| p).count(),
        entity_types,
    };

    log::debug!("{}", summary);
    Ok(summary)
}

/// Summarizes many records, one accessor per record.
///
/// Records are processed in parallel when the `parallel` feature is enabled. The output
/// keeps input order and a failing record does not abort the rest of the batch.
pub fn summarize_records(
    records: &[StructureRecord],
    config: ColumnarConfig,
) -> Vec<Result<RecordSummary, Error>> {
    records
        .par_iter()
        .enumerate()
        .map(|(position, record)| {
            summarize_record(record, config).inspect_err(|err| {
                log::warn!("record {} ('{}') skipped: {}", position, record.structure_id, err);
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builder::RecordBuilder;
    use crate::model::template::GroupTemplate;
    use crate::model::types::EntityKind;

    fn protein_with_water(id: &str, waters: usize) -> StructureRecord {
        let mut builder = RecordBuilder::new(id);
        let gly = builder.add_template(GroupTemplate::new(
            "GLY",
            "PEPTIDE LINKING",
            &[("N", "N"), ("CA", "C"), ("C", "C"), ("O", "O")],
        ));
        let hoh = builder.add_template(GroupTemplate::new("HOH", "NON-POLYMER", &[("O", "O")]));
        let zn = builder.add_template(GroupTemplate::new("ZN", "NON-POLYMER", &[("ZN", "ZN")]));

        builder.begin_model();
        let a = builder.begin_chain("A", "A");
        builder.add_group(gly, 1, "", 0);
        builder.add_group(gly, 2, "", 1);
        let b = builder.begin_chain("B", "A");
        builder.add_group(zn, 201, "", -1);
        let c = builder.begin_chain("C", "A");
        for i in 0..waters {
            builder.add_group(hoh, 301 + i as i32, "", -1);
        }
        builder.add_entity(EntityKind::Polymer, vec![a]);
        builder.add_entity(EntityKind::NonPolymer, vec![b]);
        builder.add_entity(EntityKind::Water, vec![c]);
        builder.build()
    }

    #[test]
    fn summarize_record_counts_types() {
        let record = protein_with_water("1ABC", 3);

        let summary = summarize_record(&record, ColumnarConfig::default()).unwrap();

        assert_eq!(summary.structure_id, "1ABC");
        assert_eq!(summary.models, 1);
        assert_eq!(summary.chains, 3);
        assert_eq!(summary.groups, 6);
        assert_eq!(summary.atoms, 12);
        assert_eq!(summary.polymer_atoms, 8);
        assert_eq!(summary.count(EntityType::Pro), TypeCount { groups: 2, atoms: 8 });
        assert_eq!(summary.count(EntityType::Lgi), TypeCount { groups: 1, atoms: 1 });
        assert_eq!(summary.count(EntityType::Wat), TypeCount { groups: 3, atoms: 3 });
        assert_eq!(summary.count(EntityType::Dna), TypeCount::default());
    }

    #[test]
    fn summarize_reuses_accessor_columns() {
        let record = protein_with_water("1ABC", 2);
        let accessor = ColumnarStructure::new(&record);
        accessor.entity_types().unwrap();
        let before = accessor.computations();

        let summary = summarize(&accessor).unwrap();

        assert_eq!(accessor.computations(), before);
        assert_eq!(summary, summarize_record(&record, ColumnarConfig::default()).unwrap());
    }

    #[test]
    fn summarize_record_skips_empty_groups_in_type_counts() {
        let mut builder = RecordBuilder::new("EMPT");
        let unk = builder.add_template(GroupTemplate::new("UNX", "NON-POLYMER", &[]));
        builder.begin_chain("A", "A");
        builder.add_group(unk, 1, "", -1);
        builder.add_entity(EntityKind::NonPolymer, vec![0]);
        let record = builder.build();

        let summary = summarize_record(&record, ColumnarConfig::default()).unwrap();

        assert_eq!(summary.groups, 1);
        assert_eq!(summary.atoms, 0);
        assert!(summary.entity_types.is_empty());
    }

    #[test]
    fn summarize_records_keeps_order_and_isolates_failures() {
        let mut broken = protein_with_water("BAD1", 1);
        broken.group_type_index[0] = 42;
        let records = vec![
            protein_with_water("1AAA", 1),
            broken,
            protein_with_water("1CCC", 5),
        ];

        let results = summarize_records(&records, ColumnarConfig::default());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().structure_id, "1AAA");
        assert!(results[1].as_ref().unwrap_err().is_consistency());
        assert_eq!(results[2].as_ref().unwrap().count(EntityType::Wat).groups, 5);
    }

    #[test]
    fn summary_display_lists_counts() {
        let summary = summarize_record(&protein_with_water("1XYZ", 0), ColumnarConfig::default())
            .unwrap();

        assert_eq!(
            summary.to_string(),
            "RecordSummary { id: \"1XYZ\", models: 1, chains: 3, groups: 3, atoms: 9 }"
        );
    }

    #[test]
    fn summary_serializes_type_codes_as_keys() {
        let summary = summarize_record(&protein_with_water("1XYZ", 1), ColumnarConfig::default())
            .unwrap();

        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["structureId"], "1XYZ");
        assert_eq!(value["entityTypes"]["WAT"]["atoms"], 1);
        assert_eq!(value["polymerAtoms"], 8);
    }
}
