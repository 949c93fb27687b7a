use std::collections::BTreeSet;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use bio_columnar::ops::{RecordSummary, summarize};
use bio_columnar::{ColumnarConfig, ColumnarStructure, EntityType, StructureRecord};

use crate::commands::{print_boxed_label, run_with_spinner};

/// Report-only command that inspects one record.
#[derive(Debug, Default, Args)]
pub struct InfoArgs {
    /// Also list entity types that do not occur in the record.
    #[arg(long)]
    pub all_types: bool,
}

/// Computes and prints chain and entity-type statistics for a record.
pub fn run(record: &StructureRecord, config: ColumnarConfig, args: &InfoArgs) -> Result<()> {
    let (chain_reports, summary) = run_with_spinner("Analyzing record", || {
        let accessor = ColumnarStructure::with_config(record, config);
        let reports = collect_chain_reports(&accessor)?;
        let summary = summarize(&accessor)
            .with_context(|| format!("Failed to summarize '{}'", record.structure_id))?;
        Ok((reports, summary))
    })?;

    print_tables(record, &chain_reports, &summary, args.all_types)?;
    Ok(())
}

fn collect_chain_reports(accessor: &ColumnarStructure<'_>) -> Result<Vec<ChainReport>> {
    let record = accessor.record();
    let index = accessor
        .index()
        .with_context(|| format!("Failed to index '{}'", record.structure_id))?;
    let chain_entities = accessor.chain_to_entity_indices()?;
    let types = accessor.entity_types()?;

    let reports = (0..index.num_chains())
        .map(|chain| {
            let atoms = index.chain_atoms(chain).unwrap_or_default();
            let groups = index.chain_groups(chain).unwrap_or_default();
            let present: BTreeSet<EntityType> = types[atoms.clone()].iter().copied().collect();
            let entity = chain_entities[chain];
            ChainReport {
                id: record.chain_ids[chain].clone(),
                name: record.chain_names[chain].clone(),
                entity: format!("{} ({})", entity, record.entities[entity].kind),
                groups: groups.len(),
                atoms: atoms.len(),
                types: present
                    .iter()
                    .map(EntityType::code)
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })
        .collect();
    Ok(reports)
}

fn print_tables(
    record: &StructureRecord,
    reports: &[ChainReport],
    summary: &RecordSummary,
    all_types: bool,
) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "BioColumnar Record Report")?;
    writeln!(&mut stderr)?;

    let mut chain_table = Table::new();
    print_boxed_label(&mut stderr, "Chain Breakdown")?;
    chain_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    chain_table.set_titles(row!["Chain", "Name", "Entity", "Groups", "Atoms", "Types"]);
    for report in reports {
        chain_table.add_row(row![
            report.id,
            report.name,
            report.entity,
            report.groups,
            report.atoms,
            report.types
        ]);
    }
    chain_table
        .print(&mut stderr)
        .context("Failed to render chain breakdown")?;
    writeln!(&mut stderr)?;

    let mut type_table = Table::new();
    print_boxed_label(&mut stderr, "Entity Types")?;
    type_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    type_table.set_titles(row!["Code", "Description", "Groups", "Atoms"]);
    for entity_type in EntityType::ALL {
        let count = summary.count(entity_type);
        if count.groups == 0 && !all_types {
            continue;
        }
        type_table.add_row(row![
            entity_type.code(),
            entity_type.description(),
            count.groups,
            count.atoms
        ]);
    }
    type_table
        .print(&mut stderr)
        .context("Failed to render entity types")?;
    writeln!(&mut stderr)?;

    let mut summary_table = Table::new();
    print_boxed_label(&mut stderr, "Record Summary")?;
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row!["Structure ID", display_id(&summary.structure_id)]);
    summary_table.add_row(row![
        "Models",
        format!("{} of {}", summary.models, record.num_models())
    ]);
    summary_table.add_row(row!["Chains", summary.chains]);
    summary_table.add_row(row!["Groups", summary.groups]);
    summary_table.add_row(row![
        "Atoms",
        format!("{} of {}", summary.atoms, record.num_atoms())
    ]);
    summary_table.add_row(row!["Polymer Atoms", summary.polymer_atoms]);
    summary_table
        .print(&mut stderr)
        .context("Failed to render record summary")?;

    Ok(())
}

fn display_id(id: &str) -> &str {
    if id.is_empty() { "(unnamed)" } else { id }
}

#[derive(Debug)]
struct ChainReport {
    id: String,
    name: String,
    entity: String,
    groups: usize,
    atoms: usize,
    types: String,
}
