//! Shared structure records for columnar unit tests.

use crate::model::builder::{AtomSite, RecordBuilder};
use crate::model::record::StructureRecord;
use crate::model::template::GroupTemplate;
use crate::model::types::EntityKind;

pub fn alanine() -> GroupTemplate {
    GroupTemplate::new(
        "ALA",
        "L-PEPTIDE LINKING",
        &[("N", "N"), ("CA", "C"), ("C", "C"), ("O", "O"), ("CB", "C")],
    )
}

pub fn water(name: &str) -> GroupTemplate {
    GroupTemplate::new(name, "NON-POLYMER", &[("O", "O")])
}

fn sites(start: usize, count: usize) -> Vec<AtomSite> {
    (start..start + count)
        .map(|i| {
            let v = i as f32;
            AtomSite {
                x: v,
                y: v + 0.5,
                z: -v,
                occupancy: 1.0,
                b_factor: 10.0 + v,
                alt_loc: None,
            }
        })
        .collect()
}

fn two_chain_builder() -> RecordBuilder {
    let mut builder = RecordBuilder::new("2CHN");
    let ala = builder.add_template(alanine());
    let hoh = builder.add_template(water("HOH"));

    builder.begin_model();
    builder.begin_chain("A", "A");
    builder.add_group_with_sites(ala, 1, "", 0, &sites(0, 5));
    builder.begin_chain("B", "A");
    builder.add_group_with_sites(hoh, 101, "", -1, &sites(5, 1));
    builder
}

/// Chain A with one 5-atom alanine, chain B with one water.
pub fn two_chain() -> StructureRecord {
    let mut builder = two_chain_builder();
    builder.add_entity(EntityKind::Polymer, vec![0]);
    builder.add_entity(EntityKind::Water, vec![1]);
    builder.build()
}

/// [`two_chain`] plus a second model that repeats chain A only.
pub fn two_chain_two_models() -> StructureRecord {
    let mut builder = two_chain_builder();
    builder.begin_model();
    builder.begin_chain("A", "A");
    builder.add_group_with_sites(0, 1, "", 0, &sites(6, 5));
    builder.add_entity(EntityKind::Polymer, vec![0, 2]);
    builder.add_entity(EntityKind::Water, vec![1]);
    builder.build()
}

/// One chain per classification branch; group order yields
/// PRO, PRO, UNK, DNA, RNA, PSR, LGO, LGI, LGI, SAC, LGI, LGI, LGI, WAT, WAT.
pub fn mixed_ligands() -> StructureRecord {
    let mut builder = RecordBuilder::new("MIX1");
    let ala = builder.add_template(alanine());
    let gly = builder.add_template(GroupTemplate::new(
        "GLY",
        "PEPTIDE LINKING",
        &[("N", "N"), ("CA", "C"), ("C", "C"), ("O", "O")],
    ));
    let unl = builder.add_template(GroupTemplate::new("UNL", "OTHER", &[("C1", "C")]));
    let da = builder.add_template(GroupTemplate::new(
        "DA",
        "DNA LINKING",
        &[("P", "P"), ("C1'", "C"), ("N9", "N")],
    ));
    let a = builder.add_template(GroupTemplate::new(
        "A",
        "RNA LINKING",
        &[("P", "P"), ("C1'", "C"), ("N9", "N")],
    ));
    let bgc = builder.add_template(GroupTemplate::new(
        "BGC",
        "D-SACCHARIDE, BETA LINKING",
        &[("C1", "C"), ("O1", "O")],
    ));
    let hem = builder.add_template(GroupTemplate::new(
        "HEM",
        "NON-POLYMER",
        &[("FE", "FE"), ("NA", "N"), ("C1A", "C")],
    ));
    let co2 = builder.add_template(GroupTemplate::new(
        "CO2",
        "NON-POLYMER",
        &[("C", "C"), ("O1", "O"), ("O2", "O")],
    ));
    let so4 = builder.add_template(GroupTemplate::new(
        "SO4",
        "NON-POLYMER",
        &[("S", "S"), ("O1", "O"), ("O2", "O"), ("O3", "O"), ("O4", "O")],
    ));
    let nag = builder.add_template(GroupTemplate::new(
        "NAG",
        "D-SACCHARIDE",
        &[("C1", "C"), ("O1", "O"), ("N2", "N")],
    ));
    let cmo = builder.add_template(GroupTemplate::new("CMO", "NON-POLYMER", &[("C", "C"), ("O", "O")]));
    let cyn = builder.add_template(GroupTemplate::new("CYN", "NON-POLYMER", &[("C", "C"), ("N", "N")]));
    let zn = builder.add_template(GroupTemplate::new("ZN", "NON-POLYMER", &[("ZN", "ZN")]));
    let hoh = builder.add_template(water("HOH"));
    let dod = builder.add_template(water("DOD"));

    let chains: [(&str, EntityKind, &[usize]); 12] = [
        ("A", EntityKind::Polymer, &[ala, gly, unl]),
        ("B", EntityKind::Polymer, &[da]),
        ("C", EntityKind::Polymer, &[a]),
        ("D", EntityKind::Polymer, &[bgc]),
        ("E", EntityKind::NonPolymer, &[hem]),
        ("F", EntityKind::NonPolymer, &[co2]),
        ("G", EntityKind::NonPolymer, &[so4]),
        ("H", EntityKind::NonPolymer, &[nag]),
        ("I", EntityKind::NonPolymer, &[cmo]),
        ("J", EntityKind::NonPolymer, &[cyn]),
        ("K", EntityKind::NonPolymer, &[zn]),
        ("L", EntityKind::Water, &[hoh, dod]),
    ];

    builder.begin_model();
    for (chain_id, kind, templates) in chains {
        let chain = builder.begin_chain(chain_id, chain_id);
        for (position, &template) in templates.iter().enumerate() {
            let sequence_index = if kind.is_polymer() { position as i32 } else { -1 };
            builder.add_group(template, position as i32 + 1, "", sequence_index);
        }
        builder.add_entity(kind, vec![chain]);
    }
    builder.build()
}

/// Serine whose side-chain oxygen is modelled in two alternate conformations,
/// followed by a residue carrying an insertion code.
pub fn alt_conformers() -> StructureRecord {
    let mut builder = RecordBuilder::new("ALT1");
    let ser = builder.add_template(GroupTemplate::new(
        "SER",
        "L-PEPTIDE LINKING",
        &[("N", "N"), ("CA", "C"), ("OG", "O"), ("OG", "O")],
    ));
    let ala = builder.add_template(alanine());

    builder.begin_model();
    builder.begin_chain("A", "H");
    builder.add_group_with_sites(
        ser,
        52,
        "",
        0,
        &[
            AtomSite::new(0.0, 0.0, 0.0),
            AtomSite::new(1.0, 0.0, 0.0),
            AtomSite::new(2.0, 0.0, 0.0).with_alt_loc('A'),
            AtomSite::new(2.0, 1.0, 0.0).with_alt_loc('B'),
        ],
    );
    builder.add_group(ala, 52, "A", 1);
    builder.add_entity(EntityKind::Polymer, vec![0]);
    builder.build()
}
