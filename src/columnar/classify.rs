//! Entity-type classification of chemical groups.
//!
//! The decision procedure is order sensitive: polymer membership is checked first, then
//! water, then free saccharides, and only the remaining groups fall through to the
//! carbon-based organic/inorganic ligand heuristic.

use crate::model::types::EntityType;

/// Carbon-containing components that are nevertheless treated as inorganic.
const INORGANIC_CARBON_GROUPS: [&str; 3] = ["CO2", "CMO", "CYN"];

const WATER_GROUPS: [&str; 2] = ["HOH", "DOD"];

/// Classifies one group from its polymer flag, component type, name, and elements.
///
/// # Arguments
///
/// * `polymer` - Whether the group's chain belongs to a polymer entity.
/// * `chem_comp_type` - Chemical component type of the group template.
/// * `group_name` - Group (component) name, e.g. `"HOH"`.
/// * `elements` - Element symbols of the atoms within the group.
///
/// # Returns
///
/// The first matching [`EntityType`] of the fixed decision sequence.
pub fn classify_group<S: AsRef<str>>(
    polymer: bool,
    chem_comp_type: &str,
    group_name: &str,
    elements: &[S],
) -> EntityType {
    if polymer {
        return classify_polymer(chem_comp_type);
    }
    if WATER_GROUPS.contains(&group_name) {
        return EntityType::Wat;
    }
    if chem_comp_type.contains("SACCHARIDE") {
        return EntityType::Sac;
    }

    let organic = elements.iter().any(|e| e.as_ref() == "C")
        && !INORGANIC_CARBON_GROUPS.contains(&group_name);
    if organic {
        EntityType::Lgo
    } else {
        EntityType::Lgi
    }
}

fn classify_polymer(chem_comp_type: &str) -> EntityType {
    if chem_comp_type.contains("PEPTIDE") {
        EntityType::Pro
    } else if chem_comp_type.contains("DNA") {
        EntityType::Dna
    } else if chem_comp_type.contains("RNA") {
        EntityType::Rna
    } else if chem_comp_type.contains("SACCHARIDE") {
        EntityType::Psr
    } else {
        EntityType::Unk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn polymer_peptide_linking_is_protein() {
        assert_eq!(
            classify_group(true, "L-PEPTIDE LINKING", "ALA", &["N", "C", "C", "O", "C"]),
            EntityType::Pro
        );
        assert_eq!(
            classify_group(true, "PEPTIDE-LIKE", "XXX", &NONE),
            EntityType::Pro
        );
    }

    #[test]
    fn polymer_nucleotides_split_by_backbone() {
        assert_eq!(classify_group(true, "DNA LINKING", "DA", &NONE), EntityType::Dna);
        assert_eq!(classify_group(true, "RNA LINKING", "A", &NONE), EntityType::Rna);
    }

    #[test]
    fn polymer_saccharide_is_polysaccharide() {
        assert_eq!(
            classify_group(true, "D-SACCHARIDE, BETA LINKING", "BGC", &["C"]),
            EntityType::Psr
        );
    }

    #[test]
    fn polymer_with_other_type_is_unknown() {
        assert_eq!(classify_group(true, "OTHER", "UNL", &["C"]), EntityType::Unk);
        assert_eq!(classify_group(true, "", "UNL", &NONE), EntityType::Unk);
    }

    #[test]
    fn polymer_check_preempts_water_name() {
        assert_eq!(classify_group(true, "NON-POLYMER", "HOH", &["O"]), EntityType::Unk);
    }

    #[test]
    fn water_names_classify_as_water_regardless_of_elements() {
        assert_eq!(classify_group(false, "NON-POLYMER", "HOH", &["O"]), EntityType::Wat);
        assert_eq!(classify_group(false, "NON-POLYMER", "DOD", &["O"]), EntityType::Wat);
        assert_eq!(classify_group(false, "D-SACCHARIDE", "HOH", &["C"]), EntityType::Wat);
        assert_eq!(classify_group(false, "", "HOH", &NONE), EntityType::Wat);
    }

    #[test]
    fn water_check_is_exact() {
        assert_eq!(classify_group(false, "NON-POLYMER", "hoh", &["O"]), EntityType::Lgi);
        assert_eq!(classify_group(false, "NON-POLYMER", "HOH2", &["O"]), EntityType::Lgi);
    }

    #[test]
    fn free_saccharide_is_saccharide() {
        assert_eq!(
            classify_group(false, "D-SACCHARIDE", "NAG", &["C", "O", "N"]),
            EntityType::Sac
        );
    }

    #[test]
    fn carbon_ligand_is_organic() {
        assert_eq!(
            classify_group(false, "NON-POLYMER", "HEM", &["FE", "N", "C"]),
            EntityType::Lgo
        );
    }

    #[test]
    fn carbon_free_ligand_is_inorganic() {
        assert_eq!(
            classify_group(false, "NON-POLYMER", "SO4", &["S", "O", "O", "O", "O"]),
            EntityType::Lgi
        );
        assert_eq!(classify_group(false, "NON-POLYMER", "ZN", &["ZN"]), EntityType::Lgi);
        assert_eq!(classify_group(false, "NON-POLYMER", "UNX", &NONE), EntityType::Lgi);
    }

    #[test]
    fn carbon_exceptions_are_inorganic() {
        assert_eq!(
            classify_group(false, "NON-POLYMER", "CO2", &["C", "O", "O"]),
            EntityType::Lgi
        );
        assert_eq!(classify_group(false, "NON-POLYMER", "CMO", &["C", "O"]), EntityType::Lgi);
        assert_eq!(classify_group(false, "NON-POLYMER", "CYN", &["C", "N"]), EntityType::Lgi);
    }

    #[test]
    fn carbon_match_is_exact_symbol() {
        assert_eq!(classify_group(false, "NON-POLYMER", "CL", &["CL"]), EntityType::Lgi);
        assert_eq!(classify_group(false, "NON-POLYMER", "CA", &["CA"]), EntityType::Lgi);
    }
}
