use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared chemical definition referenced by every occurrence of a group type.
///
/// A structure record stores each distinct group type once (e.g. a single `ALA`
/// template for all alanines) and points group occurrences at it by ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTemplate {
    pub group_name: String,
    pub atom_names: Vec<String>,
    pub elements: Vec<String>,
    #[serde(default)]
    pub formal_charges: Vec<i32>,
    pub chem_comp_type: String,
    #[serde(default)]
    pub single_letter_code: String,
}

impl GroupTemplate {
    /// Creates a template from `(atom name, element)` pairs with neutral charges.
    pub fn new<S: Into<String>>(group_name: S, chem_comp_type: S, atoms: &[(&str, &str)]) -> Self {
        Self {
            group_name: group_name.into(),
            atom_names: atoms.iter().map(|(name, _)| name.to_string()).collect(),
            elements: atoms.iter().map(|(_, element)| element.to_string()).collect(),
            formal_charges: vec![0; atoms.len()],
            chem_comp_type: chem_comp_type.into(),
            single_letter_code: String::new(),
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atom_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_names.is_empty()
    }

    /// Whether the per-atom lists describe the same number of atoms.
    pub fn is_consistent(&self) -> bool {
        self.elements.len() == self.atom_names.len()
            && (self.formal_charges.is_empty() || self.formal_charges.len() == self.atom_names.len())
    }
}

impl fmt::Display for GroupTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GroupTemplate {{ name: \"{}\", type: \"{}\", atoms: {} }}",
            self.group_name,
            self.chem_comp_type,
            self.atom_count()
        )
    }
}
