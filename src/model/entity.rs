use super::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological entity spanning one or more chains of a structure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub chain_indices: Vec<usize>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sequence: String,
}

impl Entity {
    pub fn new(kind: EntityKind, chain_indices: Vec<usize>) -> Self {
        Self {
            kind,
            chain_indices,
            description: String::new(),
            sequence: String::new(),
        }
    }

    pub fn is_polymer(&self) -> bool {
        self.kind.is_polymer()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entity {{ type: {}, chains: {:?} }}",
            self.kind, self.chain_indices
        )
    }
}
