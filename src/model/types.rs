use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Point = Point3<f64>;

/// Entity classification as declared by the structure record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "polymer")]
    Polymer,
    #[serde(rename = "non-polymer")]
    NonPolymer,
    #[serde(rename = "water")]
    Water,
}

/// Per-group entity-type code assigned by the columnar classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    /// Polymer residue of a peptide chain.
    Pro,
    /// Polymer residue of a DNA chain.
    Dna,
    /// Polymer residue of an RNA chain.
    Rna,
    /// Polymer residue of a polysaccharide chain.
    Psr,
    /// Polymer residue with an unrecognized component type.
    #[default]
    Unk,
    /// Water (`HOH` or `DOD`).
    Wat,
    /// Non-polymer saccharide.
    Sac,
    /// Organic ligand.
    Lgo,
    /// Inorganic ligand.
    Lgi,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Polymer => "polymer",
            EntityKind::NonPolymer => "non-polymer",
            EntityKind::Water => "water",
        }
    }

    pub fn is_polymer(&self) -> bool {
        matches!(self, EntityKind::Polymer)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polymer" => Ok(EntityKind::Polymer),
            "non-polymer" => Ok(EntityKind::NonPolymer),
            "water" => Ok(EntityKind::Water),
            _ => Err(format!("Invalid entity kind: {}", s)),
        }
    }
}

impl EntityType {
    pub const ALL: [EntityType; 9] = [
        EntityType::Pro,
        EntityType::Dna,
        EntityType::Rna,
        EntityType::Psr,
        EntityType::Unk,
        EntityType::Wat,
        EntityType::Sac,
        EntityType::Lgo,
        EntityType::Lgi,
    ];

    /// Three-letter code used in tabular output.
    pub fn code(&self) -> &'static str {
        match self {
            EntityType::Pro => "PRO",
            EntityType::Dna => "DNA",
            EntityType::Rna => "RNA",
            EntityType::Psr => "PSR",
            EntityType::Unk => "UNK",
            EntityType::Wat => "WAT",
            EntityType::Sac => "SAC",
            EntityType::Lgo => "LGO",
            EntityType::Lgi => "LGI",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EntityType::Pro => "Protein",
            EntityType::Dna => "DNA",
            EntityType::Rna => "RNA",
            EntityType::Psr => "Polysaccharide",
            EntityType::Unk => "Unknown Polymer",
            EntityType::Wat => "Water",
            EntityType::Sac => "Saccharide",
            EntityType::Lgo => "Organic Ligand",
            EntityType::Lgi => "Inorganic Ligand",
        }
    }

    pub fn is_polymer(&self) -> bool {
        matches!(
            self,
            EntityType::Pro | EntityType::Dna | EntityType::Rna | EntityType::Psr | EntityType::Unk
        )
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| format!("Invalid entity type code: {}", s))
    }
}
