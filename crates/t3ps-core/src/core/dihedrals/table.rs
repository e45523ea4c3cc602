use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::trace;

/// Number of atoms that define a torsion.
pub const DIHEDRAL_ATOMS: usize = 4;

/// Number of definitions every family must hold.
pub const FAMILY_SIZE: usize = 5;

/// The three named groups of reference torsions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DihedralFamily {
    /// Backbone torsions across the phosphate bridge (ε, ζ, α, β, γ).
    Backbone,
    /// Pseudorotation of the 5' sugar ring (ν0–ν4).
    Sugar1,
    /// Pseudorotation of the 3' sugar ring (μ0–μ4).
    Sugar2,
}

impl DihedralFamily {
    pub const ALL: [DihedralFamily; 3] = [Self::Backbone, Self::Sugar1, Self::Sugar2];

    /// Short machine-friendly key, also used as the TOML table name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Backbone => "backbone",
            Self::Sugar1 => "sugar1",
            Self::Sugar2 => "sugar2",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Backbone => "Backbone torsions",
            Self::Sugar1 => "Sugar 1 pseudorotation",
            Self::Sugar2 => "Sugar 2 pseudorotation",
        }
    }
}

impl fmt::Display for DihedralFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A named reference torsion over four atoms of the canonical numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DihedralDefinition {
    /// Display symbol (e.g., "ε", "ν0").
    pub name: String,
    /// 0-based reference indices, in torsion order.
    pub atoms: [usize; DIHEDRAL_ATOMS],
    /// Human-readable description (e.g., "epsilon: C4'1-C3'1-O3'1-P").
    pub description: String,
}

impl DihedralDefinition {
    pub fn new(name: &str, atoms: [usize; DIHEDRAL_ATOMS], description: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms,
            description: description.to_string(),
        }
    }

    fn reversed_atoms(&self) -> [usize; DIHEDRAL_ATOMS] {
        let [a, b, c, d] = self.atoms;
        [d, c, b, a]
    }
}

/// The outcome of recognising a 4-atom selection against a [`DihedralDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DihedralMatch {
    pub family: DihedralFamily,
    pub definition: DihedralDefinition,
    /// `true` when the selection lists the definition's atoms back to front.
    pub is_reverse: bool,
}

type RawDefinition = (&'static str, [usize; DIHEDRAL_ATOMS], &'static str);

const BACKBONE: [RawDefinition; FAMILY_SIZE] = [
    ("ε", [4, 10, 12, 13], "epsilon: C4'1-C3'1-O3'1-P"),
    ("ζ", [10, 12, 13, 16], "zeta: C3'1-O3'1-P-O5'2"),
    ("α", [12, 13, 16, 17], "alpha: O3'1-P-O5'2-C5'2"),
    ("β", [13, 16, 17, 20], "beta: P-O5'2-C5'2-C4'2"),
    ("γ", [16, 17, 20, 29], "gamma: O5'2-C5'2-C4'2-C3'2"),
];

const SUGAR1: [RawDefinition; FAMILY_SIZE] = [
    ("ν0", [4, 0, 1, 7], "nu0: C4'1-O4'1-C1'1-C2'1"),
    ("ν1", [0, 1, 7, 10], "nu1: O4'1-C1'1-C2'1-C3'1"),
    ("ν2", [1, 7, 10, 4], "nu2: C1'1-C2'1-C3'1-C4'1"),
    ("ν3", [7, 10, 4, 0], "nu3: C2'1-C3'1-C4'1-O4'1"),
    ("ν4", [10, 4, 0, 1], "nu4: C3'1-C4'1-O4'1-C1'1"),
];

const SUGAR2: [RawDefinition; FAMILY_SIZE] = [
    ("μ0", [20, 22, 23, 26], "mu0: C4'2-O4'2-C1'2-C2'2"),
    ("μ1", [22, 23, 26, 29], "mu1: O4'2-C1'2-C2'2-C3'2"),
    ("μ2", [23, 26, 29, 20], "mu2: C1'2-C2'2-C3'2-C4'2"),
    ("μ3", [26, 29, 20, 22], "mu3: C2'2-C3'2-C4'2-O4'2"),
    ("μ4", [29, 20, 22, 23], "mu4: C3'2-C4'2-O4'2-C1'2"),
];

fn from_raw(raw: &[RawDefinition]) -> Vec<DihedralDefinition> {
    raw.iter()
        .map(|(name, atoms, description)| DihedralDefinition::new(name, *atoms, description))
        .collect()
}

/// The reference set of named torsions, grouped into [`DihedralFamily`] blocks.
///
/// The table is fixed once built: [`DihedralTable::builtin`] carries the T3PS
/// dinucleotide definitions, and [`DihedralTable::load`] reads a replacement
/// set from TOML. Either way each family holds exactly five definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DihedralTable {
    backbone: Vec<DihedralDefinition>,
    sugar1: Vec<DihedralDefinition>,
    sugar2: Vec<DihedralDefinition>,
}

impl Default for DihedralTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DihedralTable {
    pub fn builtin() -> Self {
        Self {
            backbone: from_raw(&BACKBONE),
            sugar1: from_raw(&SUGAR1),
            sugar2: from_raw(&SUGAR2),
        }
    }

    /// Loads a table from a TOML file with `[[backbone]]`, `[[sugar1]]` and `[[sugar2]]` arrays.
    ///
    /// # Errors
    ///
    /// Returns [`TableLoadError`] if the file cannot be read, is not valid TOML,
    /// or breaks the five-per-family / four-atoms-per-entry shape.
    pub fn load(path: &Path) -> Result<Self, TableLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TableLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, TableLoadError> {
        let raw: RawTableFile = toml::from_str(content)?;
        Ok(Self {
            backbone: validate_family(DihedralFamily::Backbone, raw.backbone)?,
            sugar1: validate_family(DihedralFamily::Sugar1, raw.sugar1)?,
            sugar2: validate_family(DihedralFamily::Sugar2, raw.sugar2)?,
        })
    }

    pub fn family(&self, family: DihedralFamily) -> &[DihedralDefinition] {
        match family {
            DihedralFamily::Backbone => &self.backbone,
            DihedralFamily::Sugar1 => &self.sugar1,
            DihedralFamily::Sugar2 => &self.sugar2,
        }
    }

    /// Iterates every definition together with its family, backbone first.
    pub fn iter(&self) -> impl Iterator<Item = (DihedralFamily, &DihedralDefinition)> {
        DihedralFamily::ALL
            .into_iter()
            .flat_map(move |family| self.family(family).iter().map(move |d| (family, d)))
    }

    pub fn find(&self, name: &str) -> Option<(DihedralFamily, &DihedralDefinition)> {
        self.iter().find(|(_, d)| d.name == name)
    }

    /// Recognises an ordered 4-tuple of reference indices against every definition.
    ///
    /// Each definition is compared against the input in forward order first and
    /// reversed order second; every definition that matches either way is
    /// reported. Inputs of any other length yield no matches.
    pub fn identify(&self, indices: &[usize]) -> Vec<DihedralMatch> {
        if indices.len() != DIHEDRAL_ATOMS {
            return Vec::new();
        }

        let matches: Vec<DihedralMatch> = self
            .iter()
            .filter_map(|(family, definition)| {
                let is_reverse = if indices == definition.atoms {
                    false
                } else if indices == definition.reversed_atoms() {
                    true
                } else {
                    return None;
                };
                Some(DihedralMatch {
                    family,
                    definition: definition.clone(),
                    is_reverse,
                })
            })
            .collect();

        trace!(?indices, found = matches.len(), "Dihedral identification finished");
        matches
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTableFile {
    backbone: Vec<RawDefinitionEntry>,
    sugar1: Vec<RawDefinitionEntry>,
    sugar2: Vec<RawDefinitionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefinitionEntry {
    name: String,
    atoms: Vec<usize>,
    #[serde(default)]
    description: String,
}

fn validate_family(
    family: DihedralFamily,
    entries: Vec<RawDefinitionEntry>,
) -> Result<Vec<DihedralDefinition>, TableLoadError> {
    if entries.len() != FAMILY_SIZE {
        return Err(TableLoadError::FamilySize {
            family,
            found: entries.len(),
        });
    }
    entries
        .into_iter()
        .map(|entry| {
            let atoms: [usize; DIHEDRAL_ATOMS] =
                entry
                    .atoms
                    .as_slice()
                    .try_into()
                    .map_err(|_| TableLoadError::AtomCount {
                        name: entry.name.clone(),
                        found: entry.atoms.len(),
                    })?;
            Ok(DihedralDefinition {
                name: entry.name,
                atoms,
                description: entry.description,
            })
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Family '{family}' must define exactly 5 dihedrals, found {found}")]
    FamilySize { family: DihedralFamily, found: usize },
    #[error("Dihedral '{name}' must list exactly 4 atoms, found {found}")]
    AtomCount { name: String, found: usize },
}
