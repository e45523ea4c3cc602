pub mod analyze;
pub mod identify;
pub mod measure;
pub mod table;

use crate::error::{CliError, Result};
use std::path::Path;
use t3ps::core::dihedrals::numbering::atom_name_alt;
use t3ps::core::dihedrals::table::DihedralMatch;
use t3ps::core::io::{pdb::PdbFile, traits::StructureFile, xyz::XyzFile};
use t3ps::core::models::structure::Structure;
use tracing::info;

/// Reads a structure, choosing the parser from the file extension.
pub fn load_structure(path: &Path) -> Result<Structure> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    info!("Loading input structure from {:?}", path);
    let parsed = match extension.as_deref() {
        Some("xyz") => XyzFile::read_from_path(path).map_err(anyhow::Error::from),
        Some("pdb" | "ent") => PdbFile::read_from_path(path).map_err(anyhow::Error::from),
        _ => {
            return Err(CliError::Argument(format!(
                "Cannot tell the format of '{}'. Use a .xyz or .pdb file.",
                path.display()
            )));
        }
    };

    let structure = parsed.map_err(|source| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} atoms.", structure.len());
    Ok(structure)
}

/// One line per match, e.g. `ε  epsilon: C4'1-C3'1-O3'1-P  [backbone, reversed]`.
pub fn format_match(m: &DihedralMatch) -> String {
    let direction = if m.is_reverse { ", reversed" } else { "" };
    format!(
        "{}  {}  [{}{}]",
        m.definition.name, m.definition.description, m.family, direction
    )
}

/// Primed reference atom names joined with dashes.
pub fn format_reference_atoms(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| format!("{}({})", atom_name_alt(i), i))
        .collect::<Vec<_>>()
        .join("-")
}
