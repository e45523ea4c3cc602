use super::{format_match, format_reference_atoms};
use crate::cli::IdentifyArgs;
use crate::config::{CliOverrides, PartialConfig};
use crate::error::Result;
use t3ps::core::dihedrals::table::DihedralTable;

pub fn run(args: IdentifyArgs, partial: PartialConfig) -> Result<()> {
    let config = partial.merge_with_cli(&CliOverrides {
        table: args.table.as_deref(),
        ..Default::default()
    })?;

    for line in describe(&config.measure.table, &args.indices) {
        println!("{line}");
    }
    Ok(())
}

/// Lines reporting which named torsions `indices` correspond to.
pub fn describe(table: &DihedralTable, indices: &[usize]) -> Vec<String> {
    let mut lines = vec![format!("Atoms: {}", format_reference_atoms(indices))];
    let matches = table.identify(indices);
    if matches.is_empty() {
        lines.push("No named dihedral matches these atoms.".to_string());
    } else {
        lines.extend(matches.iter().map(format_match));
    }
    lines
}
