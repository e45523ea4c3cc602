use crate::cli::AnalyzeArgs;
use crate::config::{CliOverrides, PartialConfig};
use crate::error::{CliError, Result};
use std::fs::File;
use std::io::BufWriter;
use t3ps::core::io::{pdb::PdbFile, traits::StructureFile};
use t3ps::workflows::backbone::{self, BackboneAngle, BackboneReport};
use tracing::{info, warn};

pub fn run(args: AnalyzeArgs, partial: PartialConfig) -> Result<()> {
    let config = partial.merge_with_cli(&CliOverrides {
        precision: args.precision,
        ..Default::default()
    })?;

    info!("Loading input structure from {:?}", &args.file);
    let structure = PdbFile::read_from_path(&args.file).map_err(|e| CliError::FileParsing {
        path: args.file.clone(),
        source: e.into(),
    })?;

    let report = backbone::analyze(&structure);
    if report.is_empty() {
        warn!("No nucleotide residues found in {:?}.", &args.file);
        println!("No nucleotide residues found.");
    } else {
        print!("{}", render(&report, config.precision));
    }

    if let Some(path) = &args.csv {
        info!("Writing backbone torsions to {:?}", path);
        report.write_csv(BufWriter::new(File::create(path)?))?;
        println!("Wrote {} residue(s) to {}", report.len(), path.display());
    }
    Ok(())
}

/// Fixed-width table, one row per residue; `-` marks torsions that need a
/// missing neighbour.
pub fn render(report: &BackboneReport, precision: usize) -> String {
    let width = precision + 5;
    let mut out = format!("{:<5} {:>5} {:<4}", "Chain", "Resi", "Name");
    for angle in BackboneAngle::ALL {
        out.push_str(&format!(" {:>width$}", angle.symbol()));
    }
    out.push('\n');

    for residue in &report.residues {
        out.push_str(&format!(
            "{:<5} {:>5} {:<4}",
            residue.chain_id, residue.residue_number, residue.residue_name
        ));
        for angle in BackboneAngle::ALL {
            match residue.angle(angle) {
                Some(value) => out.push_str(&format!(" {value:>width$.precision$}")),
                None => out.push_str(&format!(" {:>width$}", "-")),
            }
        }
        out.push('\n');
    }
    out
}
