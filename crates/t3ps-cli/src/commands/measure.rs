use super::{format_match, load_structure};
use crate::cli::MeasureArgs;
use crate::config::{CliOverrides, PartialConfig};
use crate::error::Result;
use crate::viewer::LogHighlighter;
use t3ps::core::dihedrals::table::DIHEDRAL_ATOMS;
use t3ps::engine::measurement::MeasurementResult;
use t3ps::workflows;
use tracing::{debug, info};

pub fn run(args: MeasureArgs, partial: PartialConfig) -> Result<()> {
    let config = partial.merge_with_cli(&CliOverrides {
        numbering: args.numbering.as_deref(),
        table: args.table.as_deref(),
        precision: args.precision,
    })?;

    let structure = load_structure(&args.file)?;

    let mut viewer = LogHighlighter::new();
    info!("Replaying {} atom click(s)...", args.serials.len());
    let result = workflows::measure::run_with_highlighter(
        &structure,
        &args.serials,
        &config.measure,
        &mut viewer,
    )?;
    debug!(
        highlighted = viewer.highlighted().len(),
        renders = viewer.renders(),
        "Viewer state after replay"
    );

    print!("{}", render(&result, config.precision));
    Ok(())
}

/// Human-readable report of a measurement snapshot.
pub fn render(result: &MeasurementResult, precision: usize) -> String {
    let mut out = format!("Selected atoms ({}):\n", result.count());
    for (slot, atom) in result.atoms.iter().enumerate() {
        let p = atom.position;
        out.push_str(&format!(
            "  {}. #{:<5} {:<2} ({:.3}, {:.3}, {:.3})\n",
            slot + 1,
            atom.serial,
            atom.element,
            p.x,
            p.y,
            p.z
        ));
    }

    out.push_str(&format!("Measurement: {:.*}\n", precision, result.measurement));

    if result.count() == DIHEDRAL_ATOMS {
        if result.matches.is_empty() {
            out.push_str("No named dihedral matches this selection.\n");
        } else {
            out.push_str("Identified as:\n");
            for m in &result.matches {
                out.push_str(&format!("  {}\n", format_match(m)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use t3ps::core::dihedrals::numbering::ReferenceMap;
    use t3ps::core::dihedrals::table::DihedralTable;
    use t3ps::core::models::atom::PickedAtom;
    use t3ps::engine::measurement::Measurement;
    use t3ps::engine::selection::Selection;

    fn result_for(atoms: &[(usize, f64, f64, f64)]) -> MeasurementResult {
        let mut selection = Selection::new();
        for &(serial, x, y, z) in atoms {
            selection.toggle(PickedAtom::new(serial, "C", x, y, z));
        }
        MeasurementResult::compute(&selection, &DihedralTable::builtin(), &ReferenceMap::Identity)
    }

    #[test]
    fn full_report_lists_atoms_then_measurement() {
        let result = result_for(&[(0, 0.0, 0.0, 0.0), (7, 1.5, 0.0, 0.0)]);
        assert_eq!(
            render(&result, 2),
            "Selected atoms (2):\n\
             \x20 1. #0     C  (0.000, 0.000, 0.000)\n\
             \x20 2. #7     C  (1.500, 0.000, 0.000)\n\
             Measurement: distance 1.50 Å\n"
        );
    }

    #[test]
    fn empty_selection_reports_no_measurement() {
        let text = render(&MeasurementResult::empty(), 2);
        assert!(text.starts_with("Selected atoms (0):"));
        assert!(text.contains("Measurement: no measurement"));
        assert!(!text.contains("Identified"));
    }

    #[test]
    fn distance_honours_precision() {
        let result = result_for(&[(0, 0.0, 0.0, 0.0), (1, 1.5, 0.0, 0.0)]);
        assert!(render(&result, 3).contains("Measurement: distance 1.500 Å"));
        assert!(render(&result, 1).contains("Measurement: distance 1.5 Å"));
    }

    #[test]
    fn epsilon_selection_is_identified() {
        let result = result_for(&[
            (4, 0.0, 1.0, 0.0),
            (10, 0.0, 0.0, 0.0),
            (12, 1.0, 0.0, 0.0),
            (13, 1.0, -1.0, 0.0),
        ]);
        assert!(matches!(result.measurement, Measurement::Dihedral { .. }));

        let text = render(&result, 2);
        assert!(text.contains("Measurement: dihedral 180.00°"));
        assert!(text.contains("Identified as:\n  ε  epsilon"));
    }

    #[test]
    fn unknown_quadruple_says_so() {
        let result = result_for(&[
            (0, 0.0, 1.0, 0.0),
            (2, 0.0, 0.0, 0.0),
            (5, 1.0, 0.0, 0.0),
            (9, 1.0, 1.0, 0.0),
        ]);
        assert!(render(&result, 2).contains("No named dihedral matches this selection."));
    }
}
