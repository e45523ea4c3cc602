use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use tracing::{info, instrument};

/// Residue names treated as nucleotides.
pub const NUCLEIC_RESIDUES: [&str; 9] = ["A", "G", "C", "T", "U", "DA", "DG", "DC", "DT"];

/// The five backbone torsions computed per residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackboneAngle {
    /// O3'(i-1) - P - O5' - C5'
    Alpha,
    /// P - O5' - C5' - C4'
    Beta,
    /// O5' - C5' - C4' - C3'
    Gamma,
    /// C4' - C3' - O3' - P(i+1)
    Epsilon,
    /// C3' - O3' - P(i+1) - O5'(i+1)
    Zeta,
}

impl BackboneAngle {
    pub const ALL: [BackboneAngle; 5] = [
        Self::Alpha,
        Self::Beta,
        Self::Gamma,
        Self::Epsilon,
        Self::Zeta,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Alpha => "α",
            Self::Beta => "β",
            Self::Gamma => "γ",
            Self::Epsilon => "ε",
            Self::Zeta => "ζ",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
            Self::Epsilon => "epsilon",
            Self::Zeta => "zeta",
        }
    }
}

impl fmt::Display for BackboneAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One measured torsion and the serials of the atoms that define it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionValue {
    /// Degrees within `[0, 360)`.
    pub degrees: f64,
    pub serials: [usize; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidueDihedrals {
    pub chain_id: char,
    pub residue_number: isize,
    pub residue_name: String,
    pub angles: BTreeMap<BackboneAngle, TorsionValue>,
}

impl ResidueDihedrals {
    pub fn angle(&self, angle: BackboneAngle) -> Option<f64> {
        self.angles.get(&angle).map(|t| t.degrees)
    }
}

/// Backbone torsions of every nucleotide in a structure, in chain/residue order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackboneReport {
    pub residues: Vec<ResidueDihedrals>,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    chain: char,
    residue_number: isize,
    residue_name: &'a str,
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
    epsilon: Option<f64>,
    zeta: Option<f64>,
}

impl BackboneReport {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Writes one CSV row per residue; missing torsions are left blank.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for residue in &self.residues {
            wtr.serialize(CsvRow {
                chain: residue.chain_id,
                residue_number: residue.residue_number,
                residue_name: &residue.residue_name,
                alpha: residue.angle(BackboneAngle::Alpha),
                beta: residue.angle(BackboneAngle::Beta),
                gamma: residue.angle(BackboneAngle::Gamma),
                epsilon: residue.angle(BackboneAngle::Epsilon),
                zeta: residue.angle(BackboneAngle::Zeta),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}

pub fn is_nucleic_residue(name: &str) -> bool {
    let name = name.trim().to_ascii_uppercase();
    NUCLEIC_RESIDUES.contains(&name.as_str())
}

struct ResidueAtoms<'s> {
    name: &'s str,
    atoms: Vec<&'s Atom>,
}

impl<'s> ResidueAtoms<'s> {
    /// Finds a backbone atom, accepting both `'` and the legacy `*` prime.
    fn find(&self, primed: &str) -> Option<&'s Atom> {
        let legacy = primed.replace('\'', "*");
        self.atoms.iter().copied().find(|a| {
            a.name
                .as_deref()
                .is_some_and(|n| n == primed || n == legacy)
        })
    }
}

fn torsion(atoms: [Option<&Atom>; 4]) -> Option<TorsionValue> {
    let [a, b, c, d] = atoms;
    let (a, b, c, d) = (a?, b?, c?, d?);
    let radians = geometry::dihedral(&a.position, &b.position, &c.position, &d.position);
    Some(TorsionValue {
        degrees: geometry::dihedral_degrees(radians),
        serials: [a.serial, b.serial, c.serial, d.serial],
    })
}

/// Computes α, β, γ, ε and ζ for every nucleotide of a residue-annotated structure.
///
/// Residues are ordered by chain, then residue number. The cross-residue
/// torsions (α backwards, ε and ζ forwards) only use a neighbour on the same
/// chain. Residues where no torsion can be formed are left out.
#[instrument(skip_all, name = "backbone_analysis")]
pub fn analyze(structure: &Structure) -> BackboneReport {
    let mut grouped: BTreeMap<(char, isize), ResidueAtoms> = BTreeMap::new();
    for atom in structure.atoms() {
        let Some(residue) = atom.residue.as_ref() else {
            continue;
        };
        if !is_nucleic_residue(&residue.residue_name) {
            continue;
        }
        grouped
            .entry((residue.chain_id, residue.residue_number))
            .or_insert_with(|| ResidueAtoms {
                name: &residue.residue_name,
                atoms: Vec::new(),
            })
            .atoms
            .push(atom);
    }

    let keys: Vec<(char, isize)> = grouped.keys().copied().collect();
    let mut report = BackboneReport::default();

    for (i, &(chain_id, residue_number)) in keys.iter().enumerate() {
        let current = &grouped[&(chain_id, residue_number)];
        let prev = i
            .checked_sub(1)
            .map(|j| keys[j])
            .filter(|(c, _)| *c == chain_id)
            .map(|k| &grouped[&k]);
        let next = keys
            .get(i + 1)
            .filter(|(c, _)| *c == chain_id)
            .map(|k| &grouped[k]);

        let p = current.find("P");
        let o5 = current.find("O5'");
        let c5 = current.find("C5'");
        let c4 = current.find("C4'");
        let c3 = current.find("C3'");
        let o3 = current.find("O3'");
        let p_next = next.and_then(|r| r.find("P"));
        let o5_next = next.and_then(|r| r.find("O5'"));
        let o3_prev = prev.and_then(|r| r.find("O3'"));

        let candidates = [
            (BackboneAngle::Alpha, [o3_prev, p, o5, c5]),
            (BackboneAngle::Beta, [p, o5, c5, c4]),
            (BackboneAngle::Gamma, [o5, c5, c4, c3]),
            (BackboneAngle::Epsilon, [c4, c3, o3, p_next]),
            (BackboneAngle::Zeta, [c3, o3, p_next, o5_next]),
        ];
        let angles: BTreeMap<BackboneAngle, TorsionValue> = candidates
            .into_iter()
            .filter_map(|(angle, atoms)| torsion(atoms).map(|t| (angle, t)))
            .collect();

        if !angles.is_empty() {
            report.residues.push(ResidueDihedrals {
                chain_id,
                residue_number,
                residue_name: current.name.to_string(),
                angles,
            });
        }
    }

    info!(
        residues = grouped.len(),
        analyzed = report.len(),
        "Backbone dihedral analysis finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::ResidueInfo;
    use nalgebra::Point3;

    struct Builder {
        atoms: Vec<Atom>,
    }

    impl Builder {
        fn new() -> Self {
            Self { atoms: Vec::new() }
        }

        fn add(&mut self, name: &str, res: &str, chain: char, resi: isize, xyz: [f64; 3]) -> usize {
            let serial = self.atoms.len() + 1;
            let atom = Atom::new(serial, &name[..1], Point3::new(xyz[0], xyz[1], xyz[2]))
                .with_name(name)
                .with_residue(ResidueInfo {
                    chain_id: chain,
                    residue_number: resi,
                    residue_name: res.to_string(),
                });
            self.atoms.push(atom);
            serial
        }

        fn nucleotide(&mut self, res: &str, chain: char, resi: isize, shift: f64) {
            let s = shift;
            self.add("P", res, chain, resi, [0.0 + s, 1.0, 0.3]);
            self.add("O5'", res, chain, resi, [0.8 + s, 1.9, -0.4]);
            self.add("C5'", res, chain, resi, [1.9 + s, 1.3, 0.6]);
            self.add("C4'", res, chain, resi, [2.7 + s, 0.4, -0.2]);
            self.add("C3'", res, chain, resi, [3.4 + s, -0.7, 0.5]);
            self.add("O3'", res, chain, resi, [4.6 + s, -0.2, 1.1]);
        }

        fn build(self) -> Structure {
            Structure::from_atoms(self.atoms).unwrap()
        }
    }

    fn expected(structure: &Structure, serials: [usize; 4]) -> f64 {
        let p = |s: usize| structure.atom(s).unwrap().position;
        geometry::dihedral_degrees(geometry::dihedral(
            &p(serials[0]),
            &p(serials[1]),
            &p(serials[2]),
            &p(serials[3]),
        ))
    }

    #[test]
    fn dinucleotide_gets_intra_and_cross_residue_torsions() {
        let mut b = Builder::new();
        b.nucleotide("DA", 'A', 1, 0.0);
        b.nucleotide("DG", 'A', 2, 5.0);
        let structure = b.build();

        let report = analyze(&structure);
        assert_eq!(report.len(), 2);

        let first = &report.residues[0];
        assert_eq!((first.chain_id, first.residue_number), ('A', 1));
        let keys: Vec<_> = first.angles.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                BackboneAngle::Beta,
                BackboneAngle::Gamma,
                BackboneAngle::Epsilon,
                BackboneAngle::Zeta
            ]
        );
        let epsilon = first.angles[&BackboneAngle::Epsilon];
        assert_eq!(epsilon.serials, [4, 5, 6, 7]);
        assert!((epsilon.degrees - expected(&structure, [4, 5, 6, 7])).abs() < 1e-9);

        let second = &report.residues[1];
        assert_eq!(second.residue_name, "DG");
        let alpha = second.angles[&BackboneAngle::Alpha];
        assert_eq!(alpha.serials, [6, 7, 8, 9]);
        assert!(second.angle(BackboneAngle::Epsilon).is_none());
    }

    #[test]
    fn torsions_are_reported_in_positive_degrees() {
        let mut b = Builder::new();
        b.nucleotide("DA", 'A', 1, 0.0);
        b.nucleotide("DA", 'A', 2, 5.0);
        let report = analyze(&b.build());
        for residue in &report.residues {
            for value in residue.angles.values() {
                assert!((0.0..360.0).contains(&value.degrees));
            }
        }
    }

    #[test]
    fn neighbours_on_other_chains_are_not_linked() {
        let mut b = Builder::new();
        b.nucleotide("DA", 'A', 1, 0.0);
        b.nucleotide("DT", 'B', 2, 5.0);
        let report = analyze(&b.build());
        assert_eq!(report.len(), 2);
        assert!(report.residues[0].angle(BackboneAngle::Epsilon).is_none());
        assert!(report.residues[1].angle(BackboneAngle::Alpha).is_none());
    }

    #[test]
    fn residues_are_sorted_and_non_nucleic_residues_skipped() {
        let mut b = Builder::new();
        b.nucleotide("dc", 'A', 5, 0.0);
        b.nucleotide("DA", 'A', 3, 5.0);
        b.nucleotide("ALA", 'A', 4, 10.0);
        let report = analyze(&b.build());
        let numbers: Vec<isize> = report.residues.iter().map(|r| r.residue_number).collect();
        assert_eq!(numbers, vec![3, 5]);
    }

    #[test]
    fn legacy_star_names_are_accepted() {
        let mut b = Builder::new();
        b.add("P", "A", 'A', 1, [0.0, 1.0, 0.3]);
        b.add("O5*", "A", 'A', 1, [0.8, 1.9, -0.4]);
        b.add("C5*", "A", 'A', 1, [1.9, 1.3, 0.6]);
        b.add("C4*", "A", 'A', 1, [2.7, 0.4, -0.2]);
        let report = analyze(&b.build());
        assert_eq!(report.len(), 1);
        assert!(report.residues[0].angle(BackboneAngle::Beta).is_some());
    }

    #[test]
    fn structure_without_residues_yields_empty_report() {
        let structure = Structure::from_atoms(vec![Atom::new(0, "C", Point3::origin())]).unwrap();
        assert!(analyze(&structure).is_empty());
    }

    #[test]
    fn csv_export_leaves_missing_torsions_blank() {
        let mut b = Builder::new();
        b.nucleotide("DA", 'A', 1, 0.0);
        let report = analyze(&b.build());

        let mut buf = Vec::new();
        report.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("chain,residue_number,residue_name,alpha,beta,gamma,epsilon,zeta")
        );
        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(&row[..4], &["A", "1", "DA", ""]);
        assert!(!row[4].is_empty());
        assert!(row[6].is_empty());
        assert!(lines.next().is_none());
    }
}
