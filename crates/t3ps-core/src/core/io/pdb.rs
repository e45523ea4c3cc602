use crate::core::io::traits::StructureFile;
use crate::core::models::atom::{Atom, ResidueInfo};
use crate::core::models::structure::{Structure, StructureError};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error(transparent)]
    Structure(#[from] StructureError),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// `ATOM`/`HETATM` records of a PDB file, first model only.
///
/// Serial ids come straight from columns 7-11. Alternate locations other than
/// the first are skipped so every serial stays unique.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut structure = Structure::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {
                    if let Some(atom) = parse_atom_record(&line, line_num)? {
                        structure.add_atom(atom)?;
                    }
                }
                "ENDMDL" => break,
                _ => {}
            }
        }

        Ok(structure)
    }
}

fn parse_atom_record(line: &str, line_num: usize) -> Result<Option<Atom>, PdbError> {
    if line.len() < 54 {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let alt_loc = slice_and_trim(line, 16, 17);
    if !alt_loc.is_empty() && alt_loc != "A" {
        return Ok(None);
    }

    let serial_str = slice_and_trim(line, 6, 11);
    let name_str = slice_and_trim(line, 12, 16);
    let res_name_str = slice_and_trim(line, 17, 20);
    let chain_id_str = slice_and_trim(line, 21, 22);
    let res_id_str = slice_and_trim(line, 22, 26);
    let element_str = slice_and_trim(line, 76, 78);

    if name_str.is_empty() {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::MissingRequiredField {
                columns: "13-16".into(),
            },
        });
    }

    let int = |value: &str, columns: &str| -> Result<isize, PdbError> {
        value.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                columns: columns.into(),
                value: value.into(),
            },
        })
    };
    let float = |start: usize, end: usize, columns: &str| -> Result<f64, PdbError> {
        let value = slice_and_trim(line, start, end);
        value.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidFloat {
                columns: columns.into(),
                value: value.into(),
            },
        })
    };

    let serial = usize::try_from(int(serial_str, "7-11")?).map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: "7-11".into(),
            value: serial_str.into(),
        },
    })?;
    let residue_number = int(res_id_str, "23-26")?;
    let position = Point3::new(
        float(30, 38, "31-38")?,
        float(38, 46, "39-46")?,
        float(46, 54, "47-54")?,
    );

    let element = if element_str.is_empty() {
        name_str
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_string())
            .unwrap_or_default()
    } else {
        element_str.to_string()
    };

    let residue = ResidueInfo {
        chain_id: chain_id_str.chars().next().unwrap_or('A'),
        residue_number,
        residue_name: res_name_str.to_string(),
    };

    Ok(Some(
        Atom::new(serial, &element, position)
            .with_name(name_str)
            .with_residue(residue),
    ))
}
