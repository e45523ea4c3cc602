use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::{Structure, StructureError};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Expected {expected} atoms but the file ends after {found}")]
    MissingAtoms { expected: usize, found: usize },
    #[error(transparent)]
    Structure(#[from] StructureError),
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Atom count line is not a non-negative integer (value: '{0}')")]
    InvalidCount(String),
    #[error("Atom line needs an element and three coordinates")]
    TooFewFields,
    #[error("Invalid coordinate '{0}'")]
    InvalidFloat(String),
}

/// Plain XYZ files: an atom count line, a comment line, then `element x y z` lines.
///
/// Serial ids are assigned 0-based in file order, which is exactly the
/// reference numbering the T3PS model files use. Only the first frame is read.
pub struct XyzFile;

impl StructureFile for XyzFile {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut lines = reader.lines().enumerate();

        let expected = loop {
            match lines.next() {
                Some((i, line)) => {
                    let line = line?;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    break trimmed.parse::<usize>().map_err(|_| XyzError::Parse {
                        line: i + 1,
                        kind: XyzParseErrorKind::InvalidCount(trimmed.to_string()),
                    })?;
                }
                None => return Ok(Structure::new()),
            }
        };

        // Comment line.
        if let Some((_, line)) = lines.next() {
            line?;
        }

        let mut structure = Structure::new();
        for serial in 0..expected {
            let Some((i, line)) = lines.next() else {
                return Err(XyzError::MissingAtoms {
                    expected,
                    found: serial,
                });
            };
            let line = line?;
            structure.add_atom(parse_atom_line(&line, i + 1, serial)?)?;
        }

        Ok(structure)
    }
}

fn parse_atom_line(line: &str, line_num: usize, serial: usize) -> Result<Atom, XyzError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::TooFewFields,
        });
    }

    let coord = |s: &str| -> Result<f64, XyzError> {
        s.parse().map_err(|_| XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidFloat(s.to_string()),
        })
    };
    let position = Point3::new(coord(fields[1])?, coord(fields[2])?, coord(fields[3])?);

    Ok(Atom::new(serial, fields[0], position))
}
