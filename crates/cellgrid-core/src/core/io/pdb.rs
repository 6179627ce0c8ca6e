use crate::core::cell::{CellError, UnitCell};
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::chain::Chain;
use crate::core::models::element::Element;
use crate::core::models::model::{Model, Structure};
use crate::core::models::residue::Residue;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Invalid CRYST1 record on line {line}: {source}")]
    Cell {
        line: usize,
        #[source]
        source: CellError,
    },
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
    #[error("ATOM/HETATM record between ENDMDL and MODEL")]
    AtomOutsideModel,
    #[error("MODEL record without a preceding ENDMDL")]
    UnterminatedModel,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_optional_float(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    default: f64,
) -> Result<f64, PdbError> {
    if slice_and_trim(line, start, end).is_empty() {
        Ok(default)
    } else {
        parse_float(line, line_num, start, end)
    }
}

/// Infers the element from the raw four-character atom name field.
///
/// Names of one-letter elements are conventionally right-shifted by one
/// column (" CA "), so a leading blank or digit means a one-letter symbol.
fn infer_element(name_field: &str) -> Element {
    let chars: Vec<char> = name_field.chars().take(2).collect();
    match chars.as_slice() {
        [first, second] if first.is_whitespace() || first.is_ascii_digit() => {
            Element::from_symbol(&second.to_string())
        }
        [first, second] => match Element::from_symbol(&format!("{}{}", first, second)) {
            Element::Unknown => Element::from_symbol(&first.to_string()),
            element => element,
        },
        [first] => Element::from_symbol(&first.to_string()),
        _ => Element::Unknown,
    }
}

fn is_unit_cube(params: &[f64; 6]) -> bool {
    params[..3].iter().all(|&v| v == 1.0) && params[3..].iter().all(|&v| v == 90.0)
}

/// Reader for the fixed-column PDB coordinate format.
///
/// Only the records needed for neighbor searches are interpreted: `CRYST1`,
/// `MODEL`, `ENDMDL`, `ATOM`, `HETATM` and `END`. Everything else is skipped.
pub struct PdbFile;

impl PdbFile {
    fn read_cryst1(
        line: &str,
        line_num: usize,
        structure: &mut Structure,
    ) -> Result<(), PdbError> {
        if line.len() <= 54 {
            return Ok(());
        }
        let mut params = [0.0; 6];
        let columns = [(6, 15), (15, 24), (24, 33), (33, 40), (40, 47), (47, 54)];
        for (value, (start, end)) in params.iter_mut().zip(columns) {
            *value = parse_float(line, line_num, start, end)?;
        }

        let space_group = slice_and_trim(line, 55, 66);
        if !space_group.is_empty() {
            structure.space_group = Some(space_group.to_string());
        }

        if is_unit_cube(&params) {
            debug!("CRYST1 describes a 1 Å cube; treating structure as non-crystal.");
            structure.cell = UnitCell::default();
            return Ok(());
        }

        let [a, b, c, alpha, beta, gamma] = params;
        let mut cell = UnitCell::new(a, b, c, alpha, beta, gamma).map_err(|source| {
            PdbError::Cell {
                line: line_num,
                source,
            }
        })?;
        if !space_group.is_empty() {
            if let Err(e) = cell.set_space_group(space_group) {
                warn!(
                    "{}; symmetry images will not be generated for this structure.",
                    e
                );
            }
        }
        structure.cell = cell;
        Ok(())
    }

    fn read_atom(line: &str, line_num: usize, model: &mut Model) -> Result<(), PdbError> {
        if line.len() < 54 {
            return Err(PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::LineTooShort,
            });
        }

        let name = slice_and_trim(line, 12, 16);
        if name.is_empty() {
            return Err(PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::MissingRequiredField {
                    columns: "13-16".into(),
                },
            });
        }
        let serial: i32 = slice_and_trim(line, 6, 11).parse().unwrap_or(0);
        let altloc = column_char(line, 16);
        let res_name = slice_and_trim(line, 17, 20);
        let chain_name = slice_and_trim(line, 20, 22);
        let seq_str = slice_and_trim(line, 22, 26);
        let seq_num: isize = seq_str.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                columns: "23-26".into(),
                value: seq_str.into(),
            },
        })?;
        let icode = column_char(line, 26);

        let x = parse_float(line, line_num, 30, 38)?;
        let y = parse_float(line, line_num, 38, 46)?;
        let z = parse_float(line, line_num, 46, 54)?;
        let occupancy = parse_optional_float(line, line_num, 54, 60, 1.0)?;
        let b_iso = parse_optional_float(line, line_num, 60, 66, 0.0)?;

        let element_str = slice_and_trim(line, 76, 78);
        let element = if element_str.chars().any(|c| c.is_ascii_alphabetic()) {
            Element::from_symbol(element_str)
        } else {
            infer_element(line.get(12..14).unwrap_or(""))
        };

        let mut atom = Atom::new(name, element, Point3::new(x, y, z));
        atom.altloc = altloc;
        atom.occupancy = occupancy as f32;
        atom.b_iso = b_iso as f32;
        atom.serial = serial;

        if model.chains.last().is_none_or(|c| c.name != chain_name) {
            model.chains.push(Chain::new(chain_name));
        }
        let n_chains = model.chains.len();
        let chain = &mut model.chains[n_chains - 1];
        if chain
            .residues
            .last()
            .is_none_or(|r| !r.matches_seq_id(res_name, seq_num, icode))
        {
            let mut residue = Residue::new(res_name, seq_num);
            residue.icode = icode;
            chain.residues.push(residue);
        }
        let n_residues = chain.residues.len();
        chain.residues[n_residues - 1].atoms.push(atom);
        Ok(())
    }
}

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut structure = Structure::default();
        let mut current: Option<Model> = Some(Model::new(1));

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {
                    let model = current.as_mut().ok_or(PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::AtomOutsideModel,
                    })?;
                    Self::read_atom(&line, line_num, model)?;
                }
                "CRYST1" => Self::read_cryst1(&line, line_num, &mut structure)?,
                "MODEL" => {
                    if current.as_ref().is_some_and(|m| !m.chains.is_empty()) {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::UnterminatedModel,
                        });
                    }
                    let number_str = slice_and_trim(&line, 10, 14);
                    let number = if number_str.is_empty() {
                        structure.models.len() as i32 + 1
                    } else {
                        number_str.parse().map_err(|_| PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::InvalidInt {
                                columns: "11-14".into(),
                                value: number_str.into(),
                            },
                        })?
                    };
                    current = Some(Model::new(number));
                }
                "ENDMDL" => {
                    if let Some(model) = current.take() {
                        structure.models.push(model);
                    }
                }
                "END" => break,
                _ => {}
            }
        }

        if let Some(model) = current {
            if !model.chains.is_empty() || structure.models.is_empty() {
                structure.models.push(model);
            }
        }

        debug!(
            "Read {} model(s), {} atom(s) in the first model, crystal cell: {}",
            structure.models.len(),
            structure.models.first().map_or(0, Model::atom_count),
            structure.cell.is_crystal()
        );
        Ok(structure)
    }
}
