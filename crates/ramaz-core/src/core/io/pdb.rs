use crate::core::io::traits::{ModelSerializer, MolecularFile};
use crate::core::models::atom::Atom;
use crate::core::models::chain::ChainType;
use crate::core::models::structure::Structure;
use crate::core::models::system::MolecularSystem;
use crate::core::secondary::annotation::{
    AnnotatedSegment, ResiduePosition, SecondaryStructureAnnotation, SegmentKind,
};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    /// Header records kept verbatim, in file order.
    pub header_lines: Vec<String>,
    /// Secondary structure declared by `HELIX`/`SHEET` records.
    pub annotation: SecondaryStructureAnnotation,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for {record} record")]
    LineTooShort { record: &'static str },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn char_at(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_int(line: &str, line_num: usize, start: usize, end: usize) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
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

/// Column layout of the residue range in a `HELIX` or `SHEET` record.
struct SegmentColumns {
    record: &'static str,
    kind: SegmentKind,
    chain: usize,
    start_seq: (usize, usize),
    start_icode: usize,
    end_seq: (usize, usize),
    end_icode: usize,
}

const HELIX_COLUMNS: SegmentColumns = SegmentColumns {
    record: "HELIX",
    kind: SegmentKind::Helix,
    chain: 19,
    start_seq: (21, 25),
    start_icode: 25,
    end_seq: (33, 37),
    end_icode: 37,
};

const SHEET_COLUMNS: SegmentColumns = SegmentColumns {
    record: "SHEET",
    kind: SegmentKind::Strand,
    chain: 21,
    start_seq: (22, 26),
    start_icode: 26,
    end_seq: (33, 37),
    end_icode: 37,
};

fn parse_segment(
    line: &str,
    line_num: usize,
    columns: &SegmentColumns,
) -> Result<AnnotatedSegment, PdbError> {
    if line.len() < columns.end_seq.1 {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort {
                record: columns.record,
            },
        });
    }
    let chain_id = char_at(line, columns.chain).unwrap_or(' ');
    let start = parse_int(line, line_num, columns.start_seq.0, columns.start_seq.1)?;
    let end = parse_int(line, line_num, columns.end_seq.0, columns.end_seq.1)?;
    Ok(AnnotatedSegment {
        kind: columns.kind,
        chain_id,
        start: ResiduePosition::new(start, char_at(line, columns.start_icode)),
        end: ResiduePosition::new(end, char_at(line, columns.end_icode)),
    })
}

fn chain_type_for(record_type: &str, residue_name: &str) -> ChainType {
    match (record_type, residue_name) {
        ("ATOM", _) => ChainType::Protein,
        (_, "HOH" | "WAT" | "DOD") => ChainType::Water,
        _ => ChainType::Ligand,
    }
}

/// Atom and residue fields of one `ATOM`/`HETATM` record.
struct AtomRecord<'a> {
    serial: usize,
    name: &'a str,
    residue_name: &'a str,
    chain_id: char,
    residue_number: isize,
    insertion_code: Option<char>,
    position: Point3<f64>,
    occupancy: f64,
    b_factor: f64,
    element: &'a str,
}

fn parse_atom_record(line: &str, line_num: usize) -> Result<AtomRecord<'_>, PdbError> {
    if line.len() < 54 {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort { record: "ATOM/HETATM" },
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
    let serial_str = slice_and_trim(line, 6, 11);
    let serial = if serial_str.is_empty() {
        0
    } else {
        serial_str.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                columns: "7-11".into(),
                value: serial_str.into(),
            },
        })?
    };

    Ok(AtomRecord {
        serial,
        name,
        residue_name: slice_and_trim(line, 17, 20),
        chain_id: char_at(line, 21).unwrap_or(' '),
        residue_number: parse_int(line, line_num, 22, 26)?,
        insertion_code: char_at(line, 26),
        position: Point3::new(
            parse_float(line, line_num, 30, 38)?,
            parse_float(line, line_num, 38, 46)?,
            parse_float(line, line_num, 46, 54)?,
        ),
        occupancy: parse_optional_float(line, line_num, 54, 60, 1.0)?,
        b_factor: parse_optional_float(line, line_num, 60, 66, 0.0)?,
        element: slice_and_trim(line, 76, 78),
    })
}

fn add_atom_record(system: &mut MolecularSystem, record_type: &str, record: AtomRecord<'_>) {
    let chain_type = chain_type_for(record_type, record.residue_name);
    let chain_id = match system.find_chain_by_id(record.chain_id) {
        Some(existing) => {
            if chain_type == ChainType::Protein {
                system.set_chain_type(existing, ChainType::Protein);
            }
            existing
        }
        None => system.add_chain(record.chain_id, chain_type),
    };

    let Some(residue_id) = system.add_residue(
        chain_id,
        record.residue_number,
        record.insertion_code,
        record.residue_name,
    ) else {
        return;
    };

    let mut atom = Atom::new(record.name, residue_id, record.position);
    atom.serial = record.serial;
    atom.occupancy = record.occupancy;
    atom.b_factor = record.b_factor;
    atom.is_hetero = record_type == "HETATM";
    if !record.element.is_empty() {
        atom.element = record.element.to_ascii_uppercase();
    }
    system.add_atom_to_residue(residue_id, atom);
}

/// Reader and writer for Protein Data Bank coordinate files.
///
/// Every `MODEL`/`ENDMDL` block becomes one state of the returned
/// [`Structure`]; a file without `MODEL` records yields a single state. Only
/// the first alternate location (blank or `A`) of each atom is kept.
pub struct PdbFile;

impl MolecularFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut metadata = PdbMetadata::default();
        let mut models: Vec<MolecularSystem> = Vec::new();
        let mut current: Option<MolecularSystem> = None;
        let mut in_model_block = false;
        let mut atom_records = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6).to_string();

            match record_type.as_str() {
                "ATOM" | "HETATM" => {
                    if !matches!(char_at(&line, 16), None | Some('A')) {
                        continue;
                    }
                    let record = parse_atom_record(&line, line_num)?;
                    let system = current.get_or_insert_with(MolecularSystem::new);
                    add_atom_record(system, &record_type, record);
                    atom_records += 1;
                }
                "MODEL" => {
                    if in_model_block {
                        return Err(PdbError::Inconsistency(format!(
                            "MODEL record on line {} opens a block before the previous ENDMDL",
                            line_num
                        )));
                    }
                    if let Some(system) = current.take() {
                        models.push(system);
                    }
                    current = Some(MolecularSystem::new());
                    in_model_block = true;
                }
                "ENDMDL" => {
                    if !in_model_block {
                        return Err(PdbError::Inconsistency(format!(
                            "ENDMDL record on line {} without a matching MODEL",
                            line_num
                        )));
                    }
                    models.push(current.take().unwrap_or_default());
                    in_model_block = false;
                }
                "HELIX" => {
                    metadata
                        .annotation
                        .push(parse_segment(&line, line_num, &HELIX_COLUMNS)?);
                    metadata.header_lines.push(line);
                }
                "SHEET" => {
                    metadata
                        .annotation
                        .push(parse_segment(&line, line_num, &SHEET_COLUMNS)?);
                    metadata.header_lines.push(line);
                }
                "END" => break,
                "TER" | "ANISOU" | "CONECT" | "MASTER" | "SIGUIJ" | "SIGATM" => {}
                "" => {}
                _ => metadata.header_lines.push(line),
            }
        }

        if let Some(system) = current.take() {
            models.push(system);
        }
        if atom_records == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }

        Ok((Structure::new(models), metadata))
    }

    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for line in &metadata.header_lines {
            writeln!(writer, "{}", line)?;
        }
        write_coordinates(system, writer)?;
        writeln!(writer, "END")?;
        Ok(())
    }

    fn write_system_to(
        system: &MolecularSystem,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        write_coordinates(system, writer)?;
        writeln!(writer, "END")?;
        Ok(())
    }
}

fn format_atom_name(atom: &Atom) -> String {
    if atom.name.len() < 4 && atom.element.len() <= 1 {
        format!(" {:<3}", atom.name)
    } else {
        format!("{:<4}", atom.name)
    }
}

// Serials are renumbered from 1 so that identical systems give identical bytes.
fn write_coordinates(system: &MolecularSystem, writer: &mut impl Write) -> Result<(), PdbError> {
    let mut serial = 0usize;

    for (_, chain) in system.chains_iter() {
        let mut last_residue = None;
        for &residue_id in chain.residues() {
            let residue = system.residue(residue_id).ok_or_else(|| {
                PdbError::Inconsistency(format!(
                    "Chain '{}' references a missing residue",
                    chain.id
                ))
            })?;
            for &atom_id in residue.atoms() {
                let Some(atom) = system.atom(atom_id) else {
                    continue;
                };
                serial += 1;
                let record_type = if atom.is_hetero { "HETATM" } else { "ATOM" };
                writeln!(
                    writer,
                    "{:<6}{:>5} {} {:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                    record_type,
                    serial,
                    format_atom_name(atom),
                    residue.name,
                    chain.id,
                    residue.number,
                    residue.insertion_code.unwrap_or(' '),
                    atom.position.x,
                    atom.position.y,
                    atom.position.z,
                    atom.occupancy,
                    atom.b_factor,
                    atom.element,
                )?;
            }
            last_residue = Some(residue);
        }

        if let Some(residue) = last_residue {
            serial += 1;
            writeln!(
                writer,
                "TER   {:>5}      {:>3} {}{:>4}{}",
                serial,
                residue.name,
                chain.id,
                residue.number,
                residue.insertion_code.unwrap_or(' '),
            )?;
        }
    }

    Ok(())
}

impl ModelSerializer for PdbFile {
    fn extension(&self) -> &'static str {
        "pdb"
    }

    fn write_model(&self, system: &MolecularSystem, path: &Path) -> Result<(), io::Error> {
        Self::write_system_to_path(system, path).map_err(|e| match e {
            PdbError::Io(source) => source,
            other => io::Error::other(other),
        })
    }
}
