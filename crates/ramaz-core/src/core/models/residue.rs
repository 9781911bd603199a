use super::ids::{AtomId, ChainId};
use phf::{Map, phf_map};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcidType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // Alanine (ALA)
    Glycine,    // Glycine (GLY)
    Isoleucine, // Isoleucine (ILE)
    Leucine,    // Leucine (LEU)
    Proline,    // Proline (PRO)
    Valine,     // Valine (VAL)

    // --- Aromatic ---
    Phenylalanine, // Phenylalanine (PHE)
    Tryptophan,    // Tryptophan (TRP)
    Tyrosine,      // Tyrosine (TYR)

    // --- Polar, Uncharged ---
    Asparagine, // Asparagine (ASN)
    Cysteine,   // Cysteine (CYS)
    Glutamine,  // Glutamine (GLN)
    Serine,     // Serine (SER)
    Threonine,  // Threonine (THR)
    Methionine, // Methionine (MET), also selenomethionine (MSE)

    // --- Positively Charged (Basic) ---
    Arginine,  // Arginine (ARG)
    Lysine,    // Lysine (LYS)
    Histidine, // Histidine (HIS) and its protonation-state aliases

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // Aspartic Acid (ASP)
    GlutamicAcid, // Glutamic Acid (GLU)
}

static THREE_LETTER_CODES: Map<&'static str, AminoAcidType> = phf_map! {
    "ALA" => AminoAcidType::Alanine,
    "GLY" => AminoAcidType::Glycine,
    "ILE" => AminoAcidType::Isoleucine,
    "LEU" => AminoAcidType::Leucine,
    "PRO" => AminoAcidType::Proline,
    "VAL" => AminoAcidType::Valine,
    "PHE" => AminoAcidType::Phenylalanine,
    "TRP" => AminoAcidType::Tryptophan,
    "TYR" => AminoAcidType::Tyrosine,
    "ASN" => AminoAcidType::Asparagine,
    "CYS" => AminoAcidType::Cysteine,
    "GLN" => AminoAcidType::Glutamine,
    "SER" => AminoAcidType::Serine,
    "THR" => AminoAcidType::Threonine,
    "MET" => AminoAcidType::Methionine,
    "MSE" => AminoAcidType::Methionine,
    "ARG" => AminoAcidType::Arginine,
    "LYS" => AminoAcidType::Lysine,
    "HIS" => AminoAcidType::Histidine,
    "HSD" => AminoAcidType::Histidine,
    "HSE" => AminoAcidType::Histidine,
    "HSP" => AminoAcidType::Histidine,
    "HID" => AminoAcidType::Histidine,
    "HIE" => AminoAcidType::Histidine,
    "HIP" => AminoAcidType::Histidine,
    "ASP" => AminoAcidType::AsparticAcid,
    "GLU" => AminoAcidType::GlutamicAcid,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown amino acid residue name: '{0}'")]
pub struct ParseAminoAcidError(pub String);

impl FromStr for AminoAcidType {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase();
        THREE_LETTER_CODES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ParseAminoAcidError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                         // Residue sequence number from source file
    pub insertion_code: Option<char>,          // PDB insertion code, if any
    pub name: String,                          // Name of the residue (e.g., "ALA", "HOH")
    pub residue_type: Option<AminoAcidType>,   // Parsed amino acid type, `None` for non-amino acids
    pub chain_id: ChainId,                     // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,             // IDs of atoms belonging to this residue
    atom_name_map: HashMap<String, AtomId>,    // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        number: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
    ) -> Self {
        Self {
            number,
            insertion_code,
            name: name.to_string(),
            residue_type: name.parse().ok(),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_insert(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn is_amino_acid(&self) -> bool {
        self.residue_type.is_some()
    }
}
