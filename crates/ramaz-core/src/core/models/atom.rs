use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents an atom of a macromolecular model as read from a coordinate file.
///
/// Only the fields needed for backbone geometry and for writing the atom back
/// out are kept; force-field or charge information is not modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The serial number from the source file.
    pub serial: usize,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Crystallographic occupancy.
    pub occupancy: f64,
    /// Isotropic displacement parameter.
    pub b_factor: f64,
    /// Element symbol (e.g., "C", "SE"); may be empty if the file omits it.
    pub element: String,
    /// Whether the atom came from a `HETATM` record.
    pub is_hetero: bool,
}

impl Atom {
    /// Creates a new `Atom` with default values for the optional fields.
    ///
    /// Occupancy defaults to 1.0, the B-factor to 0.0, and the element is
    /// guessed from the first letter of the atom name.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            serial: 0,
            residue_id,
            position,
            occupancy: 1.0,
            b_factor: 0.0,
            element: guess_element(name),
            is_hetero: false,
        }
    }
}

fn guess_element(name: &str) -> String {
    name.trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}
