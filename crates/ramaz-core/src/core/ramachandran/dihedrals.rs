use super::category::RamaCategory;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::AminoAcidType;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::dihedral;
use nalgebra::Point3;

/// Maximum C(i-1)-N(i) distance, in Angstroms, for two residues to count as
/// peptide-bonded.
pub const PEPTIDE_BOND_CUTOFF: f64 = 2.0;

/// Peptide bonds with an omega torsion closer to zero than this are cis.
pub const CIS_OMEGA_CUTOFF: f64 = 30.0;

/// Backbone torsions and category of one amino-acid residue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueDihedrals {
    pub residue_id: ResidueId,
    pub category: RamaCategory,
    pub phi: Option<f64>,
    pub psi: Option<f64>,
    /// Torsion of the peptide bond preceding this residue.
    pub omega: Option<f64>,
}

impl ResidueDihedrals {
    /// Returns `(phi, psi)` when both are defined.
    pub fn phi_psi(&self) -> Option<(f64, f64)> {
        Some((self.phi?, self.psi?))
    }
}

struct Backbone {
    residue_id: ResidueId,
    residue_type: Option<AminoAcidType>,
    n: Option<Point3<f64>>,
    ca: Option<Point3<f64>>,
    c: Option<Point3<f64>>,
}

fn backbone_of(system: &MolecularSystem, residue_id: ResidueId) -> Backbone {
    let position = |name: &str| system.residue_atom(residue_id, name).map(|a| a.position);
    Backbone {
        residue_id,
        residue_type: system.residue(residue_id).and_then(|r| r.residue_type),
        n: position("N"),
        ca: position("CA"),
        c: position("C"),
    }
}

fn is_peptide_bonded(previous: &Backbone, current: &Backbone) -> bool {
    match (previous.c, current.n) {
        (Some(c), Some(n)) => (n - c).norm() <= PEPTIDE_BOND_CUTOFF,
        _ => false,
    }
}

fn categorize(current: &Backbone, next: Option<&Backbone>, omega: Option<f64>) -> RamaCategory {
    match current.residue_type {
        Some(AminoAcidType::Glycine) => return RamaCategory::Glycine,
        Some(AminoAcidType::Proline) => {
            return match omega {
                Some(w) if w.abs() < CIS_OMEGA_CUTOFF => RamaCategory::CisProline,
                _ => RamaCategory::TransProline,
            };
        }
        _ => {}
    }
    if next.is_some_and(|n| n.residue_type == Some(AminoAcidType::Proline)) {
        return RamaCategory::PreProline;
    }
    match current.residue_type {
        Some(AminoAcidType::Isoleucine | AminoAcidType::Valine) => RamaCategory::IleVal,
        _ => RamaCategory::General,
    }
}

fn torsion(
    a: Option<Point3<f64>>,
    b: Option<Point3<f64>>,
    c: Option<Point3<f64>>,
    d: Option<Point3<f64>>,
) -> Option<f64> {
    dihedral(&a?, &b?, &c?, &d?)
}

/// Computes phi, psi and omega for every amino-acid residue of the system.
///
/// Residues are visited chain by chain in file order. A neighbour only
/// contributes to a torsion when it is peptide-bonded to the residue, so
/// chain breaks and termini leave `phi` or `psi` undefined.
pub fn backbone_dihedrals(system: &MolecularSystem) -> Vec<ResidueDihedrals> {
    let mut result = Vec::new();

    for (_, chain) in system.chains_iter() {
        let backbones: Vec<Backbone> = chain
            .residues()
            .iter()
            .filter(|&&id| system.residue(id).is_some_and(|r| r.is_amino_acid()))
            .map(|&id| backbone_of(system, id))
            .collect();

        for (i, current) in backbones.iter().enumerate() {
            let previous = i
                .checked_sub(1)
                .and_then(|j| backbones.get(j))
                .filter(|p| is_peptide_bonded(p, current));
            let next = backbones
                .get(i + 1)
                .filter(|n| is_peptide_bonded(current, n));

            let phi = previous.and_then(|p| torsion(p.c, current.n, current.ca, current.c));
            let psi = next.and_then(|n| torsion(current.n, current.ca, current.c, n.n));
            let omega = previous.and_then(|p| torsion(p.ca, p.c, current.n, current.ca));

            result.push(ResidueDihedrals {
                residue_id: current.residue_id,
                category: categorize(current, next, omega),
                phi,
                psi,
                omega,
            });
        }
    }

    result
}
