use super::annotation::{SecondaryStructureAnnotation, SegmentKind};
use super::classifier::{ClassificationError, SecondaryStructure, SecondaryStructureClassifier};
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use crate::core::ramachandran::dihedrals::backbone_dihedrals;
use std::collections::HashMap;

fn in_rect(phi: f64, psi: f64, phi_range: (f64, f64), psi_range: (f64, f64)) -> bool {
    (phi_range.0..=phi_range.1).contains(&phi) && (psi_range.0..=psi_range.1).contains(&psi)
}

/// Right-handed helical region of the Ramachandran plot.
pub fn is_alpha_region(phi: f64, psi: f64) -> bool {
    in_rect(phi, psi, (-100.0, -30.0), (-67.0, -7.0))
}

/// Extended (beta) region of the Ramachandran plot.
pub fn is_beta_region(phi: f64, psi: f64) -> bool {
    // psi wraps at 180, so the region continues from -180.
    in_rect(phi, psi, (-170.0, -70.0), (90.0, 180.0))
        || in_rect(phi, psi, (-170.0, -70.0), (-180.0, -170.0))
}

/// Classifies residues from runs of consecutive backbone torsions.
///
/// A run of at least `min_helix_run` residues in the alpha region becomes
/// helix, a run of at least `min_strand_run` residues in the beta region
/// becomes sheet. Runs never cross a chain or a residue without torsions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DihedralClassifier {
    pub min_helix_run: usize,
    pub min_strand_run: usize,
}

impl Default for DihedralClassifier {
    fn default() -> Self {
        Self {
            min_helix_run: 4,
            min_strand_run: 3,
        }
    }
}

impl DihedralClassifier {
    fn min_run(&self, kind: SegmentKind) -> usize {
        match kind {
            SegmentKind::Helix => self.min_helix_run,
            SegmentKind::Strand => self.min_strand_run,
        }
    }

    fn assign(&self, system: &MolecularSystem) -> HashMap<ResidueId, SegmentKind> {
        let rows = backbone_dihedrals(system);
        let mut assigned = HashMap::new();
        let mut run: Vec<ResidueId> = Vec::new();
        let mut run_kind: Option<SegmentKind> = None;
        let mut run_chain = None;

        let mut close_run = |run: &mut Vec<ResidueId>, kind: Option<SegmentKind>| {
            if let Some(kind) = kind {
                if run.len() >= self.min_run(kind) {
                    for &id in run.iter() {
                        assigned.insert(id, kind);
                    }
                }
            }
            run.clear();
        };

        for row in &rows {
            let kind = row.phi_psi().and_then(|(phi, psi)| {
                if is_alpha_region(phi, psi) {
                    Some(SegmentKind::Helix)
                } else if is_beta_region(phi, psi) {
                    Some(SegmentKind::Strand)
                } else {
                    None
                }
            });
            let chain = system.residue(row.residue_id).map(|r| r.chain_id);

            if kind != run_kind || chain != run_chain {
                close_run(&mut run, run_kind);
                run_kind = kind;
                run_chain = chain;
            }
            if kind.is_some() {
                run.push(row.residue_id);
            }
        }
        close_run(&mut run, run_kind);

        assigned
    }
}

impl SecondaryStructureClassifier for DihedralClassifier {
    fn classify(
        &self,
        system: &MolecularSystem,
        _annotation: &SecondaryStructureAnnotation,
    ) -> Result<SecondaryStructure, ClassificationError> {
        let assigned = self.assign(system);
        Ok(SecondaryStructure::from_assignment(system, |id| {
            assigned.get(&id).copied()
        }))
    }
}
