use super::reference::ReferenceData;
use crate::core::models::selection::ResidueSelection;
use crate::core::models::system::MolecularSystem;
use crate::core::ramachandran::dihedrals::backbone_dihedrals;
use crate::core::secondary::subset::SubsetLabel;
use thiserror::Error;
use tracing::debug;

/// A Rama-Z value and its standard error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScore {
    pub value: f64,
    pub stderr: f64,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("No calibration available for subset '{0}'")]
    MissingCalibration(SubsetLabel),
    #[error("Invalid calibration for subset '{label}': standard deviation {sd} must be positive")]
    InvalidCalibration { label: SubsetLabel, sd: f64 },
    #[error("Z-score for subset '{0}' is not a finite number")]
    NonFinite(SubsetLabel),
}

/// Computes the Ramachandran Z-score of a set of residues of a model.
pub trait ZScoreEngine {
    /// Scores the `residues` of `system` against the calibration of `label`.
    ///
    /// Torsions are measured in `system`, so a selected residue keeps its
    /// phi and psi when its neighbours are not selected.
    ///
    /// # Return
    ///
    /// `Ok(None)` when the selection has too few scorable residues.
    fn score(
        &self,
        label: SubsetLabel,
        system: &MolecularSystem,
        residues: &ResidueSelection,
    ) -> Result<Option<ZScore>, ScoringError>;
}

/// Z-score engine backed by binned reference log densities.
///
/// The raw score is the mean log density of the residues' phi/psi cells in
/// their category map; it is standardised with the calibration of the subset.
/// The standard error is the jackknife estimate over residues.
#[derive(Debug, Clone)]
pub struct RamaZEngine {
    reference: ReferenceData,
}

impl RamaZEngine {
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    fn residue_log_densities(
        &self,
        system: &MolecularSystem,
        residues: &ResidueSelection,
    ) -> Vec<f64> {
        backbone_dihedrals(system)
            .iter()
            .filter(|row| residues.contains(row.residue_id))
            .filter_map(|row| {
                let (phi, psi) = row.phi_psi()?;
                Some(self.reference.log_density(row.category, phi, psi))
            })
            .collect()
    }
}

fn jackknife_stderr(values: &[f64], mean: f64, sd: f64) -> f64 {
    let n = values.len() as f64;
    let total: f64 = values.iter().sum();
    let leave_one_out: Vec<f64> = values
        .iter()
        .map(|v| ((total - v) / (n - 1.0) - mean) / sd)
        .collect();
    let average = leave_one_out.iter().sum::<f64>() / n;
    let variance = leave_one_out
        .iter()
        .map(|z| (z - average).powi(2))
        .sum::<f64>()
        * (n - 1.0)
        / n;
    variance.sqrt()
}

impl ZScoreEngine for RamaZEngine {
    fn score(
        &self,
        label: SubsetLabel,
        system: &MolecularSystem,
        residues: &ResidueSelection,
    ) -> Result<Option<ZScore>, ScoringError> {
        let calibration = self
            .reference
            .calibration(label)
            .ok_or(ScoringError::MissingCalibration(label))?;
        if !(calibration.sd > 0.0 && calibration.sd.is_finite()) {
            return Err(ScoringError::InvalidCalibration {
                label,
                sd: calibration.sd,
            });
        }

        let densities = self.residue_log_densities(system, residues);
        let n = densities.len();
        if n < self.reference.min_residues().max(2) {
            debug!(
                subset = %label,
                residues = n,
                "Too few residues with phi/psi to compute a Z-score"
            );
            return Ok(None);
        }

        let raw = densities.iter().sum::<f64>() / n as f64;
        let value = (raw - calibration.mean) / calibration.sd;
        let stderr = jackknife_stderr(&densities, calibration.mean, calibration.sd);
        if !value.is_finite() || !stderr.is_finite() {
            return Err(ScoringError::NonFinite(label));
        }

        debug!(subset = %label, residues = n, z = value, stderr, "Computed Rama-Z");
        Ok(Some(ZScore { value, stderr }))
    }
}
