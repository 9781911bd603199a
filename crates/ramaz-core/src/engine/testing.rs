//! Test doubles for the pipeline's collaborators.

use crate::core::io::traits::ModelSerializer;
use crate::core::models::selection::ResidueSelection;
use crate::core::models::system::MolecularSystem;
use crate::core::plot::{PlotError, PlotRenderer, RamachandranPlot};
use crate::core::ramachandran::dihedrals::tests::build_chain;
use crate::core::scoring::engine::{ScoringError, ZScore, ZScoreEngine};
use crate::core::secondary::annotation::SecondaryStructureAnnotation;
use crate::core::secondary::classifier::{
    ClassificationError, SecondaryStructure, SecondaryStructureClassifier,
};
use crate::core::secondary::subset::SubsetLabel;
use crate::engine::partition::Subset;
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

/// Returns a one-chain system of `residues` alanines.
pub fn alanine_system(residues: usize) -> MolecularSystem {
    let mut system = MolecularSystem::new();
    build_chain(&mut system, 'A', &vec![("ALA", -60.0, -45.0, 180.0); residues]);
    system
}

/// A subset owning an alanine system of `residues` residues, all selected.
pub fn owned_subset(label: SubsetLabel, residues: usize) -> Subset<'static> {
    let system = alanine_system(residues);
    Subset {
        label,
        selection: system.amino_acid_residue_ids().into_iter().collect(),
        model: Cow::Owned(system),
        residue_count: residues,
    }
}

/// Puts the first `helix` amino acids in the helix, the next `sheet` in the
/// sheet and the rest in the loop.
pub struct SplitClassifier {
    pub helix: usize,
    pub sheet: usize,
}

impl SecondaryStructureClassifier for SplitClassifier {
    fn classify(
        &self,
        system: &MolecularSystem,
        _annotation: &SecondaryStructureAnnotation,
    ) -> Result<SecondaryStructure, ClassificationError> {
        let ids = system.amino_acid_residue_ids();
        let helix_end = self.helix.min(ids.len());
        let sheet_end = (self.helix + self.sheet).min(ids.len());
        Ok(SecondaryStructure {
            helix: ids[..helix_end].iter().copied().collect(),
            sheet: ids[helix_end..sheet_end].iter().copied().collect(),
            loop_region: ids[sheet_end..].iter().copied().collect(),
        })
    }
}

/// Scores every subset as minus its selected residue count, failing on request.
#[derive(Default)]
pub struct FakeEngine {
    pub failing: HashSet<SubsetLabel>,
    pub unscorable: HashSet<SubsetLabel>,
    pub calls: Mutex<Vec<SubsetLabel>>,
}

impl ZScoreEngine for FakeEngine {
    fn score(
        &self,
        label: SubsetLabel,
        _system: &MolecularSystem,
        residues: &ResidueSelection,
    ) -> Result<Option<ZScore>, ScoringError> {
        self.calls.lock().unwrap().push(label);
        if self.failing.contains(&label) {
            return Err(ScoringError::MissingCalibration(label));
        }
        if self.unscorable.contains(&label) {
            return Ok(None);
        }
        Ok(Some(ZScore {
            value: -(residues.len() as f64),
            stderr: 0.25,
        }))
    }
}

/// Writes the plot's category label as the image content.
#[derive(Default)]
pub struct TextRenderer {
    pub fail: bool,
}

impl PlotRenderer for TextRenderer {
    fn save_image(&self, plot: &RamachandranPlot, path: &Path, dpi: u32) -> Result<(), PlotError> {
        if self.fail {
            return Err(PlotError::Render {
                path: path.to_string_lossy().to_string(),
                message: "backend unavailable".into(),
            });
        }
        std::fs::write(
            path,
            format!("{} {} {}", plot.category, plot.points.len(), dpi),
        )
        .map_err(|e| PlotError::Render {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })
    }
}

/// Writes the residue count of the model as the file content.
pub struct CountSerializer;

impl ModelSerializer for CountSerializer {
    fn extension(&self) -> &'static str {
        "pdb"
    }

    fn write_model(&self, system: &MolecularSystem, path: &Path) -> Result<(), std::io::Error> {
        std::fs::write(path, system.residue_count().to_string())
    }
}
