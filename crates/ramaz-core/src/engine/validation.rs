use super::error::EngineError;
use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::traits::MolecularFile;
use crate::core::models::structure::Structure;
use crate::core::models::system::MolecularSystem;
use crate::core::secondary::annotation::SecondaryStructureAnnotation;
use std::path::Path;
use tracing::debug;

/// A parsed model file handed to the pipeline.
#[derive(Debug, Clone)]
pub struct ModelInput {
    /// File name without directory and extension; used as the output prefix.
    pub name: String,
    pub structure: Structure,
    pub annotation: SecondaryStructureAnnotation,
}

impl ModelInput {
    pub fn new(name: impl Into<String>, structure: Structure) -> Self {
        Self {
            name: name.into(),
            structure,
            annotation: SecondaryStructureAnnotation::default(),
        }
    }

    pub fn with_annotation(mut self, annotation: SecondaryStructureAnnotation) -> Self {
        self.annotation = annotation;
        self
    }

    /// Reads a PDB file, naming the input after the file stem.
    pub fn read_pdb(path: &Path) -> Result<Self, PdbError> {
        let (structure, metadata) = PdbFile::read_from_path(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "model".to_string());
        Ok(Self::new(name, structure).with_annotation(metadata.annotation))
    }
}

/// The single-state model that passed input validation.
#[derive(Debug, Clone)]
pub struct ValidatedModel {
    pub basename: String,
    pub system: MolecularSystem,
    pub annotation: SecondaryStructureAnnotation,
}

/// Accepts exactly one input holding exactly one conformational state.
pub fn validate_inputs(mut inputs: Vec<ModelInput>) -> Result<ValidatedModel, EngineError> {
    if inputs.len() != 1 {
        return Err(EngineError::InvalidInputCount {
            found: inputs.len(),
        });
    }
    let Some(input) = inputs.pop() else {
        return Err(EngineError::InvalidInputCount { found: 0 });
    };

    let states = input.structure.models_size();
    let system = input
        .structure
        .into_single_model()
        .ok_or(EngineError::UnsupportedMultiModel { states })?;

    debug!(
        model = %input.name,
        residues = system.residue_count(),
        atoms = system.atom_count(),
        "Validated input model"
    );
    Ok(ValidatedModel {
        basename: input.name,
        system,
        annotation: input.annotation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn input(states: usize) -> ModelInput {
        ModelInput::new("model", Structure::new(vec![MolecularSystem::new(); states]))
    }

    #[test]
    fn single_single_state_input_is_accepted() {
        let model = validate_inputs(vec![input(1)]).unwrap();
        assert_eq!(model.basename, "model");
    }

    #[test]
    fn zero_or_two_inputs_are_rejected() {
        assert!(matches!(
            validate_inputs(vec![]),
            Err(EngineError::InvalidInputCount { found: 0 })
        ));
        assert!(matches!(
            validate_inputs(vec![input(1), input(1)]),
            Err(EngineError::InvalidInputCount { found: 2 })
        ));
    }

    #[test]
    fn multi_state_and_empty_structures_are_rejected() {
        assert!(matches!(
            validate_inputs(vec![input(2)]),
            Err(EngineError::UnsupportedMultiModel { states: 2 })
        ));
        assert!(matches!(
            validate_inputs(vec![input(0)]),
            Err(EngineError::UnsupportedMultiModel { states: 0 })
        ));
    }

    #[test]
    fn read_pdb_uses_file_stem_and_keeps_annotation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("1abc.pdb");
        fs::write(
            &path,
            "\
HELIX    1   1 ALA A    1  ALA A    1  1                                   1
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
END
",
        )
        .unwrap();

        let input = ModelInput::read_pdb(&path).unwrap();
        assert_eq!(input.name, "1abc");
        assert_eq!(input.annotation.helix_count(), 1);
        assert_eq!(input.structure.models_size(), 1);
    }
}
