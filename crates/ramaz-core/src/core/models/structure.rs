use super::system::MolecularSystem;

/// All conformational states read from one coordinate file.
///
/// A plain file yields a single state; each `MODEL`/`ENDMDL` block of an
/// ensemble file yields one more.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    models: Vec<MolecularSystem>,
}

impl Structure {
    pub fn new(models: Vec<MolecularSystem>) -> Self {
        Self { models }
    }

    pub fn models_size(&self) -> usize {
        self.models.len()
    }

    pub fn models(&self) -> &[MolecularSystem] {
        &self.models
    }

    /// Consumes the structure and returns its only state.
    ///
    /// Returns `None` unless the structure holds exactly one state.
    pub fn into_single_model(mut self) -> Option<MolecularSystem> {
        if self.models.len() == 1 {
            self.models.pop()
        } else {
            None
        }
    }
}

impl From<MolecularSystem> for Structure {
    fn from(system: MolecularSystem) -> Self {
        Self::new(vec![system])
    }
}
