use super::ids::ResidueId;
use std::collections::HashSet;

/// A set of residues of one [`MolecularSystem`](super::system::MolecularSystem).
///
/// Selections are only meaningful for the system whose IDs they hold; applying
/// one to a different system selects whatever residues happen to share those keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueSelection {
    residues: HashSet<ResidueId>,
}

impl ResidueSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, residue_id: ResidueId) -> bool {
        self.residues.insert(residue_id)
    }

    pub fn contains(&self, residue_id: ResidueId) -> bool {
        self.residues.contains(&residue_id)
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ResidueId> + '_ {
        self.residues.iter().copied()
    }
}

impl FromIterator<ResidueId> for ResidueSelection {
    fn from_iter<I: IntoIterator<Item = ResidueId>>(iter: I) -> Self {
        Self {
            residues: iter.into_iter().collect(),
        }
    }
}
