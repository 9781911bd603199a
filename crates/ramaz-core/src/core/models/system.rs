use super::atom::Atom;
use super::chain::{Chain, ChainType};
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use super::selection::ResidueSelection;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Residue lookup key: chain, sequence number and insertion code.
type ResidueKey = (ChainId, isize, Option<char>);

/// Represents one conformational state of a macromolecular model.
///
/// Atoms, residues and chains live in slot maps so that their IDs stay valid
/// while the system is read. Chains and residues keep their file order, which
/// is also the order used by every iterator that walks the hierarchy.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in insertion order.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain, residue number and insertion code.
    residue_id_map: HashMap<ResidueKey, ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms in the system.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The residue ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Residue)` if the residue exists, otherwise `None`.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in the system.
    ///
    /// The order is storage order; use [`Self::ordered_residue_ids`] when
    /// chain order matters.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in file order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ChainId, &Chain)` pairs.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Finds a chain ID by its single-character identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - The character identifier of the chain.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its chain ID, residue number and insertion code.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain containing the residue.
    /// * `residue_number` - The sequence number of the residue.
    /// * `insertion_code` - The insertion code, `None` for the plain number.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if the residue exists, otherwise `None`.
    pub fn find_residue_by_id(
        &self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number, insertion_code))
            .copied()
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given ID already exists,
    /// it returns the existing chain ID without creating a duplicate.
    ///
    /// # Arguments
    ///
    /// * `id` - The single-character identifier for the chain.
    /// * `chain_type` - The type of the chain.
    ///
    /// # Return
    ///
    /// The ID of the chain (new or existing).
    pub fn add_chain(&mut self, id: char, chain_type: ChainType) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id, chain_type));
        self.chain_order.push(chain_id);
        self.chain_id_map.insert(id, chain_id);
        chain_id
    }

    /// Sets the type of an existing chain.
    ///
    /// Readers only know a chain's type after all of its records are seen.
    pub fn set_chain_type(&mut self, chain_id: ChainId, chain_type: ChainType) {
        if let Some(chain) = self.chains.get_mut(chain_id) {
            chain.chain_type = chain_type;
        }
    }

    /// Adds a new residue to the system or returns the existing one.
    ///
    /// This method is idempotent; if a residue with the given chain ID,
    /// residue number and insertion code already exists, it returns the
    /// existing residue ID.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain to add the residue to.
    /// * `residue_number` - The sequence number of the residue.
    /// * `insertion_code` - The insertion code, if any.
    /// * `name` - The name of the residue.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (e.g., if chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number, insertion_code);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(residue_number, insertion_code, name, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// # Arguments
    ///
    /// * `residue_id` - The ID of the residue to add the atom to.
    /// * `atom` - The atom to add. Its `residue_id` is overwritten.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (e.g., if residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }

        atom.residue_id = residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);

        let residue = self.residues.get_mut(residue_id)?;
        residue.add_atom(&name, atom_id);

        Some(atom_id)
    }

    /// Looks up an atom of a residue by name.
    pub fn residue_atom(&self, residue_id: ResidueId, atom_name: &str) -> Option<&Atom> {
        let atom_id = self.residue(residue_id)?.get_atom_id_by_name(atom_name)?;
        self.atom(atom_id)
    }

    /// Returns all residue IDs, chain by chain, in file order.
    pub fn ordered_residue_ids(&self) -> Vec<ResidueId> {
        self.chains_iter()
            .flat_map(|(_, chain)| chain.residues().iter().copied())
            .collect()
    }

    /// Returns the IDs of all amino-acid residues, in file order.
    pub fn amino_acid_residue_ids(&self) -> Vec<ResidueId> {
        self.ordered_residue_ids()
            .into_iter()
            .filter(|&id| self.residues.get(id).is_some_and(Residue::is_amino_acid))
            .collect()
    }

    /// Counts the amino-acid residues of the system.
    pub fn amino_acid_residue_count(&self) -> usize {
        self.residues
            .values()
            .filter(|residue| residue.is_amino_acid())
            .count()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Derives a new system containing only the selected residues.
    ///
    /// Chains, residues and atoms are copied in file order; chains left
    /// without residues are dropped. An empty selection yields an empty system.
    ///
    /// # Arguments
    ///
    /// * `selection` - Residue IDs of `self` to keep.
    ///
    /// # Return
    ///
    /// The derived system. Its IDs are unrelated to the IDs of `self`.
    pub fn select(&self, selection: &ResidueSelection) -> MolecularSystem {
        let mut selected = MolecularSystem::new();

        for (_, chain) in self.chains_iter() {
            let mut new_chain_id = None;
            for &residue_id in chain.residues() {
                if !selection.contains(residue_id) {
                    continue;
                }
                let Some(residue) = self.residues.get(residue_id) else {
                    continue;
                };
                let chain_id = *new_chain_id
                    .get_or_insert_with(|| selected.add_chain(chain.id, chain.chain_type));
                let Some(new_residue_id) = selected.add_residue(
                    chain_id,
                    residue.number,
                    residue.insertion_code,
                    &residue.name,
                ) else {
                    continue;
                };
                for &atom_id in residue.atoms() {
                    if let Some(atom) = self.atoms.get(atom_id) {
                        selected.add_atom_to_residue(new_residue_id, atom.clone());
                    }
                }
            }
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    struct TestRefs {
        chain_a_id: ChainId,
        gly_id: ResidueId,
        gly_n_id: AtomId,
        ala_id: ResidueId,
        hoh_id: ResidueId,
    }

    fn create_standard_test_system() -> (MolecularSystem, TestRefs) {
        let mut system = MolecularSystem::new();

        let chain_a_id = system.add_chain('A', ChainType::Protein);

        let gly_id = system.add_residue(chain_a_id, 1, None, "GLY").unwrap();
        let gly_n_id = system
            .add_atom_to_residue(gly_id, Atom::new("N", gly_id, Point3::new(0.0, 0.0, 0.0)))
            .unwrap();
        system
            .add_atom_to_residue(gly_id, Atom::new("CA", gly_id, Point3::new(1.4, 0.0, 0.0)))
            .unwrap();

        let ala_id = system.add_residue(chain_a_id, 2, None, "ALA").unwrap();
        system
            .add_atom_to_residue(ala_id, Atom::new("CA", ala_id, Point3::new(2.0, 1.0, 0.0)))
            .unwrap();

        let chain_w_id = system.add_chain('W', ChainType::Water);
        let hoh_id = system.add_residue(chain_w_id, 101, None, "HOH").unwrap();
        system
            .add_atom_to_residue(hoh_id, Atom::new("O", hoh_id, Point3::new(9.0, 9.0, 9.0)))
            .unwrap();

        let refs = TestRefs {
            chain_a_id,
            gly_id,
            gly_n_id,
            ala_id,
            hoh_id,
        };
        (system, refs)
    }

    #[test]
    fn system_creation_and_access() {
        let (system, refs) = create_standard_test_system();

        assert_eq!(system.atom_count(), 4);
        assert_eq!(system.residue_count(), 3);
        assert_eq!(system.chains_iter().count(), 2);
        assert!(system.find_chain_by_id('B').is_none());

        let found_gly = system.find_residue_by_id(refs.chain_a_id, 1, None).unwrap();
        assert_eq!(found_gly, refs.gly_id);
        assert!(system.find_residue_by_id(refs.chain_a_id, 1, Some('A')).is_none());

        assert_eq!(system.residue(refs.gly_id).unwrap().name, "GLY");
        assert_eq!(system.atom(refs.gly_n_id).unwrap().name, "N");
        assert_eq!(system.residue_atom(refs.ala_id, "CA").unwrap().name, "CA");
        assert!(system.residue_atom(refs.ala_id, "N").is_none());
    }

    #[test]
    fn add_chain_and_residue_are_idempotent() {
        let (mut system, refs) = create_standard_test_system();
        assert_eq!(system.add_chain('A', ChainType::Other), refs.chain_a_id);
        assert_eq!(
            system.add_residue(refs.chain_a_id, 2, None, "ALA"),
            Some(refs.ala_id)
        );
        assert_eq!(system.chain(refs.chain_a_id).unwrap().residues().len(), 2);
    }

    #[test]
    fn ordered_residue_ids_follow_chain_order() {
        let (system, refs) = create_standard_test_system();
        assert_eq!(
            system.ordered_residue_ids(),
            vec![refs.gly_id, refs.ala_id, refs.hoh_id]
        );
        assert_eq!(
            system.amino_acid_residue_ids(),
            vec![refs.gly_id, refs.ala_id]
        );
        assert_eq!(system.amino_acid_residue_count(), 2);
    }

    #[test]
    fn add_atom_to_missing_residue_returns_none() {
        let (mut system, _) = create_standard_test_system();
        let null_id = ResidueId::default();
        let result = system.add_atom_to_residue(null_id, Atom::new("CA", null_id, Point3::origin()));
        assert!(result.is_none());
        assert_eq!(system.atom_count(), 4);
    }

    #[test]
    fn select_copies_only_chosen_residues_in_order() {
        let (system, refs) = create_standard_test_system();
        let selection: ResidueSelection = [refs.ala_id, refs.gly_id].into_iter().collect();

        let selected = system.select(&selection);

        assert_eq!(selected.chains_iter().count(), 1);
        assert_eq!(selected.residue_count(), 2);
        assert_eq!(selected.atom_count(), 3);
        let names: Vec<_> = selected
            .ordered_residue_ids()
            .into_iter()
            .map(|id| selected.residue(id).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["GLY", "ALA"]);

        for (atom_id, atom) in selected.atoms_iter() {
            let residue = selected.residue(atom.residue_id).unwrap();
            assert!(residue.atoms().contains(&atom_id));
        }
    }

    #[test]
    fn select_with_empty_selection_yields_empty_system() {
        let (system, _) = create_standard_test_system();
        let selected = system.select(&ResidueSelection::new());
        assert!(selected.is_empty());
        assert_eq!(selected.chains_iter().count(), 0);
    }

    #[test]
    fn set_chain_type_updates_existing_chain() {
        let (mut system, refs) = create_standard_test_system();
        system.set_chain_type(refs.chain_a_id, ChainType::Other);
        assert_eq!(
            system.chain(refs.chain_a_id).unwrap().chain_type,
            ChainType::Other
        );
    }
}
