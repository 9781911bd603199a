use slotmap::new_key_type;

new_key_type! {
    /// Stable handle of an [`Atom`](super::atom::Atom) inside a `MolecularSystem`.
    pub struct AtomId;
    /// Stable handle of a [`Residue`](super::residue::Residue); survives
    /// removal of other residues.
    pub struct ResidueId;
    /// Stable handle of a [`Chain`](super::chain::Chain).
    pub struct ChainId;
}
