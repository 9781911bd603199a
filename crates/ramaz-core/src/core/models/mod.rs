//! # Core Models Module
//!
//! This module contains the data structures used to represent macromolecular
//! models in Rama-Z.
//!
//! ## Overview
//!
//! A parsed coordinate file becomes a [`structure::Structure`], an ordered list of
//! conformational states. Each state is a [`system::MolecularSystem`] holding
//! chains, residues and atoms in slot-map arenas, addressed by the stable IDs
//! from [`ids`]. Residue subsets are expressed as a [`selection::ResidueSelection`]
//! and turned into derived systems with [`system::MolecularSystem::select`].
//!
//! ## Key Components
//!
//! - [`atom`] - Atom records with coordinates and crystallographic fields
//! - [`residue`] - Residues and amino-acid classification
//! - [`chain`] - Chains and their classification
//! - [`system`] - One conformational state with all chains, residues and atoms
//! - [`structure`] - All conformational states of one input file
//! - [`selection`] - Residue subsets of a system
//! - [`ids`] - Unique identifier types for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use ramaz::core::models::{atom::Atom, chain::ChainType, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A', ChainType::Protein);
//! let residue_id = system.add_residue(chain_id, 1, None, "ALA").unwrap();
//!
//! let atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue_id, atom);
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod selection;
pub mod structure;
pub mod system;
