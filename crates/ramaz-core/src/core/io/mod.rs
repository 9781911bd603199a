//! Provides input/output functionality for molecular file formats.
//!
//! The [`traits::MolecularFile`] trait is the format-agnostic reading and
//! writing interface; [`pdb`] implements it for Protein Data Bank files.

pub mod pdb;
pub mod traits;
