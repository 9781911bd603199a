//! Backbone torsion extraction and the residue categories used for
//! Ramachandran statistics.

pub mod category;
pub mod dihedrals;
