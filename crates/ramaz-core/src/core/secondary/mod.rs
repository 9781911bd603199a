//! Secondary-structure assignment.
//!
//! A model's residues are split into helix, sheet and loop either from the
//! `HELIX`/`SHEET` records of its file ([`classifier::AnnotationClassifier`])
//! or from runs of backbone torsions ([`dihedral::DihedralClassifier`]).

pub mod annotation;
pub mod classifier;
pub mod dihedral;
pub mod subset;
