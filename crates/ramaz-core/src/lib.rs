//! # Rama-Z Core Library
//!
//! Ramachandran Z-score validation of protein models: how well the backbone torsions of a
//! model, and of its helix, sheet and loop parts, agree with a high-resolution reference
//! distribution.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that each concern can be tested on
//! its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), PDB I/O,
//!   backbone dihedrals, secondary-structure classifiers, the Z-score engine and the
//!   Ramachandran plot renderer.
//!
//! - **[`engine`]: The Pipeline.** Input validation, partitioning, scoring, artifact
//!   writing and report assembly, wired together through a per-run `RunContext`.
//!
//! - **[`workflows`]: The Public API.** [`workflows::rama_z::run`] executes the full
//!   validation for one model file and returns its report.

pub mod core;
pub mod engine;
pub mod workflows;
