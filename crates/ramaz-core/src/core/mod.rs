//! # Core Module
//!
//! This module provides the building blocks of Rama-Z validation: the model
//! representation, file I/O, backbone geometry and the concrete services the
//! pipeline drives.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains, systems and selections
//! - **File I/O** ([`io`]) - Reading and writing PDB files
//! - **Geometry** ([`utils`]) - Torsion measurement and internal-coordinate placement
//! - **Ramachandran Data** ([`ramachandran`]) - Backbone torsions and residue categories
//! - **Secondary Structure** ([`secondary`]) - Helix/sheet/loop assignment and subset labels
//! - **Scoring** ([`scoring`]) - Reference densities and the Z-score engine
//! - **Plots** ([`plot`]) - Ramachandran plot data and PNG rendering

pub mod io;
pub mod models;
pub mod plot;
pub mod ramachandran;
pub mod scoring;
pub mod secondary;
pub mod utils;
