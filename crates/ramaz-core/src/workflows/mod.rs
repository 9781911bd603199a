//! # Workflows Module
//!
//! High-level entry points that run a complete validation from parsed input to report.
//!
//! ## Overview
//!
//! A workflow validates its inputs, drives the [`crate::engine`] stages in order and
//! returns the result to the caller. Printing and exit codes are left to the front end.
//!
//! - **Rama-Z Workflow** ([`rama_z`]) - Ramachandran Z-scores of a model and of its
//!   helix, sheet and loop subsets, with optional partial models and plots.

pub mod rama_z;
