//! # Engine Module
//!
//! This module implements the Rama-Z pipeline stages: validating the input model,
//! splitting it into secondary-structure subsets, scoring those subsets, and writing
//! the requested artifacts.
//!
//! ## Overview
//!
//! The engine is stateless between runs. Each stage takes the output of the previous
//! one plus a [`context::RunContext`] carrying the run configuration, the collaborators
//! (classifier, Z-score engine, plot renderer, model serializer) and the progress
//! reporter. The stages are composed by [`crate::workflows::rama_z`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Artifact flags and output settings, built with a builder
//! - **Validation** ([`validation`]) - Input count and single-state checks
//! - **Partitioning** ([`partition`]) - Whole, helix, sheet and loop subsets
//! - **Scoring** ([`orchestrator`]) - One engine call per retained subset
//! - **Artifacts** ([`artifacts`], [`naming`]) - Partial models, plots and their file names
//! - **Reporting** ([`report`]) - The per-label score records handed back to callers
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod artifacts;
pub mod config;
pub mod context;
pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod partition;
pub mod progress;
pub mod report;
#[cfg(test)]
pub(crate) mod testing;
pub mod validation;
