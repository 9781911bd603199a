//! Ramachandran Z-score computation.
//!
//! [`reference::ReferenceData`] holds per-category log-density maps and the
//! per-subset calibration; [`engine::RamaZEngine`] turns a model into a
//! [`engine::ZScore`] through the [`engine::ZScoreEngine`] trait.

pub mod engine;
pub mod reference;
