use thiserror::Error;

use crate::core::plot::PlotError;
use crate::core::scoring::engine::ScoringError;
use crate::core::secondary::classifier::ClassificationError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Exactly one model file is required, but {found} were supplied")]
    InvalidInputCount { found: usize },

    #[error("Multi-model files are not supported (found {states} models)")]
    UnsupportedMultiModel { states: usize },

    #[error("Secondary-structure classification failed: {source}")]
    Classification {
        #[from]
        source: ClassificationError,
    },

    #[error("Calculation of z-score failed for the whole model: {source}")]
    ScoreComputationFailed { source: ScoringError },

    #[error("{} already exists and overwrite is set to False.", .path.display())]
    OutputAlreadyExists { path: PathBuf },

    #[error("Failed to create output directory '{}': {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write partial model '{}': {source}", .path.display())]
    ModelWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write plot: {source}")]
    PlotWrite {
        #[from]
        source: PlotError,
    },
}
