use ramaz::core::scoring::reference::ReferenceLoadError;
use ramaz::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pipeline(#[from] EngineError),

    #[error("Failed to load reference data: {0}")]
    Reference(#[from] ReferenceLoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Outputs of {failed} subset(s) could not be written")]
    Artifacts { failed: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
