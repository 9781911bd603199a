use crate::error::{CliError, Result};
use ramaz::core::secondary::classifier::SecondaryStructureSource;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub directory: Option<PathBuf>,
    pub overwrite: Option<bool>,
    pub serial: Option<u32>,
    pub plot_dpi: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileArtifactConfig {
    pub write_hsl_models: Option<bool>,
    pub write_hsl_plot: Option<bool>,
    pub write_hsl_general_only: Option<bool>,
    pub write_whole_plot: Option<bool>,
    pub write_whole_general_only: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub reference_dir: Option<PathBuf>,
    pub secondary_structure: Option<SecondaryStructureSource>,
    pub output: Option<FileOutputConfig>,
    pub artifacts: Option<FileArtifactConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
