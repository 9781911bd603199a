use ramaz::core::secondary::classifier::SecondaryStructureSource;
use ramaz::engine::config::{ArtifactConfig, DEFAULT_PLOT_DPI};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub secondary_structure: SecondaryStructureSource,
    pub output_directory: PathBuf,
    pub overwrite: bool,
    pub plot_dpi: u32,
    pub artifacts: ArtifactConfig,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            secondary_structure: SecondaryStructureSource::Auto,
            output_directory: PathBuf::from("."),
            overwrite: false,
            plot_dpi: DEFAULT_PLOT_DPI,
            artifacts: ArtifactConfig::default(),
        }
    }
}
