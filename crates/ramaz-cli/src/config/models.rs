use ramaz::core::secondary::classifier::SecondaryStructureSource;
use ramaz::engine::config::RamaZConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub inputs: Vec<PathBuf>,
    pub reference_dir: PathBuf,
    pub secondary_structure: SecondaryStructureSource,
    pub report_file: Option<PathBuf>,
    pub core_config: RamaZConfig,
}
