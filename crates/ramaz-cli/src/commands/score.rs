use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ramaz::core::io::pdb::PdbFile;
use ramaz::core::plot::renderer::PngRenderer;
use ramaz::core::scoring::engine::RamaZEngine;
use ramaz::core::scoring::reference::ReferenceData;
use ramaz::core::secondary::classifier::DefaultClassifier;
use ramaz::engine::context::Services;
use ramaz::engine::progress::ProgressReporter;
use ramaz::engine::report::Report;
use ramaz::engine::validation::ModelInput;
use ramaz::workflows;
use std::path::Path;
use tracing::{info, warn};

pub fn run(config: AppConfig) -> Result<()> {
    let inputs = config
        .inputs
        .iter()
        .map(|path| {
            info!("Loading input structure from {:?}", path);
            ModelInput::read_pdb(path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Loading reference data from {:?}", &config.reference_dir);
    let reference = ReferenceData::load(&config.reference_dir)?;

    let classifier = DefaultClassifier::new(config.secondary_structure);
    let renderer = PngRenderer::new().with_background(reference.clone());
    let engine = RamaZEngine::new(reference);
    let services = Services {
        classifier: &classifier,
        engine: &engine,
        renderer: &renderer,
        serializer: &PdbFile,
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core Rama-Z workflow...");
    let outcome = workflows::rama_z::run(inputs, &config.core_config, services, &reporter)?;

    print!("{}", outcome.report);
    if !outcome.report.whole().is_scored() {
        warn!("Calculation of z-score failed");
        println!("Warning: Calculation of z-score failed");
    }

    if let Some(path) = &config.report_file {
        write_report_file(&outcome.report, path)?;
        info!("Report written to {:?}", path);
    }

    if !outcome.artifacts.is_success() {
        for failure in &outcome.artifacts.failures {
            eprintln!(
                "Outputs of subset '{}' were not completed: {}",
                failure.subset, failure.error
            );
        }
        return Err(CliError::Artifacts {
            failed: outcome.artifacts.failures.len(),
        });
    }

    info!("{} file(s) written.", outcome.artifacts.written.len());
    Ok(())
}

fn write_report_file(report: &Report, path: &Path) -> Result<()> {
    let content = toml::to_string(report).map_err(|e| CliError::Other(e.into()))?;
    std::fs::write(path, content)?;
    Ok(())
}
