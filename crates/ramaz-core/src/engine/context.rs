use super::config::RamaZConfig;
use super::naming::OutputNamer;
use super::progress::ProgressReporter;
use crate::core::io::traits::ModelSerializer;
use crate::core::plot::PlotRenderer;
use crate::core::scoring::engine::ZScoreEngine;
use crate::core::secondary::classifier::SecondaryStructureClassifier;

/// The collaborators the pipeline drives.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub classifier: &'a dyn SecondaryStructureClassifier,
    pub engine: &'a dyn ZScoreEngine,
    pub renderer: &'a dyn PlotRenderer,
    pub serializer: &'a dyn ModelSerializer,
}

/// Per-run values shared by the pipeline stages.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    pub basename: &'a str,
    pub config: &'a RamaZConfig,
    pub services: Services<'a>,
    pub reporter: &'a ProgressReporter<'a>,
    pub namer: OutputNamer<'a>,
}

impl<'a> RunContext<'a> {
    pub fn new(
        basename: &'a str,
        config: &'a RamaZConfig,
        services: Services<'a>,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            basename,
            config,
            services,
            reporter,
            namer: OutputNamer::new(&config.output.directory, config.output.serial),
        }
    }
}
