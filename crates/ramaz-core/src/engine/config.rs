use crate::core::secondary::subset::SubsetLabel;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PLOT_DPI: u32 = 300;
const MAX_PLOT_DPI: u32 = 1200;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Which group of artifact options applies to a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsetKind {
    /// The whole model.
    Whole,
    /// The helix, sheet and loop partitions.
    Hsl,
}

impl SubsetKind {
    pub fn of(label: SubsetLabel) -> Self {
        match label {
            SubsetLabel::Whole => SubsetKind::Whole,
            SubsetLabel::Helix | SubsetLabel::Sheet | SubsetLabel::Loop => SubsetKind::Hsl,
        }
    }
}

/// Plot settings resolved for one [`SubsetKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub enabled: bool,
    /// Render only the `General` category instead of all six.
    pub general_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub write_hsl_models: bool,
    pub write_hsl_plot: bool,
    pub write_hsl_general_only: bool,
    pub write_whole_plot: bool,
    pub write_whole_general_only: bool,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            write_hsl_models: false,
            write_hsl_plot: false,
            write_hsl_general_only: true,
            write_whole_plot: false,
            write_whole_general_only: true,
        }
    }
}

impl ArtifactConfig {
    pub fn plot_options(&self, kind: SubsetKind) -> PlotOptions {
        match kind {
            SubsetKind::Whole => PlotOptions {
                enabled: self.write_whole_plot,
                general_only: self.write_whole_general_only,
            },
            SubsetKind::Hsl => PlotOptions {
                enabled: self.write_hsl_plot,
                general_only: self.write_hsl_general_only,
            },
        }
    }

    /// Partial models are only written for the partitions; the whole model
    /// is the input itself.
    pub fn writes_models(&self, kind: SubsetKind) -> bool {
        kind == SubsetKind::Hsl && self.write_hsl_models
    }

    pub fn any_enabled(&self) -> bool {
        self.write_hsl_models || self.write_hsl_plot || self.write_whole_plot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub overwrite: bool,
    /// Appended to every file name as `_NNN` when set.
    pub serial: Option<u32>,
    pub plot_dpi: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamaZConfig {
    pub artifacts: ArtifactConfig,
    pub output: OutputConfig,
}

#[derive(Default)]
pub struct RamaZConfigBuilder {
    artifacts: Option<ArtifactConfig>,
    output_directory: Option<PathBuf>,
    overwrite: Option<bool>,
    serial: Option<u32>,
    plot_dpi: Option<u32>,
}

impl RamaZConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(mut self, artifacts: ArtifactConfig) -> Self {
        self.artifacts = Some(artifacts);
        self
    }
    pub fn output_directory(mut self, directory: PathBuf) -> Self {
        self.output_directory = Some(directory);
        self
    }
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }
    pub fn serial(mut self, serial: Option<u32>) -> Self {
        self.serial = serial;
        self
    }
    pub fn plot_dpi(mut self, dpi: u32) -> Self {
        self.plot_dpi = Some(dpi);
        self
    }

    pub fn build(self) -> Result<RamaZConfig, ConfigError> {
        let plot_dpi = self.plot_dpi.unwrap_or(DEFAULT_PLOT_DPI);
        if plot_dpi == 0 || plot_dpi > MAX_PLOT_DPI {
            return Err(ConfigError::InvalidParameter {
                name: "plot_dpi",
                reason: format!("{} is outside 1-{}", plot_dpi, MAX_PLOT_DPI),
            });
        }
        let output = OutputConfig {
            directory: self
                .output_directory
                .ok_or(ConfigError::MissingParameter("output_directory"))?,
            overwrite: self.overwrite.unwrap_or(false),
            serial: self.serial,
            plot_dpi,
        };
        Ok(RamaZConfig {
            artifacts: self.artifacts.unwrap_or_default(),
            output,
        })
    }
}
