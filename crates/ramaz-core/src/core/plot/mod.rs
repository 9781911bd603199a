//! Ramachandran plot data and image rendering.
//!
//! Plot data is derived from the backbone torsions of a model, one plot per
//! residue category in table order. [`renderer::PngRenderer`] draws them as
//! square PNG images with the `plotters` bitmap backend.

pub mod renderer;

use crate::core::models::system::MolecularSystem;
use crate::core::ramachandran::category::RamaCategory;
use crate::core::ramachandran::dihedrals::backbone_dihedrals;
use std::path::Path;
use thiserror::Error;

/// The phi/psi points of one residue category of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct RamachandranPlot {
    pub category: RamaCategory,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Invalid plot resolution: {0} dpi (expected 1-1200)")]
    InvalidDpi(u32),
    #[error("Failed to render Ramachandran plot to '{path}': {message}")]
    Render { path: String, message: String },
}

/// Builds the six per-category plots of a model, in table order.
///
/// Residues without both phi and psi are left out; categories without
/// residues still get an (empty) plot.
pub fn ramachandran_plots(system: &MolecularSystem) -> Vec<RamachandranPlot> {
    let mut plots: Vec<RamachandranPlot> = RamaCategory::ALL
        .into_iter()
        .map(|category| RamachandranPlot {
            category,
            points: Vec::new(),
        })
        .collect();

    for row in backbone_dihedrals(system) {
        if let Some(point) = row.phi_psi() {
            plots[row.category.index()].points.push(point);
        }
    }
    plots
}

/// Turns models into plot data and writes plot images.
pub trait PlotRenderer {
    /// Returns the six category plots of `system`, in table order.
    fn render(&self, system: &MolecularSystem) -> Vec<RamachandranPlot> {
        ramachandran_plots(system)
    }

    /// Writes one plot as an image at `path`.
    fn save_image(&self, plot: &RamachandranPlot, path: &Path, dpi: u32)
    -> Result<(), PlotError>;
}
