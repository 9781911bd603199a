use super::{PlotError, PlotRenderer, RamachandranPlot};
use crate::core::scoring::reference::ReferenceData;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

const MAX_DPI: u32 = 1200;
const GRID_STEP: usize = 60;

/// Renders plots as square PNG images.
///
/// When reference data is attached, the category's density map is shaded
/// behind the points. No text is drawn, so no font backend is needed.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    background: Option<ReferenceData>,
    inches: f64,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            background: None,
            inches: 5.0,
        }
    }
}

impl PngRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, reference: ReferenceData) -> Self {
        self.background = Some(reference);
        self
    }

    /// Edge length of the image in pixels for a resolution.
    pub fn image_size(&self, dpi: u32) -> u32 {
        ((self.inches * f64::from(dpi)).round() as u32).max(1)
    }
}

fn shade(value: f64, floor: f64, max: f64) -> Option<RGBColor> {
    if value <= floor || max <= floor {
        return None;
    }
    let t = ((value - floor) / (max - floor)).clamp(0.0, 1.0);
    Some(RGBColor(
        (255.0 - 135.0 * t) as u8,
        (255.0 - 75.0 * t) as u8,
        255,
    ))
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    plot: &RamachandranPlot,
    background: Option<&ReferenceData>,
    size: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(size / 40)
        .build_cartesian_2d(-180.0f64..180.0f64, -180.0f64..180.0f64)?;

    if let Some(reference) = background {
        let floor = reference.floor();
        let max = reference.max_log_density(plot.category);
        let width = reference.bin_width();
        let bins = reference.bins();
        let cells = (0..bins).flat_map(|i| (0..bins).map(move |j| (i, j)));
        chart
            .draw_series(cells.filter_map(|(i, j)| {
                let value = reference.cell_log_density(plot.category, i, j);
                let color = shade(value, floor, max)?;
                let phi = -180.0 + i as f64 * width;
                let psi = -180.0 + j as f64 * width;
                Some(Rectangle::new(
                    [(phi, psi), (phi + width, psi + width)],
                    color.filled(),
                ))
            }))?;
    }

    let grid = BLACK.mix(0.25);
    let ticks: Vec<f64> = (-180..=180).step_by(GRID_STEP).map(f64::from).collect();
    chart
        .draw_series(ticks.iter().flat_map(|&t| {
            [
                PathElement::new(vec![(t, -180.0), (t, 180.0)], grid),
                PathElement::new(vec![(-180.0, t), (180.0, t)], grid),
            ]
        }))?;

    let radius = (size / 300).max(2);
    chart
        .draw_series(
            plot.points
                .iter()
                .map(|&point| Circle::new(point, radius, YELLOW.filled())),
        )?;
    chart
        .draw_series(
            plot.points
                .iter()
                .map(|&point| Circle::new(point, radius, RED.stroke_width(1))),
        )?;

    Ok(())
}

impl PlotRenderer for PngRenderer {
    fn save_image(&self, plot: &RamachandranPlot, path: &Path, dpi: u32) -> Result<(), PlotError> {
        if dpi == 0 || dpi > MAX_DPI {
            return Err(PlotError::InvalidDpi(dpi));
        }
        let size = self.image_size(dpi);
        let render_error = |error: DrawingAreaErrorKind<_>| PlotError::Render {
            path: path.to_string_lossy().to_string(),
            message: error.to_string(),
        };

        let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
        draw(&root, plot, self.background.as_ref(), size).map_err(render_error)?;
        root.present().map_err(render_error)?;

        debug!(
            category = %plot.category,
            points = plot.points.len(),
            size,
            "Rendered Ramachandran plot"
        );
        Ok(())
    }
}
