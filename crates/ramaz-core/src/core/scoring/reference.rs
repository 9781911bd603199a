use crate::core::ramachandran::category::RamaCategory;
use crate::core::secondary::subset::SubsetLabel;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const CALIBRATION_FILE: &str = "calibration.toml";
pub const DENSITY_FILE: &str = "density.csv";

/// Narrowest accepted cell, in degrees. Caps a map at 720 x 720 cells.
pub const MIN_BIN_WIDTH: f64 = 0.5;

#[derive(Debug, Error)]
pub enum ReferenceLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid reference data in '{path}': {message}")]
    Invalid { path: String, message: String },
}

/// Mean and standard deviation of the average log density over a
/// reference set of high-quality models.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Calibration {
    pub mean: f64,
    pub sd: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CalibrationFile {
    bin_width: f64,
    floor: f64,
    #[serde(default = "default_min_residues")]
    min_residues: usize,
    #[serde(default)]
    calibration: HashMap<String, Calibration>,
}

fn default_min_residues() -> usize {
    2
}

#[derive(Debug, Deserialize)]
struct DensityRecord {
    category: String,
    phi: f64,
    psi: f64,
    log_density: f64,
}

/// Binned log-density maps of the six residue categories plus the Z-score
/// calibration of each subset.
///
/// The phi/psi plane is cut into square cells of `bin_width` degrees starting
/// at -180. Cells without a value take the `floor` log density.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    bin_width: f64,
    bins: usize,
    floor: f64,
    min_residues: usize,
    calibration: HashMap<SubsetLabel, Calibration>,
    grids: Vec<Vec<f64>>,
}

impl ReferenceData {
    /// Creates reference data with every cell at `floor` and no calibration.
    ///
    /// # Errors
    ///
    /// Returns a message if `bin_width` is outside
    /// [`MIN_BIN_WIDTH`]`..=180` or does not divide the 360 degree range into
    /// a whole number of cells.
    pub fn new(bin_width: f64, floor: f64, min_residues: usize) -> Result<Self, String> {
        if !(MIN_BIN_WIDTH..=180.0).contains(&bin_width) {
            return Err(format!(
                "bin width {} must be in [{}, 180]",
                bin_width, MIN_BIN_WIDTH
            ));
        }
        let bins = (360.0 / bin_width).round();
        if ((bins * bin_width) - 360.0).abs() > 1e-6 {
            return Err(format!("bin width {} does not divide 360", bin_width));
        }
        if !floor.is_finite() {
            return Err(format!("floor {} must be finite", floor));
        }
        let bins = bins as usize;
        Ok(Self {
            bin_width,
            bins,
            floor,
            min_residues,
            calibration: HashMap::new(),
            grids: vec![vec![floor; bins * bins]; RamaCategory::ALL.len()],
        })
    }

    /// Loads `calibration.toml` and `density.csv` from a directory.
    pub fn load(dir: &Path) -> Result<Self, ReferenceLoadError> {
        let calibration_path = dir.join(CALIBRATION_FILE);
        let density_path = dir.join(DENSITY_FILE);

        let file = Self::load_calibration(&calibration_path)?;
        let mut data = Self::new(file.bin_width, file.floor, file.min_residues).map_err(
            |message| ReferenceLoadError::Invalid {
                path: calibration_path.to_string_lossy().to_string(),
                message,
            },
        )?;
        for (name, calibration) in file.calibration {
            let label = SubsetLabel::from_str(&name).map_err(|message| {
                ReferenceLoadError::Invalid {
                    path: calibration_path.to_string_lossy().to_string(),
                    message,
                }
            })?;
            data.set_calibration(label, calibration);
        }
        data.load_density_csv(&density_path)?;
        Ok(data)
    }

    fn load_calibration(path: &Path) -> Result<CalibrationFile, ReferenceLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ReferenceLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ReferenceLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    fn load_density_csv(&mut self, path: &Path) -> Result<(), ReferenceLoadError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| ReferenceLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        for result in reader.deserialize::<DensityRecord>() {
            let record = result.map_err(|e| ReferenceLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            let category = RamaCategory::from_str(&record.category).map_err(|e| {
                ReferenceLoadError::Invalid {
                    path: path.to_string_lossy().to_string(),
                    message: e.to_string(),
                }
            })?;
            if !record.log_density.is_finite() {
                return Err(ReferenceLoadError::Invalid {
                    path: path.to_string_lossy().to_string(),
                    message: format!(
                        "non-finite log density at phi {} psi {}",
                        record.phi, record.psi
                    ),
                });
            }
            self.set_log_density(category, record.phi, record.psi, record.log_density);
        }
        Ok(())
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Fewest scorable residues for which a Z-score is reported.
    pub fn min_residues(&self) -> usize {
        self.min_residues
    }

    pub fn calibration(&self, label: SubsetLabel) -> Option<Calibration> {
        self.calibration.get(&label).copied()
    }

    pub fn set_calibration(&mut self, label: SubsetLabel, calibration: Calibration) {
        self.calibration.insert(label, calibration);
    }

    fn bin_index(&self, angle: f64) -> usize {
        let raw = ((angle + 180.0) / self.bin_width).floor();
        (raw.max(0.0) as usize).min(self.bins - 1)
    }

    fn cell(&self, phi: f64, psi: f64) -> usize {
        self.bin_index(phi) * self.bins + self.bin_index(psi)
    }

    pub fn set_log_density(&mut self, category: RamaCategory, phi: f64, psi: f64, value: f64) {
        let cell = self.cell(phi, psi);
        self.grids[category.index()][cell] = value;
    }

    /// Log density of the cell containing `(phi, psi)` for a category.
    pub fn log_density(&self, category: RamaCategory, phi: f64, psi: f64) -> f64 {
        self.grids[category.index()][self.cell(phi, psi)]
    }

    /// Log density by cell indices, `phi_bin` and `psi_bin` in `0..bins()`.
    pub fn cell_log_density(&self, category: RamaCategory, phi_bin: usize, psi_bin: usize) -> f64 {
        self.grids[category.index()]
            .get(phi_bin * self.bins + psi_bin)
            .copied()
            .unwrap_or(self.floor)
    }

    /// Largest log density of a category, or the floor for an empty map.
    pub fn max_log_density(&self, category: RamaCategory) -> f64 {
        self.grids[category.index()]
            .iter()
            .copied()
            .fold(self.floor, f64::max)
    }
}
