//! Utility functions for file output and for reporting atom-number checks.
//!
//! The writers save axes and density fields as comma-separated text so they
//! can be post-processed elsewhere.

use itertools::Itertools;
use ndarray::{Array1, Array2};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SimbiResult;

/// Writes a 2D array of real numbers to a file, one row per line.
///
/// Column densities are saved this way, with rows along x and columns
/// along y.
///
/// # Arguments
///
/// * `array` - A 2D array of real numbers, e.g. a column density in m^-2.
/// * `filename` - The path of the file to write the data to.
///
/// # Returns
///
/// A `Result` indicating success or an I/O error.
pub fn write_real_2d(array: &Array2<f64>, filename: &Path) -> SimbiResult<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    for row in array.rows() {
        writeln!(writer, "{}", row.iter().join(","))?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes coordinate (or any 1D) data to a file on a single line.
///
/// # Arguments
///
/// * `data` - A 1D array, usually a grid axis in m.
/// * `filename` - The path of the file to write the data to.
///
/// # Returns
///
/// A `Result` indicating success or an I/O error.
pub fn write_coords(data: &Array1<f64>, filename: &Path) -> SimbiResult<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", data.iter().join(","))?;
    writer.flush()?;

    Ok(())
}

/// Analytic atom number of a cloud next to the numbers obtained by
/// integrating its sampled densities.
#[derive(Debug, Clone)]
pub struct AtomNumberCheck {
    pub label: String,
    pub analytic: f64,
    pub integrated: Vec<(&'static str, f64)>,
}

/// Labels for integrals over the 3D, 2D and 1D fields.
pub const INTEGRAL_LABELS: [&str; 3] = ["3D Integrated", "2D Integrated", "1D Integrated"];

impl AtomNumberCheck {
    pub fn new(label: impl Into<String>, analytic: f64) -> Self {
        AtomNumberCheck {
            label: label.into(),
            analytic,
            integrated: Vec::new(),
        }
    }

    /// Checks for the 3D, 2D and 1D integrals, in that order.
    pub fn with_dimensions(label: impl Into<String>, analytic: f64, integrals: [f64; 3]) -> Self {
        let mut check = AtomNumberCheck::new(label, analytic);
        check.integrated = INTEGRAL_LABELS.iter().cloned().zip(integrals).collect();
        check
    }

    pub fn push(&mut self, label: &'static str, value: f64) {
        self.integrated.push((label, value));
    }

    /// Largest |integrated - analytic| / analytic over all integrals.
    pub fn max_relative_error(&self) -> f64 {
        if self.analytic == 0.0 {
            return self.integrated.iter().map(|(_, v)| v.abs()).fold(0.0, f64::max);
        }
        self.integrated
            .iter()
            .map(|(_, v)| ((v - self.analytic) / self.analytic).abs())
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for AtomNumberCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        writeln!(f, "Analytic: {:.6e}", self.analytic)?;
        for (label, value) in &self.integrated {
            writeln!(f, "{}: {:.6e}", label, value)?;
        }
        write!(f, "{}", "-".repeat(15))
    }
}
