//! Coordinate grids for evaluating densities in one, two and three dimensions.
//!
//! Each axis spans `[-extent * scale, extent * scale]`, where the scale is a
//! cloud size (Thomas-Fermi radius or thermal width) along that axis. The
//! same number of points is used on every axis so that the centre index
//! `points / 2` is shared by all of them.

use ndarray::{Array1, ArrayBase, Data, Dimension};
use num_traits::Float;

use crate::error::{ensure_positive, SimbiError, SimbiResult};

/// Builds a symmetric, uniformly sampled axis.
///
/// # Arguments
///
/// * `scale` - Cloud size along the axis in m (a radius or a width).
/// * `extent` - Half width of the axis in units of `scale`.
/// * `points` - Number of samples, at least 2.
///
/// # Returns
///
/// The axis `[-extent * scale, extent * scale]`, or `InvalidParameter` for
/// non-positive sizes and fewer than two points.
pub fn axis(scale: f64, extent: f64, points: usize) -> SimbiResult<Array1<f64>> {
    let half_width = ensure_positive("scale", scale)? * ensure_positive("extent", extent)?;
    if points < 2 {
        return Err(SimbiError::InvalidParameter {
            name: "points",
            message: format!("at least 2 points per axis are required, got {points}"),
        });
    }
    Ok(Array1::linspace(-half_width, half_width, points))
}

fn spacing(axis: &Array1<f64>) -> f64 {
    axis[1] - axis[0]
}

/// Line grid along x.
#[derive(Debug, Clone)]
pub struct Grid1 {
    pub x: Array1<f64>,
}

/// Plane grid in (x, y); densities on it are integrated along z.
#[derive(Debug, Clone)]
pub struct Grid2 {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

/// Volume grid in (x, y, z).
#[derive(Debug, Clone)]
pub struct Grid3 {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
}

impl Grid1 {
    pub fn new(scale: f64, extent: f64, points: usize) -> SimbiResult<Self> {
        Ok(Grid1 {
            x: axis(scale, extent, points)?,
        })
    }

    /// Line element dx.
    pub fn element(&self) -> f64 {
        spacing(&self.x)
    }

    pub fn shape(&self) -> usize {
        self.x.len()
    }
}

impl Grid2 {
    pub fn new(scales: [f64; 2], extent: f64, points: usize) -> SimbiResult<Self> {
        Ok(Grid2 {
            x: axis(scales[0], extent, points)?,
            y: axis(scales[1], extent, points)?,
        })
    }

    /// Area element dx·dy.
    pub fn element(&self) -> f64 {
        spacing(&self.x) * spacing(&self.y)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.x.len(), self.y.len())
    }
}

impl Grid3 {
    pub fn new(scales: [f64; 3], extent: f64, points: usize) -> SimbiResult<Self> {
        Ok(Grid3 {
            x: axis(scales[0], extent, points)?,
            y: axis(scales[1], extent, points)?,
            z: axis(scales[2], extent, points)?,
        })
    }

    /// Volume element dx·dy·dz.
    pub fn element(&self) -> f64 {
        spacing(&self.x) * spacing(&self.y) * spacing(&self.z)
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.x.len(), self.y.len(), self.z.len())
    }
}

/// Coordinates for one, two and three dimensions built from the same axes.
#[derive(Debug, Clone)]
pub struct Coordinates {
    pub volume: Grid3,
    pub plane: Grid2,
    pub line: Grid1,
    /// Number of points per axis
    pub points: usize,
}

impl Coordinates {
    /// Builds the volume, plane and line grids from one set of axes.
    ///
    /// # Arguments
    ///
    /// * `scales` - Cloud sizes along x, y and z in m.
    /// * `extent` - Half width of every axis in units of its scale.
    /// * `points` - Number of samples per axis.
    pub fn new(scales: [f64; 3], extent: f64, points: usize) -> SimbiResult<Self> {
        let volume = Grid3::new(scales, extent, points)?;
        let plane = Grid2 {
            x: volume.x.clone(),
            y: volume.y.clone(),
        };
        let line = Grid1 {
            x: volume.x.clone(),
        };
        log::debug!(
            "Coordinates: {} points per axis, half widths ({:.3e}, {:.3e}, {:.3e}) m",
            points,
            volume.x[points - 1],
            volume.y[points - 1],
            volume.z[points - 1]
        );
        Ok(Coordinates {
            volume,
            plane,
            line,
            points,
        })
    }

    /// Differential elements (dV, dA, dx).
    pub fn elements(&self) -> (f64, f64, f64) {
        (
            self.volume.element(),
            self.plane.element(),
            self.line.element(),
        )
    }

    /// Index of the grid centre on every axis.
    pub fn center(&self) -> usize {
        self.points / 2
    }
}

/// Integrates a sampled field: Σ field · element.
pub fn integrate_array<A, S, D>(array: &ArrayBase<S, D>, element: A) -> A
where
    A: Float,
    S: Data<Elem = A>,
    D: Dimension,
{
    array.iter().fold(A::zero(), |acc, &v| acc + v) * element
}
