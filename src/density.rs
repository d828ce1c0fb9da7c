//! Evaluation of cloud densities on coordinate grids.
//!
//! The dimensionality of the grid selects what is evaluated: the full 3D
//! density on a [`Grid3`], the column density (integrated along z) on a
//! [`Grid2`] and the line density (integrated along y and z) on a [`Grid1`].
//! Grids are filled in parallel with rayon.

use ndarray::{s, Array1, Array2, Array3, ArrayView1, Zip};

use crate::grid::{integrate_array, Grid1, Grid2, Grid3};

/// A cloud with closed-form densities.
pub trait CloudDensity: Sync {
    /// Density n(x, y, z) in m^-3.
    fn density(&self, x: f64, y: f64, z: f64) -> f64;

    /// Column density ∫ n dz in m^-2.
    fn column_density(&self, x: f64, y: f64) -> f64;

    /// Line density ∫∫ n dy dz in m^-1.
    fn line_density(&self, x: f64) -> f64;

    /// Analytic atom number ∫ n d³r.
    fn atom_number(&self) -> f64;
}

/// A grid on which a [`CloudDensity`] can be sampled.
pub trait DensityGrid: Sync {
    type Field: Send;

    fn evaluate<C: CloudDensity + ?Sized>(&self, cloud: &C) -> Self::Field;

    /// Differential element (dx, dA or dV).
    fn element(&self) -> f64;

    /// Atom number obtained by integrating a field sampled on this grid.
    fn integrate(&self, field: &Self::Field) -> f64;
}

impl DensityGrid for Grid1 {
    type Field = Array1<f64>;

    fn evaluate<C: CloudDensity + ?Sized>(&self, cloud: &C) -> Array1<f64> {
        let mut field = Array1::zeros(self.shape());
        Zip::from(&mut field)
            .and(&self.x)
            .par_for_each(|n, &x| *n = cloud.line_density(x));
        field
    }

    fn element(&self) -> f64 {
        Grid1::element(self)
    }

    fn integrate(&self, field: &Array1<f64>) -> f64 {
        integrate_array(field, Grid1::element(self))
    }
}

impl DensityGrid for Grid2 {
    type Field = Array2<f64>;

    fn evaluate<C: CloudDensity + ?Sized>(&self, cloud: &C) -> Array2<f64> {
        let mut field = Array2::zeros(self.shape());
        Zip::indexed(&mut field).par_for_each(|(i, j), n| {
            *n = cloud.column_density(self.x[i], self.y[j]);
        });
        field
    }

    fn element(&self) -> f64 {
        Grid2::element(self)
    }

    fn integrate(&self, field: &Array2<f64>) -> f64 {
        integrate_array(field, Grid2::element(self))
    }
}

impl DensityGrid for Grid3 {
    type Field = Array3<f64>;

    fn evaluate<C: CloudDensity + ?Sized>(&self, cloud: &C) -> Array3<f64> {
        let mut field = Array3::zeros(self.shape());
        Zip::indexed(&mut field).par_for_each(|(i, j, k), n| {
            *n = cloud.density(self.x[i], self.y[j], self.z[k]);
        });
        field
    }

    fn element(&self) -> f64 {
        Grid3::element(self)
    }

    fn integrate(&self, field: &Array3<f64>) -> f64 {
        integrate_array(field, Grid3::element(self))
    }
}

/// Samples `cloud` on `grid`.
pub fn density<G: DensityGrid, C: CloudDensity + ?Sized>(grid: &G, cloud: &C) -> G::Field {
    grid.evaluate(cloud)
}

/// Cut through the centre of a 3D field along x.
pub fn center_cut_3d(field: &Array3<f64>) -> ArrayView1<'_, f64> {
    let (_, ny, nz) = field.dim();
    field.slice(s![.., ny / 2, nz / 2])
}

/// Cut through the centre of a 2D field along x.
pub fn center_cut_2d(field: &Array2<f64>) -> ArrayView1<'_, f64> {
    let (_, ny) = field.dim();
    field.slice(s![.., ny / 2])
}
