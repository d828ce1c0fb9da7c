//! Physical constants used throughout the density calculations (SI, CODATA 2018).

/// Atomic mass unit in kg
pub const ATOMIC_MASS_UNIT: f64 = 1.66053906660e-27;

/// Boltzmann constant in J/K
pub const BOLTZMANN_CONSTANT: f64 = 1.380649e-23;

/// Bohr radius in meters
pub const BOHR_RADIUS: f64 = 5.29177210903e-11;

/// Reduced Planck constant in J·s
pub const REDUCED_PLANCK_CONSTANT: f64 = 1.054571817e-34;

/// Mass of Rubidium-85 in atomic mass units
pub const RB85_MASS_AMU: f64 = 84.9117;

/// Mass of Rubidium-87 in atomic mass units
pub const RB87_MASS_AMU: f64 = 86.9092;

pub use std::f64::consts::PI;
