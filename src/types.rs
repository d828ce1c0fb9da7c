//! Defines the trap, species and thermodynamic types shared by the cloud models.

use super::constants::*;
use crate::error::{ensure_positive, SimbiResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Harmonic trap, described by its angular frequencies in rad/s.
///
/// The potential is given by V(r) = 1/2 * m * (ωx^2 * x^2 + ωy^2 * y^2 + ωz^2 * z^2)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub frequency_x: f64,
    pub frequency_y: f64,
    pub frequency_z: f64,
}

impl Trap {
    /// Builds a trap from angular frequencies in rad/s.
    pub fn new(frequency_x: f64, frequency_y: f64, frequency_z: f64) -> SimbiResult<Self> {
        Ok(Trap {
            frequency_x: ensure_positive("frequency_x", frequency_x)?,
            frequency_y: ensure_positive("frequency_y", frequency_y)?,
            frequency_z: ensure_positive("frequency_z", frequency_z)?,
        })
    }

    /// Builds a trap from ordinary frequencies in Hz.
    pub fn from_hz(fx: f64, fy: f64, fz: f64) -> SimbiResult<Self> {
        Trap::new(2.0 * PI * fx, 2.0 * PI * fy, 2.0 * PI * fz)
    }

    pub fn frequencies(&self) -> [f64; 3] {
        [self.frequency_x, self.frequency_y, self.frequency_z]
    }

    /// Geometric mean trap frequency ω̄ = (ωx ωy ωz)^(1/3).
    pub fn mean_frequency(&self) -> f64 {
        (self.frequency_x * self.frequency_y * self.frequency_z).cbrt()
    }

    pub fn validate(&self) -> SimbiResult<()> {
        Trap::new(self.frequency_x, self.frequency_y, self.frequency_z).map(|_| ())
    }
}

/// Represents an atomic species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Mass in kg
    pub atomic_mass: f64,
    /// s-wave scattering length in m
    pub scattering_length: f64,
}

impl Species {
    pub fn new(atomic_mass: f64, scattering_length: f64) -> SimbiResult<Self> {
        Ok(Species {
            atomic_mass: ensure_positive("atomic_mass", atomic_mass)?,
            scattering_length: ensure_positive("scattering_length", scattering_length)?,
        })
    }

    pub fn rubidium_85() -> Self {
        Species {
            atomic_mass: RB85_MASS_AMU * ATOMIC_MASS_UNIT,
            scattering_length: 100.0 * BOHR_RADIUS,
        }
    }

    pub fn rubidium_87() -> Self {
        Species {
            atomic_mass: RB87_MASS_AMU * ATOMIC_MASS_UNIT,
            scattering_length: 100.0 * BOHR_RADIUS,
        }
    }

    /// Calculates the interaction strength g = 4πℏ²a_s/m.
    pub fn interaction_strength(&self) -> f64 {
        4.0 * PI * REDUCED_PLANCK_CONSTANT.powi(2) * self.scattering_length / self.atomic_mass
    }

    /// Harmonic oscillator length sqrt(ℏ/(mω)).
    pub fn oscillator_length(&self, frequency: f64) -> f64 {
        (REDUCED_PLANCK_CONSTANT / (self.atomic_mass * frequency)).sqrt()
    }

    pub fn validate(&self) -> SimbiResult<()> {
        Species::new(self.atomic_mass, self.scattering_length).map(|_| ())
    }
}

/// Atom numbers of a (possibly) bimodal cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomNumbers {
    pub total: f64,
    pub thermal: f64,
    pub condensed: f64,
    pub condensed_fraction: f64,
}

impl AtomNumbers {
    pub fn new(thermal: f64, condensed: f64) -> Self {
        let total = thermal + condensed;
        let condensed_fraction = if total > 0.0 { condensed / total } else { 0.0 };
        AtomNumbers {
            total,
            thermal,
            condensed,
            condensed_fraction,
        }
    }

    /// Atom numbers in the order combined, thermal, condensate.
    pub fn components(&self) -> [f64; 3] {
        [self.total, self.thermal, self.condensed]
    }
}

impl fmt::Display for AtomNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N = {:.4e} (thermal {:.4e}, condensed {:.4e}, condensed fraction {:.4})",
            self.total, self.thermal, self.condensed, self.condensed_fraction
        )
    }
}
