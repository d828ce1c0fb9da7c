//! Thermal clouds: the semi-classical ideal Bose gas in a harmonic trap.
//!
//! \[
//! n(\mathbf{r}) = \frac{1}{\lambda_{dB}^3}
//!   g_{3/2}\left(e^{(\mu - V(\mathbf{r}))/k_B T}\right),
//! \qquad \lambda_{dB} = \sqrt{\frac{2\pi\hbar^2}{m k_B T}}
//! \]
//!
//! The chemical potential of a thermal cloud is never positive. After a
//! ballistic expansion every Gaussian width σ_i = sqrt(k_B T/(m ω_i²)) grows
//! by b_i = sqrt(1 + ω_i² t²) and the density drops by Π b_i. Integrating
//! along one or two axes raises the order of the Bose function by 1/2 per axis.

use crate::constants::*;
use crate::density::CloudDensity;
use crate::error::{ensure_non_negative, ensure_positive, SimbiError, SimbiResult};
use crate::expansion::thermal_scalars;
use crate::special::{bose_function, zeta};
use crate::types::Trap;

/// Gaussian widths of a thermal cloud before and after time of flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalWidths {
    /// In-trap widths σ_i in m
    pub initial: [f64; 3],
    /// Ballistic expansion scalars b_i
    pub expansion: [f64; 3],
    /// Widths after time of flight in m
    pub expanded: [f64; 3],
}

fn ensure_thermal_potential(chemical_potential: f64) -> SimbiResult<f64> {
    if chemical_potential.is_finite() && chemical_potential <= 0.0 {
        Ok(chemical_potential)
    } else {
        Err(SimbiError::InvalidParameter {
            name: "chemical_potential",
            message: format!(
                "a thermal cloud needs a non-positive chemical potential, \
                 got {chemical_potential:e} J"
            ),
        })
    }
}

/// Fugacity z = exp(μ / k_B T).
pub fn fugacity(chemical_potential: f64, temperature: f64) -> f64 {
    (chemical_potential / (BOLTZMANN_CONSTANT * temperature)).exp()
}

/// Thermal de Broglie wavelength sqrt(2πℏ²/(m k_B T)).
pub fn thermal_de_broglie_wavelength(atomic_mass: f64, temperature: f64) -> f64 {
    (2.0 * PI * REDUCED_PLANCK_CONSTANT.powi(2) / (atomic_mass * BOLTZMANN_CONSTANT * temperature))
        .sqrt()
}

/// Gaussian widths σ_i = sqrt(k_B T/(m ω_i²)) and their ballistic expansion.
pub fn thermal_widths(
    trap: &Trap,
    atomic_mass: f64,
    temperature: f64,
    time_of_flight: f64,
) -> SimbiResult<ThermalWidths> {
    trap.validate()?;
    let atomic_mass = ensure_positive("atomic_mass", atomic_mass)?;
    let temperature = ensure_positive("temperature", temperature)?;

    let initial = trap
        .frequencies()
        .map(|w| (BOLTZMANN_CONSTANT * temperature / (atomic_mass * w * w)).sqrt());
    let expansion = thermal_scalars(trap, time_of_flight)?;
    let mut expanded = initial;
    for (s, b) in expanded.iter_mut().zip(expansion.iter()) {
        *s *= b;
    }

    Ok(ThermalWidths {
        initial,
        expansion,
        expanded,
    })
}

/// Atom number (k_B T / ℏω̄)³ g_3(z) of a thermal cloud.
pub fn thermal_atom_number(
    trap: &Trap,
    chemical_potential: f64,
    temperature: f64,
) -> SimbiResult<f64> {
    trap.validate()?;
    let chemical_potential = ensure_thermal_potential(chemical_potential)?;
    let temperature = ensure_non_negative("temperature", temperature)?;
    if temperature == 0.0 {
        return Ok(0.0);
    }

    let reduced =
        BOLTZMANN_CONSTANT * temperature / (REDUCED_PLANCK_CONSTANT * trap.mean_frequency());
    Ok(reduced.powi(3) * bose_function(3.0, fugacity(chemical_potential, temperature)))
}

/// Critical temperature of the ideal gas, (ℏω̄/k_B) (N/ζ(3))^(1/3).
pub fn critical_temperature(trap: &Trap, atom_number: f64) -> SimbiResult<f64> {
    trap.validate()?;
    let atom_number = ensure_non_negative("atom_number", atom_number)?;
    Ok(REDUCED_PLANCK_CONSTANT * trap.mean_frequency() / BOLTZMANN_CONSTANT
        * (atom_number / zeta(3.0)).cbrt())
}

/// Thermal cloud after a time of flight.
#[derive(Debug, Clone, Copy)]
pub struct ThermalCloud {
    pub fugacity: f64,
    /// Widths after expansion in m
    pub widths: [f64; 3],
    /// λ_dB³ Π b_i in m^3
    pub volume: f64,
}

impl ThermalCloud {
    pub fn new(
        trap: &Trap,
        atomic_mass: f64,
        temperature: f64,
        chemical_potential: f64,
        time_of_flight: f64,
    ) -> SimbiResult<Self> {
        let chemical_potential = ensure_thermal_potential(chemical_potential)?;
        let widths = thermal_widths(trap, atomic_mass, temperature, time_of_flight)?;
        let wavelength = thermal_de_broglie_wavelength(atomic_mass, temperature);
        let cloud = ThermalCloud {
            fugacity: fugacity(chemical_potential, temperature),
            widths: widths.expanded,
            volume: wavelength.powi(3) * widths.expansion.iter().product::<f64>(),
        };
        log::info!(
            "Thermal cloud: z = {:.4}, σ = ({:.3e}, {:.3e}, {:.3e}) m",
            cloud.fugacity,
            cloud.widths[0],
            cloud.widths[1],
            cloud.widths[2]
        );
        Ok(cloud)
    }

    /// Local fugacity z exp(-Σ x_i²/(2σ_i²)) over the given coordinates.
    fn local_fugacity(&self, coordinates: &[f64]) -> f64 {
        let exponent: f64 = coordinates
            .iter()
            .zip(self.widths.iter())
            .map(|(x, s)| 0.5 * (x / s).powi(2))
            .sum();
        self.fugacity * (-exponent).exp()
    }
}

impl CloudDensity for ThermalCloud {
    fn density(&self, x: f64, y: f64, z: f64) -> f64 {
        bose_function(1.5, self.local_fugacity(&[x, y, z])) / self.volume
    }

    fn column_density(&self, x: f64, y: f64) -> f64 {
        (2.0 * PI).sqrt() * self.widths[2] * bose_function(2.0, self.local_fugacity(&[x, y]))
            / self.volume
    }

    fn line_density(&self, x: f64) -> f64 {
        2.0 * PI * self.widths[1] * self.widths[2] * bose_function(2.5, self.local_fugacity(&[x]))
            / self.volume
    }

    fn atom_number(&self) -> f64 {
        let widths: f64 = self.widths.iter().product();
        (2.0 * PI).powf(1.5) * widths * bose_function(3.0, self.fugacity)
            / self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const MASS: f64 = 85.46 * ATOMIC_MASS_UNIT;

    fn trap() -> Trap {
        Trap::from_hz(350.0, 300.0, 30.0).unwrap()
    }

    #[test]
    fn test_cloud_atom_number_matches_analytic() {
        let cloud = ThermalCloud::new(&trap(), MASS, 5e-6, -5e-28, 1e-3).unwrap();
        let analytic = thermal_atom_number(&trap(), -5e-28, 5e-6).unwrap();
        assert_approx_eq!(cloud.atom_number() / analytic, 1.0, 1e-10);
    }

    #[test]
    fn test_positive_chemical_potential_rejected() {
        assert!(thermal_atom_number(&trap(), 1e-30, 1e-6).is_err());
        assert!(ThermalCloud::new(&trap(), MASS, 1e-6, 1e-30, 0.0).is_err());
    }

    #[test]
    fn test_saturated_cloud_at_critical_temperature() {
        // At T_c with μ = 0 the thermal cloud holds all N atoms.
        let tc = critical_temperature(&trap(), 1e5).unwrap();
        let n = thermal_atom_number(&trap(), 0.0, tc).unwrap();
        assert_approx_eq!(n / 1e5, 1.0, 1e-10);
    }

    #[test]
    fn test_widths_expand_ballistically() {
        let widths = thermal_widths(&trap(), MASS, 1e-6, 2e-3).unwrap();
        for i in 0..3 {
            assert_approx_eq!(widths.expanded[i] / widths.initial[i], widths.expansion[i], 1e-12);
        }
        assert!(thermal_widths(&trap(), MASS, 0.0, 2e-3).is_err());
    }

    #[test]
    fn test_classical_limit_is_gaussian() {
        // For z << 1 the density is N / ((2π)^{3/2} σxσyσz) at the centre.
        let cloud = ThermalCloud::new(&trap(), MASS, 1e-6, -1e-28, 0.0).unwrap();
        let peak = cloud.atom_number()
            / ((2.0 * PI).powf(1.5) * cloud.widths.iter().product::<f64>());
        assert_approx_eq!(cloud.density(0.0, 0.0, 0.0) / peak, 1.0, 1e-3);
    }
}
