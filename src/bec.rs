//! Thomas-Fermi condensates.
//!
//! In the Thomas-Fermi limit the kinetic energy is neglected and the
//! condensate density follows the inverted trap potential,
//!
//! \[
//! n(\mathbf{r}) = \frac{\mu - V(\mathbf{r})}{g}
//!   = n_0 \max\left(0,\ 1 - \sum_i \frac{x_i^2}{R_i^2}\right),
//! \qquad R_i = \sqrt{\frac{2\mu}{m\omega_i^2}},
//! \]
//!
//! with peak density n_0 = μ/g. The chemical potential fixes the atom number
//!
//! \[
//! \mu = \frac{\hbar\bar\omega}{2}\left(\frac{15 N a_s}{\bar a_{ho}}\right)^{2/5}.
//! \]

use crate::constants::*;
use crate::density::CloudDensity;
use crate::error::{ensure_non_negative, SimbiResult};
use crate::expansion::condensate_scalars;
use crate::types::{Species, Trap};

/// Thomas-Fermi radii in the trap and after time of flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondensateRadii {
    /// In-trap radii in m
    pub initial: [f64; 3],
    /// Castin-Dum expansion scalars λ_i
    pub expansion: [f64; 3],
    /// Radii after time of flight in m
    pub expanded: [f64; 3],
}

/// Calculates the chemical potential of a condensate of `atom_number` atoms.
pub fn chemical_potential(trap: &Trap, species: &Species, atom_number: f64) -> SimbiResult<f64> {
    trap.validate()?;
    species.validate()?;
    let atom_number = ensure_non_negative("atom_number", atom_number)?;

    let mean_frequency = trap.mean_frequency();
    let oscillator_length = species.oscillator_length(mean_frequency);
    let interaction_parameter = atom_number * species.scattering_length / oscillator_length;
    if atom_number > 0.0 && interaction_parameter < 1.0 {
        log::warn!(
            "N a / a_ho = {:.3} < 1: the Thomas-Fermi approximation is not valid",
            interaction_parameter
        );
    }

    Ok(0.5 * REDUCED_PLANCK_CONSTANT * mean_frequency * (15.0 * interaction_parameter).powf(0.4))
}

/// Atom number of a condensate with chemical potential `chemical_potential`.
///
/// Zero when the chemical potential is not positive.
pub fn atom_number(trap: &Trap, species: &Species, chemical_potential: f64) -> f64 {
    if chemical_potential <= 0.0 {
        return 0.0;
    }
    let mean_frequency = trap.mean_frequency();
    let oscillator_length = species.oscillator_length(mean_frequency);
    (2.0 * chemical_potential / (REDUCED_PLANCK_CONSTANT * mean_frequency)).powf(2.5)
        * oscillator_length
        / (15.0 * species.scattering_length)
}

/// Peak density n_0 = μ/g in m^-3.
pub fn peak_density(species: &Species, chemical_potential: f64) -> f64 {
    chemical_potential.max(0.0) / species.interaction_strength()
}

/// Thomas-Fermi radii before and after a time of flight.
///
/// A chemical potential of zero gives an empty condensate with zero radii.
pub fn thomas_fermi_radii(
    trap: &Trap,
    species: &Species,
    chemical_potential: f64,
    time_of_flight: f64,
) -> SimbiResult<CondensateRadii> {
    trap.validate()?;
    species.validate()?;
    let chemical_potential = ensure_non_negative("chemical_potential", chemical_potential)?;

    let initial = trap
        .frequencies()
        .map(|w| (2.0 * chemical_potential / (species.atomic_mass * w * w)).sqrt());
    let expansion = condensate_scalars(trap, time_of_flight)?;
    let mut expanded = initial;
    for (r, l) in expanded.iter_mut().zip(expansion.iter()) {
        *r *= l;
    }

    Ok(CondensateRadii {
        initial,
        expansion,
        expanded,
    })
}

/// Thomas-Fermi condensate after a time of flight.
#[derive(Debug, Clone, Copy)]
pub struct ThomasFermiCloud {
    /// Peak density after expansion in m^-3
    pub peak_density: f64,
    /// Radii after expansion in m
    pub radii: [f64; 3],
}

impl ThomasFermiCloud {
    pub fn new(
        trap: &Trap,
        species: &Species,
        chemical_potential: f64,
        time_of_flight: f64,
    ) -> SimbiResult<Self> {
        let radii = thomas_fermi_radii(trap, species, chemical_potential, time_of_flight)?;
        let dilution: f64 = radii.expansion.iter().product();
        let cloud = ThomasFermiCloud {
            peak_density: peak_density(species, chemical_potential) / dilution,
            radii: radii.expanded,
        };
        log::info!(
            "Thomas-Fermi cloud: n0 = {:.4e} m^-3, R = ({:.3e}, {:.3e}, {:.3e}) m",
            cloud.peak_density,
            cloud.radii[0],
            cloud.radii[1],
            cloud.radii[2]
        );
        Ok(cloud)
    }

    /// 1 - Σ (x_i/R_i)² over the given coordinates, clamped at zero.
    fn parabola(&self, coordinates: &[f64]) -> f64 {
        if self.peak_density <= 0.0 {
            return 0.0;
        }
        let sum: f64 = coordinates
            .iter()
            .zip(self.radii.iter())
            .map(|(x, r)| (x / r).powi(2))
            .sum();
        (1.0 - sum).max(0.0)
    }
}

impl CloudDensity for ThomasFermiCloud {
    fn density(&self, x: f64, y: f64, z: f64) -> f64 {
        self.peak_density * self.parabola(&[x, y, z])
    }

    fn column_density(&self, x: f64, y: f64) -> f64 {
        4.0 / 3.0 * self.peak_density * self.radii[2] * self.parabola(&[x, y]).powf(1.5)
    }

    fn line_density(&self, x: f64) -> f64 {
        0.5 * PI * self.peak_density * self.radii[1] * self.radii[2] * self.parabola(&[x]).powi(2)
    }

    fn atom_number(&self) -> f64 {
        8.0 * PI / 15.0 * self.peak_density * self.radii.iter().product::<f64>()
    }
}
