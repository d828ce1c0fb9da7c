//! Bimodal clouds: a Thomas-Fermi condensate surrounded by a thermal cloud.
//!
//! Below the transition the thermal atoms feel the mean-field repulsion of
//! the condensate. We model them as an ideal Bose gas at the effective
//! chemical potential -μ, while the condensate sits at μ ≥ 0. Both
//! components keep closed-form densities in every dimension, so the combined
//! density is simply their sum.

use crate::bec::{self, CondensateRadii, ThomasFermiCloud};
use crate::density::{CloudDensity, DensityGrid};
use crate::error::{ensure_non_negative, ensure_positive, SimbiError, SimbiResult};
use crate::thermal::{
    critical_temperature, thermal_atom_number, thermal_widths, ThermalCloud, ThermalWidths,
};
use crate::types::{AtomNumbers, Species, Trap};

/// Labels of the density components, in the order they are stored.
pub const COMPONENT_LABELS: [&str; 3] = ["Combined", "Thermal", "Condensate"];

/// Maximum number of bisection steps when solving for the temperature.
const MAX_BISECTIONS: usize = 200;

/// Relative tolerance on the temperature.
const TEMPERATURE_TOLERANCE: f64 = 1e-13;

/// Sizes of both components before and after time of flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BimodalRadii {
    pub thermal: ThermalWidths,
    pub condensate: CondensateRadii,
}

/// A field split into its combined, thermal and condensed parts.
#[derive(Debug, Clone)]
pub struct DensityComponents<F> {
    pub combined: F,
    pub thermal: F,
    pub condensate: F,
}

impl<F> DensityComponents<F> {
    /// Components paired with their labels, in [`COMPONENT_LABELS`] order.
    pub fn labelled(&self) -> [(&'static str, &F); 3] {
        [
            (COMPONENT_LABELS[0], &self.combined),
            (COMPONENT_LABELS[1], &self.thermal),
            (COMPONENT_LABELS[2], &self.condensate),
        ]
    }
}

/// Atom numbers of the bimodal cloud at temperature T and chemical potential μ.
pub fn atom_numbers(
    trap: &Trap,
    species: &Species,
    temperature: f64,
    chemical_potential: f64,
) -> SimbiResult<AtomNumbers> {
    let chemical_potential = ensure_non_negative("chemical_potential", chemical_potential)?;
    let thermal = thermal_atom_number(trap, -chemical_potential, temperature)?;
    let condensed = bec::atom_number(trap, species, chemical_potential);
    Ok(AtomNumbers::new(thermal, condensed))
}

/// Thermal widths and Thomas-Fermi radii of the bimodal cloud.
///
/// At μ = 0 the condensate radii are zero.
pub fn bimodal_radii(
    trap: &Trap,
    species: &Species,
    temperature: f64,
    chemical_potential: f64,
    time_of_flight: f64,
) -> SimbiResult<BimodalRadii> {
    Ok(BimodalRadii {
        thermal: thermal_widths(trap, species.atomic_mass, temperature, time_of_flight)?,
        condensate: bec::thomas_fermi_radii(trap, species, chemical_potential, time_of_flight)?,
    })
}

/// Condensate plus thermal cloud after a time of flight.
#[derive(Debug, Clone, Copy)]
pub struct BimodalCloud {
    pub thermal: ThermalCloud,
    pub condensate: ThomasFermiCloud,
}

impl BimodalCloud {
    pub fn new(
        trap: &Trap,
        species: &Species,
        temperature: f64,
        chemical_potential: f64,
        time_of_flight: f64,
    ) -> SimbiResult<Self> {
        let chemical_potential = ensure_non_negative("chemical_potential", chemical_potential)?;
        Ok(BimodalCloud {
            thermal: ThermalCloud::new(
                trap,
                species.atomic_mass,
                temperature,
                -chemical_potential,
                time_of_flight,
            )?,
            condensate: ThomasFermiCloud::new(trap, species, chemical_potential, time_of_flight)?,
        })
    }

    /// Samples the combined, thermal and condensed densities on `grid`.
    pub fn components<G: DensityGrid>(&self, grid: &G) -> DensityComponents<G::Field> {
        let (combined, (thermal, condensate)) = rayon::join(
            || grid.evaluate(self),
            || {
                rayon::join(
                    || grid.evaluate(&self.thermal),
                    || grid.evaluate(&self.condensate),
                )
            },
        );
        DensityComponents {
            combined,
            thermal,
            condensate,
        }
    }

    /// Analytic atom numbers of both components.
    pub fn atom_numbers(&self) -> AtomNumbers {
        AtomNumbers::new(self.thermal.atom_number(), self.condensate.atom_number())
    }
}

impl CloudDensity for BimodalCloud {
    fn density(&self, x: f64, y: f64, z: f64) -> f64 {
        self.thermal.density(x, y, z) + self.condensate.density(x, y, z)
    }

    fn column_density(&self, x: f64, y: f64) -> f64 {
        self.thermal.column_density(x, y) + self.condensate.column_density(x, y)
    }

    fn line_density(&self, x: f64) -> f64 {
        self.thermal.line_density(x) + self.condensate.line_density(x)
    }

    fn atom_number(&self) -> f64 {
        self.thermal.atom_number() + self.condensate.atom_number()
    }
}

/// Finds the chemical potential and temperature of a cloud of
/// `total_atom_number` atoms with the given condensed fraction.
///
/// μ follows from the condensed atom number; the temperature is then found by
/// bisection so that the thermal cloud at -μ holds the remaining atoms.
pub fn chemical_potential_and_temperature(
    trap: &Trap,
    species: &Species,
    total_atom_number: f64,
    condensed_fraction: f64,
) -> SimbiResult<(f64, f64)> {
    let total_atom_number = ensure_positive("total_atom_number", total_atom_number)?;
    if !(0.0..1.0).contains(&condensed_fraction) {
        return Err(SimbiError::InvalidParameter {
            name: "condensed_fraction",
            message: format!("expected a value in [0, 1), got {condensed_fraction}"),
        });
    }

    let chemical_potential =
        bec::chemical_potential(trap, species, condensed_fraction * total_atom_number)?;
    let thermal_target = (1.0 - condensed_fraction) * total_atom_number;
    let residual = |temperature: f64| -> SimbiResult<f64> {
        Ok(thermal_atom_number(trap, -chemical_potential, temperature)? - thermal_target)
    };

    // Below the ideal-gas T_c of the thermal atoms the cloud cannot hold them.
    let mut lower = critical_temperature(trap, thermal_target)?;
    if residual(lower)? >= 0.0 {
        return Ok((chemical_potential, lower));
    }
    let mut upper = 2.0 * lower;
    let mut doublings = 0;
    while residual(upper)? < 0.0 {
        lower = upper;
        upper *= 2.0;
        doublings += 1;
        if doublings > 64 {
            return Err(SimbiError::NoConvergence {
                iterations: doublings,
                message: "could not bracket the temperature".to_string(),
            });
        }
    }

    for iteration in 0..MAX_BISECTIONS {
        let middle = 0.5 * (lower + upper);
        if residual(middle)? < 0.0 {
            lower = middle;
        } else {
            upper = middle;
        }
        if (upper - lower) <= TEMPERATURE_TOLERANCE * upper {
            let temperature = 0.5 * (lower + upper);
            log::info!(
                "Solved μ = {:.4e} J, T = {:.4e} K after {} bisections",
                chemical_potential,
                temperature,
                iteration + 1
            );
            return Ok((chemical_potential, temperature));
        }
    }

    Err(SimbiError::NoConvergence {
        iterations: MAX_BISECTIONS,
        message: format!("temperature bracket [{lower:e}, {upper:e}] K did not close"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::grid::Coordinates;
    use assert_approx_eq::assert_approx_eq;

    fn setup() -> (Trap, Species) {
        let trap = Trap::from_hz(350.0, 300.0, 30.0).unwrap();
        let species = Species::new(85.46 * ATOMIC_MASS_UNIT, 90.0 * BOHR_RADIUS).unwrap();
        (trap, species)
    }

    #[test]
    fn test_atom_numbers_add_up() {
        let (trap, species) = setup();
        let numbers = atom_numbers(&trap, &species, 200e-9, 7e-31).unwrap();
        assert_approx_eq!(numbers.total, numbers.thermal + numbers.condensed, 1e-9);
        assert!(numbers.condensed_fraction > 0.0 && numbers.condensed_fraction < 1.0);

        let cloud = BimodalCloud::new(&trap, &species, 200e-9, 7e-31, 1e-3).unwrap();
        let from_cloud = cloud.atom_numbers();
        assert_approx_eq!(from_cloud.thermal / numbers.thermal, 1.0, 1e-10);
        assert_approx_eq!(from_cloud.condensed / numbers.condensed, 1.0, 1e-6);
    }

    #[test]
    fn test_solved_temperature_reproduces_atom_numbers() {
        let trap = Trap::from_hz(300.0, 30.0, 100.0).unwrap();
        let species = Species::new(1.4192261e-25, 90.0 * BOHR_RADIUS).unwrap();
        let (mu, temperature) =
            chemical_potential_and_temperature(&trap, &species, 1e5, 0.005).unwrap();
        let numbers = atom_numbers(&trap, &species, temperature, mu).unwrap();
        assert_approx_eq!(numbers.total / 1e5, 1.0, 1e-9);
        assert_approx_eq!(numbers.condensed_fraction, 0.005, 1e-9);
    }

    #[test]
    fn test_no_condensate_gives_critical_temperature() {
        let (trap, species) = setup();
        let (mu, temperature) =
            chemical_potential_and_temperature(&trap, &species, 1e5, 0.0).unwrap();
        assert_eq!(mu, 0.0);
        assert_approx_eq!(temperature / critical_temperature(&trap, 1e5).unwrap(), 1.0, 1e-9);
    }

    #[test]
    fn test_cloud_at_transition_has_empty_condensate() {
        let (trap, species) = setup();
        let (mu, temperature) =
            chemical_potential_and_temperature(&trap, &species, 1e5, 0.0).unwrap();
        let radii = bimodal_radii(&trap, &species, temperature, mu, 1e-3).unwrap();
        assert_eq!(radii.condensate.expanded, [0.0; 3]);

        let cloud = BimodalCloud::new(&trap, &species, temperature, mu, 1e-3).unwrap();
        let numbers = cloud.atom_numbers();
        assert_eq!(numbers.condensed, 0.0);
        assert_approx_eq!(numbers.thermal / 1e5, 1.0, 1e-9);
        assert!(BimodalCloud::new(&trap, &species, temperature, -1e-31, 1e-3).is_err());
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let (trap, species) = setup();
        assert!(chemical_potential_and_temperature(&trap, &species, 1e5, 1.0).is_err());
        assert!(chemical_potential_and_temperature(&trap, &species, 1e5, -0.1).is_err());
    }

    #[test]
    fn test_components_sum_to_combined() {
        let (trap, species) = setup();
        let cloud = BimodalCloud::new(&trap, &species, 200e-9, 7e-31, 1e-3).unwrap();
        let radii = bimodal_radii(&trap, &species, 200e-9, 7e-31, 1e-3).unwrap();
        let coords = Coordinates::new(radii.thermal.expanded, 4.0, 21).unwrap();
        let fields = cloud.components(&coords.plane);
        let difference = &fields.combined - &(&fields.thermal + &fields.condensate);
        let scale = fields.combined.iter().cloned().fold(0.0, f64::max);
        assert!(difference.iter().all(|d| d.abs() <= 1e-12 * scale));
        assert_eq!(fields.labelled()[2].0, "Condensate");
    }
}
