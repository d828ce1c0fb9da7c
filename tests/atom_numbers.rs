//! The analytic atom number of every cloud must match the integrals of its
//! sampled 3D, column and line densities.

use assert_approx_eq::assert_approx_eq;

use simbi::bec::{self, ThomasFermiCloud};
use simbi::bimodal::{self, BimodalCloud};
use simbi::config::{BecScenario, BimodalScenario, TemperatureScenario, ThermalScenario};
use simbi::density::{density, CloudDensity, DensityGrid};
use simbi::grid::{Coordinates, Grid2};
use simbi::thermal::{thermal_atom_number, thermal_widths, ThermalCloud};
use simbi::utils::AtomNumberCheck;

fn relative(value: f64, reference: f64) -> f64 {
    (value - reference).abs() / reference
}

#[test]
fn condensate_integrals_match_analytic_atom_number() {
    let scenario = BecScenario::default();
    let trap = scenario.trap.trap().unwrap();
    let species = scenario.species.species().unwrap();

    let mu = bec::chemical_potential(&trap, &species, scenario.atom_number).unwrap();
    let radii = bec::thomas_fermi_radii(&trap, &species, mu, scenario.time_of_flight).unwrap();
    let coords = Coordinates::new(radii.expanded, scenario.grid.extent, 81).unwrap();
    let cloud = ThomasFermiCloud::new(&trap, &species, mu, scenario.time_of_flight).unwrap();

    let analytic = bec::atom_number(&trap, &species, mu);
    assert_approx_eq!(analytic / scenario.atom_number, 1.0, 1e-9);

    let check = AtomNumberCheck::with_dimensions(
        "BEC",
        analytic,
        [
            coords.volume.integrate(&density(&coords.volume, &cloud)),
            coords.plane.integrate(&density(&coords.plane, &cloud)),
            coords.line.integrate(&density(&coords.line, &cloud)),
        ],
    );
    assert!(check.max_relative_error() < 1e-3, "{}", check);
}

#[test]
fn thermal_integrals_match_analytic_atom_number() {
    let scenario = ThermalScenario::default();
    let trap = scenario.trap.trap().unwrap();
    let mass = scenario.species.species().unwrap().atomic_mass;
    let (temperature, mu) = (scenario.temperature, scenario.chemical_potential);

    let widths = thermal_widths(&trap, mass, temperature, scenario.time_of_flight).unwrap();
    let coords = Coordinates::new(widths.expanded, scenario.grid.extent, 61).unwrap();
    let cloud = ThermalCloud::new(&trap, mass, temperature, mu, scenario.time_of_flight).unwrap();

    let analytic = thermal_atom_number(&trap, mu, temperature).unwrap();
    assert_approx_eq!(cloud.atom_number() / analytic, 1.0, 1e-10);

    let check = AtomNumberCheck::with_dimensions(
        "Thermal",
        analytic,
        [
            coords.volume.integrate(&density(&coords.volume, &cloud)),
            coords.plane.integrate(&density(&coords.plane, &cloud)),
            coords.line.integrate(&density(&coords.line, &cloud)),
        ],
    );
    assert!(check.max_relative_error() < 1e-6, "{}", check);
}

#[test]
fn bimodal_components_integrate_to_their_atom_numbers() {
    let scenario = BimodalScenario::default();
    let trap = scenario.trap.trap().unwrap();
    let species = scenario.species.species().unwrap();
    let (temperature, mu, tof) = (
        scenario.temperature,
        scenario.chemical_potential,
        scenario.time_of_flight,
    );

    let numbers = bimodal::atom_numbers(&trap, &species, temperature, mu).unwrap();
    let radii = bimodal::bimodal_radii(&trap, &species, temperature, mu, tof).unwrap();
    let cloud = BimodalCloud::new(&trap, &species, temperature, mu, tof).unwrap();

    // Column and line densities on the default grid
    let coords = Coordinates::new(radii.thermal.expanded, scenario.grid.extent, 101).unwrap();
    let columns = cloud.components(&coords.plane);
    let lines = cloud.components(&coords.line);

    assert!(relative(coords.plane.integrate(&columns.thermal), numbers.thermal) < 1e-6);
    assert!(relative(coords.line.integrate(&lines.thermal), numbers.thermal) < 1e-6);
    assert!(relative(coords.plane.integrate(&columns.condensate), numbers.condensed) < 2e-3);
    assert!(relative(coords.line.integrate(&lines.condensate), numbers.condensed) < 2e-3);
    assert!(relative(coords.plane.integrate(&columns.combined), numbers.total) < 2e-3);

    // Coarser 3D grid
    let coarse = Coordinates::new(radii.thermal.expanded, scenario.grid.extent, 61).unwrap();
    let volumes = cloud.components(&coarse.volume);
    assert!(relative(coarse.volume.integrate(&volumes.thermal), numbers.thermal) < 1e-6);
    assert!(relative(coarse.volume.integrate(&volumes.condensate), numbers.condensed) < 2e-2);
    assert!(relative(coarse.volume.integrate(&volumes.combined), numbers.total) < 1e-2);
}

#[test]
fn solved_temperature_gives_requested_cloud() {
    let scenario = TemperatureScenario::default();
    let trap = scenario.trap.trap().unwrap();
    let species = scenario.species.species().unwrap();

    let (mu, temperature) = bimodal::chemical_potential_and_temperature(
        &trap,
        &species,
        scenario.total_atom_number,
        scenario.condensed_fraction,
    )
    .unwrap();
    assert!(mu > 0.0);
    assert!(temperature > 0.0);

    let numbers = bimodal::atom_numbers(&trap, &species, temperature, mu).unwrap();
    assert_approx_eq!(numbers.total / scenario.total_atom_number, 1.0, 1e-9);
    assert_approx_eq!(numbers.condensed_fraction, scenario.condensed_fraction, 1e-9);

    let radii = bimodal::bimodal_radii(&trap, &species, temperature, mu, scenario.time_of_flight)
        .unwrap();
    let sigmas = radii.thermal.expanded;
    let plane = Grid2::new([sigmas[0], sigmas[1]], scenario.grid.extent, 201).unwrap();
    let tof = scenario.time_of_flight;
    let cloud = BimodalCloud::new(&trap, &species, temperature, mu, tof).unwrap();
    let columns = cloud.components(&plane);
    assert!(relative(plane.integrate(&columns.combined), numbers.total) < 2e-3);
}

#[test]
fn cloud_without_condensate_runs_at_critical_temperature() {
    let scenario = TemperatureScenario {
        condensed_fraction: 0.0,
        ..TemperatureScenario::default()
    };
    scenario.validate().unwrap();
    let trap = scenario.trap.trap().unwrap();
    let species = scenario.species.species().unwrap();
    let tof = scenario.time_of_flight;

    let (mu, temperature) = bimodal::chemical_potential_and_temperature(
        &trap,
        &species,
        scenario.total_atom_number,
        scenario.condensed_fraction,
    )
    .unwrap();
    assert_eq!(mu, 0.0);
    let critical = simbi::thermal::critical_temperature(&trap, scenario.total_atom_number).unwrap();
    assert_approx_eq!(temperature / critical, 1.0, 1e-9);

    let numbers = bimodal::atom_numbers(&trap, &species, temperature, mu).unwrap();
    assert_eq!(numbers.condensed, 0.0);
    assert_eq!(numbers.condensed_fraction, 0.0);

    let radii = bimodal::bimodal_radii(&trap, &species, temperature, mu, tof).unwrap();
    assert_eq!(radii.condensate.expanded, [0.0; 3]);
    let sigmas = radii.thermal.expanded;
    let plane = Grid2::new([sigmas[0], sigmas[1]], scenario.grid.extent, 201).unwrap();
    let cloud = BimodalCloud::new(&trap, &species, temperature, mu, tof).unwrap();
    let columns = cloud.components(&plane);

    assert!(columns.condensate.iter().all(|n| *n == 0.0));
    assert!(columns.combined.iter().all(|n| n.is_finite()));

    let mut check = AtomNumberCheck::new("Combined Atom Number", numbers.total);
    check.push("2D Integrated", plane.integrate(&columns.combined));
    assert!(check.max_relative_error() < 2e-3, "{}", check);
}
