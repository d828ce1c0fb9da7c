//! Chemical potential and temperature of a bimodal cloud from its atom number
//! and condensed fraction.
//!
//! Solves for μ and T, reports the resulting atom numbers and plots the
//! column densities of all components on a 2D grid together with a cut
//! through their centre.
//!
//! Usage: `temp_mu [scenario.json]`

use simbi::bimodal::{self, BimodalCloud};
use simbi::config::{self, TemperatureScenario};
use simbi::density::{center_cut_2d, DensityGrid};
use simbi::grid::Grid2;
use simbi::plot::{plot_heatmaps, plot_lines, PlotConfig};
use simbi::thermal::critical_temperature;
use simbi::utils::{write_coords, write_real_2d, AtomNumberCheck};
use simbi::SimbiResult;

fn run() -> SimbiResult<()> {
    let scenario: TemperatureScenario = config::from_args()?;
    scenario.validate()?;

    let trap = scenario.trap.trap()?;
    let species = scenario.species.species()?;
    let tof = scenario.time_of_flight;

    let (mu, temperature) = bimodal::chemical_potential_and_temperature(
        &trap,
        &species,
        scenario.total_atom_number,
        scenario.condensed_fraction,
    )?;
    println!("Chemical potential: {:.6e} J", mu);
    println!("Temperature: {:.6e} K", temperature);
    println!(
        "Critical temperature (ideal gas): {:.6e} K",
        critical_temperature(&trap, scenario.total_atom_number)?
    );

    let atom_numbers = bimodal::atom_numbers(&trap, &species, temperature, mu)?;
    println!("{}", atom_numbers);

    let radii = bimodal::bimodal_radii(&trap, &species, temperature, mu, tof)?;
    let sigmas = radii.thermal.expanded;
    let plane = Grid2::new([sigmas[0], sigmas[1]], scenario.grid.extent, scenario.grid.points)?;

    let cloud = BimodalCloud::new(&trap, &species, temperature, mu, tof)?;
    let densities_2d = cloud.components(&plane);

    let mut check = AtomNumberCheck::new("Combined Atom Number", atom_numbers.total);
    check.push("2D Integrated", plane.integrate(&densities_2d.combined));
    println!("{}", check);

    let output = &scenario.output;
    if output.plots {
        plot_heatmaps(
            &plane.x,
            &plane.y,
            &densities_2d.labelled(),
            &output.path("column_density.png")?,
            &PlotConfig::titled("Column Density", "n (m^-2)"),
        )?;

        let cuts: Vec<_> = densities_2d
            .labelled()
            .iter()
            .map(|(label, field)| (*label, center_cut_2d(field).to_vec()))
            .collect();
        plot_lines(
            &plane.x,
            &cuts,
            &output.path("cut_through_2d.png")?,
            &PlotConfig::titled("2D Cut Through", "n (m^-2)"),
        )?;
        log::info!("Plots written to {}", output.directory.display());
    }
    if output.csv {
        write_coords(&plane.x, &output.path("x.txt")?)?;
        write_coords(&plane.y, &output.path("y.txt")?)?;
        for (label, column) in densities_2d.labelled() {
            let name = label.to_lowercase();
            write_real_2d(column, &output.path(&format!("column_density_{name}.txt"))?)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
