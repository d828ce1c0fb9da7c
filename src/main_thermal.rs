//! Density of a thermal cloud above the transition after a time of flight.
//!
//! The cloud is an ideal Bose gas at a negative chemical potential. Its
//! density is sampled on a grid of several expanded Gaussian widths and the
//! integrals are compared with (k_B T/ℏω̄)³ g_3(z).
//!
//! Usage: `thermal_cloud [scenario.json]`

use simbi::config::{self, ThermalScenario};
use simbi::density::{center_cut_2d, center_cut_3d, density, DensityGrid};
use simbi::grid::Coordinates;
use simbi::plot::{plot_heatmaps, plot_lines, PlotConfig};
use simbi::thermal::{thermal_atom_number, thermal_widths, ThermalCloud};
use simbi::utils::{write_coords, write_real_2d, AtomNumberCheck};
use simbi::SimbiResult;

fn run() -> SimbiResult<()> {
    let scenario: ThermalScenario = config::from_args()?;
    scenario.validate()?;

    let trap = scenario.trap.trap()?;
    let species = scenario.species.species()?;
    let (temperature, mu) = (scenario.temperature, scenario.chemical_potential);

    let widths = thermal_widths(&trap, species.atomic_mass, temperature, scenario.time_of_flight)?;
    log::info!(
        "Expanded thermal widths: ({:.3e}, {:.3e}, {:.3e}) m",
        widths.expanded[0],
        widths.expanded[1],
        widths.expanded[2]
    );

    let coords = Coordinates::new(widths.expanded, scenario.grid.extent, scenario.grid.points)?;
    let cloud = ThermalCloud::new(
        &trap,
        species.atomic_mass,
        temperature,
        mu,
        scenario.time_of_flight,
    )?;

    let density_3d = density(&coords.volume, &cloud);
    let density_2d = density(&coords.plane, &cloud);
    let density_1d = density(&coords.line, &cloud);

    let check = AtomNumberCheck::with_dimensions(
        "Thermal Atom Number",
        thermal_atom_number(&trap, mu, temperature)?,
        [
            coords.volume.integrate(&density_3d),
            coords.plane.integrate(&density_2d),
            coords.line.integrate(&density_1d),
        ],
    );
    println!("{}", check);

    let output = &scenario.output;
    if output.plots {
        plot_lines(
            &coords.line.x,
            &[("Thermal", center_cut_3d(&density_3d).to_vec())],
            &output.path("cut_through_3d.png")?,
            &PlotConfig::titled("3D Cut Through", "n (m^-3)"),
        )?;
        plot_heatmaps(
            &coords.plane.x,
            &coords.plane.y,
            &[("Thermal", &density_2d)],
            &output.path("column_density.png")?,
            &PlotConfig::titled("Column Density", "n (m^-2)"),
        )?;
        plot_lines(
            &coords.line.x,
            &[("Thermal", center_cut_2d(&density_2d).to_vec())],
            &output.path("cut_through_2d.png")?,
            &PlotConfig::titled("2D Cut Through", "n (m^-2)"),
        )?;
        plot_lines(
            &coords.line.x,
            &[("Thermal", density_1d.to_vec())],
            &output.path("line_density.png")?,
            &PlotConfig::titled("1D Line Density", "n (m^-1)"),
        )?;
        log::info!("Plots written to {}", output.directory.display());
    }
    if output.csv {
        write_coords(&coords.volume.x, &output.path("x.txt")?)?;
        write_coords(&coords.volume.y, &output.path("y.txt")?)?;
        write_real_2d(&density_2d, &output.path("column_density.txt")?)?;
        write_coords(&density_1d, &output.path("line_density.txt")?)?;
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
