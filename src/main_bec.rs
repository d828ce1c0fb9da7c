//! Density of a pure Thomas-Fermi condensate after a time of flight.
//!
//! Computes the chemical potential of the condensate, its radii and its
//! density, column density and line density on a grid spanning a multiple
//! of the expanded Thomas-Fermi radii. The analytic atom number is compared
//! with the integrals of all three fields before the profiles are plotted.
//!
//! Usage: `bec [scenario.json]`

use simbi::bec::{self, ThomasFermiCloud};
use simbi::config::{self, BecScenario};
use simbi::density::{center_cut_3d, density, DensityGrid};
use simbi::grid::Coordinates;
use simbi::plot::{plot_heatmaps, plot_lines, PlotConfig};
use simbi::utils::{write_coords, write_real_2d, AtomNumberCheck};
use simbi::SimbiResult;

fn run() -> SimbiResult<()> {
    let scenario: BecScenario = config::from_args()?;
    scenario.validate()?;

    let trap = scenario.trap.trap()?;
    let species = scenario.species.species()?;

    let mu = bec::chemical_potential(&trap, &species, scenario.atom_number)?;
    let radii = bec::thomas_fermi_radii(&trap, &species, mu, scenario.time_of_flight)?;
    log::info!("Chemical potential: {:.4e} J", mu);
    log::info!(
        "Thomas-Fermi radii in trap: ({:.3e}, {:.3e}, {:.3e}) m",
        radii.initial[0],
        radii.initial[1],
        radii.initial[2]
    );

    // Setup coordinates for densities in one, two and three dimensions
    let coords = Coordinates::new(radii.expanded, scenario.grid.extent, scenario.grid.points)?;
    let cloud = ThomasFermiCloud::new(&trap, &species, mu, scenario.time_of_flight)?;

    let density_3d = density(&coords.volume, &cloud);
    let column_density = density(&coords.plane, &cloud);
    let line_density = density(&coords.line, &cloud);

    // Make sure the analytic atom number matches the integrated densities
    let check = AtomNumberCheck::with_dimensions(
        "BEC Atom Number",
        bec::atom_number(&trap, &species, mu),
        [
            coords.volume.integrate(&density_3d),
            coords.plane.integrate(&column_density),
            coords.line.integrate(&line_density),
        ],
    );
    println!("{}", check);

    let output = &scenario.output;
    if output.plots {
        plot_lines(
            &coords.line.x,
            &[("BEC", center_cut_3d(&density_3d).to_vec())],
            &output.path("cut_through.png")?,
            &PlotConfig::titled("Cut Through", "n (m^-3)"),
        )?;
        plot_heatmaps(
            &coords.plane.x,
            &coords.plane.y,
            &[("BEC", &column_density)],
            &output.path("column_density.png")?,
            &PlotConfig::titled("Column Density", "n (m^-2)"),
        )?;
        plot_lines(
            &coords.line.x,
            &[("BEC", line_density.to_vec())],
            &output.path("line_density.png")?,
            &PlotConfig::titled("Line Density", "n (m^-1)"),
        )?;
        log::info!("Plots written to {}", output.directory.display());
    }
    if output.csv {
        write_coords(&coords.volume.x, &output.path("x.txt")?)?;
        write_coords(&coords.volume.y, &output.path("y.txt")?)?;
        write_real_2d(&column_density, &output.path("column_density.txt")?)?;
        write_coords(&line_density, &output.path("line_density.txt")?)?;
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
