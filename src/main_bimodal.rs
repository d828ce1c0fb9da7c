//! Density of a bimodal cloud: condensate plus thermal cloud.
//!
//! For a given temperature and condensate chemical potential this computes
//! the atom numbers of both components, their sizes and the combined,
//! thermal and condensed densities in one, two and three dimensions. Each
//! component's analytic atom number is checked against its integrals.
//!
//! Usage: `bimodal [scenario.json]`

use itertools::izip;
use simbi::bimodal::{self, BimodalCloud, COMPONENT_LABELS};
use simbi::config::{self, BimodalScenario};
use simbi::density::{center_cut_3d, DensityGrid};
use simbi::grid::Coordinates;
use simbi::plot::{plot_heatmaps, plot_lines, PlotConfig};
use simbi::utils::{write_coords, write_real_2d, AtomNumberCheck};
use simbi::SimbiResult;

fn run() -> SimbiResult<()> {
    let scenario: BimodalScenario = config::from_args()?;
    scenario.validate()?;

    let trap = scenario.trap.trap()?;
    let species = scenario.species.species()?;
    let (temperature, mu, tof) = (
        scenario.temperature,
        scenario.chemical_potential,
        scenario.time_of_flight,
    );

    let atom_numbers = bimodal::atom_numbers(&trap, &species, temperature, mu)?;
    log::info!("{}", atom_numbers);

    let radii = bimodal::bimodal_radii(&trap, &species, temperature, mu, tof)?;
    log::info!(
        "Expanded sizes: σ = ({:.3e}, {:.3e}, {:.3e}) m, R = ({:.3e}, {:.3e}, {:.3e}) m",
        radii.thermal.expanded[0],
        radii.thermal.expanded[1],
        radii.thermal.expanded[2],
        radii.condensate.expanded[0],
        radii.condensate.expanded[1],
        radii.condensate.expanded[2]
    );

    let coords = Coordinates::new(
        radii.thermal.expanded,
        scenario.grid.extent,
        scenario.grid.points,
    )?;
    let cloud = BimodalCloud::new(&trap, &species, temperature, mu, tof)?;

    let densities_3d = cloud.components(&coords.volume);
    let densities_2d = cloud.components(&coords.plane);
    let densities_1d = cloud.components(&coords.line);

    for (label, analytic, (_, d3), (_, d2), (_, d1)) in izip!(
        COMPONENT_LABELS,
        atom_numbers.components(),
        densities_3d.labelled(),
        densities_2d.labelled(),
        densities_1d.labelled()
    ) {
        let check = AtomNumberCheck::with_dimensions(
            format!("{} Atom Number", label),
            analytic,
            [
                coords.volume.integrate(d3),
                coords.plane.integrate(d2),
                coords.line.integrate(d1),
            ],
        );
        println!("{}", check);
    }

    let output = &scenario.output;
    if output.plots {
        let cuts: Vec<_> = densities_3d
            .labelled()
            .iter()
            .map(|(label, field)| (*label, center_cut_3d(field).to_vec()))
            .collect();
        plot_lines(
            &coords.line.x,
            &cuts,
            &output.path("cut_through_3d.png")?,
            &PlotConfig::titled("3D Cut-through", "n (m^-3)"),
        )?;

        plot_heatmaps(
            &coords.plane.x,
            &coords.plane.y,
            &densities_2d.labelled(),
            &output.path("column_density.png")?,
            &PlotConfig::titled("Column Density", "n (m^-2)"),
        )?;

        let lines: Vec<_> = densities_1d
            .labelled()
            .iter()
            .map(|(label, field)| (*label, field.to_vec()))
            .collect();
        plot_lines(
            &coords.line.x,
            &lines,
            &output.path("line_density.png")?,
            &PlotConfig::titled("1D Integrated", "n (m^-1)"),
        )?;
        log::info!("Plots written to {}", output.directory.display());
    }
    if output.csv {
        write_coords(&coords.volume.x, &output.path("x.txt")?)?;
        write_coords(&coords.volume.y, &output.path("y.txt")?)?;
        for ((label, column), (_, line)) in densities_2d
            .labelled()
            .iter()
            .zip(densities_1d.labelled().iter())
        {
            let name = label.to_lowercase();
            write_real_2d(column, &output.path(&format!("column_density_{name}.txt"))?)?;
            write_coords(line, &output.path(&format!("line_density_{name}.txt"))?)?;
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
