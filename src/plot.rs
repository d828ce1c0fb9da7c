//! Static plots of density profiles with `plotters`.
//!
//! Line plots show cuts or line densities of one or more components; heatmaps
//! show column densities. The backend follows the file extension: `.svg`
//! produces an SVG, anything else a PNG bitmap.

use ndarray::{Array1, Array2};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use crate::error::{SimbiError, SimbiResult};

/// Configuration for customizing plots.
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,
    /// Image height in pixels (default: 768)
    pub height: u32,
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    /// Factor applied to coordinates before plotting (default: 1e6, metres to µm)
    pub length_scale: f64,
    /// Line width in pixels (default: 2)
    pub line_width: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Density".to_string(),
            xlabel: "x (µm)".to_string(),
            ylabel: "Density".to_string(),
            length_scale: 1e6,
            line_width: 2,
        }
    }
}

impl PlotConfig {
    pub fn titled(title: &str, ylabel: &str) -> Self {
        Self {
            title: title.to_string(),
            ylabel: ylabel.to_string(),
            ..Self::default()
        }
    }
}

const PALETTE: [RGBColor; 4] = [BLACK, RED, BLUE, GREEN];

/// Maps t in [0, 1] from blue to red.
fn heat_color(t: f64) -> HSLColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    HSLColor(0.66 * (1.0 - t), 1.0, 0.5)
}

fn upper_bound<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    let max = values.cloned().fold(0.0, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn draw_lines_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    x: &[f64],
    series: &[(&str, Vec<f64>)],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let x_min = x.first().copied().unwrap_or(0.0);
    let x_max = x.last().copied().unwrap_or(1.0);
    let y_max = 1.1 * upper_bound(series.iter().flat_map(|(_, values)| values.iter()));

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .y_label_formatter(&|v: &f64| format!("{:.2e}", v))
        .draw()?;

    for (i, (label, values)) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let width = config.line_width;
        chart
            .draw_series(LineSeries::new(
                x.iter().zip(values.iter()).map(|(x, y)| (*x, *y)),
                color.stroke_width(width),
            ))?
            .label(*label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
            });
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn draw_heatmap_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    field: &Array2<f64>,
    title: &str,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let half_dx = 0.5 * (x[1] - x[0]);
    let half_dy = 0.5 * (y[1] - y[0]);
    let peak = upper_bound(field.iter());

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28.0).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (x[0] - half_dx)..(x[x.len() - 1] + half_dx),
            (y[0] - half_dy)..(y[y.len() - 1] + half_dy),
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&config.xlabel)
        .y_desc("y (µm)")
        .draw()?;

    chart.draw_series(field.indexed_iter().map(|((i, j), &value)| {
        Rectangle::new(
            [(x[i] - half_dx, y[j] - half_dy), (x[i] + half_dx, y[j] + half_dy)],
            heat_color(value / peak).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn scaled(axis: &Array1<f64>, config: &PlotConfig) -> Vec<f64> {
    axis.iter().map(|v| v * config.length_scale).collect()
}

fn check_lengths(x: usize, lengths: impl Iterator<Item = usize>) -> SimbiResult<()> {
    for n in lengths {
        if n != x {
            return Err(SimbiError::Shape(format!(
                "series of length {n} does not match axis of length {x}"
            )));
        }
    }
    Ok(())
}

/// Plots one or more labelled profiles against `x`.
pub fn plot_lines(
    x: &Array1<f64>,
    series: &[(&str, Vec<f64>)],
    output_path: &Path,
    config: &PlotConfig,
) -> SimbiResult<()> {
    check_lengths(x.len(), series.iter().map(|(_, v)| v.len()))?;
    let x = scaled(x, config);
    let size = (config.width, config.height);

    let result = if output_path.extension().map_or(false, |e| e == "svg") {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_lines_on_area(&root, &x, series, config)
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_lines_on_area(&root, &x, series, config)
    };
    result.map_err(|e| SimbiError::Plot(e.to_string()))?;
    log::debug!("Wrote {}", output_path.display());
    Ok(())
}

/// Plots labelled column densities side by side, one panel per field.
pub fn plot_heatmaps(
    x: &Array1<f64>,
    y: &Array1<f64>,
    fields: &[(&str, &Array2<f64>)],
    output_path: &Path,
    config: &PlotConfig,
) -> SimbiResult<()> {
    if x.len() < 2 || y.len() < 2 {
        return Err(SimbiError::Shape("heatmaps need at least two points per axis".to_string()));
    }
    for (_, field) in fields {
        if field.dim() != (x.len(), y.len()) {
            return Err(SimbiError::Shape(format!(
                "field of shape {:?} does not match axes ({}, {})",
                field.dim(),
                x.len(),
                y.len()
            )));
        }
    }
    let xs = scaled(x, config);
    let ys = scaled(y, config);
    let panels = fields.len().max(1);
    let size = (config.width * panels as u32, config.height);

    let result = if output_path.extension().map_or(false, |e| e == "svg") {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_panels(&root, &xs, &ys, fields, config)
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_panels(&root, &xs, &ys, fields, config)
    };
    result.map_err(|e| SimbiError::Plot(e.to_string()))?;
    log::debug!("Wrote {}", output_path.display());
    Ok(())
}

fn draw_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    fields: &[(&str, &Array2<f64>)],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, fields.len().max(1)));
    for (area, (label, field)) in areas.iter().zip(fields.iter()) {
        let title = if fields.len() == 1 {
            config.title.clone()
        } else {
            format!("{} ({})", config.title, label)
        };
        draw_heatmap_on_area(area, x, y, field, &title, config)?;
    }
    root.present()?;
    Ok(())
}
