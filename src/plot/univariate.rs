//! Histogram + kernel-density figures for a single numerical variable.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::generate_palette;
use crate::data::facet::{facet_groups, grid_shape};
use crate::data::model::Dataset;

use super::draw_empty_panel;
use super::stats::{histogram1d, kde_curve, sqrt_bins};

const SINGLE_SIZE: (u32, u32) = (900, 600);
const PANEL_WIDTH: u32 = 360;
const PANEL_HEIGHT: u32 = 300;
const TITLE_HEIGHT: u32 = 48;
const KDE_POINTS: usize = 200;

/// Render the distribution of `var` over the whole dataset into a single
/// histogram + density figure at `outfile`.
pub fn render_dist(data: &Dataset, var: &str, outfile: &Path) -> Result<()> {
    let values = data.numeric_values(var);

    let root = BitMapBackend::new(outfile, SINGLE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    draw_dist_panel(
        &root,
        &values,
        &format!("DISTRIBUTION OF {var}"),
        var,
        &RED,
    )?;
    root.present()
        .with_context(|| format!("writing {}", outfile.display()))?;
    Ok(())
}

/// Render one distribution panel per category into a facet grid wrapped at
/// three columns, with a figure-level title naming the categoricals.
pub fn render_dist_by_categoricals(
    data: &Dataset,
    var: &str,
    categoricals: &[String],
    outfile: &Path,
) -> Result<()> {
    let groups = facet_groups(data, categoricals);
    let (rows, cols) = grid_shape(groups.len());

    let size = (
        cols as u32 * PANEL_WIDTH,
        rows as u32 * PANEL_HEIGHT + TITLE_HEIGHT,
    );
    let root = BitMapBackend::new(outfile, size).into_drawing_area();
    root.fill(&WHITE)?;

    let title = format!("DISTRIBUTION OF {var} BY {}", categoricals.join(", "));
    let grid = root.titled(&title, ("sans-serif", 24))?;
    let areas = grid.split_evenly((rows, cols));

    let palette = generate_palette(groups.len());
    for ((group, area), color) in groups.iter().zip(areas.iter()).zip(palette.iter()) {
        let values = data.numeric_values_at(var, &group.indices);
        draw_dist_panel(area, &values, &group.label, var, color)?;
    }

    root.present()
        .with_context(|| format!("writing {}", outfile.display()))?;
    Ok(())
}

/// Histogram with square-root binning plus a Gaussian KDE overlay scaled
/// to expected counts. Degenerate samples fall back to an empty panel or
/// a bare histogram without the density curve.
fn draw_dist_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    values: &[f64],
    caption: &str,
    x_desc: &str,
    color: &RGBColor,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let Some(hist) = histogram1d(values, sqrt_bins(values.len())) else {
        return draw_empty_panel(area, caption);
    };

    let y_max = (hist.max_count() as f64 * 1.1).max(1.0);
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(28)
        .y_label_area_size(40)
        .build_cartesian_2d(hist.start..hist.end(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc("count")
        .label_style(("sans-serif", 12))
        .draw()?;

    chart.draw_series(hist.counts.iter().enumerate().map(|(i, &count)| {
        let x0 = hist.start + i as f64 * hist.bin_width;
        Rectangle::new(
            [(x0, 0.0), (x0 + hist.bin_width, count as f64)],
            color.mix(0.5).filled(),
        )
    }))?;

    if let Some(curve) = kde_curve(values, KDE_POINTS) {
        // Density → expected count per bin, so the curve overlays the bars.
        let scale = values.len() as f64 * hist.bin_width;
        chart.draw_series(LineSeries::new(
            curve.into_iter().map(|(x, d)| (x, d * scale)),
            color.stroke_width(2),
        ))?;
    }

    Ok(())
}
