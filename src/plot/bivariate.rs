//! Joint-distribution figures for a pair of numerical variables.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::density_color;
use crate::data::facet::{facet_groups, grid_shape};
use crate::data::model::Dataset;

use super::draw_empty_panel;
use super::stats::{histogram2d, kde_field, sqrt_bins, Grid2d};

const SINGLE_SIZE: (u32, u32) = (800, 700);
const PANEL_WIDTH: u32 = 360;
const PANEL_HEIGHT: u32 = 340;
const TITLE_HEIGHT: u32 = 48;
/// Grid resolution of the evaluated density field.
const KDE_RESOLUTION: usize = 80;
/// Upper bound on 2-D histogram bins per axis.
const MAX_BINS: usize = 60;
/// Cells below this share of the peak stay unpainted.
const SHADE_CUTOFF: f64 = 0.02;

/// How the joint distribution is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointKind {
    /// Binned counts (2-D histogram).
    Hist,
    /// Gaussian kernel-density field.
    Kde,
}

/// Render the joint distribution of `v1` and `v2` over the whole dataset
/// into a single figure at `outfile`.
pub fn render_biv_dist(
    data: &Dataset,
    v1: &str,
    v2: &str,
    kind: JointKind,
    outfile: &Path,
) -> Result<()> {
    let pairs = data.numeric_pairs(v1, v2);

    let root = BitMapBackend::new(outfile, SINGLE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    draw_joint_panel(
        &root,
        &pairs,
        &format!("DISTRIBUTION OF {v1}, {v2}"),
        v1,
        v2,
        kind,
    )?;
    root.present()
        .with_context(|| format!("writing {}", outfile.display()))?;
    Ok(())
}

/// Render one joint panel per category into a facet grid wrapped at three
/// columns, with a figure-level title naming the categoricals.
pub fn render_biv_dist_by_categoricals(
    data: &Dataset,
    v1: &str,
    v2: &str,
    kind: JointKind,
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

    let title = format!(
        "DISTRIBUTION OF {v1}, {v2} BY {}",
        categoricals.join(", ")
    );
    let grid = root.titled(&title, ("sans-serif", 24))?;
    let areas = grid.split_evenly((rows, cols));

    for (group, area) in groups.iter().zip(areas.iter()) {
        let pairs = data.numeric_pairs_at(v1, v2, &group.indices);
        draw_joint_panel(area, &pairs, &group.label, v1, v2, kind)?;
    }

    root.present()
        .with_context(|| format!("writing {}", outfile.display()))?;
    Ok(())
}

fn joint_grid(pairs: &[(f64, f64)], kind: JointKind) -> Option<Grid2d> {
    match kind {
        JointKind::Hist => histogram2d(pairs, sqrt_bins(pairs.len()).min(MAX_BINS)),
        JointKind::Kde => kde_field(pairs, KDE_RESOLUTION),
    }
}

/// Shade the joint field cell by cell on a light-to-dark ramp.
fn draw_joint_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    pairs: &[(f64, f64)],
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    kind: JointKind,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let grid = match joint_grid(pairs, kind) {
        Some(g) if g.max_value() > 0.0 => g,
        _ => return draw_empty_panel(area, caption),
    };
    let peak = grid.max_value();

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(28)
        .y_label_area_size(40)
        .build_cartesian_2d(grid.x_start..grid.x_end(), grid.y_start..grid.y_end())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(("sans-serif", 12))
        .draw()?;

    let cells = (0..grid.ny)
        .flat_map(|iy| (0..grid.nx).map(move |ix| (ix, iy)))
        .filter_map(|(ix, iy)| {
            let t = grid.at(ix, iy) / peak;
            if t < SHADE_CUTOFF {
                return None;
            }
            let x0 = grid.x_start + ix as f64 * grid.x_width;
            let y0 = grid.y_start + iy as f64 * grid.y_width;
            Some(Rectangle::new(
                [(x0, y0), (x0 + grid.x_width, y0 + grid.y_width)],
                density_color(t).filled(),
            ))
        });
    chart.draw_series(cells)?;

    Ok(())
}
