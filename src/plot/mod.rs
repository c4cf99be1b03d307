/// Plot construction: statistics plus the `plotters` render pipeline.
///
/// `univariate` draws histogram + density curves, `bivariate` draws joint
/// heatmaps and density fields. Both render single panels or facet grids
/// wrapped at three columns, and both write through the bitmap backend.
pub mod bivariate;
pub mod stats;
pub mod univariate;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Panel drawn when a facet has no usable data points: caption only.
pub(crate) fn draw_empty_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(28)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;
    chart.configure_mesh().disable_mesh().draw()?;
    Ok(())
}
