//! Binning and kernel-density estimation for distribution plots.

// ---------------------------------------------------------------------------
// Binning
// ---------------------------------------------------------------------------

/// Square-root rule: number of histogram bins for `n` samples.
pub fn sqrt_bins(n: usize) -> usize {
    ((n as f64).sqrt().ceil() as usize).max(1)
}

/// A one-dimensional histogram over equal-width bins.
#[derive(Debug, Clone)]
pub struct Histogram1d {
    /// Left edge of the first bin.
    pub start: f64,
    /// Width of every bin.
    pub bin_width: f64,
    /// Sample count per bin.
    pub counts: Vec<usize>,
}

impl Histogram1d {
    /// Right edge of the last bin.
    pub fn end(&self) -> f64 {
        self.start + self.bin_width * self.counts.len() as f64
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Bin `values` into `bins` equal-width bins spanning their range.
/// Returns `None` for empty input or non-finite bounds. A constant sample
/// is spread over a unit-wide range so the single spike stays drawable.
pub fn histogram1d(values: &[f64], bins: usize) -> Option<Histogram1d> {
    if values.is_empty() || bins == 0 {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }

    let (start, span) = if max > min {
        (min, max - min)
    } else {
        (min - 0.5, 1.0)
    };
    let bin_width = span / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = ((v - start) / bin_width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Some(Histogram1d {
        start,
        bin_width,
        counts,
    })
}

/// A two-dimensional histogram / density field over a regular grid.
/// Cell `(ix, iy)` is stored at `values[iy * nx + ix]`.
#[derive(Debug, Clone)]
pub struct Grid2d {
    pub x_start: f64,
    pub y_start: f64,
    pub x_width: f64,
    pub y_width: f64,
    pub nx: usize,
    pub ny: usize,
    pub values: Vec<f64>,
}

impl Grid2d {
    pub fn at(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy * self.nx + ix]
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }

    pub fn x_end(&self) -> f64 {
        self.x_start + self.x_width * self.nx as f64
    }

    pub fn y_end(&self) -> f64 {
        self.y_start + self.y_width * self.ny as f64
    }
}

/// Bin `points` into a `bins` × `bins` grid of counts.
pub fn histogram2d(points: &[(f64, f64)], bins: usize) -> Option<Grid2d> {
    if points.is_empty() || bins == 0 {
        return None;
    }
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (x_start, x_span) = axis_span(&xs)?;
    let (y_start, y_span) = axis_span(&ys)?;

    let x_width = x_span / bins as f64;
    let y_width = y_span / bins as f64;

    let mut values = vec![0.0; bins * bins];
    for &(x, y) in points {
        let ix = (((x - x_start) / x_width).floor() as usize).min(bins - 1);
        let iy = (((y - y_start) / y_width).floor() as usize).min(bins - 1);
        values[iy * bins + ix] += 1.0;
    }

    Some(Grid2d {
        x_start,
        y_start,
        x_width,
        y_width,
        nx: bins,
        ny: bins,
        values,
    })
}

fn axis_span(values: &[f64]) -> Option<(f64, f64)> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if max > min {
        Some((min, max - min))
    } else {
        Some((min - 0.5, 1.0))
    }
}

// ---------------------------------------------------------------------------
// Kernel-density estimation (Gaussian kernel, Scott's rule)
// ---------------------------------------------------------------------------

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0).max(1.0);
    (mean, var.sqrt())
}

/// Scott's-rule bandwidth for a univariate sample, `None` when the sample
/// is too small or has no spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let (_, sd) = mean_and_std(values);
    if !sd.is_finite() || sd <= 0.0 {
        return None;
    }
    Some(sd * (values.len() as f64).powf(-0.2))
}

fn gaussian_kernel(t: f64) -> f64 {
    (-0.5 * t * t).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Evaluate the Gaussian KDE of `values` on `points` grid positions over
/// the sample range. Returns `(x, density)` pairs, or `None` when no
/// bandwidth can be derived.
pub fn kde_curve(values: &[f64], points: usize) -> Option<Vec<(f64, f64)>> {
    let h = scott_bandwidth(values)?;
    if points < 2 {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let n = values.len() as f64;
    let step = (max - min) / (points - 1) as f64;

    let curve = (0..points)
        .map(|i| {
            let x = min + i as f64 * step;
            let density = values
                .iter()
                .map(|&xi| gaussian_kernel((x - xi) / h))
                .sum::<f64>()
                / (n * h);
            (x, density)
        })
        .collect();
    Some(curve)
}

/// Evaluate the bivariate Gaussian KDE of `points` on a `resolution` ×
/// `resolution` grid with per-axis Scott bandwidths. `None` when either
/// axis has no spread.
pub fn kde_field(points: &[(f64, f64)], resolution: usize) -> Option<Grid2d> {
    if points.len() < 2 || resolution == 0 {
        return None;
    }
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();

    // Scott's rule for d = 2: n^(-1/6) per axis.
    let factor = (points.len() as f64).powf(-1.0 / 6.0);
    let (_, sx) = mean_and_std(&xs);
    let (_, sy) = mean_and_std(&ys);
    if sx <= 0.0 || sy <= 0.0 || !sx.is_finite() || !sy.is_finite() {
        return None;
    }
    let hx = sx * factor;
    let hy = sy * factor;

    let (x_min, x_span) = axis_span(&xs)?;
    let (y_min, y_span) = axis_span(&ys)?;
    let x_start = x_min - hx;
    let y_start = y_min - hy;
    let x_width = (x_span + 2.0 * hx) / resolution as f64;
    let y_width = (y_span + 2.0 * hy) / resolution as f64;

    let n = points.len() as f64;
    let norm = n * hx * hy * 2.0 * std::f64::consts::PI;

    let mut values = Vec::with_capacity(resolution * resolution);
    for iy in 0..resolution {
        let y = y_start + (iy as f64 + 0.5) * y_width;
        for ix in 0..resolution {
            let x = x_start + (ix as f64 + 0.5) * x_width;
            let sum: f64 = points
                .iter()
                .map(|&(px, py)| {
                    let tx = (x - px) / hx;
                    let ty = (y - py) / hy;
                    (-0.5 * (tx * tx + ty * ty)).exp()
                })
                .sum();
            values.push(sum / norm);
        }
    }

    Some(Grid2d {
        x_start,
        y_start,
        x_width,
        y_width,
        nx: resolution,
        ny: resolution,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_rule_rounds_up() {
        assert_eq!(sqrt_bins(1), 1);
        assert_eq!(sqrt_bins(10), 4);
        assert_eq!(sqrt_bins(100), 10);
    }

    #[test]
    fn histogram_counts_every_sample() {
        let values = [1.0, 1.5, 2.0, 2.5, 3.0, 3.0];
        let hist = histogram1d(&values, 4).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        // max lands in the last bin, not out of range
        assert!(hist.counts[3] >= 1);
    }

    #[test]
    fn histogram_of_constant_sample_is_drawable() {
        let hist = histogram1d(&[2.0, 2.0, 2.0], 3).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 3);
        assert!(hist.end() > hist.start);
    }

    #[test]
    fn histogram_rejects_empty_input() {
        assert!(histogram1d(&[], 4).is_none());
    }

    #[test]
    fn bandwidth_requires_spread() {
        assert!(scott_bandwidth(&[1.0]).is_none());
        assert!(scott_bandwidth(&[2.0, 2.0, 2.0]).is_none());
        assert!(scott_bandwidth(&[1.0, 2.0, 3.0]).unwrap() > 0.0);
    }

    #[test]
    fn kde_curve_is_positive_and_spans_sample_range() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0];
        let curve = kde_curve(&values, 50).unwrap();
        assert_eq!(curve.len(), 50);
        assert!((curve[0].0 - 1.0).abs() < 1e-9);
        assert!((curve[49].0 - 4.0).abs() < 1e-9);
        assert!(curve.iter().all(|&(_, d)| d > 0.0));
    }

    #[test]
    fn histogram2d_counts_every_point() {
        let points = [(0.0, 0.0), (1.0, 1.0), (1.0, 0.5), (0.2, 0.9)];
        let grid = histogram2d(&points, 5).unwrap();
        assert_eq!(grid.values.iter().sum::<f64>(), points.len() as f64);
    }

    #[test]
    fn kde_field_needs_spread_on_both_axes() {
        let flat = [(1.0, 2.0), (2.0, 2.0), (3.0, 2.0)];
        assert!(kde_field(&flat, 10).is_none());

        let spread = [(1.0, 1.0), (2.0, 3.0), (3.0, 2.0)];
        let grid = kde_field(&spread, 10).unwrap();
        assert_eq!(grid.values.len(), 100);
        assert!(grid.max_value() > 0.0);
    }
}
