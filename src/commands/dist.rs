//! Distribution-plot command handlers.
//!
//! Each handler takes the loaded dataset plus the raw argument tokens of
//! one invocation, parses and validates them, and runs the render → save →
//! display pipeline. No state is kept across calls.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::warn;
use thiserror::Error;

use crate::data::model::Dataset;
use crate::output;
use crate::plot::bivariate::{self, JointKind};
use crate::plot::univariate;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CommandError {
    /// Usage errors from the token parser (missing args, bad plot type).
    #[error(transparent)]
    Parse(#[from] clap::Error),
    #[error("invalid choice '{0}': not a numerical column of the dataset")]
    UnknownVariable(String),
    #[error("invalid choice '{0}': no such column in the dataset")]
    UnknownColumn(String),
    #[error("unknown command: '{0}' (try 'help')")]
    UnknownCommand(String),
    /// Failures from the render/save/display pipeline.
    #[error(transparent)]
    Render(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Argument surfaces
// ---------------------------------------------------------------------------

/// `dist U var [-o FILE] [-c COL...]`
#[derive(Debug, Parser)]
#[command(name = "dist U", no_binary_name = true)]
struct DistArgs {
    /// Numerical variable to show the distribution for
    var: String,

    /// Image file to save the plot to
    #[arg(short, long, default_value = "output.png")]
    outfile: PathBuf,

    /// Categorical columns to facet the datapoints on
    #[arg(short, long, num_args = 0..)]
    categoricals: Vec<String>,
}

/// Joint-plot rendering requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotType {
    /// Binned counts.
    Heatmap,
    /// Kernel-density field.
    Gaussian,
}

/// `dist B v1 v2 [plot_type] [-o FILE] [-c COL...]`
#[derive(Debug, Parser)]
#[command(name = "dist B", no_binary_name = true)]
struct BivDistArgs {
    /// First numerical variable
    v1: String,

    /// Second numerical variable
    v2: String,

    /// Type of joint plot to generate
    #[arg(value_enum, default_value = "heatmap")]
    plot_type: PlotType,

    /// Image file to save the plot to
    #[arg(short, long, default_value = "output.png")]
    outfile: PathBuf,

    /// Categorical columns to facet the datapoints on
    #[arg(short, long, num_args = 0..)]
    categoricals: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Univariate distribution: histogram + density of one numerical variable,
/// optionally faceted by categoricals. Saves the figure, then displays it.
///
/// An unsupported output extension logs a warning and returns without
/// producing anything; invalid column choices are returned as errors.
pub fn show_dist(data: &Dataset, args: &[String]) -> Result<(), CommandError> {
    let parsed = DistArgs::try_parse_from(args)?;

    validate_variable(data, &parsed.var)?;
    validate_categoricals(data, &parsed.categoricals)?;

    if !output::supported_image_extension(&parsed.outfile) {
        warn!(
            "{} is not a supported image file, nothing plotted",
            parsed.outfile.display()
        );
        return Ok(());
    }

    if parsed.categoricals.is_empty() {
        univariate::render_dist(data, &parsed.var, &parsed.outfile)?;
    } else {
        univariate::render_dist_by_categoricals(
            data,
            &parsed.var,
            &parsed.categoricals,
            &parsed.outfile,
        )?;
    }

    output::display_image(&parsed.outfile)?;
    Ok(())
}

/// Bivariate (joint) distribution of two numerical variables, rendered as
/// a heatmap (default) or a Gaussian density field, optionally faceted.
/// Saves the figure, then displays it.
pub fn show_biv_dist(data: &Dataset, args: &[String]) -> Result<(), CommandError> {
    let parsed = BivDistArgs::try_parse_from(args)?;

    validate_variable(data, &parsed.v1)?;
    validate_variable(data, &parsed.v2)?;
    validate_categoricals(data, &parsed.categoricals)?;

    if !output::supported_image_extension(&parsed.outfile) {
        warn!(
            "{} is not a supported image file, nothing plotted",
            parsed.outfile.display()
        );
        return Ok(());
    }

    let kind = match parsed.plot_type {
        PlotType::Gaussian => JointKind::Kde,
        PlotType::Heatmap => JointKind::Hist,
    };

    if parsed.categoricals.is_empty() {
        bivariate::render_biv_dist(data, &parsed.v1, &parsed.v2, kind, &parsed.outfile)?;
    } else {
        bivariate::render_biv_dist_by_categoricals(
            data,
            &parsed.v1,
            &parsed.v2,
            kind,
            &parsed.categoricals,
            &parsed.outfile,
        )?;
    }

    output::display_image(&parsed.outfile)?;
    Ok(())
}

fn validate_variable(data: &Dataset, name: &str) -> Result<(), CommandError> {
    if data.numerical_columns().iter().any(|c| c == name) {
        Ok(())
    } else {
        Err(CommandError::UnknownVariable(name.to_string()))
    }
}

fn validate_categoricals(data: &Dataset, categoricals: &[String]) -> Result<(), CommandError> {
    for col in categoricals {
        if !data.has_column(col) {
            return Err(CommandError::UnknownColumn(col.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn parse_biv(args: &[&str]) -> Result<BivDistArgs, clap::Error> {
        BivDistArgs::try_parse_from(tokens(args))
    }

    #[test]
    fn univariate_defaults() {
        let parsed = DistArgs::try_parse_from(tokens(&["height"])).unwrap();
        assert_eq!(parsed.var, "height");
        assert_eq!(parsed.outfile, PathBuf::from("output.png"));
        assert!(parsed.categoricals.is_empty());
    }

    #[test]
    fn univariate_categoricals_take_several_values() {
        let parsed =
            DistArgs::try_parse_from(tokens(&["height", "-c", "sex", "region"])).unwrap();
        assert_eq!(parsed.categoricals, vec!["sex", "region"]);
    }

    #[test]
    fn univariate_missing_var_is_a_parse_error() {
        assert!(DistArgs::try_parse_from(tokens(&[])).is_err());
    }

    #[test]
    fn bivariate_plot_type_defaults_to_heatmap() {
        let parsed = parse_biv(&["height", "weight"]).unwrap();
        assert_eq!(parsed.plot_type, PlotType::Heatmap);
    }

    #[test]
    fn bivariate_accepts_gaussian() {
        let parsed = parse_biv(&["height", "weight", "gaussian"]).unwrap();
        assert_eq!(parsed.plot_type, PlotType::Gaussian);
    }

    #[test]
    fn bivariate_rejects_unknown_plot_type() {
        assert!(parse_biv(&["height", "weight", "contour"]).is_err());
    }

    #[test]
    fn bivariate_outfile_flag_long_form() {
        let parsed = parse_biv(&["height", "weight", "--outfile", "joint.jpg"]).unwrap();
        assert_eq!(parsed.outfile, PathBuf::from("joint.jpg"));
    }
}
