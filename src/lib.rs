//! Command-driven distribution plots for tabular datasets.
//!
//! Feed [`commands::show_dist`] or [`commands::show_biv_dist`] a loaded
//! [`data::model::Dataset`] plus the argument tokens of one invocation:
//! the tokens are parsed and validated against the dataset's columns, a
//! histogram/KDE or joint heatmap/density figure is rendered (optionally
//! faceted by categoricals, wrapped at three columns), saved to the named
//! image file, and opened in the platform viewer.

pub mod color;
pub mod commands;
pub mod data;
pub mod output;
pub mod plot;
