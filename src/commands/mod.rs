//! Command surface: token parsing and dispatch for distribution plots.

pub mod dist;

// Re-export types for convenient access
pub use dist::{show_biv_dist, show_dist, CommandError, PlotType};

use crate::data::model::Dataset;

/// Route a full command line (already split into tokens) to its handler.
///
/// `dist U|univ …` runs the univariate handler on the remaining tokens,
/// `dist B|biv …` the bivariate one; `help` prints the usage text.
pub fn run(data: &Dataset, tokens: &[String]) -> Result<(), CommandError> {
    match tokens {
        [] => Ok(()),
        [cmd, rest @ ..] if cmd.as_str() == "dist" => match rest {
            [sel, args @ ..] if sel.as_str() == "U" || sel.as_str() == "univ" => {
                show_dist(data, args)
            }
            [sel, args @ ..] if sel.as_str() == "B" || sel.as_str() == "biv" => {
                show_biv_dist(data, args)
            }
            _ => Err(CommandError::UnknownCommand(tokens.join(" "))),
        },
        [cmd, ..] if cmd.as_str() == "help" => {
            print_help();
            Ok(())
        }
        _ => Err(CommandError::UnknownCommand(tokens.join(" "))),
    }
}

/// Prints a help message for both commands.
pub fn print_help() {
    println!("FOR UNIVARIATE DIST:");
    println!("\tusage: dist [U/univ] [var] [-o/--outfile] [-c/--categoricals]");
    println!("\t\tvar                   Numerical variable to show dist for");
    println!("\t\t-o/--outfile          Name of image file to save outputted plot to, if so desired");
    println!("\t\t-c/--categoricals     List of categorical variables to categorize datapoints on (default: None). No categorization if none provided");
    println!();

    println!("FOR BIVARIATE DIST:");
    println!("\tusage: dist [B/biv] [v1] [v2] [plot_type] [-o/--outfile] [-c/--categoricals]");
    println!("\t\tv1, v2                Numerical variables to show dist for");
    println!("\t\tplot_type             Type of plot to generate, 'gaussian' or 'heatmap' (default: 'heatmap')");
    println!("\t\t-o/--outfile          Name of image file to save outputted plot to, if so desired");
    println!("\t\t-c/--categoricals     List of categorical variables to categorize datapoints on (default: None). No categorization if none provided");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Dataset};

    fn dataset() -> Dataset {
        Dataset::from_rows(vec![[("x".to_string(), CellValue::Float(1.0))]
            .into_iter()
            .collect()])
    }

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unknown_selector_is_rejected() {
        let err = run(&dataset(), &tokens(&["dist", "X", "x"])).unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand(_)));
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = run(&dataset(), &tokens(&["scatter", "x"])).unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand(_)));
    }

    #[test]
    fn empty_line_is_a_no_op() {
        assert!(run(&dataset(), &[]).is_ok());
    }
}
