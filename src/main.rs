use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use distplot::commands;
use distplot::data::loader;

/// Distribution plots for tabular datasets, driven by commands on stdin.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Dataset file to explore (.csv, .json, .parquet)
    data: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let dataset = loader::load_file(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    println!(
        "Loaded {} rows, {} columns ({} numerical). Type 'help' for commands, 'quit' to leave.",
        dataset.len(),
        dataset.column_names.len(),
        dataset.numerical_columns().len()
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();

        match tokens.first().map(String::as_str) {
            None => continue,
            Some("quit") | Some("exit") => break,
            _ => {
                if let Err(e) = commands::run(&dataset, &tokens) {
                    eprintln!("{e}");
                }
            }
        }
    }

    Ok(())
}
