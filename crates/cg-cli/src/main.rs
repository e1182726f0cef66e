//! Command line front end for the exact Clebsch-Gordan tools.

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use cg_core::HalfInt;
use cg_multi::{decompose, TableCache};
use cg_table::Table;
use clap::{Args, Parser, Subcommand};

mod html;
mod render;

#[derive(Parser, Debug)]
#[command(name = "cg", about = "Exact Clebsch-Gordan coefficient tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the coefficient table for a (j1, j2) pair and render it as HTML.
    Table(TableArgs),
    /// Decompose a product of angular momentum states into the total
    /// angular momentum basis and render the expansion.
    Decompose(DecomposeArgs),
}

#[derive(Args, Debug)]
struct TableArgs {
    /// j1 value, as '<int>' or '<int>/2'.
    #[arg(long)]
    j1: String,
    /// j2 value, as '<int>' or '<int>/2'.
    #[arg(long)]
    j2: String,
    /// Output HTML path; defaults to the system temp directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecomposeArgs {
    /// Input states as 'j1,m1;j2,m2[;...;jk,mk]'.
    #[arg(long)]
    states: String,
    /// Output HTML path; defaults to the system temp directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Table(args) => {
            let j1: HalfInt = args.j1.parse()?;
            let j2: HalfInt = args.j2.parse()?;
            let table = Table::build(j1.doubled(), j2.doubled())?;
            let page = html::table_page(&render::table_title(&table), &render::table_body(&table));
            let path = args
                .out
                .unwrap_or_else(|| env::temp_dir().join("clebsch-gordan.html"));
            fs::write(&path, page)?;
            println!("{}", path.display());
        }
        Command::Decompose(args) => {
            let mut cache = TableCache::new();
            let decomposition = decompose(&args.states, &mut cache)?;
            let page = html::mathjax_page(&decomposition.latex()?);
            let path = args
                .out
                .unwrap_or_else(|| env::temp_dir().join("multi-angular.html"));
            fs::write(&path, page)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
