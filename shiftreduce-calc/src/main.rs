//! Command-line interface for shiftreduce-calc.
//!
//! ```text
//! shiftreduce-calc trace "id + id * id"
//! shiftreduce-calc eval "x * (y + 1)" --var x=3 --var y=4
//! shiftreduce-calc table
//! ```
//!
//! When `INPUT` is omitted it is read from standard input. Set `RUST_LOG`
//! to `debug` or `trace` to watch the automaton work.

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use shiftreduce_calc::{CalcParser, SymTab, render_trace};
use std::io::Read;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the step-by-step shift-reduce trace of an expression
    Trace {
        /// Expression to parse, e.g. "id + id * id"
        input: Option<String>,
    },
    /// Evaluates an expression
    Eval {
        /// Expression to evaluate
        input: Option<String>,
        /// Binds an identifier, as NAME=VALUE; may be repeated
        #[arg(short, long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
        vars: Vec<(String, i64)>,
    },
    /// Prints the grammar and its ACTION/GOTO table
    Table,
}

fn parse_binding(arg: &str) -> Result<(String, i64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {arg:?}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid value for {name}: {err}"))?;
    Ok((name.trim().to_string(), value))
}

fn read_input(input: Option<String>) -> Result<String> {
    match input {
        Some(input) => Ok(input),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("can't read standard input")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let parser = CalcParser::try_new().context("can't build the expression table")?;

    match args.command {
        Commands::Trace { input } => {
            let input = read_input(input)?;
            let trace = parser.trace(&input)?;
            print!("{}", render_trace(&trace.rows, &trace.outcome));
            if !trace.outcome.is_accepted() {
                std::process::exit(1);
            }
        }
        Commands::Eval { input, vars } => {
            let input = read_input(input)?;
            let mut symtab = SymTab::new();
            for (name, value) in &vars {
                symtab.bind(name, *value);
            }
            let value = parser.eval(&input, &mut symtab)?;
            println!("{value}");
        }
        Commands::Table => {
            let table = parser.table();
            print!("{}", table.grammar());
            println!();
            print!("{table}");
        }
    }
    Ok(())
}
