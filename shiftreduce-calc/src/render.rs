//! Plain-text rendering of parse traces.
//!
//! The layout is four left-aligned columns, `State Stack` (20 wide),
//! `Symbol Stack` (30), `Input` (30) and `Action`, under a 100-character
//! rule. A closing line reports `Input accepted!` or `Parsing error!`.
use shiftreduce::{ParseOutcome, Snapshot};
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 100;

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_row(out: &mut impl Write, states: &str, symbols: &str, input: &str, action: &str) -> fmt::Result {
    let line = format!("{states:<20}{symbols:<30}{input:<30}{action}");
    writeln!(out, "{}", line.trim_end())
}

/// Writes the trace table for `rows` followed by the verdict.
pub fn write_trace<V>(
    out: &mut impl Write,
    rows: &[Snapshot],
    outcome: &ParseOutcome<V>,
) -> fmt::Result {
    write_row(out, "State Stack", "Symbol Stack", "Input", "Action")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for row in rows {
        write_row(
            out,
            &join(&row.states),
            &join(&row.symbols),
            &join(&row.remaining),
            &row.action.to_string(),
        )?;
    }
    match outcome {
        ParseOutcome::Accepted(_) => writeln!(out, "\nInput accepted!"),
        ParseOutcome::Rejected(rejection) => {
            writeln!(out, "\nParsing error!")?;
            writeln!(out, "{rejection}")
        }
    }
}

/// Renders the trace table into a string.
pub fn render_trace<V>(rows: &[Snapshot], outcome: &ParseOutcome<V>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_trace(&mut out, rows, outcome);
    out
}
