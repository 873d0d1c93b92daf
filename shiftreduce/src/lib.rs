//! Table-driven shift-reduce parsing.
//!
//! `shiftreduce` runs the SLR(1) parsing automaton over a precomputed
//! ACTION/GOTO table:
//!
//! - [`Grammar`]: terminals, non-terminals and numbered productions, with
//!   production 0 the augmented start production `S' -> S`.
//! - [`ParseTable`]: the ACTION and GOTO tables, validated against the
//!   grammar when built.
//! - [`Parser`]: the stack machine. It shifts, reduces and follows GOTO
//!   transitions until it accepts or rejects the input; a
//!   [`ParserDriver`] can attach semantic values to each reduction.
//! - [`Trace`]: a lazy sequence of [`Snapshot`]s, one per engine step.
//!
//! Tokenizing source text and computing the tables from a grammar are left
//! to the caller.
//!
//! # Example
//! ```rust
//! use shiftreduce::{Action, ActionCell, GotoCell, Grammar, Parser, ParseTable, Symbol};
//!
//! // S' -> L, L -> L , x | x
//! let grammar = Grammar::builder()
//!     .terminals([",", "x"])
//!     .production(Symbol::nt("S'"), [Symbol::nt("L")])
//!     .production(Symbol::nt("L"), [Symbol::nt("L"), Symbol::t(","), Symbol::t("x")])
//!     .production(Symbol::nt("L"), [Symbol::t("x")])
//!     .build()
//!     .unwrap();
//!
//! let table = ParseTable::build(
//!     grammar,
//!     [
//!         ActionCell::new(0, Symbol::t("x"), "S2".parse().unwrap()),
//!         ActionCell::new(1, Symbol::t(","), "S3".parse().unwrap()),
//!         ActionCell::new(1, Symbol::EndOfInput, Action::Accept),
//!         ActionCell::new(2, Symbol::t(","), Action::Reduce(2)),
//!         ActionCell::new(2, Symbol::EndOfInput, Action::Reduce(2)),
//!         ActionCell::new(3, Symbol::t("x"), Action::Shift(4)),
//!         ActionCell::new(4, Symbol::t(","), Action::Reduce(1)),
//!         ActionCell::new(4, Symbol::EndOfInput, Action::Reduce(1)),
//!     ],
//!     [GotoCell::new(0, Symbol::nt("L"), 1)],
//! )
//! .unwrap();
//!
//! let parser = Parser::new(&table);
//! let input = [Symbol::t("x"), Symbol::t(","), Symbol::t("x")];
//! let actions: Vec<String> = parser
//!     .trace(input)
//!     .map(|row| row.unwrap().action.to_string())
//!     .collect();
//! assert_eq!(actions, ["S2", "R2", "S3", "S4", "R1", "acc"]);
//! ```

mod error;
mod grammar;
mod parser;
mod symbol;
mod table;
mod trace;

#[cfg(test)]
mod test_grammar;

pub use crate::error::{GrammarError, ParseError, TableError};
pub use crate::grammar::{Grammar, GrammarBuilder, Production};
pub use crate::parser::{
    Configuration, ParseOutcome, Parser, ParserDriver, ParserStats, Recognizer, RejectReason,
    Rejection, Run, Token,
};
pub use crate::symbol::{Symbol, SymbolKind};
pub use crate::table::{
    Action, ActionCell, GotoCell, ParseActionError, ParseTable, ProdID, StateID,
};
pub use crate::trace::{Snapshot, Trace};
