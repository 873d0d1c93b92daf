//! # shiftreduce-calc
//!
//! A small demonstration crate built on **shiftreduce**: an integer
//! calculator over the classic expression grammar, driven by its
//! hand-computed SLR(1) table.
//!
//! ## Overview
//!
//! - [`lexer`] converts raw input into [`CalcToken`]s. Identifiers and integer
//!   literals both become the terminal `id`.
//! - [`grammar`] defines the expression grammar and builds its table.
//! - [`parser`] runs the automaton. [`CalcParserDriver`] evaluates the
//!   expression as it is reduced; [`CalcParser`] ties scanning, parsing and
//!   tracing together.
//! - [`render`] prints step-by-step traces as a four-column table.
//! - [`symtab`] holds identifier bindings ([`SymTab`]).
//!
//! ## Example
//!
//! ```rust
//! use shiftreduce_calc::{CalcParser, SymTab, render_trace};
//!
//! let parser = CalcParser::try_new().unwrap();
//!
//! let mut symtab = SymTab::new();
//! symtab.bind("rate", 3);
//! assert_eq!(parser.eval("(rate + 1) * 10", &mut symtab).unwrap(), 40);
//!
//! let trace = parser.trace("id + id").unwrap();
//! let text = render_trace(&trace.rows, &trace.outcome);
//! assert!(text.ends_with("Input accepted!\n"));
//! ```
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod symtab;
pub mod token;

pub use error::CalcError;
pub use grammar::{expr_grammar, expr_table};
pub use lexer::{CalcLexer, tokenize};
pub use parser::{CalcParser, CalcParserDriver, CalcTrace};
pub use render::{render_trace, write_trace};
pub use symtab::{SymTab, SymTabError};
pub use token::{CalcToken, TokenValue};
