//! Error types for grammar construction, table construction and parsing.
//!
//! Construction errors ([`GrammarError`], [`TableError`]) fail fast: the
//! object under construction is never returned. A syntax error in the input
//! is *not* an error at all; it is reported as
//! [`ParseOutcome::Rejected`](crate::ParseOutcome::Rejected). [`ParseError`]
//! covers the remaining faults: a GOTO cell the table left undefined, or a
//! failing semantic hook.

use crate::{Action, ProdID, StateID, Symbol};
use thiserror::Error;

/// Errors raised while building a [`Grammar`](crate::Grammar).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar has no productions")]
    EmptyGrammar,

    /// Production 0 must be the augmented start production `S' -> S`.
    #[error("production 0 must have the form S' -> S with a single non-terminal on the right")]
    NoStartProduction,

    /// A right-hand side refers to a terminal that was never declared, or
    /// to a non-terminal that is never the left-hand side of a production.
    #[error("undeclared symbol {symbol:?} in production {production}")]
    UndeclaredSymbol { symbol: Symbol, production: usize },

    #[error("left-hand side of production {production} is not a non-terminal: {symbol:?}")]
    TerminalOnLhs { symbol: Symbol, production: usize },

    /// `EndOfInput` and `Error` cannot be written into productions.
    #[error("reserved symbol {symbol:?} used in production {production}")]
    ReservedSymbol { symbol: Symbol, production: usize },

    /// The augmented start symbol must head exactly one production and
    /// never appear on a right-hand side.
    #[error("augmented start symbol {symbol:?} reused in production {production}")]
    StartSymbolReused { symbol: Symbol, production: usize },
}

/// Errors raised while building a [`ParseTable`](crate::ParseTable), plus
/// [`TableError::UndefinedGoto`], which is reported when an undefined GOTO
/// cell is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("state {state} out of range (table has {state_count} states)")]
    OutOfRangeState { state: StateID, state_count: usize },

    #[error("production {production} out of range (grammar has {production_count} productions)")]
    OutOfRangeProduction {
        production: ProdID,
        production_count: usize,
    },

    /// Two different non-error actions were supplied for one ACTION cell.
    #[error("conflict in state {state} on {terminal}: {first} vs {second}")]
    Conflict {
        state: StateID,
        terminal: Symbol,
        first: Action,
        second: Action,
    },

    #[error("conflicting GOTO in state {state} on {nonterminal}: {first} vs {second}")]
    GotoConflict {
        state: StateID,
        nonterminal: Symbol,
        first: StateID,
        second: StateID,
    },

    /// A cell names a symbol the grammar does not declare with the right kind.
    #[error("state {state}: {symbol:?} is not a symbol of the required kind in this grammar")]
    UnknownSymbol { state: StateID, symbol: Symbol },

    #[error("state {state}: the end-of-input marker cannot be shifted")]
    ShiftOnEndOfInput { state: StateID },

    #[error("state {state}: accept is only valid on end of input, found on {terminal}")]
    MisplacedAccept { state: StateID, terminal: Symbol },

    /// `ACTION[0][$] = Accept` for a grammar whose start symbol requires input.
    #[error("state 0 accepts empty input, but the start symbol is not nullable")]
    DegenerateAccept,

    #[error("undefined GOTO for state {state} on {nonterminal}")]
    UndefinedGoto { state: StateID, nonterminal: Symbol },
}

/// Faults that abort a parse. Syntax errors are not among them.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Table(#[from] TableError),

    /// The driver's shift hook failed on the token at `position`.
    #[error("shift hook failed at token {position}: {source}")]
    Shift {
        position: usize,
        source: anyhow::Error,
    },

    /// The driver's reduction hook failed for `production`.
    #[error("reduction hook failed for production {production}: {source}")]
    Reduce {
        production: ProdID,
        source: anyhow::Error,
    },

    /// The run was stepped again after an earlier step failed.
    #[error("parse halted by an earlier fault")]
    Halted,
}
