//! # Expression Grammar
//!
//! The calculator's grammar and its hand-computed SLR(1) table:
//!
//! ```text
//! 0: E' → E
//! 1: E  → E + T
//! 2: E  → T
//! 3: T  → T * F
//! 4: T  → F
//! 5: F  → ( E )
//! 6: F  → id
//! ```
//!
//! The ACTION part is written in textbook notation and parsed with
//! [`Action::from_str`](std::str::FromStr), so the grid below reads the same
//! as the table printed by `shiftreduce-calc table`.
use crate::CalcError;
use shiftreduce::{
    Action, ActionCell, GotoCell, Grammar, GrammarError, ParseTable, StateID, Symbol,
};

/// Production indices, named after the operation they reduce.
pub mod prod {
    use shiftreduce::ProdID;

    pub const START: ProdID = 0;
    /// `E → E + T`
    pub const SUM: ProdID = 1;
    /// `E → T`
    pub const TERM: ProdID = 2;
    /// `T → T * F`
    pub const PRODUCT: ProdID = 3;
    /// `T → F`
    pub const FACTOR: ProdID = 4;
    /// `F → ( E )`
    pub const PAREN: ProdID = 5;
    /// `F → id`
    pub const ID: ProdID = 6;
}

pub const TERMINALS: [&str; 5] = ["id", "+", "*", "(", ")"];

pub const STATE_COUNT: usize = 12;

//                             id     +      *      (      )      $
const ACTIONS: [[&str; 6]; STATE_COUNT] = [
    ["S5", "", "", "S4", "", ""],     // 0
    ["", "S6", "", "", "", "acc"],    // 1
    ["", "R2", "S7", "", "R2", "R2"], // 2
    ["", "R4", "R4", "", "R4", "R4"], // 3
    ["S5", "", "", "S4", "", ""],     // 4
    ["", "R6", "R6", "", "R6", "R6"], // 5
    ["S5", "", "", "S4", "", ""],     // 6
    ["S5", "", "", "S4", "", ""],     // 7
    ["", "S6", "", "", "S11", ""],    // 8
    ["", "R1", "S7", "", "R1", "R1"], // 9
    ["", "R3", "R3", "", "R3", "R3"], // 10
    ["", "R5", "R5", "", "R5", "R5"], // 11
];

//                               E        T        F
static GOTOS: [(StateID, [Option<StateID>; 3]); 4] = [
    (0, [Some(1), Some(2), Some(3)]),
    (4, [Some(8), Some(2), Some(3)]),
    (6, [None, Some(9), Some(3)]),
    (7, [None, None, Some(10)]),
];

static NONTERMINALS: [&str; 3] = ["E", "T", "F"];

/// Builds the expression grammar.
pub fn expr_grammar() -> Result<Grammar, GrammarError> {
    let e = || Symbol::nt("E");
    let t = || Symbol::nt("T");
    let f = || Symbol::nt("F");
    Grammar::builder()
        .terminals(TERMINALS)
        .production(Symbol::nt("E'"), [e()])
        .production(e(), [e(), Symbol::t("+"), t()])
        .production(e(), [t()])
        .production(t(), [t(), Symbol::t("*"), f()])
        .production(t(), [f()])
        .production(f(), [Symbol::t("("), e(), Symbol::t(")")])
        .production(f(), [Symbol::t("id")])
        .build()
}

/// Builds the validated 12-state table for [`expr_grammar`].
pub fn expr_table() -> Result<ParseTable, CalcError> {
    let grammar = expr_grammar()?;
    let columns: Vec<Symbol> = TERMINALS
        .iter()
        .map(|name| Symbol::t(name))
        .chain(std::iter::once(Symbol::EndOfInput))
        .collect();

    let mut action_cells = Vec::new();
    for (state, row) in ACTIONS.iter().enumerate() {
        for (terminal, text) in columns.iter().zip(row) {
            let action: Action = text.parse()?;
            if !action.is_error() {
                action_cells.push(ActionCell::new(state, terminal.clone(), action));
            }
        }
    }

    let goto_cells = GOTOS.iter().flat_map(|(state, row)| {
        NONTERMINALS
            .iter()
            .zip(row)
            .filter_map(move |(name, target)| {
                target.map(|target| GotoCell::new(*state, Symbol::nt(name), target))
            })
    });

    let table = ParseTable::build_with_states(grammar, STATE_COUNT, action_cells, goto_cells)?;
    Ok(table)
}
