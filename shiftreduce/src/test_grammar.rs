// Test fixture: the classic expression grammar and its SLR(1) table.
//
//   0: E' -> E
//   1: E  -> E + T
//   2: E  -> T
//   3: T  -> T * F
//   4: T  -> F
//   5: F  -> ( E )
//   6: F  -> id

use crate::{Action, ActionCell, Grammar, GotoCell, ParseTable, Symbol};

pub const TERMINALS: [&str; 5] = ["id", "+", "*", "(", ")"];

//             id     +      *      (      )      $
const ACTIONS: [[&str; 6]; 12] = [
    ["S5", "", "", "S4", "", ""],       // 0
    ["", "S6", "", "", "", "acc"],      // 1
    ["", "R2", "S7", "", "R2", "R2"],   // 2
    ["", "R4", "R4", "", "R4", "R4"],   // 3
    ["S5", "", "", "S4", "", ""],       // 4
    ["", "R6", "R6", "", "R6", "R6"],   // 5
    ["S5", "", "", "S4", "", ""],       // 6
    ["S5", "", "", "S4", "", ""],       // 7
    ["", "S6", "", "", "S11", ""],      // 8
    ["", "R1", "S7", "", "R1", "R1"],   // 9
    ["", "R3", "R3", "", "R3", "R3"],   // 10
    ["", "R5", "R5", "", "R5", "R5"],   // 11
];

//                 E   T   F
const GOTOS: [(usize, [Option<usize>; 3]); 4] = [
    (0, [Some(1), Some(2), Some(3)]),
    (4, [Some(8), Some(2), Some(3)]),
    (6, [None, Some(9), Some(3)]),
    (7, [None, None, Some(10)]),
];

pub fn terminal(name: &str) -> Symbol {
    match name {
        "$" => Symbol::EndOfInput,
        _ => Symbol::t(name),
    }
}

/// Splits `text` on whitespace into terminals; `$` maps to the end marker.
pub fn tokens(text: &str) -> Vec<Symbol> {
    text.split_whitespace().map(terminal).collect()
}

pub fn expr_grammar() -> Grammar {
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
        .unwrap()
}

pub fn expr_action_cells() -> Vec<ActionCell> {
    let columns: Vec<Symbol> = TERMINALS
        .iter()
        .map(|name| Symbol::t(name))
        .chain(std::iter::once(Symbol::EndOfInput))
        .collect();
    let mut cells = Vec::new();
    for (state, row) in ACTIONS.iter().enumerate() {
        for (col, text) in row.iter().enumerate() {
            let action: Action = text.parse().unwrap();
            if !action.is_error() {
                cells.push(ActionCell::new(state, columns[col].clone(), action));
            }
        }
    }
    cells
}

pub fn expr_goto_cells() -> Vec<GotoCell> {
    let columns = [Symbol::nt("E"), Symbol::nt("T"), Symbol::nt("F")];
    let mut cells = Vec::new();
    for (state, row) in GOTOS {
        for (col, target) in row.into_iter().enumerate() {
            if let Some(target) = target {
                cells.push(GotoCell::new(state, columns[col].clone(), target));
            }
        }
    }
    cells
}

pub fn expr_table() -> ParseTable {
    ParseTable::build(expr_grammar(), expr_action_cells(), expr_goto_cells()).unwrap()
}
