//! # Calculator Tokens
//!
//! [`CalcToken`] is the token type the scanner produces and the automaton
//! consumes. It pairs the grammar terminal the automaton sees with a
//! [`TokenValue`] payload that only the evaluator looks at: identifiers and
//! integer literals are both the terminal `id`, told apart by their payload.
use shiftreduce::{Symbol, Token};

/// The payload carried by a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValue {
    /// No associated data (operators and parentheses).
    None,

    /// Identifier token with an index into the symbol table.
    Ident(usize),

    /// Integer literal token.
    Number(i64),
}

/// A concrete lexical token for the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcToken {
    /// The terminal this token is read as.
    pub symbol: Symbol,
    pub value: TokenValue,
    /// 1-based column of the token's first character.
    pub column: usize,
}

impl CalcToken {
    /// A token without payload, such as `+` or `(`.
    pub fn punct(name: &str, column: usize) -> Self {
        Self {
            symbol: Symbol::t(name),
            value: TokenValue::None,
            column,
        }
    }

    /// An `id` token carrying `value`.
    pub fn id(value: TokenValue, column: usize) -> Self {
        Self {
            symbol: Symbol::t("id"),
            value,
            column,
        }
    }
}

impl Token for CalcToken {
    fn symbol(&self) -> &Symbol {
        &self.symbol
    }
}
