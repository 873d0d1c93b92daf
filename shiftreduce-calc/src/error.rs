//! # Calculator Error Type
//!
//! [`CalcError`] is the single error surface of the calculator. It covers
//! scanning (unknown characters, oversized literals), evaluation (unbound
//! identifiers, overflow), syntax errors reported by the automaton, and the
//! table-construction errors that can only arise if the built-in table is
//! edited into an inconsistent state.
//!
//! Conversions from the underlying error types are derived with `#[from]`,
//! so `?` works at call sites that return `Result<T, CalcError>`.
use crate::SymTabError;
use shiftreduce::{GrammarError, ParseActionError, ParseError, Rejection, TableError};
use smartstring::alias::String;
use thiserror::Error;

/// Represents all possible errors that can occur within the calculator.
///
/// # Examples
/// Propagating a literal that does not fit in an `i64`:
/// ```rust
/// # use shiftreduce_calc::CalcError;
/// # fn demo(s: &str) -> Result<i64, CalcError> {
/// let n: i64 = s.parse()?; // ParseIntError -> CalcError via #[from]
/// # Ok(n) }
/// assert!(matches!(demo("99999999999999999999"), Err(CalcError::ParseInt(_))));
/// ```
#[derive(Debug, Error)]
pub enum CalcError {
    /// The scanner met a character that starts no token.
    #[error("unknown token {text:?} at column {column}")]
    UnknownToken { text: String, column: usize },

    /// An integer literal could not be parsed from its string representation.
    #[error("unable to parse {0:?}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// An identifier was evaluated without a binding.
    #[error("unbound identifier {0:?}")]
    Unbound(String),

    /// A sum or product left the range of `i64`.
    #[error("arithmetic overflow")]
    Overflow,

    /// The automaton rejected the input.
    #[error("syntax error: {0}")]
    Syntax(Rejection),

    /// A symbol-table operation failed.
    #[error("symtab error {0:?}")]
    SymTab(#[from] SymTabError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Action(#[from] ParseActionError),

    /// A semantic hook failed with an error that is not a [`CalcError`].
    #[error("semantic hook failed: {0}")]
    Hook(anyhow::Error),

    /// The parse was stepped after an earlier failure.
    #[error("evaluation halted by an earlier error")]
    Halted,
}

/// Unwraps calculator errors raised inside the driver hooks, so that an
/// unbound identifier surfaces as [`CalcError::Unbound`] rather than as a
/// generic hook failure.
impl From<ParseError> for CalcError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Table(err) => CalcError::Table(err),
            ParseError::Shift { source, .. } | ParseError::Reduce { source, .. } => {
                match source.downcast::<CalcError>() {
                    Ok(err) => err,
                    Err(source) => CalcError::Hook(source),
                }
            }
            ParseError::Halted => CalcError::Halted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftreduce::Symbol;

    fn _assert_error_trait_obj(e: &dyn std::error::Error) -> &dyn std::error::Error {
        e
    }

    #[test]
    fn parse_int_maps_to_calc_error() {
        let res: Result<i64, CalcError> = "notanumber".parse::<i64>().map_err(CalcError::from);
        let err = res.unwrap_err();
        assert!(matches!(err, CalcError::ParseInt(_)));
        let _ = _assert_error_trait_obj(&err);
        assert!(err.to_string().contains("unable to parse"));
    }

    #[test]
    fn symtab_error_maps_to_calc_error() {
        let underlying = SymTabError::InvalidIndex { index: 10, len: 3 };
        let err: CalcError = underlying.into();
        assert!(matches!(err, CalcError::SymTab(_)));
        assert!(err.to_string().contains("symtab error"));
    }

    #[test]
    fn hook_errors_are_unwrapped() {
        let err = ParseError::Shift {
            position: 0,
            source: CalcError::Unbound("x".into()).into(),
        };
        assert!(matches!(CalcError::from(err), CalcError::Unbound(name) if name.as_str() == "x"));

        let err = ParseError::Reduce {
            production: 1,
            source: CalcError::Overflow.into(),
        };
        assert!(matches!(CalcError::from(err), CalcError::Overflow));

        let err = ParseError::Reduce {
            production: 1,
            source: anyhow::anyhow!("boom"),
        };
        let err = CalcError::from(err);
        assert!(matches!(err, CalcError::Hook(_)));
        assert_eq!(err.to_string(), "semantic hook failed: boom");
    }

    #[test]
    fn table_faults_stay_table_errors() {
        let err = ParseError::Table(TableError::UndefinedGoto {
            state: 3,
            nonterminal: Symbol::nt("E"),
        });
        let err = CalcError::from(err);
        assert!(matches!(err, CalcError::Table(_)));
        assert_eq!(err.to_string(), "undefined GOTO for state 3 on E");
    }

    #[test]
    fn halted_parse_maps_to_halted() {
        let err = CalcError::from(ParseError::Halted);
        assert!(matches!(err, CalcError::Halted));
        assert_eq!(err.to_string(), "evaluation halted by an earlier error");
    }

    #[test]
    fn unknown_token_message() {
        let err = CalcError::UnknownToken {
            text: "-".into(),
            column: 4,
        };
        assert_eq!(err.to_string(), "unknown token \"-\" at column 4");
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn calc_error_is_send_sync_static() {
        _assert_send_sync_static::<CalcError>();
    }
}
