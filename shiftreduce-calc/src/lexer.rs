//! # Calculator Scanner
//!
//! [`CalcLexer`] turns source text into [`CalcToken`]s. Whitespace separates
//! tokens but is otherwise ignored. The token classes are:
//!
//! - identifiers `[A-Za-z_][A-Za-z0-9_]*`, interned into the [`SymTab`],
//! - decimal integer literals,
//! - the single-character operators `+`, `*`, `(` and `)`.
//!
//! Identifiers and literals are both read as the terminal `id`. Any other
//! character is an [`CalcError::UnknownToken`].
use crate::{CalcError, CalcToken, SymTab, TokenValue};
use std::iter::Peekable;
use std::str::CharIndices;

/// A scanner over a borrowed input string.
///
/// Yields `Result<CalcToken, CalcError>`; after the first error it yields
/// nothing more.
///
/// # Example
/// ```rust
/// # use shiftreduce_calc::{CalcLexer, SymTab, TokenValue};
/// let mut symtab = SymTab::new();
/// let tokens: Vec<_> = CalcLexer::new("x * 10", &mut symtab)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[2].value, TokenValue::Number(10));
/// assert_eq!(symtab.len(), 1);
/// ```
pub struct CalcLexer<'a, 's> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    symtab: &'s mut SymTab,
    column: usize,
    failed: bool,
}

impl<'a, 's> CalcLexer<'a, 's> {
    pub fn new(input: &'a str, symtab: &'s mut SymTab) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            symtab,
            column: 0,
            failed: false,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if next.is_some() {
            self.column += 1;
        }
        next
    }

    /// Consumes characters while `pred` holds; returns the end byte offset.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        while let Some(&(offset, c)) = self.chars.peek() {
            if !pred(c) {
                return offset;
            }
            self.bump();
        }
        self.input.len()
    }

    fn scan(&mut self) -> Option<Result<CalcToken, CalcError>> {
        self.eat_while(char::is_whitespace);
        let (start, c) = self.bump()?;
        let column = self.column;
        let token = match c {
            '+' | '*' | '(' | ')' => {
                let mut buf = [0; 4];
                CalcToken::punct(c.encode_utf8(&mut buf), column)
            }
            c if c.is_ascii_digit() => {
                let end = self.eat_while(|c| c.is_ascii_digit());
                match self.input[start..end].parse::<i64>() {
                    Ok(n) => CalcToken::id(TokenValue::Number(n), column),
                    Err(err) => return Some(Err(err.into())),
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
                let index = self.symtab.intern(&self.input[start..end]);
                CalcToken::id(TokenValue::Ident(index), column)
            }
            c => {
                let mut buf = [0; 4];
                return Some(Err(CalcError::UnknownToken {
                    text: c.encode_utf8(&mut buf).into(),
                    column,
                }));
            }
        };
        log::trace!("token {} at column {}: {:?}", token.symbol, column, token.value);
        Some(Ok(token))
    }
}

impl Iterator for CalcLexer<'_, '_> {
    type Item = Result<CalcToken, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.scan();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

/// Scans all of `input`, stopping at the first error.
pub fn tokenize(input: &str, symtab: &mut SymTab) -> Result<Vec<CalcToken>, CalcError> {
    CalcLexer::new(input, symtab).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftreduce::Symbol;

    fn symbols(tokens: &[CalcToken]) -> Vec<String> {
        tokens.iter().map(|t| t.symbol.to_string()).collect()
    }

    #[test]
    fn scans_operators_identifiers_and_numbers() {
        let mut symtab = SymTab::new();
        let tokens = tokenize("(a+42)*a_1", &mut symtab).unwrap();
        assert_eq!(symbols(&tokens), ["(", "id", "+", "id", ")", "*", "id"]);
        assert_eq!(tokens[1].value, TokenValue::Ident(0));
        assert_eq!(tokens[3].value, TokenValue::Number(42));
        assert_eq!(tokens[6].value, TokenValue::Ident(1));
        assert_eq!(symtab.name(1).unwrap(), "a_1");
    }

    #[test]
    fn records_one_based_columns() {
        let mut symtab = SymTab::new();
        let tokens = tokenize("  id +  id", &mut symtab).unwrap();
        let columns: Vec<_> = tokens.iter().map(|t| t.column).collect();
        assert_eq!(columns, [3, 6, 9]);
    }

    #[test]
    fn repeated_identifiers_share_an_index() {
        let mut symtab = SymTab::new();
        let tokens = tokenize("id + id * id", &mut symtab).unwrap();
        assert_eq!(symtab.len(), 1);
        assert!(
            tokens
                .iter()
                .filter(|t| t.symbol == Symbol::t("id"))
                .all(|t| t.value == TokenValue::Ident(0))
        );
    }

    #[test]
    fn unknown_character_stops_the_scan() {
        let mut symtab = SymTab::new();
        let mut lexer = CalcLexer::new("id - id", &mut symtab);
        assert!(lexer.next().unwrap().is_ok());
        match lexer.next() {
            Some(Err(CalcError::UnknownToken { text, column })) => {
                assert_eq!(text.as_str(), "-");
                assert_eq!(column, 4);
            }
            other => panic!("expected UnknownToken, got {other:?}"),
        }
        assert!(lexer.next().is_none());
    }

    #[test]
    fn oversized_literal_is_a_parse_int_error() {
        let mut symtab = SymTab::new();
        let err = tokenize("99999999999999999999", &mut symtab).unwrap_err();
        assert!(matches!(err, CalcError::ParseInt(_)));
    }

    #[test]
    fn blank_input_has_no_tokens() {
        let mut symtab = SymTab::new();
        assert!(tokenize(" \t\n", &mut symtab).unwrap().is_empty());
    }
}
