//! Grammar symbols.
//!
//! A [`Symbol`] is either a named terminal, a named non-terminal, or one of
//! the two distinguished terminals: [`Symbol::EndOfInput`] (the `$` end
//! marker) and [`Symbol::Error`]. Symbols compare by kind and name, so a
//! terminal and a non-terminal may share a name without colliding.

use smartstring::alias::String;
use std::fmt;

/// The kind of a [`Symbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// A terminal or non-terminal grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// An input-alphabet symbol.
    Terminal(String),
    /// A symbol defined by one or more productions.
    NonTerminal(String),
    /// The end-of-input marker, rendered as `$`.
    EndOfInput,
    /// The error terminal. Never produced by the engine as input.
    Error,
}

impl Symbol {
    /// Creates a named terminal.
    #[inline]
    pub fn t(name: impl AsRef<str>) -> Self {
        Symbol::Terminal(String::from(name.as_ref()))
    }

    /// Creates a named non-terminal.
    #[inline]
    pub fn nt(name: impl AsRef<str>) -> Self {
        Symbol::NonTerminal(String::from(name.as_ref()))
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::NonTerminal(_) => SymbolKind::NonTerminal,
            Symbol::Terminal(_) | Symbol::EndOfInput | Symbol::Error => SymbolKind::Terminal,
        }
    }

    /// Returns `true` for named terminals and for the two distinguished
    /// terminals.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.kind() == SymbolKind::Terminal
    }

    #[inline]
    pub fn is_nonterminal(&self) -> bool {
        self.kind() == SymbolKind::NonTerminal
    }

    /// Returns `true` for [`Symbol::EndOfInput`] and [`Symbol::Error`].
    #[inline]
    pub fn is_reserved(&self) -> bool {
        matches!(self, Symbol::EndOfInput | Symbol::Error)
    }

    /// The symbol's display name: its own name for named symbols, `$` for
    /// the end marker and `error` for the error terminal.
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name.as_str(),
            Symbol::EndOfInput => "$",
            Symbol::Error => "error",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
