//! The grammar model: productions plus the derived terminal and
//! non-terminal sets.
//!
//! A [`Grammar`] is assembled with a [`GrammarBuilder`] and frozen by
//! [`GrammarBuilder::build`]. Production 0 is always the augmented start
//! production `S' -> S`. Terminals and non-terminals are interned in
//! declaration order, which gives each one a stable dense index used as a
//! column by [`ParseTable`](crate::ParseTable). The end-of-input marker is
//! always the last terminal.
//!
//! # Example
//! ```rust
//! # use shiftreduce::{Grammar, Symbol};
//! let grammar = Grammar::builder()
//!     .terminals(["a", "b"])
//!     .production(Symbol::nt("S'"), [Symbol::nt("S")])
//!     .production(Symbol::nt("S"), [Symbol::t("a"), Symbol::nt("S"), Symbol::t("b")])
//!     .production(Symbol::nt("S"), [])
//!     .build()
//!     .unwrap();
//! assert_eq!(grammar.start_symbol(), &Symbol::nt("S"));
//! assert!(grammar.is_nullable(&Symbol::nt("S")));
//! assert!(grammar.is_terminal(&Symbol::EndOfInput));
//! ```

use crate::{GrammarError, ProdID, Symbol};
use indexmap::IndexSet;
use std::fmt;

/// A single production `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, rhs: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            lhs,
            rhs: rhs.into_iter().collect(),
        }
    }

    #[inline]
    pub fn lhs(&self) -> &Symbol {
        &self.lhs
    }

    #[inline]
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    /// Number of right-hand side symbols, i.e. how many stack entries a
    /// reduction by this production pops.
    #[inline]
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    /// Is this an ε-production?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} →", self.lhs)?;
        if self.rhs.is_empty() {
            return f.write_str(" ε");
        }
        for sym in &self.rhs {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

/// Collects terminals and productions; [`build`](GrammarBuilder::build)
/// validates them and produces an immutable [`Grammar`].
#[derive(Debug, Default, Clone)]
pub struct GrammarBuilder {
    terminals: IndexSet<Symbol>,
    productions: Vec<Production>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a terminal. Declaring the same name twice is harmless.
    pub fn terminal(mut self, name: impl AsRef<str>) -> Self {
        self.terminals.insert(Symbol::t(name));
        self
    }

    pub fn terminals<S: AsRef<str>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.terminals.extend(names.into_iter().map(Symbol::t));
        self
    }

    /// Appends a production. The first production appended is the
    /// augmented start production.
    pub fn production(mut self, lhs: Symbol, rhs: impl IntoIterator<Item = Symbol>) -> Self {
        self.productions.push(Production::new(lhs, rhs));
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        let GrammarBuilder {
            mut terminals,
            productions,
        } = self;

        if productions.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        let mut nonterminals = IndexSet::new();
        for (i, prod) in productions.iter().enumerate() {
            match prod.lhs() {
                Symbol::NonTerminal(_) => {
                    nonterminals.insert(prod.lhs().clone());
                }
                sym @ (Symbol::EndOfInput | Symbol::Error) => {
                    return Err(GrammarError::ReservedSymbol {
                        symbol: sym.clone(),
                        production: i,
                    });
                }
                sym @ Symbol::Terminal(_) => {
                    return Err(GrammarError::TerminalOnLhs {
                        symbol: sym.clone(),
                        production: i,
                    });
                }
            }
        }

        let start = &productions[0];
        let [Symbol::NonTerminal(_)] = start.rhs() else {
            return Err(GrammarError::NoStartProduction);
        };
        let augmented = start.lhs();

        for (i, prod) in productions.iter().enumerate() {
            if i > 0 && prod.lhs() == augmented {
                return Err(GrammarError::StartSymbolReused {
                    symbol: augmented.clone(),
                    production: i,
                });
            }
            for sym in prod.rhs() {
                if sym == augmented {
                    return Err(GrammarError::StartSymbolReused {
                        symbol: augmented.clone(),
                        production: i,
                    });
                }
                let declared = match sym {
                    Symbol::Terminal(_) => terminals.contains(sym),
                    Symbol::NonTerminal(_) => nonterminals.contains(sym),
                    Symbol::EndOfInput | Symbol::Error => {
                        return Err(GrammarError::ReservedSymbol {
                            symbol: sym.clone(),
                            production: i,
                        });
                    }
                };
                if !declared {
                    return Err(GrammarError::UndeclaredSymbol {
                        symbol: sym.clone(),
                        production: i,
                    });
                }
            }
        }

        terminals.insert(Symbol::EndOfInput);
        let nullable = compute_nullable(&productions, &nonterminals);

        log::debug!(
            "built grammar: {} productions, {} terminals, {} non-terminals",
            productions.len(),
            terminals.len(),
            nonterminals.len()
        );

        Ok(Grammar {
            productions,
            terminals,
            nonterminals,
            nullable,
        })
    }
}

/// Fixpoint over the productions: a non-terminal is nullable if some
/// production for it has only nullable non-terminals on its right.
fn compute_nullable(productions: &[Production], nonterminals: &IndexSet<Symbol>) -> Vec<bool> {
    let mut nullable = vec![false; nonterminals.len()];
    let mut changed = true;
    while changed {
        changed = false;
        for prod in productions {
            let Some(lhs) = nonterminals.get_index_of(prod.lhs()) else {
                continue;
            };
            if nullable[lhs] {
                continue;
            }
            let all_nullable = prod.rhs().iter().all(|sym| {
                nonterminals
                    .get_index_of(sym)
                    .is_some_and(|i| nullable[i])
            });
            if all_nullable {
                nullable[lhs] = true;
                changed = true;
            }
        }
    }
    nullable
}

/// An immutable, validated grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    terminals: IndexSet<Symbol>,
    nonterminals: IndexSet<Symbol>,
    nullable: Vec<bool>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// Builds a grammar from declared terminal names and productions in
    /// order; the first production is the augmented start production.
    pub fn build<S: AsRef<str>>(
        terminals: impl IntoIterator<Item = S>,
        productions: impl IntoIterator<Item = Production>,
    ) -> Result<Self, GrammarError> {
        let mut builder = GrammarBuilder::new().terminals(terminals);
        builder.productions.extend(productions);
        builder.build()
    }

    /// Is `sym` a terminal of this grammar? `EndOfInput` always is.
    #[inline]
    pub fn is_terminal(&self, sym: &Symbol) -> bool {
        self.terminals.contains(sym)
    }

    #[inline]
    pub fn is_nonterminal(&self, sym: &Symbol) -> bool {
        self.nonterminals.contains(sym)
    }

    /// Does `sym` derive the empty string? Always `false` for terminals.
    pub fn is_nullable(&self, sym: &Symbol) -> bool {
        self.nonterminals
            .get_index_of(sym)
            .is_some_and(|i| self.nullable[i])
    }

    #[inline]
    pub fn production(&self, index: ProdID) -> Option<&Production> {
        self.productions.get(index)
    }

    #[inline]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// The user start symbol `S`, i.e. the right-hand side of `S' -> S`.
    pub fn start_symbol(&self) -> &Symbol {
        &self.productions[0].rhs()[0]
    }

    /// The augmented start symbol `S'`.
    pub fn augmented_start(&self) -> &Symbol {
        self.productions[0].lhs()
    }

    /// Terminals in declaration order, `$` last.
    pub fn terminals(&self) -> impl ExactSizeIterator<Item = &Symbol> {
        self.terminals.iter()
    }

    /// Non-terminals in order of their first production.
    pub fn nonterminals(&self) -> impl ExactSizeIterator<Item = &Symbol> {
        self.nonterminals.iter()
    }

    #[inline]
    pub fn terminal_index(&self, sym: &Symbol) -> Option<usize> {
        self.terminals.get_index_of(sym)
    }

    #[inline]
    pub fn nonterminal_index(&self, sym: &Symbol) -> Option<usize> {
        self.nonterminals.get_index_of(sym)
    }

    pub(crate) fn terminal_at(&self, index: usize) -> Option<&Symbol> {
        self.terminals.get_index(index)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, prod) in self.productions.iter().enumerate() {
            writeln!(f, "{}: {}", i, prod)?;
        }
        Ok(())
    }
}
