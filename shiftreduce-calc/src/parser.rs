//! # Calculator Parser
//!
//! This module couples the expression table from [`crate::grammar`] with
//! calculator-specific semantic actions. It exposes:
//!
//! - [`CalcParserDriver`]: semantic hooks that evaluate the expression while
//!   the automaton reduces it,
//! - [`CalcParser`]: owns the table and runs the scan–parse pipeline for
//!   checking, tracing and evaluating input.
//!
//! ## Behavior highlights
//! - Operator precedence and associativity come from the grammar itself, so
//!   the driver never resolves conflicts: `*` binds tighter than `+` and both
//!   associate to the left.
//! - Arithmetic is checked; a sum or product that overflows `i64` fails with
//!   [`CalcError::Overflow`].
//! - Identifiers evaluate to their [`SymTab`] binding, or fail with
//!   [`CalcError::Unbound`].

use crate::grammar::{expr_table, prod};
use crate::lexer::tokenize;
use crate::{CalcError, CalcToken, SymTab, TokenValue};
use shiftreduce::{ParseOutcome, ParseTable, Parser, ParserDriver, Production, ProdID, Snapshot, Symbol};

/// A driver that evaluates expressions during reduction.
///
/// Terminal values: an `id` token evaluates to its literal or binding;
/// operators and parentheses evaluate to `0` and are discarded by the
/// reductions that consume them.
pub struct CalcParserDriver<'s> {
    symtab: &'s SymTab,
}

impl<'s> CalcParserDriver<'s> {
    pub fn new(symtab: &'s SymTab) -> Self {
        Self { symtab }
    }

    fn lookup(&self, index: usize) -> Result<i64, CalcError> {
        match self.symtab.get(index)? {
            Some(value) => Ok(value),
            None => Err(CalcError::Unbound(self.symtab.name(index)?.into())),
        }
    }
}

impl ParserDriver for CalcParserDriver<'_> {
    type Token = CalcToken;
    type Value = i64;

    fn shift(&mut self, token: CalcToken) -> anyhow::Result<i64> {
        let value = match token.value {
            TokenValue::None => 0,
            TokenValue::Number(n) => n,
            TokenValue::Ident(index) => self.lookup(index)?,
        };
        Ok(value)
    }

    fn reduce(
        &mut self,
        prod_id: ProdID,
        production: &Production,
        values: Vec<i64>,
    ) -> anyhow::Result<i64> {
        let value = match prod_id {
            prod::SUM => {
                // E -> E + T
                values[0].checked_add(values[2]).ok_or(CalcError::Overflow)?
            }
            prod::PRODUCT => {
                // T -> T * F
                values[0].checked_mul(values[2]).ok_or(CalcError::Overflow)?
            }
            prod::PAREN => {
                // F -> ( E )
                values[1]
            }
            prod::TERM | prod::FACTOR | prod::ID => values[0],
            prod::START => anyhow::bail!("the start production is accepted, not reduced"),
            _ => anyhow::bail!("no semantic action for {production}"),
        };
        log::trace!("{production} => {value}");
        Ok(value)
    }
}

/// A completed trace: one snapshot per step plus the final outcome.
#[derive(Debug, Clone)]
pub struct CalcTrace {
    pub rows: Vec<Snapshot>,
    pub outcome: ParseOutcome<Symbol>,
}

/// The calculator front end. Owns the validated expression table; each
/// operation scans its input afresh and runs a new parse over the shared
/// table.
///
/// # Example
///
/// ```rust
/// use shiftreduce_calc::{CalcParser, SymTab};
///
/// let parser = CalcParser::try_new().unwrap();
/// let mut symtab = SymTab::new();
/// symtab.bind("x", 4);
/// assert_eq!(parser.eval("2 + 3 * x", &mut symtab).unwrap(), 14);
/// assert!(!parser.check("2 +").unwrap().is_accepted());
/// ```
#[derive(Debug)]
pub struct CalcParser {
    table: ParseTable,
}

impl CalcParser {
    pub fn try_new() -> Result<Self, CalcError> {
        Ok(Self {
            table: expr_table()?,
        })
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Recognizes `input` without evaluating it.
    pub fn check(&self, input: &str) -> Result<ParseOutcome<Symbol>, CalcError> {
        let mut symtab = SymTab::new();
        let tokens = tokenize(input, &mut symtab)?;
        Ok(Parser::new(&self.table).parse(tokens)?)
    }

    /// Recognizes `input`, recording every step.
    pub fn trace(&self, input: &str) -> Result<CalcTrace, CalcError> {
        let mut symtab = SymTab::new();
        let tokens = tokenize(input, &mut symtab)?;
        let (rows, outcome) = Parser::new(&self.table).trace(tokens).finish()?;
        Ok(CalcTrace { rows, outcome })
    }

    /// Evaluates `input`. Identifiers it mentions are interned into
    /// `symtab` and must be bound there.
    pub fn eval(&self, input: &str, symtab: &mut SymTab) -> Result<i64, CalcError> {
        let tokens = tokenize(input, symtab)?;
        let driver = CalcParserDriver::new(symtab);
        let mut run = Parser::new(&self.table).run(tokens, driver);
        while run.step()?.is_some() {}
        let stats = run.stats();
        log::debug!(
            "evaluated {:?}: {} tokens, {} shifts, {} reductions",
            input,
            stats.tokens,
            stats.shifts,
            stats.reductions
        );
        let outcome = run.finish()?;
        match outcome.into_result() {
            Ok(Some(value)) => Ok(value),
            // Only a table accepting the empty input gets here.
            Ok(None) => Err(CalcError::Hook(anyhow::anyhow!("accepted without a value"))),
            Err(rejection) => Err(CalcError::Syntax(rejection)),
        }
    }
}
