//! The shift-reduce engine.
//!
//! [`Parser`] borrows a validated [`ParseTable`] and drives a [`Run`] over a
//! token stream. A run owns its [`Configuration`] (the state and symbol
//! stacks), a value stack kept in lockstep with the symbol stack, and a
//! [`ParserDriver`] that supplies semantic values on shift and reduce.
//!
//! A syntax error is a normal outcome ([`ParseOutcome::Rejected`]);
//! [`ParseError`] is reserved for faults: an undefined GOTO cell consulted
//! or a failing driver hook.
//!
//! # Example
//! ```rust
//! # use shiftreduce::{Action, ActionCell, GotoCell, Grammar, ParseOutcome, ParseTable, Parser, Symbol};
//! // S' -> S, S -> a S | b
//! let grammar = Grammar::builder()
//!     .terminals(["a", "b"])
//!     .production(Symbol::nt("S'"), [Symbol::nt("S")])
//!     .production(Symbol::nt("S"), [Symbol::t("a"), Symbol::nt("S")])
//!     .production(Symbol::nt("S"), [Symbol::t("b")])
//!     .build()
//!     .unwrap();
//! let table = ParseTable::build(
//!     grammar,
//!     [
//!         ActionCell::new(0, Symbol::t("a"), Action::Shift(2)),
//!         ActionCell::new(0, Symbol::t("b"), Action::Shift(3)),
//!         ActionCell::new(1, Symbol::EndOfInput, Action::Accept),
//!         ActionCell::new(2, Symbol::t("a"), Action::Shift(2)),
//!         ActionCell::new(2, Symbol::t("b"), Action::Shift(3)),
//!         ActionCell::new(3, Symbol::EndOfInput, Action::Reduce(2)),
//!         ActionCell::new(4, Symbol::EndOfInput, Action::Reduce(1)),
//!     ],
//!     [
//!         GotoCell::new(0, Symbol::nt("S"), 1),
//!         GotoCell::new(2, Symbol::nt("S"), 4),
//!     ],
//! )
//! .unwrap();
//!
//! let parser = Parser::new(&table);
//! let input = [Symbol::t("a"), Symbol::t("a"), Symbol::t("b")];
//! assert!(parser.parse(input).unwrap().is_accepted());
//!
//! let outcome = parser.parse([Symbol::t("a")]).unwrap();
//! let rejection = outcome.rejection().unwrap();
//! assert_eq!(rejection.token, Symbol::EndOfInput);
//! assert_eq!(rejection.position, 1);
//! ```

use crate::{Action, ParseError, ParseTable, ProdID, Production, StateID, Symbol, TableError};
use std::fmt::{self, Debug};
use std::marker::PhantomData;

static END_OF_INPUT: Symbol = Symbol::EndOfInput;

/// An input token: anything that can name its terminal symbol.
pub trait Token: Debug {
    fn symbol(&self) -> &Symbol;
}

impl Token for Symbol {
    #[inline]
    fn symbol(&self) -> &Symbol {
        self
    }
}

/// Semantic hooks invoked by the engine.
///
/// `shift` turns a consumed token into a value; `reduce` receives the values
/// of the popped right-hand side, left to right, and returns the value
/// carried for the left-hand side. Neither hook can touch the stacks.
pub trait ParserDriver {
    type Token: Token;
    type Value;

    fn shift(&mut self, token: Self::Token) -> anyhow::Result<Self::Value>;

    fn reduce(
        &mut self,
        prod_id: ProdID,
        production: &Production,
        values: Vec<Self::Value>,
    ) -> anyhow::Result<Self::Value>;
}

/// The driver used by [`Parser::parse`]: values are the symbols themselves,
/// so an accepted parse yields the start symbol.
pub struct Recognizer<T> {
    _marker: PhantomData<fn(T)>,
}

impl<T> Recognizer<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Recognizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> ParserDriver for Recognizer<T> {
    type Token = T;
    type Value = Symbol;

    fn shift(&mut self, token: T) -> anyhow::Result<Symbol> {
        Ok(token.symbol().clone())
    }

    fn reduce(&mut self, _: ProdID, production: &Production, _: Vec<Symbol>) -> anyhow::Result<Symbol> {
        Ok(production.lhs().clone())
    }
}

/// The paired state and symbol stacks.
///
/// `states.len() == symbols.len() + 1` holds at every observation point and
/// `states[0]` is the initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub states: Vec<StateID>,
    pub symbols: Vec<Symbol>,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            states: vec![0],
            symbols: Vec::new(),
        }
    }

    /// The state on top of the state stack.
    #[inline]
    pub fn state(&self) -> StateID {
        self.states[self.states.len() - 1]
    }

    /// Number of symbols on the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.symbols.len()
    }

    fn push(&mut self, symbol: Symbol, state: StateID) {
        self.symbols.push(symbol);
        self.states.push(state);
    }

    /// Pops the top `k` entries from both stacks. The caller guarantees
    /// `k <= depth()`.
    fn pop(&mut self, k: usize) {
        let at = self.symbols.len() - k;
        self.symbols.truncate(at);
        self.states.truncate(at + 1);
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `states | symbols`, each space separated.
impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let states: Vec<_> = self.states.iter().map(|s| s.to_string()).collect();
        let symbols: Vec<_> = self.symbols.iter().map(|s| s.to_string()).collect();
        write!(f, "{} | {}", states.join(" "), symbols.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The input is not in the language: no action for this token here.
    UnexpectedToken,
    /// A reduction would pop the bottom state; the table and grammar
    /// disagree.
    StackUnderflow,
}

/// Where and why a parse was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectReason,
    /// State on top of the stack when the run stopped.
    pub state: StateID,
    /// The lookahead symbol, `$` at end of input.
    pub token: Symbol,
    /// 0-based index of the lookahead in the input.
    pub position: usize,
    /// Terminals with an action in `state`.
    pub expected: Vec<Symbol>,
    pub configuration: Configuration,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectReason::UnexpectedToken => write!(
                f,
                "unexpected {} at token {} in state {}",
                self.token, self.position, self.state
            )?,
            RejectReason::StackUnderflow => write!(
                f,
                "stack underflow in state {} at token {}",
                self.state, self.position
            )?,
        }
        if !self.expected.is_empty() {
            let expected: Vec<_> = self.expected.iter().map(|s| s.to_string()).collect();
            write!(f, " (expected {})", expected.join(", "))?;
        }
        Ok(())
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<V> {
    /// The input was accepted. Holds the value of the start symbol; `None`
    /// only when a table accepts empty input without reducing anything.
    Accepted(Option<V>),
    Rejected(Rejection),
}

impl<V> ParseOutcome<V> {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, ParseOutcome::Accepted(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ParseOutcome::Rejected(r) => Some(r),
            ParseOutcome::Accepted(_) => None,
        }
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            ParseOutcome::Accepted(v) => v.as_ref(),
            ParseOutcome::Rejected(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Option<V>, Rejection> {
        match self {
            ParseOutcome::Accepted(v) => Ok(v),
            ParseOutcome::Rejected(r) => Err(r),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Tokens pulled from the input (the end marker is not counted).
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
    pub steps: usize,
}

/// The engine front end. Cheap to copy; any number of runs may share one
/// table, including from different threads.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    table: &'t ParseTable,
}

impl<'t> Parser<'t> {
    pub fn new(table: &'t ParseTable) -> Self {
        Self { table }
    }

    #[inline]
    pub fn table(&self) -> &'t ParseTable {
        self.table
    }

    /// Recognizes `input`. On acceptance the value is the start symbol.
    pub fn parse<I>(&self, input: I) -> Result<ParseOutcome<Symbol>, ParseError>
    where
        I: IntoIterator,
        I::Item: Token,
    {
        self.parse_with(input, Recognizer::new())
    }

    /// Parses `input`, threading semantic values through `driver`.
    pub fn parse_with<I, D>(&self, input: I, driver: D) -> Result<ParseOutcome<D::Value>, ParseError>
    where
        I: IntoIterator<Item = D::Token>,
        D: ParserDriver,
    {
        self.run(input, driver).finish()
    }

    /// Starts a run that the caller advances with [`Run::step`].
    pub fn run<I, D>(&self, input: I, driver: D) -> Run<'t, I::IntoIter, D>
    where
        I: IntoIterator<Item = D::Token>,
        D: ParserDriver,
    {
        Run::new(self.table, input.into_iter(), driver)
    }
}

enum Lookahead<T> {
    Token(T),
    End,
}

/// One parse in progress.
pub struct Run<'t, I, D>
where
    D: ParserDriver,
{
    table: &'t ParseTable,
    input: I,
    driver: D,
    lookahead: Option<Lookahead<D::Token>>,
    position: usize,
    config: Configuration,
    values: Vec<D::Value>,
    outcome: Option<ParseOutcome<D::Value>>,
    faulted: bool,
    stats: ParserStats,
}

impl<'t, I, D> Run<'t, I, D>
where
    I: Iterator<Item = D::Token>,
    D: ParserDriver,
{
    fn new(table: &'t ParseTable, input: I, driver: D) -> Self {
        Self {
            table,
            input,
            driver,
            lookahead: None,
            position: 0,
            config: Configuration::new(),
            values: Vec::new(),
            outcome: None,
            faulted: false,
            stats: ParserStats::default(),
        }
    }

    #[inline]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Number of tokens shifted so far, which is also the input index of
    /// the lookahead.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn stats(&self) -> ParserStats {
        self.stats.clone()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.outcome.is_none() && !self.faulted
    }

    /// True once a step has returned an error. The state and symbol stacks
    /// are left as they were before that step.
    #[inline]
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    pub fn outcome(&self) -> Option<&ParseOutcome<D::Value>> {
        self.outcome.as_ref()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Pulls the next token unless a lookahead is already buffered. An
    /// explicit `$` token ends the input; nothing after it is read.
    fn fill_lookahead(&mut self) {
        if self.lookahead.is_some() {
            return;
        }
        let next = match self.input.next() {
            Some(token) if *token.symbol() != Symbol::EndOfInput => {
                self.stats.tokens += 1;
                Lookahead::Token(token)
            }
            _ => Lookahead::End,
        };
        self.lookahead = Some(next);
    }

    fn lookahead_symbol(&self) -> &Symbol {
        match &self.lookahead {
            Some(Lookahead::Token(token)) => token.symbol(),
            Some(Lookahead::End) | None => &END_OF_INPUT,
        }
    }

    fn reject(&mut self, reason: RejectReason) {
        let state = self.config.state();
        let token = self.lookahead_symbol().clone();
        log::trace!("Reject {:?} on {} in state {}", reason, token, state);
        self.outcome = Some(ParseOutcome::Rejected(Rejection {
            reason,
            state,
            token,
            position: self.position,
            expected: self.table.expected(state),
            configuration: self.config.clone(),
        }));
    }

    fn fault(&mut self, err: ParseError) -> ParseError {
        log::trace!("Fault: {}", err);
        self.faulted = true;
        err
    }

    /// Performs one step and returns the action taken, or `None` if the
    /// run has already finished.
    ///
    /// After a step fails, every later step returns [`ParseError::Halted`].
    pub fn step(&mut self) -> Result<Option<Action>, ParseError> {
        if self.faulted {
            return Err(ParseError::Halted);
        }
        if self.outcome.is_some() {
            return Ok(None);
        }
        self.fill_lookahead();
        if log::log_enabled!(log::Level::Trace) {
            self.dump_state();
        }

        let table = self.table;
        let state = self.config.state();
        let action = table.action(state, self.lookahead_symbol());
        self.stats.steps += 1;

        match action {
            Action::Shift(next) => {
                log::trace!("Shift {}", next);
                let token = match self.lookahead.take() {
                    Some(Lookahead::Token(token)) => token,
                    other => {
                        self.lookahead = other;
                        return Err(self.fault(TableError::ShiftOnEndOfInput { state }.into()));
                    }
                };
                let symbol = token.symbol().clone();
                let value = match self.driver.shift(token) {
                    Ok(value) => value,
                    Err(source) => {
                        return Err(self.fault(ParseError::Shift {
                            position: self.position,
                            source,
                        }));
                    }
                };
                self.config.push(symbol, next);
                self.values.push(value);
                self.position += 1;
                self.stats.shifts += 1;
            }

            Action::Reduce(prod_id) => {
                let production = &table.grammar().productions()[prod_id];
                log::trace!("Reduce {}: {}", prod_id, production);
                let k = production.len();
                if k > self.config.depth() {
                    self.reject(RejectReason::StackUnderflow);
                    return Ok(Some(action));
                }
                // The state left on top once the handle is popped.
                let exposed = self.config.states[self.config.depth() - k];
                let target = match table.goto(exposed, production.lhs()) {
                    Ok(target) => target,
                    Err(err) => return Err(self.fault(err.into())),
                };
                let popped = self.values.split_off(self.values.len() - k);
                let value = match self.driver.reduce(prod_id, production, popped) {
                    Ok(value) => value,
                    Err(source) => {
                        return Err(self.fault(ParseError::Reduce {
                            production: prod_id,
                            source,
                        }));
                    }
                };
                self.config.pop(k);
                self.config.push(production.lhs().clone(), target);
                self.values.push(value);
                self.stats.reductions += 1;
            }

            Action::Accept => {
                log::trace!("Accept");
                let value = self.values.pop();
                self.outcome = Some(ParseOutcome::Accepted(value));
            }

            Action::Error => {
                self.reject(RejectReason::UnexpectedToken);
            }
        }

        Ok(Some(action))
    }

    /// Steps until the run finishes and returns its outcome.
    pub fn finish(mut self) -> Result<ParseOutcome<D::Value>, ParseError> {
        loop {
            if let Some(outcome) = self.outcome.take() {
                log::debug!("parse finished: {:?}", self.stats);
                return Ok(outcome);
            }
            self.step()?;
        }
    }

    /// Logs the stacks as `<state> symbol` pairs, with the lookahead
    /// marked by `<-`.
    fn dump_state(&self) {
        let mut output = String::new();
        for (i, state) in self.config.states.iter().enumerate() {
            let symbol = match self.config.symbols.get(i) {
                Some(symbol) => symbol,
                None => self.lookahead_symbol(),
            };
            output.push_str(&format!(
                "<{}>  {}{}  ",
                state,
                if i == self.config.depth() { "<-  " } else { "" },
                symbol,
            ));
        }
        log::trace!("{}", output);
    }
}
