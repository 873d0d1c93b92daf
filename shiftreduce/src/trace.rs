//! Step-by-step parse traces.
//!
//! [`Trace`] wraps a [`Run`] and yields one [`Snapshot`] per engine step:
//! the stacks and the remaining input as they were when the step began,
//! plus the action the step took. The last snapshot carries the terminal
//! `acc` or `error` action. Building a trace copies state but never changes
//! what the engine does; each call to [`Parser::trace`] starts a new run.

use crate::parser::{Recognizer, Run};
use crate::{Action, ParseError, ParseOutcome, Parser, ParserDriver, StateID, Symbol, Token};
use std::fmt;
use std::iter::FusedIterator;

/// One row of a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub states: Vec<StateID>,
    pub symbols: Vec<Symbol>,
    /// Unconsumed input, always ending with `$`.
    pub remaining: Vec<Symbol>,
    pub action: Action,
}

/// Renders `states | symbols | remaining | action`.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(items: &[T]) -> String {
            items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }
        write!(
            f,
            "{} | {} | {} | {}",
            join(&self.states),
            join(&self.symbols),
            join(&self.remaining),
            self.action
        )
    }
}

/// An iterator of [`Snapshot`]s over a materialized input.
///
/// Yields `Err` once if the run faults, and nothing afterwards.
pub struct Trace<'t, D>
where
    D: ParserDriver,
{
    run: Run<'t, std::vec::IntoIter<D::Token>, D>,
    input: Vec<Symbol>,
}

impl<'t, D> Trace<'t, D>
where
    D: ParserDriver,
{
    fn new(parser: &Parser<'t>, tokens: Vec<D::Token>, driver: D) -> Self {
        let mut input: Vec<Symbol> = tokens
            .iter()
            .map(|token| token.symbol().clone())
            .take_while(|symbol| *symbol != Symbol::EndOfInput)
            .collect();
        input.push(Symbol::EndOfInput);
        Self {
            run: parser.run(tokens, driver),
            input,
        }
    }

    /// The outcome, once the final snapshot has been yielded.
    pub fn outcome(&self) -> Option<&ParseOutcome<D::Value>> {
        self.run.outcome()
    }

    /// Drains the remaining snapshots and returns them with the outcome.
    pub fn finish(mut self) -> Result<(Vec<Snapshot>, ParseOutcome<D::Value>), ParseError> {
        let rows = self.by_ref().collect::<Result<Vec<_>, _>>()?;
        let outcome = self.run.finish()?;
        Ok((rows, outcome))
    }

    /// The underlying run, for statistics and the driver.
    pub fn run(&self) -> &Run<'t, std::vec::IntoIter<D::Token>, D> {
        &self.run
    }
}

impl<D> Iterator for Trace<'_, D>
where
    D: ParserDriver,
{
    type Item = Result<Snapshot, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.run.is_running() {
            return None;
        }
        let config = self.run.configuration();
        let states = config.states.clone();
        let symbols = config.symbols.clone();
        let remaining = self.input[self.run.position().min(self.input.len() - 1)..].to_vec();
        match self.run.step() {
            Ok(Some(action)) => Some(Ok(Snapshot {
                states,
                symbols,
                remaining,
                action,
            })),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<D> FusedIterator for Trace<'_, D> where D: ParserDriver {}

impl<'t> Parser<'t> {
    /// Traces recognition of `input`.
    pub fn trace<I>(&self, input: I) -> Trace<'t, Recognizer<I::Item>>
    where
        I: IntoIterator,
        I::Item: Token,
    {
        self.trace_with(input, Recognizer::new())
    }

    /// Traces a parse that threads values through `driver`.
    pub fn trace_with<I, D>(&self, input: I, driver: D) -> Trace<'t, D>
    where
        I: IntoIterator<Item = D::Token>,
        D: ParserDriver,
    {
        Trace::new(self, input.into_iter().collect(), driver)
    }
}
