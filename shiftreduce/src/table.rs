//! ACTION and GOTO tables.
//!
//! A [`ParseTable`] is built from a [`Grammar`] and two sparse cell lists,
//! the output format of an offline SLR table builder. Every cell is checked
//! against the grammar and the state range before the table is returned;
//! afterwards the engine trusts it completely.
//!
//! Cells are stored densely, one row per state and one column per terminal
//! (or non-terminal for GOTO), with columns in grammar declaration order.

use crate::{Grammar, Symbol, TableError};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Automaton state index. State 0 is the initial state.
pub type StateID = usize;

/// Production index into [`Grammar::productions`].
pub type ProdID = usize;

/// The content of one ACTION cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    Shift(StateID),
    Reduce(ProdID),
    Accept,
    /// No action; also what an unmapped cell reads as.
    #[default]
    Error,
}

impl Action {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Action::Error)
    }
}

/// Renders the textbook notation: `S5`, `R2`, `acc`, `error`.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(s) => write!(f, "S{}", s),
            Action::Reduce(p) => write!(f, "R{}", p),
            Action::Accept => f.write_str("acc"),
            Action::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid action {0:?}: expected S<n>, R<n>, acc, error or an empty cell")]
pub struct ParseActionError(pub String);

/// Parses the textbook notation. Case-insensitive; an empty (or blank)
/// cell parses as [`Action::Error`].
impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cell = s.trim();
        let bad = || ParseActionError(s.to_owned());
        if cell.is_empty() || cell.eq_ignore_ascii_case("error") {
            return Ok(Action::Error);
        }
        if cell.eq_ignore_ascii_case("acc") || cell.eq_ignore_ascii_case("accept") {
            return Ok(Action::Accept);
        }
        let mut chars = cell.chars();
        let kind = chars.next();
        let digits = chars.as_str();
        if !digits.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(bad());
        }
        let num: usize = digits.parse().map_err(|_| bad())?;
        match kind {
            Some('S' | 's') => Ok(Action::Shift(num)),
            Some('R' | 'r') => Ok(Action::Reduce(num)),
            _ => Err(bad()),
        }
    }
}

/// One sparse ACTION entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCell {
    pub state: StateID,
    pub terminal: Symbol,
    pub action: Action,
}

impl ActionCell {
    pub fn new(state: StateID, terminal: Symbol, action: Action) -> Self {
        Self {
            state,
            terminal,
            action,
        }
    }
}

/// One sparse GOTO entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoCell {
    pub state: StateID,
    pub nonterminal: Symbol,
    pub target: StateID,
}

impl GotoCell {
    pub fn new(state: StateID, nonterminal: Symbol, target: StateID) -> Self {
        Self {
            state,
            nonterminal,
            target,
        }
    }
}

/// A validated, immutable ACTION/GOTO table bound to its grammar.
#[derive(Debug, Clone)]
pub struct ParseTable {
    grammar: Arc<Grammar>,
    state_count: usize,
    actions: Vec<Vec<Action>>,
    gotos: Vec<Vec<Option<StateID>>>,
}

impl ParseTable {
    /// Builds a table whose state count is one past the highest state that
    /// owns a cell (at least 1).
    ///
    /// Every state other than 0 must own a cell, so a state numbered past
    /// the cell count is reported as [`TableError::OutOfRangeState`].
    pub fn build(
        grammar: impl Into<Arc<Grammar>>,
        action_cells: impl IntoIterator<Item = ActionCell>,
        goto_cells: impl IntoIterator<Item = GotoCell>,
    ) -> Result<Self, TableError> {
        let action_cells: Vec<_> = action_cells.into_iter().collect();
        let goto_cells: Vec<_> = goto_cells.into_iter().collect();
        let cell_count = action_cells.len() + goto_cells.len();
        let mut state_count = 1;
        for state in action_cells
            .iter()
            .map(|c| c.state)
            .chain(goto_cells.iter().map(|c| c.state))
        {
            if state > cell_count {
                return Err(TableError::OutOfRangeState {
                    state,
                    state_count: cell_count + 1,
                });
            }
            state_count = state_count.max(state + 1);
        }
        Self::build_with_states(grammar, state_count, action_cells, goto_cells)
    }

    /// Builds a table with an explicit number of states.
    ///
    /// Cell states and shift or GOTO targets are range-checked before any
    /// row is allocated.
    pub fn build_with_states(
        grammar: impl Into<Arc<Grammar>>,
        state_count: usize,
        action_cells: impl IntoIterator<Item = ActionCell>,
        goto_cells: impl IntoIterator<Item = GotoCell>,
    ) -> Result<Self, TableError> {
        let grammar = grammar.into();
        let state_count = state_count.max(1);
        let action_cells: Vec<_> = action_cells.into_iter().collect();
        let goto_cells: Vec<_> = goto_cells.into_iter().collect();
        let n_terms = grammar.terminals().len();
        let n_nonterms = grammar.nonterminals().len();
        let n_prods = grammar.productions().len();

        let check_state = |state: StateID| {
            if state < state_count {
                Ok(())
            } else {
                Err(TableError::OutOfRangeState { state, state_count })
            }
        };

        for cell in &action_cells {
            check_state(cell.state)?;
            if let Action::Shift(target) = cell.action {
                check_state(target)?;
            }
        }
        for cell in &goto_cells {
            check_state(cell.state)?;
            check_state(cell.target)?;
        }

        let mut actions = vec![vec![Action::Error; n_terms]; state_count];
        let mut filled = 0;
        for ActionCell {
            state,
            terminal,
            action,
        } in action_cells
        {
            let Some(col) = grammar.terminal_index(&terminal) else {
                return Err(TableError::UnknownSymbol {
                    state,
                    symbol: terminal,
                });
            };
            match action {
                Action::Error => continue,
                Action::Shift(_) if terminal == Symbol::EndOfInput => {
                    return Err(TableError::ShiftOnEndOfInput { state });
                }
                Action::Shift(_) => {}
                Action::Reduce(production) if production >= n_prods => {
                    return Err(TableError::OutOfRangeProduction {
                        production,
                        production_count: n_prods,
                    });
                }
                Action::Reduce(_) => {}
                Action::Accept if terminal != Symbol::EndOfInput => {
                    return Err(TableError::MisplacedAccept { state, terminal });
                }
                Action::Accept => {}
            }
            let cell = &mut actions[state][col];
            if cell.is_error() {
                *cell = action;
                filled += 1;
            } else if *cell != action {
                return Err(TableError::Conflict {
                    state,
                    terminal,
                    first: *cell,
                    second: action,
                });
            }
        }

        let mut gotos = vec![vec![None; n_nonterms]; state_count];
        for GotoCell {
            state,
            nonterminal,
            target,
        } in goto_cells
        {
            let Some(col) = grammar.nonterminal_index(&nonterminal) else {
                return Err(TableError::UnknownSymbol {
                    state,
                    symbol: nonterminal,
                });
            };
            let current = gotos[state][col];
            match current {
                None => gotos[state][col] = Some(target),
                Some(first) if first != target => {
                    return Err(TableError::GotoConflict {
                        state,
                        nonterminal,
                        first,
                        second: target,
                    });
                }
                Some(_) => {}
            }
        }

        let accepts_empty = grammar
            .terminal_index(&Symbol::EndOfInput)
            .is_some_and(|eoi| actions[0][eoi] == Action::Accept);
        if accepts_empty && !grammar.is_nullable(grammar.start_symbol()) {
            return Err(TableError::DegenerateAccept);
        }

        log::debug!(
            "built parse table: {} states, {} action cells, {} goto cells",
            state_count,
            filled,
            gotos.iter().flatten().filter(|g| g.is_some()).count()
        );

        Ok(Self {
            grammar,
            state_count,
            actions,
            gotos,
        })
    }

    #[inline]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Looks up `ACTION[state][terminal]`. Unmapped cells, unknown
    /// terminals and out-of-range states all read as [`Action::Error`].
    #[inline]
    pub fn action(&self, state: StateID, terminal: &Symbol) -> Action {
        let Some(col) = self.grammar.terminal_index(terminal) else {
            return Action::Error;
        };
        self.actions
            .get(state)
            .map_or(Action::Error, |row| row[col])
    }

    /// Looks up `GOTO[state][nonterminal]`.
    ///
    /// A validated table never reaches an undefined cell while parsing
    /// grammar-conformant input; [`TableError::UndefinedGoto`] means the
    /// table and grammar disagree.
    #[inline]
    pub fn goto(&self, state: StateID, nonterminal: &Symbol) -> Result<StateID, TableError> {
        self.grammar
            .nonterminal_index(nonterminal)
            .and_then(|col| self.gotos.get(state).and_then(|row| row[col]))
            .ok_or_else(|| TableError::UndefinedGoto {
                state,
                nonterminal: nonterminal.clone(),
            })
    }

    /// Terminals with a non-error action in `state`, in column order.
    pub fn expected(&self, state: StateID) -> Vec<Symbol> {
        let Some(row) = self.actions.get(state) else {
            return Vec::new();
        };
        row.iter()
            .enumerate()
            .filter(|(_, a)| !a.is_error())
            .filter_map(|(col, _)| self.grammar.terminal_at(col).cloned())
            .collect()
    }
}

/// Renders the table as a grid: one row per state, ACTION columns then
/// GOTO columns (the augmented start symbol has no GOTO column).
impl fmt::Display for ParseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let augmented = self.grammar.augmented_start();
        let goto_cols: Vec<_> = self
            .grammar
            .nonterminals()
            .enumerate()
            .filter(|(_, nt)| *nt != augmented)
            .collect();

        write!(f, "{:>5} |", "state")?;
        for t in self.grammar.terminals() {
            write!(f, " {:>5}", t)?;
        }
        write!(f, " |")?;
        for (_, nt) in &goto_cols {
            write!(f, " {:>3}", nt)?;
        }
        writeln!(f)?;

        for (state, row) in self.actions.iter().enumerate() {
            write!(f, "{:>5} |", state)?;
            for action in row {
                match action {
                    Action::Error => write!(f, " {:>5}", "")?,
                    a => write!(f, " {:>5}", a.to_string())?,
                }
            }
            write!(f, " |")?;
            for (col, _) in &goto_cols {
                match self.gotos[state][*col] {
                    Some(target) => write!(f, " {:>3}", target)?,
                    None => write!(f, " {:>3}", "")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_grammar::{expr_action_cells, expr_goto_cells, expr_grammar, expr_table};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn t(name: &str) -> Symbol {
        Symbol::t(name)
    }

    fn nt(name: &str) -> Symbol {
        Symbol::nt(name)
    }

    #[test]
    fn expression_table_builds() {
        init_logger();
        let table = expr_table();
        assert_eq!(table.state_count(), 12);
        assert_eq!(table.action(0, &t("id")), Action::Shift(5));
        assert_eq!(table.action(2, &t("*")), Action::Shift(7));
        assert_eq!(table.action(2, &t("+")), Action::Reduce(2));
        assert_eq!(table.action(1, &Symbol::EndOfInput), Action::Accept);
        assert_eq!(table.goto(0, &nt("E")), Ok(1));
        assert_eq!(table.goto(7, &nt("F")), Ok(10));
    }

    #[test]
    fn unmapped_lookups_read_as_error() {
        let table = expr_table();
        assert_eq!(table.action(0, &Symbol::EndOfInput), Action::Error);
        assert_eq!(table.action(0, &t("unknown")), Action::Error);
        assert_eq!(table.action(0, &nt("E")), Action::Error);
        assert_eq!(table.action(0, &Symbol::Error), Action::Error);
        assert_eq!(table.action(99, &t("id")), Action::Error);
    }

    #[test]
    fn undefined_goto_is_reported_when_consulted() {
        let table = expr_table();
        assert_eq!(
            table.goto(1, &nt("E")),
            Err(TableError::UndefinedGoto {
                state: 1,
                nonterminal: nt("E")
            })
        );
        assert!(table.goto(0, &t("id")).is_err());
        assert!(table.goto(42, &nt("T")).is_err());
    }

    #[test]
    fn conflicting_cells_are_rejected() {
        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(9, t("*"), Action::Reduce(1)));
        let err = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap_err();
        assert_eq!(
            err,
            TableError::Conflict {
                state: 9,
                terminal: t("*"),
                first: Action::Shift(7),
                second: Action::Reduce(1),
            }
        );
    }

    #[test]
    fn identical_duplicates_and_error_cells_are_harmless() {
        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(0, t("id"), Action::Shift(5)));
        cells.push(ActionCell::new(0, t("+"), Action::Error));
        cells.push(ActionCell::new(0, t("id"), Action::Error));
        let table = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap();
        assert_eq!(table.action(0, &t("id")), Action::Shift(5));
        assert_eq!(table.action(0, &t("+")), Action::Error);
    }

    #[test]
    fn conflicting_gotos_are_rejected() {
        let mut gotos = expr_goto_cells();
        gotos.push(GotoCell::new(0, nt("E"), 8));
        let err = ParseTable::build(expr_grammar(), expr_action_cells(), gotos).unwrap_err();
        assert!(matches!(err, TableError::GotoConflict { state: 0, first: 1, second: 8, .. }));
    }

    #[test]
    fn out_of_range_states_are_rejected() {
        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(4, t(")"), Action::Shift(12)));
        let err = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap_err();
        assert_eq!(
            err,
            TableError::OutOfRangeState {
                state: 12,
                state_count: 12
            }
        );

        let err = ParseTable::build_with_states(
            expr_grammar(),
            11,
            expr_action_cells(),
            expr_goto_cells(),
        )
        .unwrap_err();
        assert!(matches!(err, TableError::OutOfRangeState { state: 11, .. }));

        let mut gotos = expr_goto_cells();
        gotos.push(GotoCell::new(8, nt("T"), 30));
        let err = ParseTable::build(expr_grammar(), expr_action_cells(), gotos).unwrap_err();
        assert!(matches!(err, TableError::OutOfRangeState { state: 30, .. }));
    }

    #[test]
    fn huge_state_numbers_fail_before_allocating() {
        init_logger();
        let mut cells = expr_action_cells();
        let cell_count = cells.len() + expr_goto_cells().len() + 1;
        cells.push(ActionCell::new(usize::MAX, t("id"), Action::Shift(5)));
        let err = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap_err();
        assert_eq!(
            err,
            TableError::OutOfRangeState {
                state: usize::MAX,
                state_count: cell_count + 1
            }
        );

        let mut gotos = expr_goto_cells();
        gotos.push(GotoCell::new(1 << 40, nt("E"), 1));
        let err = ParseTable::build(expr_grammar(), expr_action_cells(), gotos).unwrap_err();
        assert!(matches!(err, TableError::OutOfRangeState { state, .. } if state == 1 << 40));

        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(4, t(")"), Action::Shift(usize::MAX)));
        let err = ParseTable::build_with_states(expr_grammar(), 12, cells, expr_goto_cells())
            .unwrap_err();
        assert_eq!(
            err,
            TableError::OutOfRangeState {
                state: usize::MAX,
                state_count: 12
            }
        );
    }

    #[test]
    fn out_of_range_production_is_rejected() {
        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(8, Symbol::EndOfInput, Action::Reduce(7)));
        let err = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap_err();
        assert_eq!(
            err,
            TableError::OutOfRangeProduction {
                production: 7,
                production_count: 7
            }
        );
    }

    #[test]
    fn cells_must_name_grammar_symbols_of_the_right_kind() {
        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(0, t("-"), Action::Shift(4)));
        let err = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap_err();
        assert_eq!(
            err,
            TableError::UnknownSymbol {
                state: 0,
                symbol: t("-")
            }
        );

        let mut gotos = expr_goto_cells();
        gotos.push(GotoCell::new(0, t("id"), 5));
        let err = ParseTable::build(expr_grammar(), expr_action_cells(), gotos).unwrap_err();
        assert!(matches!(err, TableError::UnknownSymbol { state: 0, .. }));
    }

    #[test]
    fn end_marker_cannot_be_shifted_and_accept_needs_it() {
        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(8, Symbol::EndOfInput, Action::Shift(11)));
        let err = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap_err();
        assert_eq!(err, TableError::ShiftOnEndOfInput { state: 8 });

        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(1, t(")"), Action::Accept));
        let err = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap_err();
        assert_eq!(
            err,
            TableError::MisplacedAccept {
                state: 1,
                terminal: t(")")
            }
        );
    }

    #[test]
    fn accepting_empty_input_requires_a_nullable_start() {
        let mut cells = expr_action_cells();
        cells.push(ActionCell::new(0, Symbol::EndOfInput, Action::Accept));
        let err = ParseTable::build(expr_grammar(), cells, expr_goto_cells()).unwrap_err();
        assert_eq!(err, TableError::DegenerateAccept);

        let nullable = Grammar::builder()
            .terminal("a")
            .production(nt("S'"), [nt("S")])
            .production(nt("S"), [t("a")])
            .production(nt("S"), [])
            .build()
            .unwrap();
        let table = ParseTable::build(
            nullable,
            [ActionCell::new(0, Symbol::EndOfInput, Action::Accept)],
            [],
        )
        .unwrap();
        assert_eq!(table.action(0, &Symbol::EndOfInput), Action::Accept);
        assert_eq!(table.state_count(), 1);
    }

    #[test]
    fn expected_lists_live_columns() {
        let table = expr_table();
        assert_eq!(table.expected(0), vec![t("id"), t("(")]);
        assert_eq!(table.expected(1), vec![t("+"), Symbol::EndOfInput]);
        assert_eq!(
            table.expected(9),
            vec![t("+"), t("*"), t(")"), Symbol::EndOfInput]
        );
        assert!(table.expected(100).is_empty());
    }

    #[test]
    fn action_notation_parses_and_prints() {
        assert_eq!("S5".parse(), Ok(Action::Shift(5)));
        assert_eq!("r6".parse(), Ok(Action::Reduce(6)));
        assert_eq!("acc".parse(), Ok(Action::Accept));
        assert_eq!("".parse(), Ok(Action::Error));
        assert_eq!("  ".parse(), Ok(Action::Error));
        assert!("X1".parse::<Action>().is_err());
        assert!("S".parse::<Action>().is_err());
        assert!("Sx".parse::<Action>().is_err());
        assert!("S+5".parse::<Action>().is_err());
        assert!("R+2".parse::<Action>().is_err());
        assert!("S 5".parse::<Action>().is_err());
        assert!("R-1".parse::<Action>().is_err());
        assert_eq!(" S05 ".parse(), Ok(Action::Shift(5)));
        assert_eq!(Action::Shift(11).to_string(), "S11");
        assert_eq!(Action::Reduce(3).to_string(), "R3");
        assert_eq!(Action::Accept.to_string(), "acc");
        assert_eq!(Action::Error.to_string(), "error");
    }

    #[test]
    fn display_renders_a_grid() {
        let text = expr_table().to_string();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("state |"));
        assert!(header.contains("id"));
        assert!(header.ends_with("  E   T   F"));
        let row0 = lines.next().unwrap();
        assert!(row0.contains("S5"));
        assert!(row0.contains("S4"));
        assert_eq!(text.lines().count(), 13);
    }
}
