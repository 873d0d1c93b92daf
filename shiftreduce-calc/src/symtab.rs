//! # symtab
//!
//! A minimal, flat symbol table built on [`indexmap::IndexMap`].
//!
//! The scanner interns every identifier it meets, so each name gets a stable
//! index that its tokens carry. Bindings are optional: an interned name has
//! no value until one is [`set`](SymTab::set) or [`bind`](SymTab::bind)-ed.
//!
//! ## Example
//! ```rust
//! # use shiftreduce_calc::SymTab;
//! let mut st = SymTab::new();
//! let i = st.intern("foo"); // inserts "foo" at index 0
//! assert_eq!(st.get(i).unwrap(), None);
//! st.set(i, 42).unwrap();
//! assert_eq!(st.get(i).unwrap(), Some(42));
//! assert_eq!(st.intern("foo"), i); // same index, not reinserted
//! ```

use indexmap::{IndexMap, map::Entry};
use smartstring::alias::String;
use thiserror::Error;

/// Errors that can occur when operating on a [`SymTab`].
#[derive(Debug, Error)]
pub enum SymTabError {
    /// Attempted to access an invalid index (out of bounds).
    #[error("invalid symbol index {index} (table length {len})")]
    InvalidIndex {
        /// The index that was requested.
        index: usize,
        /// The number of entries currently in the table.
        len: usize,
    },
}

/// A symbol table that maps identifier names to optional integer values.
///
/// Each inserted name receives a stable index corresponding to its insertion
/// order. Re-inserting the same name returns the existing index.
#[derive(Debug, Default)]
pub struct SymTab {
    tab: IndexMap<String, Option<i64>>,
}

impl SymTab {
    /// Creates a new, empty symbol table.
    pub fn new() -> Self {
        Self {
            tab: IndexMap::new(),
        }
    }

    /// Returns the number of interned names, bound or not.
    pub fn len(&self) -> usize {
        self.tab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tab.is_empty()
    }

    /// Inserts the given name if it doesn't exist and returns its index.
    ///
    /// If the name already exists, this returns the existing index
    /// without modifying its binding.
    pub fn intern(&mut self, name: impl AsRef<str>) -> usize {
        match self.tab.entry(String::from(name.as_ref())) {
            Entry::Occupied(o) => o.index(),
            Entry::Vacant(v) => {
                let o = v.insert_entry(None);
                o.index()
            }
        }
    }

    /// Interns `name` and binds it to `value`, replacing any earlier binding.
    ///
    /// ```
    /// # use shiftreduce_calc::SymTab;
    /// let mut st = SymTab::new();
    /// let x = st.bind("x", 3);
    /// st.bind("x", 4);
    /// assert_eq!(st.get(x).unwrap(), Some(4));
    /// assert_eq!(st.len(), 1);
    /// ```
    pub fn bind(&mut self, name: impl AsRef<str>, value: i64) -> usize {
        let index = self.intern(name);
        if let Some((_, slot)) = self.tab.get_index_mut(index) {
            *slot = Some(value);
        }
        index
    }

    /// Updates the value at the given index.
    ///
    /// Returns [`Err`] if the index is out of bounds.
    pub fn set(&mut self, index: usize, new_value: i64) -> Result<(), SymTabError> {
        let n = self.tab.len();
        let (_, value) = self
            .tab
            .get_index_mut(index)
            .ok_or(SymTabError::InvalidIndex { index, len: n })?;
        *value = Some(new_value);
        Ok(())
    }

    /// Returns the binding at the given index, `None` if the name is unbound.
    ///
    /// Returns [`Err`] if the index is out of bounds.
    pub fn get(&self, index: usize) -> Result<Option<i64>, SymTabError> {
        let (_, value) = self.tab.get_index(index).ok_or(SymTabError::InvalidIndex {
            index,
            len: self.tab.len(),
        })?;
        Ok(*value)
    }

    /// Returns the name interned at the given index.
    pub fn name(&self, index: usize) -> Result<&str, SymTabError> {
        let (name, _) = self.tab.get_index(index).ok_or(SymTabError::InvalidIndex {
            index,
            len: self.tab.len(),
        })?;
        Ok(name.as_str())
    }

    /// Iterates over `(name, binding)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<i64>)> {
        self.tab.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_empty() {
        let st = SymTab::new();
        assert_eq!(st.len(), 0);
        assert!(st.is_empty());
    }

    #[test]
    fn intern_assigns_sequential_indices() {
        let mut st = SymTab::new();
        let a = st.intern("a");
        let b = st.intern("b");
        let c = st.intern("c");
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(st.len(), 3);
        assert_eq!(st.name(b).unwrap(), "b");
    }

    #[test]
    fn re_intern_returns_same_index_and_preserves_value() {
        let mut st = SymTab::new();
        let i = st.intern("x");
        st.set(i, 42).unwrap();

        let j = st.intern("x");
        assert_eq!(i, j);
        assert_eq!(st.get(i).unwrap(), Some(42));
    }

    #[test]
    fn interned_names_start_unbound() {
        let mut st = SymTab::new();
        let i = st.intern("y");
        assert_eq!(st.get(i).unwrap(), None);
        st.bind("y", -7);
        assert_eq!(st.get(i).unwrap(), Some(-7));
    }

    #[test]
    fn get_invalid_index_errors() {
        let mut st = SymTab::new();
        let _ = st.intern("only_one");
        match st.get(5) {
            Err(SymTabError::InvalidIndex { index, len }) => {
                assert_eq!(index, 5);
                assert_eq!(len, 1);
            }
            other => panic!("expected InvalidIndex, got {:?}", other),
        }
        assert!(st.name(5).is_err());
    }

    #[test]
    fn set_invalid_index_errors() {
        let mut st = SymTab::new();
        let _ = st.intern("z");
        let err = st.set(999, 1).unwrap_err();
        let SymTabError::InvalidIndex { index, len } = err;
        assert_eq!(index, 999);
        assert_eq!(len, 1);
    }

    #[test]
    fn iter_preserves_insertion_order() {
        let mut st = SymTab::new();
        st.bind("b", 2);
        st.intern("a");
        let entries: Vec<_> = st.iter().collect();
        assert_eq!(entries, [("b", Some(2)), ("a", None)]);
    }
}
