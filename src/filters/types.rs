//! Filter collection data structures
//!
//! This module defines the core state of one active search:
//! - `SearchFilters`: An ordered, mutable sequence of filter expressions
//! - `Selectable`: A UI-facing wrapper tracking multi-select state
//!
//! Elements of a `SearchFilters` list are AND-combined; entries inside an
//! `OrExpression` element are OR-combined. Two invariants hold across every
//! mutation:
//!
//! - **Singleton collapse**: no `OrExpression` with a single entry survives
//!   an operation; it is converted back to a plain `Query`.
//! - **Duplicate avoidance**: insertion operations skip values that are
//!   already present, judged by value equality.

use super::error::FilterError;
use crate::query::{FilterExpression, FilterQuery};
use serde::{Deserialize, Serialize};

/// The ordered, mutable collection of filter expressions representing one
/// active search.
///
/// Serializes transparently as the wire-format expression list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchFilters {
    items: Vec<FilterExpression>,
}

impl SearchFilters {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a collection from existing expressions, as-is
    #[must_use]
    pub fn from_expressions(items: Vec<FilterExpression>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the expressions in order, e.g. to hand to a search backend
    #[must_use]
    pub fn as_slice(&self) -> &[FilterExpression] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FilterExpression> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterExpression> {
        self.items.iter()
    }

    /// True if any element is value-equal to `expr`
    #[must_use]
    pub fn has_filter(&self, expr: &FilterExpression) -> bool {
        self.items.contains(expr)
    }

    /// Append an expression, skipping exact duplicates
    pub fn push_expression(&mut self, expr: FilterExpression) {
        if !self.has_filter(&expr) {
            self.items.push(expr);
        }
    }

    /// Insert a query as a standalone element at `index`, shifting later
    /// elements right. Skips exact duplicates.
    ///
    /// # Errors
    /// Returns `FilterError::IndexOutOfBounds` when `index > len`.
    pub fn insert_filter(&mut self, query: FilterQuery, index: usize) -> Result<(), FilterError> {
        if index > self.items.len() {
            return Err(FilterError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let expr = FilterExpression::Query(query);
        if !self.has_filter(&expr) {
            self.items.insert(index, expr);
        }
        Ok(())
    }

    /// Append a query as a standalone element, skipping exact duplicates
    pub fn append_filter(&mut self, query: FilterQuery) {
        self.push_expression(FilterExpression::Query(query));
    }

    /// Remove every element value-equal to `expr`
    pub fn remove_filter(&mut self, expr: &FilterExpression) {
        self.items.retain(|item| item != expr);
    }

    /// Remove exactly one element by position
    ///
    /// # Errors
    /// Returns `FilterError::IndexOutOfBounds` when `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<FilterExpression, FilterError> {
        if index >= self.items.len() {
            return Err(FilterError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Merge `query` into the element at `index`: an OR-group gains an
    /// entry, a lone query becomes a two-member OR-group. Skips entries
    /// already present in the group.
    ///
    /// # Errors
    /// Returns `FilterError::IndexOutOfBounds` when `index >= len`.
    pub fn append_subfilter(
        &mut self,
        query: FilterQuery,
        index: usize,
    ) -> Result<(), FilterError> {
        let len = self.items.len();
        let Some(element) = self.items.get_mut(index) else {
            return Err(FilterError::IndexOutOfBounds { index, len });
        };

        match element {
            FilterExpression::OrExpression(queries) => {
                if !queries.contains(&query) {
                    queries.push(query);
                }
            }
            FilterExpression::Query(existing) => {
                if *existing != query {
                    let existing = existing.clone();
                    *element = FilterExpression::OrExpression(vec![existing, query]);
                }
            }
        }
        Ok(())
    }

    /// Remove `query` from the first OR-group containing it. An emptied
    /// group drops its whole element; a group left with one entry collapses
    /// back to a plain query.
    pub fn remove_subfilter(&mut self, query: &FilterQuery) {
        let position = self.items.iter().position(|item| {
            matches!(item, FilterExpression::OrExpression(queries) if queries.contains(query))
        });

        if let Some(index) = position {
            if let FilterExpression::OrExpression(queries) = &mut self.items[index] {
                queries.retain(|entry| entry != query);
            }
            self.normalize_at(index);
        }
    }

    /// Remove the entry at `subindex` from the element at `index`. A lone
    /// `Query` element counts as a one-entry group, so `subindex` 0 removes
    /// the element itself.
    ///
    /// # Errors
    /// Returns `FilterError` when either index is out of range.
    pub fn remove_subfilter_at(
        &mut self,
        index: usize,
        subindex: usize,
    ) -> Result<(), FilterError> {
        let len = self.items.len();
        let Some(element) = self.items.get_mut(index) else {
            return Err(FilterError::IndexOutOfBounds { index, len });
        };

        match element {
            FilterExpression::OrExpression(queries) => {
                if subindex >= queries.len() {
                    return Err(FilterError::SubindexOutOfBounds {
                        index,
                        subindex,
                        len: queries.len(),
                    });
                }
                queries.remove(subindex);
            }
            FilterExpression::Query(_) => {
                if subindex != 0 {
                    return Err(FilterError::SubindexOutOfBounds {
                        index,
                        subindex,
                        len: 1,
                    });
                }
                self.items.remove(index);
                return Ok(());
            }
        }

        self.normalize_at(index);
        Ok(())
    }

    /// Restore the singleton-collapse invariant for the element at `index`:
    /// a one-entry OR-group becomes a `Query`, an empty one is removed.
    pub(super) fn normalize_at(&mut self, index: usize) {
        let Some(FilterExpression::OrExpression(queries)) = self.items.get_mut(index) else {
            return;
        };

        match queries.len() {
            0 => {
                self.items.remove(index);
            }
            1 => {
                let query = queries.remove(0);
                self.items[index] = FilterExpression::Query(query);
            }
            _ => {}
        }
    }

    pub(super) fn items_mut(&mut self) -> &mut Vec<FilterExpression> {
        &mut self.items
    }
}

impl<'a> IntoIterator for &'a SearchFilters {
    type Item = &'a FilterExpression;
    type IntoIter = std::slice::Iter<'a, FilterExpression>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<FilterExpression>> for SearchFilters {
    fn from(items: Vec<FilterExpression>) -> Self {
        Self::from_expressions(items)
    }
}

/// UI-facing wrapper tracking multi-select state during interactive filter
/// editing; not part of the persisted model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectable<T> {
    pub data: T,
    pub selected: bool,
}

impl<T> Selectable<T> {
    /// Wrap a value, unselected
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            data,
            selected: false,
        }
    }

    /// Wrap a value, selected
    #[must_use]
    pub const fn selected(data: T) -> Self {
        Self {
            data,
            selected: true,
        }
    }

    pub const fn toggle(&mut self) {
        self.selected = !self.selected;
    }
}
