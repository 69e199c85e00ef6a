//! Interactive filter collection workflows
//!
//! The operations backing the multi-select filter dialog: regrouping a
//! selection of queries into standalone AND-ed elements or into one
//! OR-group, toggling tag negation, and structural deduplication.
//!
//! Deduplication judges two top-level elements equal when the *sets* of
//! their leaf renderings match, regardless of order: `a OR b` and `b OR a`
//! collapse to one element.

use super::types::{SearchFilters, Selectable};
use crate::query::{FilterExpression, FilterQuery, TagQuery};
use std::collections::BTreeSet;

/// Order-independent identity of an expression, used for deduplication
fn expression_key(expr: &FilterExpression) -> BTreeSet<String> {
    expr.queries().iter().map(FilterQuery::rendered).collect()
}

/// The selected payloads of a row set
fn selected_queries(rows: &[Selectable<FilterQuery>]) -> Vec<FilterQuery> {
    rows.iter()
        .filter(|row| row.selected)
        .map(|row| row.data.clone())
        .collect()
}

impl SearchFilters {
    /// Deduplicate the collection.
    ///
    /// Within each OR-group, duplicate entries are pruned to unique entries
    /// preserving last-occurrence order; a group left with one entry
    /// collapses to a plain query. Then top-level elements with equal query
    /// sets are collapsed to the first occurrence.
    pub fn dedupe(&mut self) {
        for index in (0..self.len()).rev() {
            self.prune_group_at(index);
        }

        let mut seen: Vec<BTreeSet<String>> = Vec::new();
        self.items_mut().retain(|expr| {
            let key = expression_key(expr);
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        });
    }

    /// Prune duplicate entries inside the OR-group at `index`, keeping the
    /// last occurrence of each, then restore the singleton invariant
    fn prune_group_at(&mut self, index: usize) {
        if let Some(FilterExpression::OrExpression(queries)) = self.items_mut().get_mut(index) {
            let mut kept: Vec<FilterQuery> = Vec::with_capacity(queries.len());
            for query in queries.drain(..).rev() {
                if !kept.contains(&query) {
                    kept.push(query);
                }
            }
            kept.reverse();
            *queries = kept;
        }
        self.normalize_at(index);
    }

    /// Re-insert each selected query as its own standalone element, so the
    /// selection becomes AND-combined. With `remove_sources`, the selected
    /// queries are first removed from the elements they were pulled from.
    /// Finishes with a deduplication pass.
    pub fn split_into_queries(
        &mut self,
        rows: &[Selectable<FilterQuery>],
        remove_sources: bool,
    ) {
        let selected = selected_queries(rows);
        if selected.is_empty() {
            return;
        }

        if remove_sources {
            self.remove_queries(&selected);
        }
        for query in selected {
            self.append_filter(query);
        }
        self.dedupe();
    }

    /// Collect all selected queries into one new OR-group element. With
    /// `remove_sources`, the selected queries are first removed from the
    /// elements they were pulled from. Finishes with a deduplication pass.
    pub fn group_into_or(&mut self, rows: &[Selectable<FilterQuery>], remove_sources: bool) {
        let selected = selected_queries(rows);
        if selected.is_empty() {
            return;
        }

        if remove_sources {
            self.remove_queries(&selected);
        }
        if let Some(expr) = FilterExpression::from_queries(selected) {
            self.push_expression(expr);
        }
        self.dedupe();
    }

    /// Remove every leaf occurrence of the given queries. Elements emptied
    /// by the removal are dropped; singleton OR-groups collapse.
    fn remove_queries(&mut self, queries: &[FilterQuery]) {
        for index in (0..self.len()).rev() {
            let element = &mut self.items_mut()[index];
            match element {
                FilterExpression::Query(query) => {
                    if queries.contains(query) {
                        self.items_mut().remove(index);
                    }
                }
                FilterExpression::OrExpression(entries) => {
                    entries.retain(|entry| !queries.contains(entry));
                    self.normalize_at(index);
                }
            }
        }
    }

    /// Flip `negate` on every leaf tag query matching one of `targets`.
    /// A pure field flip: no elements are added, removed, or regrouped.
    pub fn toggle_negation(&mut self, targets: &[TagQuery]) {
        for element in self.items_mut() {
            match element {
                FilterExpression::Query(FilterQuery::Tag(tag)) => {
                    if targets.contains(tag) {
                        tag.negate = !tag.negate;
                    }
                }
                FilterExpression::OrExpression(entries) => {
                    for entry in entries {
                        if let FilterQuery::Tag(tag) = entry {
                            if targets.contains(tag) {
                                tag.negate = !tag.negate;
                            }
                        }
                    }
                }
                FilterExpression::Query(FilterQuery::Property(_)) => {}
            }
        }
    }
}
