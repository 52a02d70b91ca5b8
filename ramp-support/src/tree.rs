//! The in-memory support tree and its node-query primitive.
//!
//! A [`SupportNode`] maps keys to child nodes. Children keep insertion order,
//! which is what makes serialized trees and projected asset maps come out in
//! the order a provider's configuration was ingested.

use std::collections::HashMap;

use crate::key::{MATCH_ALL, MATCH_ANY, key_matches_query};

/// One node of a support tree.
///
/// A node without children is a leaf: the path leading to it is supported
/// without further restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportNode {
    children: Vec<(String, SupportNode)>,
    // Position of each key in `children`.
    index: HashMap<String, usize>,
}

impl SupportNode {
    /// Creates an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Looks up a direct child by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.index.get(key).map(|&i| &self.children[i].1)
    }

    /// Returns the child stored under `key`, inserting an empty one if absent.
    pub fn child_mut(&mut self, key: &str) -> &mut Self {
        let index = self.index.get(key).copied().unwrap_or_else(|| {
            let index = self.children.len();
            self.children.push((key.to_owned(), Self::new()));
            self.index.insert(key.to_owned(), index);
            index
        });
        &mut self.children[index].1
    }

    /// Iterates over direct children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children.iter().map(|(k, node)| (k.as_str(), node))
    }

    /// Iterates over the keys of direct children in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(k, _)| k.as_str())
    }

    /// Removes all children.
    pub fn clear(&mut self) {
        self.children.clear();
        self.index.clear();
    }

    /// Counts every node below this one.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|(_, node)| 1 + node.descendant_count())
            .sum()
    }
}

/// Returns the children of `nodes` that match `query`.
///
/// The entries of all input nodes are pooled and matched as one set:
///
/// 1. Children under the match-any key (`""`) are always returned.
/// 2. An explicit key selected by the query ([`key_matches_query`]) returns its
///    child immediately and marks the query as having matched.
/// 3. An explicit key that instead *covers* the query, read as a selector, is
///    held back together with the match-all (`"*"`) children. Held-back
///    children are returned only if something matched in step 2, or if the
///    query itself is `"*"`.
///
/// Result order is: immediate matches, match-any children, held-back children.
#[must_use]
pub fn query_nodes<'a>(nodes: &[&'a SupportNode], query: &str) -> Vec<&'a SupportNode> {
    let mut match_found = false;
    let mut result = Vec::new();
    let mut match_any = Vec::new();
    let mut held_back = Vec::new();

    for node in nodes {
        for (key, child) in node.children() {
            if key == MATCH_ANY {
                match_any.push(child);
                continue;
            }
            if key == MATCH_ALL {
                held_back.push(child);
                if key_matches_query(key, query) {
                    match_found = true;
                }
                continue;
            }

            if key_matches_query(key, query) {
                match_found = true;
                result.push(child);
            } else if key_matches_query(query, key) {
                held_back.push(child);
            }
        }
    }

    result.extend(match_any);
    if match_found {
        result.extend(held_back);
    }

    result
}
