//! Burkhard-Keller tree over canonical words.
//!
//! Nodes live in an arena and refer to their children by index. Every child
//! edge is labeled with the exact Levenshtein distance between the child's
//! word and its parent's word, which is what makes triangle-inequality
//! pruning sound.

use super::distance::levenshtein;
use crate::error::{Error, Result};

type NodeId = usize;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) word: String,
    pub(crate) children: Vec<(u32, NodeId)>,
}

#[derive(Debug, Clone, Default)]
pub struct BkTree {
    pub(crate) nodes: Vec<Node>,
}

impl BkTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `word`. Returns `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        if self.nodes.is_empty() {
            self.push(word);
            return true;
        }

        let mut current = 0;
        loop {
            let dist = levenshtein(word, &self.nodes[current].word);
            if dist == 0 {
                return false;
            }
            let next = self.nodes[current]
                .children
                .iter()
                .find(|(edge, _)| *edge == dist)
                .map(|(_, child)| *child);

            match next {
                Some(child) => current = child,
                None => {
                    let id = self.push(word);
                    self.nodes[current].children.push((dist, id));
                    return true;
                }
            }
        }
    }

    fn push(&mut self, word: &str) -> NodeId {
        self.nodes.push(Node {
            word: word.to_string(),
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// All words within `max_distance` of `query`, with their distance.
    ///
    /// Fails with [`Error::InternalSearchFailure`] when the arena is
    /// inconsistent (a dangling child index, or a walk longer than the
    /// number of nodes).
    pub fn search(&self, query: &str, max_distance: u32) -> Result<Vec<(&str, u32)>> {
        let mut found = Vec::new();
        if self.nodes.is_empty() {
            return Ok(found);
        }

        let mut stack = vec![0];
        let mut visited = 0usize;

        while let Some(id) = stack.pop() {
            visited += 1;
            if visited > self.nodes.len() {
                return Err(Error::search_failure(format!(
                    "walk visited more than {} nodes, the tree has a cycle",
                    self.nodes.len()
                )));
            }

            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| Error::search_failure(format!("dangling child index {id}")))?;

            let dist = levenshtein(query, &node.word);
            if dist <= max_distance {
                found.push((node.word.as_str(), dist));
            }

            let low = dist.saturating_sub(max_distance);
            let high = dist + max_distance;
            stack.extend(
                node.children
                    .iter()
                    .filter(|(edge, _)| (low..=high).contains(edge))
                    .map(|(_, child)| *child),
            );
        }

        Ok(found)
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.word.as_str())
    }
}
