//! Arc set: at most one labelled head per dependent

use crate::error::{ParseError, Result};
use crate::vocabulary::LabelId;

/// Directed labelled edge from a head to a dependent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyArc {
    /// Head token id
    pub head: usize,
    /// Dependent token id
    pub dependent: usize,
    /// Relation label
    pub label: LabelId,
}

/// Mapping dependent -> (head, label), indexed by token id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcSet {
    heads: Vec<Option<(usize, LabelId)>>,
    len: usize,
}

impl ArcSet {
    /// Empty arc set for a sentence of `words` real tokens
    pub fn new(words: usize) -> Self {
        Self {
            heads: vec![None; words + 1],
            len: 0,
        }
    }

    /// Record `head -> dependent`; the dependent must not have a head yet
    pub fn insert(&mut self, head: usize, dependent: usize, label: LabelId) -> Result<()> {
        let slot = self
            .heads
            .get_mut(dependent)
            .ok_or_else(|| ParseError::malformed(format!("token {dependent} out of range")))?;
        if let Some((existing_head, _)) = slot {
            return Err(ParseError::ArcSetConflict {
                dependent,
                existing_head: *existing_head,
            });
        }
        *slot = Some((head, label));
        self.len += 1;
        Ok(())
    }

    /// Head and label of a dependent, if assigned
    pub fn get(&self, dependent: usize) -> Option<(usize, LabelId)> {
        self.heads.get(dependent).copied().flatten()
    }

    /// Head of a dependent, if assigned
    pub fn head_of(&self, dependent: usize) -> Option<usize> {
        self.get(dependent).map(|(head, _)| head)
    }

    /// Whether the dependent already has a head
    pub fn has_head(&self, dependent: usize) -> bool {
        self.get(dependent).is_some()
    }

    /// Number of assigned arcs
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no arc has been assigned
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Arcs ordered by dependent id
    pub fn iter(&self) -> impl Iterator<Item = DependencyArc> + '_ {
        self.heads
            .iter()
            .enumerate()
            .filter_map(|(dependent, slot)| {
                slot.map(|(head, label)| DependencyArc {
                    head,
                    dependent,
                    label,
                })
            })
    }
}
