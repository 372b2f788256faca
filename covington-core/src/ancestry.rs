//! Incremental ancestor tracking for cycle checks
//!
//! Each token keeps the set of its ancestors and the set of its descendants
//! under the arcs added so far. Checking whether `head -> dependent` would
//! close a cycle is a single bit test; adding an arc unions the head side
//! into every node below the dependent.

use smallvec::{smallvec, SmallVec};

const WORD_BITS: usize = 64;

/// Fixed-capacity bit set; sentences up to 128 tokens stay inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    words: SmallVec<[u64; 2]>,
}

impl TokenSet {
    /// Empty set able to hold ids `0..capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        let words = capacity.div_ceil(WORD_BITS).max(1);
        Self {
            words: smallvec![0; words],
        }
    }

    /// Add an id
    pub fn insert(&mut self, id: usize) {
        self.words[id / WORD_BITS] |= 1u64 << (id % WORD_BITS);
    }

    /// Membership test; ids past capacity are never members
    pub fn contains(&self, id: usize) -> bool {
        self.words
            .get(id / WORD_BITS)
            .is_some_and(|word| word & (1u64 << (id % WORD_BITS)) != 0)
    }

    /// In-place union
    pub fn union_with(&mut self, other: &TokenSet) {
        for (word, other) in self.words.iter_mut().zip(other.words.iter()) {
            *word |= *other;
        }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }
}

/// Ancestor/descendant closure over the arcs of one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorTracker {
    ancestors: Vec<TokenSet>,
    descendants: Vec<TokenSet>,
}

impl AncestorTracker {
    /// Tracker for ids `0..=words` with no arcs
    pub fn new(words: usize) -> Self {
        let size = words + 1;
        Self {
            ancestors: vec![TokenSet::with_capacity(size); size],
            descendants: vec![TokenSet::with_capacity(size); size],
        }
    }

    /// Whether `ancestor` currently dominates `node`
    pub fn is_ancestor(&self, ancestor: usize, node: usize) -> bool {
        self.ancestors
            .get(node)
            .is_some_and(|set| set.contains(ancestor))
    }

    /// Whether `head -> dependent` would close a cycle
    pub fn would_cycle(&self, head: usize, dependent: usize) -> bool {
        head == dependent || self.is_ancestor(dependent, head)
    }

    /// Register `head -> dependent`; the caller has already ruled out a cycle
    pub fn link(&mut self, head: usize, dependent: usize) {
        debug_assert!(!self.would_cycle(head, dependent));

        let mut upper = self.ancestors[head].clone();
        upper.insert(head);
        let mut lower = self.descendants[dependent].clone();
        lower.insert(dependent);

        for node in lower.iter() {
            self.ancestors[node].union_with(&upper);
        }
        for node in upper.iter() {
            self.descendants[node].union_with(&lower);
        }
    }

    /// All ancestors of a node
    pub fn ancestors_of(&self, node: usize) -> &TokenSet {
        &self.ancestors[node]
    }

    /// All descendants of a node
    pub fn descendants_of(&self, node: usize) -> &TokenSet {
        &self.descendants[node]
    }
}
