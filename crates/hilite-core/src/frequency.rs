//! Word frequency accumulation.

use std::collections::HashMap;

/// Mapping from word to document-wide occurrence count.
///
/// The table remembers the order in which words were first seen, so the
/// stages after it have a deterministic tie order when counts are equal.
/// Built once per document; later stages derive new collections instead of
/// mutating this one.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    order: Vec<String>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one token. Empty tokens are discarded, not counted.
    pub fn add(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
                self.order.push(token.to_string());
            }
        }
    }

    /// Count every token in an iterator.
    pub fn extend<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = String>,
    {
        for token in tokens {
            self.add(&token);
        }
    }

    /// Fold another table into this one.
    ///
    /// Counts sum per key, so the merge is associative and commutative:
    /// per-page tables can be built independently (even in parallel) and
    /// merged in any order without changing the totals. Encounter order
    /// follows the merge order for words new to `self`.
    pub fn merge(&mut self, other: Self) {
        for word in other.order {
            let count = other.counts[&word];
            match self.counts.get_mut(&word) {
                Some(existing) => *existing += count,
                None => {
                    self.counts.insert(word.clone(), count);
                    self.order.push(word);
                }
            }
        }
    }

    /// Occurrence count for a word, zero if unseen.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no words have been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of non-empty tokens seen.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(word, count)` pairs in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order.iter().map(|w| (w.as_str(), self.counts[w]))
    }
}
