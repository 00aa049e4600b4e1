// --- File: src/core/vocabulary.rs
use crate::core::types::{Axis, VocabularyEntry};
use std::collections::HashMap;
use tracing::warn;

/// Read-only word lookup, built once by [`ValueCatalogBuilder`].
///
/// Words are matched case-insensitively. When two entries share a word only the
/// first one inserted is visible; later ones are dropped at build time.
#[derive(Debug, Clone, Default)]
pub struct ValueCatalog {
    entries: Vec<VocabularyEntry>,
    /// Lowercased word -> index into `entries`.
    by_word: HashMap<String, usize>,
    /// Lowercased parent -> indices of every entry grouped under it, in insertion order.
    by_parent: HashMap<String, Vec<usize>>,
}

impl ValueCatalog {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = VocabularyEntry>,
    {
        let mut builder = ValueCatalogBuilder::new();
        for entry in entries {
            builder.insert(entry);
        }
        builder.build()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.by_word.contains_key(&word.to_lowercase())
    }

    /// First entry whose word equals `word`, ignoring case.
    pub fn lookup(&self, word: &str) -> Option<&VocabularyEntry> {
        self.by_word
            .get(&word.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    /// The values of `word`, or `None` if it is not in the catalog.
    /// A word whose entry has no values decodes to an empty axis.
    pub fn decode(&self, word: &str) -> Option<Axis> {
        self.lookup(word).map(|entry| entry.values.clone())
    }

    /// Entries grouped under `parent`, in insertion order.
    pub fn children_of(&self, parent: &str) -> impl Iterator<Item = &VocabularyEntry> + '_ {
        self.by_parent
            .get(&parent.to_lowercase())
            .into_iter()
            .flatten()
            .map(|&idx| &self.entries[idx])
    }

    /// Every token of `text` that names a catalog word, left to right.
    ///
    /// Anything that is not a letter or whitespace is stripped before splitting, so
    /// "GDP," matches "gdp" and "Q3sales" is looked up as "Qsales".
    pub fn find_matches(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_alphabetic() || c.is_whitespace())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| self.contains(token))
            .map(str::to_string)
            .collect()
    }

    /// All visible entries in insertion order.
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects vocabulary during the load phase.
#[derive(Debug, Default)]
pub struct ValueCatalogBuilder {
    catalog: ValueCatalog,
}

impl ValueCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry` unless its word is already present.
    /// Returns whether the entry was kept.
    pub fn insert(&mut self, entry: VocabularyEntry) -> bool {
        let key = entry.word.to_lowercase();
        if self.catalog.by_word.contains_key(&key) {
            warn!(word = %entry.word, "duplicate vocabulary word ignored");
            return false;
        }

        let idx = self.catalog.entries.len();
        if entry.has_parent() {
            self.catalog
                .by_parent
                .entry(entry.parent.to_lowercase())
                .or_default()
                .push(idx);
        }
        self.catalog.by_word.insert(key, idx);
        self.catalog.entries.push(entry);
        true
    }

    /// Drops everything inserted so far.
    pub fn clear(&mut self) {
        self.catalog = ValueCatalog::default();
    }

    pub fn build(self) -> ValueCatalog {
        self.catalog
    }
}
