// File: src/core/concepts.rs
use crate::core::types::Axis;
use crate::core::vocabulary::ValueCatalog;
use crate::error::{RecommendError, Result};

impl ValueCatalog {
    /// Normalizes matched words to the concepts they group under.
    ///
    /// A word with a parent contributes that parent once, at its first appearance.
    /// A word without one contributes itself every time it is given.
    pub fn resolve_parents<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<String>> {
        let mut concepts: Vec<String> = Vec::with_capacity(words.len());
        for word in words {
            let word = word.as_ref();
            let entry = self
                .lookup(word)
                .ok_or_else(|| RecommendError::LookupMiss(word.to_string()))?;

            if !entry.has_parent() {
                concepts.push(word.to_string());
            } else if !concepts.contains(&entry.parent) {
                concepts.push(entry.parent.clone());
            }
        }
        Ok(concepts)
    }

    /// The axis of a resolved concept.
    ///
    /// A concept that is itself a word decodes to that word's values. A concept that
    /// only exists as a parent decodes to the values of all its children, first
    /// occurrence first.
    pub fn decode_concept(&self, concept: &str) -> Result<Axis> {
        if let Some(axis) = self.decode(concept) {
            return Ok(axis);
        }

        let mut axis = Axis::new();
        let mut found = false;
        for child in self.children_of(concept) {
            found = true;
            for value in &child.values {
                if !axis.contains(value) {
                    axis.push(value.clone());
                }
            }
        }

        if found {
            Ok(axis)
        } else {
            Err(RecommendError::LookupMiss(concept.to_string()))
        }
    }
}
