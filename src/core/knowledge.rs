// File: src/core/knowledge.rs
use crate::core::types::{Candidate, RecommendationEntry};
use crate::error::{RecommendError, Result};
use std::collections::HashMap;

/// Static table of ranked graph lists keyed by exact parameter tuples.
#[derive(Debug, Clone, Default)]
pub struct RecommendationCatalog {
    entries: Vec<RecommendationEntry>,
    /// `params` -> index into `entries`.
    index: HashMap<Candidate, usize>,
}

impl RecommendationCatalog {
    /// Builds a catalog, rejecting the first repeated `params` tuple.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = RecommendationEntry>,
    {
        let mut builder = RecommendationCatalogBuilder::new();
        for entry in entries {
            builder.insert(entry)?;
        }
        Ok(builder.build())
    }

    /// Ranked graphs for exactly this ordered tuple. This is the keyed view used
    /// during recommendation; lookups are O(1).
    pub fn get(&self, params: &[String]) -> Option<&[String]> {
        self.index
            .get(params)
            .map(|&idx| self.entries[idx].graphs.as_slice())
    }

    pub fn entries(&self) -> &[RecommendationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RecommendationCatalogBuilder {
    catalog: RecommendationCatalog,
}

impl RecommendationCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: RecommendationEntry) -> Result<()> {
        if self.catalog.index.contains_key(&entry.params) {
            return Err(RecommendError::MalformedSource(format!(
                "duplicate knowledge base key {:?}",
                entry.params
            )));
        }
        let idx = self.catalog.entries.len();
        self.catalog.index.insert(entry.params.clone(), idx);
        self.catalog.entries.push(entry);
        Ok(())
    }

    pub fn build(self) -> RecommendationCatalog {
        self.catalog
    }
}
