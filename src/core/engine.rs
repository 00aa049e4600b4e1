use crate::config::RecommenderConfig;
use crate::core::combinations::{candidates, product_size};
use crate::core::knowledge::RecommendationCatalog;
use crate::core::types::Axis;
use crate::core::vocabulary::ValueCatalog;
use crate::error::Result;
use crate::persistence::{
    load_knowledge, load_snapshot, load_vocabulary, save_snapshot, SourceStamp,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answers recommendation requests against a pair of immutable catalogs.
///
/// Cloning is cheap and clones share the catalogs, so one instance can be handed
/// to as many threads as needed.
#[derive(Debug, Clone)]
pub struct Recommender {
    vocabulary: Arc<ValueCatalog>,
    knowledge: Arc<RecommendationCatalog>,
}

impl Recommender {
    pub fn new(vocabulary: ValueCatalog, knowledge: RecommendationCatalog) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
            knowledge: Arc::new(knowledge),
        }
    }

    /// Loads the catalogs named by `config`.
    ///
    /// The snapshot is used only while both sources are unchanged since it was
    /// written, or when the sources are gone. Otherwise the sources are loaded and,
    /// if a snapshot path is set, a fresh snapshot is written. Failing to write it
    /// does not fail the load.
    pub fn from_config(config: &RecommenderConfig) -> Result<Self> {
        let stamps: Option<Vec<SourceStamp>> = [&config.vocabulary, &config.knowledge]
            .into_iter()
            .map(|path| SourceStamp::of(path).ok())
            .collect();

        if let Some(path) = &config.snapshot {
            if path.exists() {
                match load_snapshot(path) {
                    Ok(snapshot) => match &stamps {
                        Some(current) if snapshot.is_fresh(current) => {
                            info!(path = %path.display(), "loaded catalog snapshot");
                            return Ok(Self::new(snapshot.vocabulary, snapshot.knowledge));
                        }
                        Some(_) => info!(path = %path.display(), "snapshot is stale, reloading sources"),
                        None => {
                            warn!(path = %path.display(), "sources unavailable, using snapshot");
                            return Ok(Self::new(snapshot.vocabulary, snapshot.knowledge));
                        }
                    },
                    Err(e) => warn!(path = %path.display(), error = %e, "ignoring unreadable snapshot"),
                }
            }
        }

        let vocabulary = load_vocabulary(&config.vocabulary)?;
        let knowledge = load_knowledge(&config.knowledge)?;
        info!(
            words = vocabulary.len(),
            recommendations = knowledge.len(),
            "loaded catalogs from sources"
        );

        if let (Some(path), Some(current)) = (&config.snapshot, &stamps) {
            if let Err(e) = save_snapshot(&vocabulary, &knowledge, current, path) {
                warn!(path = %path.display(), error = %e, "could not write snapshot");
            }
        }
        Ok(Self::new(vocabulary, knowledge))
    }

    pub fn vocabulary(&self) -> &ValueCatalog {
        &self.vocabulary
    }

    pub fn knowledge(&self) -> &RecommendationCatalog {
        &self.knowledge
    }

    pub fn find_matches(&self, text: &str) -> Vec<String> {
        self.vocabulary.find_matches(text)
    }

    pub fn resolve_parents<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<String>> {
        self.vocabulary.resolve_parents(words)
    }

    /// Ranked graph lists for every arrangement of the chosen words' values that the
    /// knowledge base knows about.
    ///
    /// Graphs inside one list are most-recommended first. The order between lists is
    /// not meaningful. Any chosen word or concept missing from the vocabulary fails
    /// the whole request.
    pub fn recommend<S: AsRef<str>>(&self, chosen: &[S]) -> Result<Vec<Vec<String>>> {
        let concepts = self.vocabulary.resolve_parents(chosen)?;
        let axes = concepts
            .iter()
            .map(|concept| self.vocabulary.decode_concept(concept))
            .collect::<Result<Vec<Axis>>>()?;

        debug!(
            ?concepts,
            product = ?product_size(&axes),
            "generating candidates"
        );

        let mut examined = 0usize;
        let recommendations: Vec<Vec<String>> = candidates(&axes)
            .inspect(|_| examined += 1)
            .filter_map(|candidate| self.knowledge.get(&candidate).map(<[String]>::to_vec))
            .collect();

        debug!(examined, matched = recommendations.len(), "recommendation lookup done");
        Ok(recommendations)
    }
}
