// src/core/types.rs
use serde::{Deserialize, Serialize};

/// The possible graph-parameter values of one concept.
/// One dimension of the candidate product.
pub type Axis = Vec<String>;

/// One ordered arrangement of axis values, used as a knowledge base key.
pub type Candidate = Vec<String>;

/// A recognized word, the concept it groups under, and its decoded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    /// Empty when the word is its own concept.
    pub parent: String,
    /// Older sources spell this field `value`.
    #[serde(alias = "value")]
    pub values: Vec<String>,
}

impl VocabularyEntry {
    pub fn new(word: &str, parent: &str, values: &[&str]) -> Self {
        Self {
            word: word.to_string(),
            parent: parent.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn has_parent(&self) -> bool {
        !self.parent.is_empty()
    }
}

/// A ranked list of graph types stored under an exact, ordered parameter tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub params: Candidate,
    /// Most recommended first.
    pub graphs: Vec<String>,
}

impl RecommendationEntry {
    pub fn new(params: &[&str], graphs: &[&str]) -> Self {
        Self {
            params: params.iter().map(|p| p.to_string()).collect(),
            graphs: graphs.iter().map(|g| g.to_string()).collect(),
        }
    }
}
