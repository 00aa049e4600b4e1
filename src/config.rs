// File: src/config.rs
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const DEFAULT_VOCABULARY_PATH: &str = "value_dictionary.json";
pub const DEFAULT_KNOWLEDGE_PATH: &str = "knowledge_base.json";

/// Where the catalogs come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    #[serde(default = "default_vocabulary")]
    pub vocabulary: PathBuf,
    #[serde(default = "default_knowledge")]
    pub knowledge: PathBuf,
    /// Binary cache of both catalogs. Written after a load from the JSON sources.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

fn default_vocabulary() -> PathBuf {
    PathBuf::from(DEFAULT_VOCABULARY_PATH)
}

fn default_knowledge() -> PathBuf {
    PathBuf::from(DEFAULT_KNOWLEDGE_PATH)
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary(),
            knowledge: default_knowledge(),
            snapshot: None,
        }
    }
}

impl RecommenderConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
