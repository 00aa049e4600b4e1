// File: src/persistence.rs
use crate::core::knowledge::RecommendationCatalog;
use crate::core::types::{RecommendationEntry, VocabularyEntry};
use crate::core::vocabulary::ValueCatalog;
use crate::error::{RecommendError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::SystemTime;
use tempfile::NamedTempFile;

/// On-disk form of both catalogs. Indices are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct SerializableState {
    sources: Vec<SourceStamp>,
    vocabulary: Vec<VocabularyEntry>,
    knowledge: Vec<RecommendationEntry>,
}

/// Modification time and size of a source file when a snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStamp {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceStamp {
    pub fn of(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

/// Catalogs restored from a snapshot, with the source stamps they were built from.
pub struct Snapshot {
    pub vocabulary: ValueCatalog,
    pub knowledge: RecommendationCatalog,
    pub sources: Vec<SourceStamp>,
}

impl Snapshot {
    /// Whether the sources are unchanged since the snapshot was written.
    pub fn is_fresh(&self, current: &[SourceStamp]) -> bool {
        self.sources == current
    }
}

/// Reads a JSON array of `{word, parent, values}` records.
pub fn load_vocabulary(path: &Path) -> Result<ValueCatalog> {
    let records: Vec<VocabularyEntry> = read_records(path)?;
    Ok(ValueCatalog::from_entries(records))
}

/// Reads a JSON array of `{params, graphs}` records.
pub fn load_knowledge(path: &Path) -> Result<RecommendationCatalog> {
    let records: Vec<RecommendationEntry> = read_records(path)?;
    RecommendationCatalog::from_entries(records)
}

pub fn save_vocabulary(catalog: &ValueCatalog, path: &Path) -> Result<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(writer, catalog.entries())?;
        Ok(())
    })
}

pub fn save_knowledge(catalog: &RecommendationCatalog, path: &Path) -> Result<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(writer, catalog.entries())?;
        Ok(())
    })
}

pub fn save_snapshot(
    vocabulary: &ValueCatalog,
    knowledge: &RecommendationCatalog,
    sources: &[SourceStamp],
    path: &Path,
) -> Result<()> {
    let state = SerializableState {
        sources: sources.to_vec(),
        vocabulary: vocabulary.entries().to_vec(),
        knowledge: knowledge.entries().to_vec(),
    };
    write_atomically(path, |writer| {
        bincode::serialize_into(writer, &state)?;
        Ok(())
    })
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let reader = BufReader::new(File::open(path)?);
    let state: SerializableState = bincode::deserialize_from(reader)?;
    Ok(Snapshot {
        vocabulary: ValueCatalog::from_entries(state.vocabulary),
        knowledge: RecommendationCatalog::from_entries(state.knowledge)?,
        sources: state.sources,
    })
}

/// Missing or mistyped fields are reported as a malformed source, not a generic
/// JSON failure.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_data() {
            RecommendError::MalformedSource(format!("{}: {}", path.display(), e))
        } else {
            RecommendError::Json(e)
        }
    })
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_vocabulary_with_legacy_field_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "vocab.json",
            r#"[
                {"word": "gdp", "parent": "", "value": ["GDP"]},
                {"word": "time", "parent": "timeframe", "values": ["Timeline"]}
            ]"#,
        );

        let catalog = load_vocabulary(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.decode("GDP"), Some(vec!["GDP".to_string()]));
    }

    #[test]
    fn missing_field_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "vocab.json", r#"[{"word": "gdp", "values": []}]"#);
        assert!(matches!(
            load_vocabulary(&path),
            Err(RecommendError::MalformedSource(_))
        ));
    }

    #[test]
    fn duplicate_knowledge_key_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "kb.json",
            r#"[
                {"params": ["GDP"], "graphs": ["BarChart"]},
                {"params": ["GDP"], "graphs": ["PieChart"]}
            ]"#,
        );
        assert!(matches!(
            load_knowledge(&path),
            Err(RecommendError::MalformedSource(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_knowledge(&dir.path().join("absent.json")),
            Err(RecommendError::Io(_))
        ));
    }

    #[test]
    fn json_write_back_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let vocabulary = ValueCatalog::from_entries(vec![
            VocabularyEntry::new("gdp", "", &["GDP"]),
            VocabularyEntry::new("time", "timeframe", &["Timeline"]),
        ]);
        let path = dir.path().join("out").join("vocab.json");

        save_vocabulary(&vocabulary, &path).unwrap();
        let reloaded = load_vocabulary(&path).unwrap();
        assert_eq!(reloaded.entries(), vocabulary.entries());

        let knowledge = RecommendationCatalog::from_entries(vec![RecommendationEntry::new(
            &["GDP", "Timeline"],
            &["LineChart", "AreaChart"],
        )])
        .unwrap();
        let path = dir.path().join("kb.json");
        save_knowledge(&knowledge, &path).unwrap();
        assert_eq!(load_knowledge(&path).unwrap().entries(), knowledge.entries());
    }

    #[test]
    fn snapshot_restores_both_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        let vocabulary = ValueCatalog::from_entries(vec![VocabularyEntry::new(
            "time",
            "timeframe",
            &["Timeline"],
        )]);
        let knowledge = RecommendationCatalog::from_entries(vec![RecommendationEntry::new(
            &["Timeline"],
            &["LineChart"],
        )])
        .unwrap();
        let source = write(dir.path(), "kb.json", "[]");
        let stamps = vec![SourceStamp::of(&source).unwrap()];
        let path = dir.path().join("catalogs.bin");

        save_snapshot(&vocabulary, &knowledge, &stamps, &path).unwrap();
        let snapshot = load_snapshot(&path).unwrap();
        assert!(snapshot.vocabulary.contains("TIME"));
        assert_eq!(snapshot.knowledge.entries(), knowledge.entries());
        assert!(snapshot.is_fresh(&stamps));
    }

    #[test]
    fn rewritten_source_makes_snapshot_stale() {
        let dir = tempfile::tempdir().unwrap();
        let source = write(dir.path(), "kb.json", "[]");
        let before = SourceStamp::of(&source).unwrap();

        fs::write(&source, r#"[{"params": [], "graphs": []}]"#).unwrap();
        let after = SourceStamp::of(&source).unwrap();

        let snapshot = Snapshot {
            vocabulary: ValueCatalog::default(),
            knowledge: RecommendationCatalog::default(),
            sources: vec![before],
        };
        assert!(!snapshot.is_fresh(&[after]));
    }
}
