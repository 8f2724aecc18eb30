//! File-backed JSON document collections.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A single document with its filterable metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: String,
    pub document: serde_json::Value,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CollectionFile {
    name: String,
    entries: Vec<DocumentEntry>,
}

/// One named collection persisted as a single JSON file. Mutations are
/// in-memory; callers persist with [`DocumentStore::save`].
#[derive(Debug)]
pub struct DocumentStore {
    storage_file: PathBuf,
    collection: CollectionFile,
}

impl DocumentStore {
    /// Opens `{dir}/{name}.json`, validating an existing file or
    /// starting an empty collection.
    pub fn open(dir: &Path, name: &str) -> Result<Self> {
        let storage_file = dir.join(format!("{name}.json"));
        let collection = if storage_file.exists() && storage_file.metadata()?.len() > 0 {
            let contents = fs::read_to_string(&storage_file)
                .with_context(|| format!("failed to read {}", storage_file.display()))?;
            let collection: CollectionFile = serde_json::from_str(&contents)
                .with_context(|| format!("corrupt collection file {}", storage_file.display()))?;

            if collection.name != name {
                anyhow::bail!(
                    "collection name mismatch: file has '{}', expected '{}'",
                    collection.name,
                    name
                );
            }
            collection
        } else {
            CollectionFile {
                name: name.to_string(),
                entries: Vec::new(),
            }
        };

        Ok(Self {
            storage_file,
            collection,
        })
    }

    /// Upserts entries, returning `(updated, inserted)` ids.
    pub fn upsert(&mut self, entries: Vec<DocumentEntry>) -> (Vec<String>, Vec<String>) {
        let mut updates = Vec::new();
        let mut inserts = Vec::new();

        for entry in entries {
            match self.collection.entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => {
                    updates.push(entry.id.clone());
                    *existing = entry;
                }
                None => {
                    inserts.push(entry.id.clone());
                    self.collection.entries.push(entry);
                }
            }
        }

        (updates, inserts)
    }

    pub fn get(&self, id: &str) -> Option<&DocumentEntry> {
        self.collection.entries.iter().find(|e| e.id == id)
    }

    pub fn get_many(&self, ids: &[String]) -> Vec<&DocumentEntry> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }

    pub fn get_all(&self) -> &[DocumentEntry] {
        &self.collection.entries
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&DocumentEntry>
    where
        F: Fn(&DocumentEntry) -> bool,
    {
        self.collection.entries.iter().filter(|e| predicate(e)).collect()
    }

    /// Removes entries by id, returning how many were deleted.
    pub fn delete(&mut self, ids: &[String]) -> usize {
        let before = self.collection.entries.len();
        self.collection
            .entries
            .retain(|e| !ids.iter().any(|id| id == &e.id));
        before - self.collection.entries.len()
    }

    pub fn len(&self) -> usize {
        self.collection.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.entries.is_empty()
    }

    /// Persists the collection atomically: write a sibling temp file,
    /// then rename over the target.
    pub fn save(&self) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self.collection)?;
        let tmp = self.storage_file.with_extension("json.tmp");
        fs::write(&tmp, serialized)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.storage_file)
            .with_context(|| format!("failed to replace {}", self.storage_file.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, value: serde_json::Value) -> DocumentEntry {
        DocumentEntry {
            id: id.to_string(),
            document: value,
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn test_upsert_reports_updates_and_inserts() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = DocumentStore::open(dir.path(), "things")?;

        let (updated, inserted) = store.upsert(vec![
            entry("a", json!({"n": 1})),
            entry("b", json!({"n": 2})),
        ]);
        assert!(updated.is_empty());
        assert_eq!(inserted, vec!["a", "b"]);

        let (updated, inserted) = store.upsert(vec![
            entry("a", json!({"n": 10})),
            entry("c", json!({"n": 3})),
        ]);
        assert_eq!(updated, vec!["a"]);
        assert_eq!(inserted, vec!["c"]);
        assert_eq!(store.get("a").unwrap().document, json!({"n": 10}));
        Ok(())
    }

    #[test]
    fn test_save_and_reload_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        {
            let mut store = DocumentStore::open(dir.path(), "things")?;
            store.upsert(vec![entry("a", json!({"kept": true}))]);
            store.save()?;
        }

        let store = DocumentStore::open(dir.path(), "things")?;
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().document, json!({"kept": true}));
        Ok(())
    }

    #[test]
    fn test_collection_name_mismatch_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        {
            let store = DocumentStore::open(dir.path(), "alpha")?;
            store.save()?;
        }
        fs::rename(
            dir.path().join("alpha.json"),
            dir.path().join("beta.json"),
        )?;

        let result = DocumentStore::open(dir.path(), "beta");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("collection name mismatch")
        );
        Ok(())
    }

    #[test]
    fn test_delete_by_ids() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut store = DocumentStore::open(dir.path(), "things")?;
        store.upsert(vec![
            entry("a", json!(1)),
            entry("b", json!(2)),
            entry("c", json!(3)),
        ]);

        let deleted = store.delete(&["b".to_string(), "missing".to_string()]);
        assert_eq!(deleted, 1);
        assert_eq!(store.len(), 2);
        assert!(store.get("b").is_none());
        Ok(())
    }

    #[test]
    fn test_corrupt_file_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("things.json"), "not json at all")?;

        let result = DocumentStore::open(dir.path(), "things");
        assert!(result.is_err());
        Ok(())
    }
}
