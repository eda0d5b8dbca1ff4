//! Append-only per-label knowledge store.
//!
//! One JSON document maps each label to the ordered history of field maps
//! extracted under it. The whole read-modify-write cycle runs inside a
//! single mutex: concurrent requests append without losing updates, which
//! the file format alone cannot guarantee.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;

use crate::pipeline::fields::FieldMap;

/// label → array of field maps, insertion-ordered.
pub type Knowledge = serde_json::Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Knowledge store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Knowledge store is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Knowledge store write could not be finalized: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Durable knowledge document with serialized appends.
pub struct KnowledgeStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl KnowledgeStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            guard: Mutex::new(()),
        }
    }

    /// Read the full document. A store that doesn't exist yet is empty.
    pub fn load(&self) -> Result<Knowledge, StoreError> {
        if !self.path.exists() {
            return Ok(Knowledge::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// History recorded under one label, oldest first.
    pub fn history(&self, label: &str) -> Result<Option<Vec<FieldMap>>, StoreError> {
        let knowledge = self.load()?;
        match knowledge.get(label) {
            Some(Value::Array(entries)) => {
                let maps = entries
                    .iter()
                    .filter_map(|v| v.as_object().cloned())
                    .collect();
                Ok(Some(maps))
            }
            _ => Ok(None),
        }
    }

    /// Append one extraction result under `label`, creating the label's
    /// history on first use. Load, append, and save are one critical
    /// section; history is never overwritten.
    pub fn append(&self, label: &str, fields: FieldMap) -> Result<(), StoreError> {
        let _lock = self.guard.lock().expect("knowledge store lock poisoned");

        let mut knowledge = self.load()?;
        match knowledge.get_mut(label) {
            Some(Value::Array(entries)) => entries.push(Value::Object(fields)),
            _ => {
                knowledge.insert(
                    label.to_string(),
                    Value::Array(vec![Value::Object(fields)]),
                );
            }
        }
        self.save(&knowledge)?;

        tracing::info!(label, "Appended extraction result to knowledge store");
        Ok(())
    }

    /// Write the whole document. Goes through a sibling temp file and an
    /// atomic rename so a crash mid-write can't truncate existing history.
    fn save(&self, knowledge: &Knowledge) -> Result<(), StoreError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&mut tmp, knowledge)?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn field_map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    fn temp_store() -> (tempfile::TempDir, KnowledgeStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = KnowledgeStore::new(&dir.path().join("knowledge_base.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_empty());
        assert!(store.history("anything").unwrap().is_none());
    }

    #[test]
    fn append_creates_label_history() {
        let (_dir, store) = temp_store();
        store
            .append("card_1", field_map(&[("registration_number", "123456")]))
            .unwrap();

        let history = store.history("card_1").unwrap().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["registration_number"], "123456");
    }

    #[test]
    fn two_appends_preserve_both_in_order() {
        let (_dir, store) = temp_store();
        store
            .append("stmt", field_map(&[("total", "100.00")]))
            .unwrap();
        store
            .append("stmt", field_map(&[("total", "200.00")]))
            .unwrap();

        let history = store.history("stmt").unwrap().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["total"], "100.00");
        assert_eq!(history[1]["total"], "200.00");
    }

    #[test]
    fn labels_are_independent() {
        let (_dir, store) = temp_store();
        store.append("a", field_map(&[("name", "A")])).unwrap();
        store.append("b", field_map(&[("name", "B")])).unwrap();

        assert_eq!(store.history("a").unwrap().unwrap().len(), 1);
        assert_eq!(store.history("b").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge_base.json");
        KnowledgeStore::new(&path)
            .append("label", field_map(&[("total", "1.00")]))
            .unwrap();

        let reopened = KnowledgeStore::new(&path);
        assert_eq!(reopened.history("label").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn malformed_document_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge_base.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = KnowledgeStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn concurrent_appends_lose_nothing() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let amount = format!("{i}.00");
                    store
                        .append("shared", field_map(&[("total", amount.as_str())]))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.history("shared").unwrap().unwrap().len(), 8);
    }
}
