//! Snapshot persistence.
//!
//! The whole collection is written under one fixed key of a key/value slot
//! store on every change; there are no partial writes. Loading never fails:
//! a missing, corrupt or unknown-version snapshot is logged and read as an
//! empty collection.
//!
//! Snapshot layout (schema version 1):
//!
//! ```json
//! {"version": 1, "issues": [ { "id": "iss-…", "title": "…", … } ]}
//! ```
//!
//! A bare JSON array of issues is also accepted and read as version 1.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::model::Issue;

/// Key under which the issue snapshot is stored.
pub const STORAGE_KEY: &str = "civic_board.issues";

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// A key/value slot store, shaped like browser local storage.
pub trait SlotStore {
    /// Read the value under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Clear the slot. Removing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be modified.
    fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// Backends
// ============================================================================

/// Slots held in process memory.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl SlotStore for FileSlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BoardError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let path = self.path_for(key);

        // Write to temp file, then rename over the target
        let tmp_path = path.with_extension("json.tmp");
        let written = fs::File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.flush()
            })
            .and_then(|()| fs::rename(&tmp_path, &path));

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(BoardError::Io(e));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BoardError::Io(e)),
        }
    }
}

// ============================================================================
// Snapshot codec
// ============================================================================

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    issues: &'a [Issue],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotIn {
    Versioned { version: u32, issues: Vec<Issue> },
    Bare(Vec<Issue>),
}

/// Serialize a collection into the versioned snapshot format.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn encode_snapshot(issues: &[Issue]) -> Result<String> {
    Ok(serde_json::to_string(&SnapshotOut {
        version: SCHEMA_VERSION,
        issues,
    })?)
}

/// Parse a snapshot.
///
/// # Errors
///
/// Returns `Json` if the payload does not match either layout, or
/// `UnsupportedSchema` for a version other than [`SCHEMA_VERSION`].
pub fn decode_snapshot(raw: &str) -> Result<Vec<Issue>> {
    match serde_json::from_str::<SnapshotIn>(raw)? {
        SnapshotIn::Versioned { version, issues } if version == SCHEMA_VERSION => Ok(issues),
        SnapshotIn::Versioned { version, .. } => Err(BoardError::UnsupportedSchema { version }),
        SnapshotIn::Bare(issues) => Ok(issues),
    }
}

// ============================================================================
// Issue store
// ============================================================================

/// Loads and saves the issue collection through a [`SlotStore`].
#[derive(Debug)]
pub struct IssueStore<S> {
    slots: S,
    key: String,
}

impl<S: SlotStore> IssueStore<S> {
    /// Store issues under [`STORAGE_KEY`].
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, STORAGE_KEY)
    }

    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn slots(&self) -> &S {
        &self.slots
    }

    /// Read the persisted collection.
    ///
    /// Never fails: an absent snapshot is empty, and an unreadable or
    /// malformed one is reported via `tracing::warn!` and treated as empty.
    #[must_use]
    pub fn load(&self) -> Vec<Issue> {
        let raw = match self.slots.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no snapshot found, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read snapshot, starting empty");
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match decode_snapshot(&raw) {
            Ok(issues) => {
                tracing::debug!(key = %self.key, count = issues.len(), "loaded snapshot");
                issues
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring unreadable snapshot, starting empty");
                Vec::new()
            }
        }
    }

    /// Rewrite the full collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the slot write fails.
    pub fn save(&self, issues: &[Issue]) -> Result<()> {
        let payload = encode_snapshot(issues)?;
        self.slots.write(&self.key, &payload)?;
        tracing::info!(key = %self.key, count = issues.len(), "saved snapshot");
        Ok(())
    }

    /// Drop the persisted snapshot entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be cleared.
    pub fn clear(&self) -> Result<()> {
        self.slots.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Role, Status};
    use crate::repo::IssueRepository;
    use proptest::prelude::*;

    fn sample_collection() -> Vec<Issue> {
        let mut repo = IssueRepository::new();
        let report = repo
            .create_issue("Pothole", "Large pothole on 5th", Category::Roads, Role::Citizen)
            .unwrap();
        repo.append_comment(&report.id, Role::Moderator, "Crew scheduled")
            .unwrap();
        repo.change_status(&report.id, Status::InProgress).unwrap();
        repo.create_broadcast("Water main repair scheduled", Some(Category::Water))
            .unwrap();
        repo.into_issues()
    }

    #[test]
    fn test_roundtrip_memory() {
        let store = IssueStore::new(MemorySlots::new());
        let issues = sample_collection();
        store.save(&issues).unwrap();
        assert_eq!(store.load(), issues);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = IssueStore::new(FileSlots::new(dir.path()));
        let issues = sample_collection();

        store.save(&issues).unwrap();
        assert!(store.slots().path_for(STORAGE_KEY).exists());
        assert!(!store.slots().path_for(STORAGE_KEY).with_extension("json.tmp").exists());

        let reopened = IssueStore::new(FileSlots::new(dir.path()));
        assert_eq!(reopened.load(), issues);
    }

    #[test]
    fn test_save_writes_versioned_envelope() {
        let store = IssueStore::new(MemorySlots::new());
        store.save(&sample_collection()).unwrap();
        let raw = store.slots().read(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], SCHEMA_VERSION);
        assert_eq!(value["issues"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_load_absent_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = IssueStore::new(FileSlots::new(dir.path().join("missing")));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let slots = MemorySlots::new();
        slots.write(STORAGE_KEY, "{not json").unwrap();
        let store = IssueStore::new(slots);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let slots = MemorySlots::new();
        slots
            .write(STORAGE_KEY, r#"[{"id": 7, "title": null}]"#)
            .unwrap();
        let store = IssueStore::new(slots);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_unknown_version_is_empty() {
        let slots = MemorySlots::new();
        slots
            .write(STORAGE_KEY, r#"{"version": 2, "issues": []}"#)
            .unwrap();
        let store = IssueStore::new(slots);
        assert!(store.load().is_empty());
        assert!(matches!(
            decode_snapshot(r#"{"version": 2, "issues": []}"#),
            Err(BoardError::UnsupportedSchema { version: 2 })
        ));
    }

    #[test]
    fn test_load_bare_array_layout() {
        let issues = sample_collection();
        let slots = MemorySlots::new();
        slots
            .write(STORAGE_KEY, &serde_json::to_string(&issues).unwrap())
            .unwrap();
        let store = IssueStore::new(slots);
        assert_eq!(store.load(), issues);
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = IssueStore::new(FileSlots::new(dir.path()));
        store.save(&sample_collection()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path());
        let target = slots.path_for(STORAGE_KEY);
        // A non-empty directory at the target makes the rename fail.
        fs::create_dir_all(target.join("occupied")).unwrap();

        assert!(slots.write(STORAGE_KEY, "[]").is_err());
        assert!(!target.with_extension("json.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_path_for_sanitizes_key() {
        let slots = FileSlots::new("/data");
        assert_eq!(
            slots.path_for("civic_board.issues"),
            PathBuf::from("/data/civic_board.issues.json")
        );
        assert_eq!(slots.path_for("a/b"), PathBuf::from("/data/a_b.json"));
    }

    proptest! {
        #[test]
        fn prop_save_then_load_preserves_collection(
            entries in prop::collection::vec(("[a-zA-Z ]{1,12}", any::<bool>(), 0usize..3), 0..12)
        ) {
            let mut repo = IssueRepository::new();
            for (text, broadcast, comments) in &entries {
                let created = if *broadcast {
                    repo.create_broadcast(text, Some(Category::Other))
                } else {
                    repo.create_issue(text, text, Category::General, Role::Citizen)
                };
                if let Ok(issue) = created {
                    for n in 0..*comments {
                        let _ = repo.append_comment(&issue.id, Role::Admin, &format!("note {n}"));
                    }
                }
            }

            let store = IssueStore::new(MemorySlots::new());
            store.save(repo.issues()).unwrap();
            prop_assert_eq!(store.load(), repo.into_issues());
        }
    }
}
