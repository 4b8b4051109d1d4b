//! Directory-backed store, one JSON file per key.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::{CacheError, KeyValueStore};

const FILE_EXTENSION: &str = "json";
const TMP_MARKER: &str = "tmp";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores each key as `<dir>/<key>.json`.
///
/// The directory is created on first write. Each write goes to its own
/// temporary file which is then renamed over the target, so a reader never
/// sees a half-written value and concurrent writers resolve to the last
/// rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`. Nothing is touched on disk yet.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
            && !key.starts_with('.');
        if !valid {
            return Err(CacheError::StoreError(format!("invalid key: {key:?}")));
        }
        // ':' is not portable in file names
        let name = key.replace(':', "__");
        Ok(self.dir.join(format!("{name}.{FILE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = unique_tmp_path(&path);
        if let Err(e) = write_and_rename(&tmp, &path, value) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(path = %path.display(), bytes = value.len(), "wrote store file");
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// `<target>.<pid>.<n>.tmp`, unique across processes and across writes
/// within one process.
fn unique_tmp_path(target: &Path) -> PathBuf {
    let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = target
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("store");
    let tmp_name = format!("{file_name}.{}.{n}.{TMP_MARKER}", std::process::id());
    target.with_file_name(tmp_name)
}

fn write_and_rename(tmp: &Path, target: &Path, value: &str) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new().write(true).create_new(true).open(tmp)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_reads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path().join("not-created"));

        assert!(store.get("macronica_cart").unwrap().is_none());
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("state");
        let mut store = FileStore::open(&dir);

        store.set("macronica_cart", r#"{"items":[]}"#).unwrap();

        assert!(dir.join("macronica_cart.json").exists());
        assert_eq!(
            store.get("macronica_cart").unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );
    }

    #[test]
    fn test_reopened_store_sees_previous_writes() {
        let tmp = tempfile::tempdir().unwrap();
        FileStore::open(tmp.path()).set("k", "v").unwrap();

        let reopened = FileStore::open(tmp.path());
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_namespaced_key() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(tmp.path());

        store.set("cart:retail", "1").unwrap();
        assert!(tmp.path().join("cart__retail.json").exists());
        assert!(store.exists("cart:retail").unwrap());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(tmp.path());

        assert!(store.set("../escape", "x").is_err());
        assert!(store.set("", "x").is_err());
        assert!(store.get("a/b").is_err());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(tmp.path());

        store.set("k", "v").unwrap();
        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert!(!store.exists("k").unwrap());
    }

    #[test]
    fn test_tmp_paths_are_unique() {
        let target = Path::new("/state/macronica_cart.json");
        let a = unique_tmp_path(target);
        let b = unique_tmp_path(target);

        assert_ne!(a, b);
        assert_eq!(a.parent(), target.parent());
    }

    #[test]
    fn test_concurrent_writers_leave_a_whole_value() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path());

        let handles: Vec<_> = (0..8)
            .map(|writer| {
                let mut store = store.clone();
                std::thread::spawn(move || {
                    let pad = "x".repeat(64 * 1024);
                    let value = serde_json::json!({ "writer": writer, "pad": pad }).to_string();
                    for _ in 0..20 {
                        store.set("macronica_cart", &value).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let raw = store.get("macronica_cart").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["writer"].as_u64().unwrap() < 8);

        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|name| name != "macronica_cart.json")
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }
}
