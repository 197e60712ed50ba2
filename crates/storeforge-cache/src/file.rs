//! File-backed key-value store.
//!
//! Each key lives in its own file under a root directory. This is what the
//! CLI uses as its "browser profile".

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{CacheError, KeyValueStore};

const ENTRY_EXTENSION: &str = "json";

/// A directory of `<key>.json` files.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        tracing::debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    /// The directory backing this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", encode_key(key), ENTRY_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(path.display().to_string(), e)),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.entry_path(key);
        // Write beside the target then rename so readers never see a torn file.
        let tmp = path.with_extension(format!("{}.tmp", ENTRY_EXTENSION));
        fs::write(&tmp, value).map_err(|e| CacheError::io(tmp.display().to_string(), e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::debug!(
                    path = %tmp.display(),
                    error = %cleanup,
                    "failed to remove temp file"
                );
            }
            return Err(CacheError::io(path.display().to_string(), e));
        }
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(path.display().to_string(), e)),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entry_path(key).is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| CacheError::io(self.root.display().to_string(), e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CacheError::io(self.root.display().to_string(), e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(decode_key)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Map a key onto a safe, unique file stem.
///
/// ASCII letters, digits and `-` pass through; every other byte becomes
/// `_XX` (uppercase hex), so keys can never escape the root directory and
/// two distinct keys never share a file. The empty key is a lone `_`.
fn encode_key(key: &str) -> String {
    if key.is_empty() {
        return "_".to_string();
    }

    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{:02X}", byte));
        }
    }
    stem
}

/// Inverse of [`encode_key`]; `None` for stems it could not have produced.
fn decode_key(stem: &str) -> Option<String> {
    if stem == "_" {
        return Some(String::new());
    }

    let mut bytes = Vec::with_capacity(stem.len());
    let mut chars = stem.bytes();
    while let Some(byte) = chars.next() {
        if byte == b'_' {
            let hex = [chars.next()?, chars.next()?];
            let hex = std::str::from_utf8(&hex).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
        } else if byte.is_ascii_alphanumeric() || byte == b'-' {
            bytes.push(byte);
        } else {
            return None;
        }
    }
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("cart", b"{\"items\":[]}").unwrap();
        assert_eq!(store.get("cart").unwrap().unwrap(), b"{\"items\":[]}");
        assert!(store.exists("cart").unwrap());
        assert_eq!(store.keys().unwrap(), vec!["cart"]);
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        assert!(store.get("cart").unwrap().is_none());
        store.delete("cart").unwrap();
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("cart", b"1").unwrap();
        store.set("cart", b"2").unwrap();

        assert_eq!(store.get("cart").unwrap().unwrap(), b"2");
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_keys_cannot_escape_root() {
        assert_eq!(encode_key("../../etc/passwd"), "_2E_2E_2F_2E_2E_2Fetc_2Fpasswd");
        assert_eq!(encode_key(""), "_");
        assert_eq!(encode_key("cart-v1"), "cart-v1");
    }

    #[test]
    fn test_similar_keys_use_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set("cart:a", b"colon").unwrap();
        store.set("cart_a", b"underscore").unwrap();
        store.set("cart/a", b"slash").unwrap();

        assert_eq!(store.get("cart:a").unwrap().unwrap(), b"colon");
        assert_eq!(store.get("cart_a").unwrap().unwrap(), b"underscore");
        assert_eq!(store.get("cart/a").unwrap().unwrap(), b"slash");
        assert_eq!(store.keys().unwrap(), vec!["cart/a", "cart:a", "cart_a"]);
    }

    #[test]
    fn test_key_encoding_is_reversible() {
        for key in ["", "cart", "cart:profile-2", "_", "a_5F", "caf\u{e9}/\u{1f6d2}"] {
            assert_eq!(decode_key(&encode_key(key)).as_deref(), Some(key));
        }
        assert_eq!(decode_key("bad_Z"), None);
        assert_eq!(decode_key("has.dot"), None);
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        // A non-empty directory where the entry file should go makes rename fail.
        let blocker = dir.path().join("cart.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), b"x").unwrap();

        assert!(store.set("cart", b"1").is_err());
        assert!(!dir.path().join("cart.json.tmp").exists());
    }

    #[test]
    fn test_open_creates_nested_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("profiles").join("default");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.root().is_dir());
    }
}
