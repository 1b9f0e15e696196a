//! Stores that never touch the network

use crate::error::{StoreError, StoreResult};
use crate::ObjectStore;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Store that refuses every fetch.
///
/// Used when analysis should rely on key inference alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineStore;

impl ObjectStore for OfflineStore {
    fn fetch_object(&self, _bucket: &str, _key: &str) -> StoreResult<Vec<u8>> {
        Err(StoreError::Offline)
    }
}

/// In-memory objects keyed by bucket and key.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to add an object
    #[must_use]
    pub fn with_object(mut self, bucket: &str, key: &str, data: impl Into<Vec<u8>>) -> Self {
        self.insert(bucket, key, data);
        self
    }

    /// Add or replace an object
    pub fn insert(&mut self, bucket: &str, key: &str, data: impl Into<Vec<u8>>) {
        self.objects
            .insert((bucket.to_string(), key.to_string()), data.into());
    }
}

impl ObjectStore for MemoryStore {
    fn fetch_object(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}

/// Objects laid out on disk as `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path an object would be read from
    pub fn object_path(&self, bucket: &str, key: &str) -> StoreResult<PathBuf> {
        let mut path = self.root.clone();
        for (what, part) in [("bucket", bucket), ("key", key)] {
            if part.is_empty() {
                return Err(StoreError::InvalidKey(format!("{what} cannot be empty")));
            }
            let relative = Path::new(part);
            if !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            {
                return Err(StoreError::InvalidKey(format!(
                    "{what} {part:?} escapes the store root"
                )));
            }
            path.push(relative);
        }
        Ok(path)
    }
}

impl ObjectStore for LocalStore {
    fn fetch_object(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        debug!(path = %path.display(), "Reading object from local store");
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => StoreError::Io(e),
        })
    }
}
