// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key-value store for staff/service directories.
//!
//! Each directory is stored whole under a logical name. Writes replace the
//! previous contents entirely; there is no merging with stale entries.

use crate::error::AppError;
use crate::models::Directory;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory cache, backed by JSON files or by memory.
#[derive(Clone)]
pub struct DirectoryCache {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    /// One `<name>.json` file per directory.
    Files(PathBuf),
    /// Process-local store, used in tests.
    Memory(Arc<DashMap<String, Directory>>),
}

impl DirectoryCache {
    /// Create a file-backed cache rooted at `root`. The directory is created
    /// lazily on first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            backend: Backend::Files(root.as_ref().to_path_buf()),
        }
    }

    /// Create an in-memory cache for testing (offline mode).
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    /// Persist `directory` under `name`, replacing whatever was there.
    pub async fn persist(&self, name: &str, directory: &Directory) -> Result<(), AppError> {
        match &self.backend {
            Backend::Memory(map) => {
                map.insert(name.to_string(), directory.clone());
            }
            Backend::Files(root) => {
                tokio::fs::create_dir_all(root).await.map_err(|e| {
                    AppError::Cache(format!("Failed to create {}: {}", root.display(), e))
                })?;

                let json = serde_json::to_vec_pretty(directory)
                    .map_err(|e| AppError::Cache(format!("Failed to encode {}: {}", name, e)))?;

                // Write-then-rename so readers never see a partial file.
                let path = file_path(root, name);
                let tmp = path.with_extension("json.tmp");
                tokio::fs::write(&tmp, json).await.map_err(|e| {
                    AppError::Cache(format!("Failed to write {}: {}", tmp.display(), e))
                })?;
                tokio::fs::rename(&tmp, &path).await.map_err(|e| {
                    AppError::Cache(format!("Failed to replace {}: {}", path.display(), e))
                })?;
            }
        }

        tracing::debug!(name, entries = directory.len(), "Directory persisted");
        Ok(())
    }

    /// Load the directory stored under `name`.
    ///
    /// Returns `AppError::CacheMiss` if it was never persisted.
    pub async fn load(&self, name: &str) -> Result<Directory, AppError> {
        match &self.backend {
            Backend::Memory(map) => map
                .get(name)
                .map(|d| d.value().clone())
                .ok_or_else(|| AppError::CacheMiss(name.to_string())),
            Backend::Files(root) => {
                let path = file_path(root, name);
                let bytes = match tokio::fs::read(&path).await {
                    Ok(b) => b,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Err(AppError::CacheMiss(name.to_string()));
                    }
                    Err(e) => {
                        return Err(AppError::Cache(format!(
                            "Failed to read {}: {}",
                            path.display(),
                            e
                        )));
                    }
                };

                serde_json::from_slice(&bytes).map_err(|e| {
                    AppError::Cache(format!("Corrupt directory file {}: {}", path.display(), e))
                })
            }
        }
    }
}

fn file_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{}.json", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::names;

    fn dir(entries: &[(&str, &str)]) -> Directory {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_load_before_persist_is_cache_miss() {
        let cache = DirectoryCache::new_mock();
        let err = cache.load(names::STAFF).await.unwrap_err();
        assert!(matches!(err, AppError::CacheMiss(ref n) if n == "staff"));
    }

    #[tokio::test]
    async fn test_memory_persist_replaces_wholesale() {
        let cache = DirectoryCache::new_mock();
        cache
            .persist(names::STAFF, &dir(&[("s1", "Old"), ("s2", "Stale")]))
            .await
            .unwrap();
        cache
            .persist(names::STAFF, &dir(&[("s1", "New")]))
            .await
            .unwrap();

        let loaded = cache.load(names::STAFF).await.unwrap();
        assert_eq!(loaded, dir(&[("s1", "New")]));
    }

    #[tokio::test]
    async fn test_file_round_trip_and_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = DirectoryCache::new(tmp.path().join("nested"));

        assert!(matches!(
            cache.load(names::SERVICES).await,
            Err(AppError::CacheMiss(_))
        ));

        cache
            .persist(names::SERVICES, &dir(&[("v1", "Tutoring"), ("v2", "Gone")]))
            .await
            .unwrap();
        cache
            .persist(names::SERVICES, &dir(&[("v1", "Tutoring")]))
            .await
            .unwrap();

        let loaded = cache.load(names::SERVICES).await.unwrap();
        assert_eq!(loaded, dir(&[("v1", "Tutoring")]));
        assert!(!tmp.path().join("nested/services.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_cache_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("staff.json"), b"not json").unwrap();

        let cache = DirectoryCache::new(tmp.path());
        let err = cache.load(names::STAFF).await.unwrap_err();
        assert!(matches!(err, AppError::Cache(_)));
    }
}
