//! Key/value cache store with TTL support

use crate::error::{BrewseError, BrewseResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// Default time-to-live for cached registry responses
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const ENTRY_EXTENSION: &str = "json";

/// A cached payload and the moment it was stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

/// File-backed cache keyed by string, one `<key>.json` file per entry
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    /// Create a store over `dir` without touching the filesystem
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Create a store, ensuring its directory exists
    pub async fn open(dir: impl Into<PathBuf>, ttl: Duration) -> BrewseResult<Self> {
        let store = Self::new(dir, ttl);
        fs::create_dir_all(&store.dir).await.map_err(|e| {
            BrewseError::io(
                format!("creating cache directory {}", store.dir.display()),
                e,
            )
        })?;
        Ok(store)
    }

    /// Cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read a fresh entry for `key`, decoded as `T`
    ///
    /// Fails with `CacheMiss` when no entry exists and with `CacheExpired`
    /// when the entry is older than the TTL; the stale file is removed
    /// before returning. A payload that does not decode as `T` is a
    /// `Decode` error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> BrewseResult<T> {
        let path = self.entry_path(key);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BrewseError::CacheMiss(key.to_string()))
            }
            Err(e) => {
                return Err(BrewseError::io(
                    format!("reading cache file {}", path.display()),
                    e,
                ))
            }
        };

        let entry: CacheEntry<serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| BrewseError::decode(format!("cache entry {}", key), e))?;

        if self.is_expired(entry.timestamp) {
            debug!("Cache entry {} stored at {} is expired", key, entry.timestamp);
            self.remove(key).await?;
            return Err(BrewseError::CacheExpired(key.to_string()));
        }

        debug!("Cache hit for {}", key);
        serde_json::from_value(entry.data)
            .map_err(|e| BrewseError::decode(format!("cache entry {}", key), e))
    }

    /// Store `data` under `key`, replacing any prior entry
    pub async fn set<T: Serialize>(&self, key: &str, data: &T) -> BrewseResult<()> {
        self.write_entry(key, data, Utc::now()).await
    }

    async fn write_entry<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        timestamp: DateTime<Utc>,
    ) -> BrewseResult<()> {
        let path = self.entry_path(key);
        let content = serde_json::to_string_pretty(&CacheEntry { data, timestamp })?;

        fs::write(&path, content)
            .await
            .map_err(|e| BrewseError::io(format!("writing cache file {}", path.display()), e))?;

        debug!("Cached {} at {}", key, path.display());
        Ok(())
    }

    /// Remove the entry for `key`, if any
    pub async fn remove(&self, key: &str) -> BrewseResult<()> {
        let path = self.entry_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BrewseError::io(
                format!("removing cache file {}", path.display()),
                e,
            )),
        }
    }

    /// Remove every `.json` entry in the cache directory, returning how many
    /// were removed. Other files are left alone.
    pub async fn clear(&self) -> BrewseResult<usize> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(BrewseError::io("reading cache directory", e)),
        };

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| BrewseError::io("reading cache entry", e))?
        {
            if entry
                .path()
                .extension()
                .is_some_and(|ext| ext == ENTRY_EXTENSION)
            {
                fs::remove_file(entry.path())
                    .await
                    .map_err(|e| BrewseError::io("removing cache file", e))?;
                removed += 1;
            }
        }

        debug!("Cleared {} cache entries from {}", removed, self.dir.display());
        Ok(removed)
    }

    fn is_expired(&self, stored_at: DateTime<Utc>) -> bool {
        // Timestamps from the future count as fresh
        match (Utc::now() - stored_at).to_std() {
            Ok(age) => age > self.ttl,
            Err(_) => false,
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, ENTRY_EXTENSION))
    }
}
