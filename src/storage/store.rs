//! Local key-value store
//!
//! Persists small JSON records under a data directory, one file per key.
//! Every record is independently readable and writable; writes go through
//! a temp file and a rename so a record is never observed half-written.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::debug;

use crate::config::StorageConfig;
use crate::utils::errors::{RankBuddyError, Result};
use crate::utils::helpers::sanitize_filename;

/// File-backed store for small JSON records
#[derive(Debug, Clone)]
pub struct KvStore {
    root: PathBuf,
    prefix: String,
}

impl KvStore {
    /// Open a store rooted at the configured data directory, creating it
    /// if necessary.
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        fs::create_dir_all(&config.data_dir).await.map_err(|e| {
            RankBuddyError::Storage(format!(
                "Cannot create data directory {}: {}",
                config.data_dir, e
            ))
        })?;

        debug!(data_dir = %config.data_dir, prefix = %config.prefix, "Opened key-value store");

        Ok(Self {
            root: PathBuf::from(&config.data_dir),
            prefix: config.prefix.clone(),
        })
    }

    /// Read and deserialize a record. A missing record is `Ok(None)`;
    /// an unreadable or unparseable one is an error the caller decides
    /// how to degrade from.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.entry_path(key);

        let raw = match fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key = key, "No persisted record");
                return Ok(None);
            }
            Err(e) => {
                return Err(RankBuddyError::Storage(format!(
                    "Cannot read record {}: {}",
                    key, e
                )));
            }
        };

        let value = serde_json::from_str(&raw)?;
        Ok(Some(value))
    }

    /// Serialize and write a record. The write is complete when this
    /// returns, so a read in the same logical turn sees the new value.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.entry_path(key);
        let serialized = serde_json::to_string(value)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serialized.as_bytes()).await.map_err(|e| {
            RankBuddyError::Storage(format!("Cannot write record {}: {}", key, e))
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            RankBuddyError::Storage(format!("Cannot commit record {}: {}", key, e))
        })?;

        debug!(key = key, bytes = serialized.len(), "Record written");
        Ok(())
    }

    /// Delete a record, reporting whether one existed
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key);

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key = key, "Record deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RankBuddyError::Storage(format!(
                "Cannot delete record {}: {}",
                key, e
            ))),
        }
    }

    /// Check whether a record exists
    pub async fn exists(&self, key: &str) -> bool {
        fs::try_exists(self.entry_path(key)).await.unwrap_or(false)
    }

    /// Write/read/delete probe used by the service health report
    pub async fn health_check(&self) -> bool {
        let probe_key = "health:probe";

        if self.put(probe_key, &"ok".to_string()).await.is_err() {
            return false;
        }

        let read_back = matches!(
            self.get::<String>(probe_key).await,
            Ok(Some(ref value)) if value == "ok"
        );
        let _ = self.delete(probe_key).await;

        read_back
    }

    /// File path for a key: sanitized `prefix:key` under the data directory
    fn entry_path(&self, key: &str) -> PathBuf {
        let name = sanitize_filename(&format!("{}:{}", self.prefix, key));
        self.root.join(format!("{}.json", name))
    }
}
