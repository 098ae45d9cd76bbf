//! JSON-file backed settings store.

use crate::SettingsStore;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance::{self, TMP_MARKER};
use demoji_domain::StoredSettings;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
struct FileStoreInner {
    path: PathBuf,
    tmp_counter: AtomicU64,
    /// Serializes read-merge-write cycles within the process.
    write_lock: Mutex<()>,
}

/// Settings persisted as one small JSON object:
/// `{"enabled":true,"allowList":"😀","blockList":""}`.
///
/// Writes use an atomic swap (unique temp file, `fsync`, rename), so a crash
/// never leaves a half-written settings file behind. The handle is cheap to clone.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    inner: Arc<FileStoreInner>,
}

impl FileSettingsStore {
    /// Opens (without creating) the store at `path` and removes stale temp files
    /// left by interrupted writes.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        maintenance::purge_tmp(&path).await;
        Self {
            inner: Arc::new(FileStoreInner {
                path,
                tmp_counter: AtomicU64::new(1),
                write_lock: Mutex::new(()),
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    async fn read_current(&self) -> Result<StoredSettings, StorageError> {
        let path = &self.inner.path;
        let data = match fs::read(path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredSettings::default());
            },
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(StoredSettings::default());
        }
        serde_json::from_slice(&data).context(format!("Malformed settings: {}", path.display()))
    }

    async fn write_atomic(&self, settings: &StoredSettings) -> Result<(), StorageError> {
        let target = &self.inner.path;
        let payload = serde_json::to_vec_pretty(settings).context("Failed to encode settings")?;

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create {}", parent.display()))?;
        }

        let temp = unique_tmp_path(target, &self.inner.tmp_counter);
        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&payload).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, target).await {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                fs::remove_file(target)
                    .await
                    .context(format!("Failed to replace existing file: {}", target.display()))?;
                fs::rename(&temp, target).await.context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    target.display()
                ))?;
            } else {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), target.display())
                            .into(),
                    ),
                });
            }
        }

        debug!(path = %target.display(), "Settings saved atomically");
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<StoredSettings, StorageError> {
        self.read_current().await
    }

    async fn save(&self, patch: &StoredSettings) -> Result<(), StorageError> {
        let _guard = self.inner.write_lock.lock().await;
        let mut current = self.read_current().await?;
        current.merge(patch);
        self.write_atomic(&current).await
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("settings");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
}
