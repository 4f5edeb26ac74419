use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Inner state cleaned up when the last `SpoolGuard` reference is dropped.
struct SpoolInner {
    sink_id: Uuid,
    dir: PathBuf,
    runtime_handle: tokio::runtime::Handle,
}

impl fmt::Debug for SpoolInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpoolInner")
            .field("sink_id", &self.sink_id)
            .field("dir", &self.dir)
            .finish()
    }
}

impl Drop for SpoolInner {
    fn drop(&mut self) {
        let dir = self.dir.clone();
        let sink_id = self.sink_id;

        self.runtime_handle.spawn(async move {
            if let Err(err) = tokio::fs::remove_dir_all(&dir).await {
                tracing::warn!(
                    target: "cumulo_core::spool",
                    sink_id = %sink_id,
                    path = %dir.display(),
                    error = %err,
                    "Failed to clean up spool directory"
                );
            } else {
                tracing::trace!(
                    target: "cumulo_core::spool",
                    sink_id = %sink_id,
                    path = %dir.display(),
                    "Cleaned up spool directory"
                );
            }
        });
    }
}

/// Handle to one spooled download.
///
/// Cloning is cheap; clones share the same underlying directory via `Arc`.
/// When the last clone is dropped, the sink directory is deleted.
#[derive(Debug, Clone)]
pub struct SpoolGuard {
    inner: Arc<SpoolInner>,
}

impl SpoolGuard {
    pub(crate) fn new(sink_id: Uuid, dir: PathBuf, runtime_handle: tokio::runtime::Handle) -> Self {
        Self {
            inner: Arc::new(SpoolInner {
                sink_id,
                dir,
                runtime_handle,
            }),
        }
    }

    /// Unique identifier of this sink.
    pub fn sink_id(&self) -> Uuid {
        self.inner.sink_id
    }

    /// Path to the sink directory.
    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    /// Path to the spooled data file.
    pub fn file_path(&self) -> PathBuf {
        self.inner.dir.join("download.bin")
    }

    /// Reads the spooled data back in full.
    pub async fn read_back(&self) -> Result<Bytes> {
        let path = self.file_path();
        let data = tokio::fs::read(&path).await.map_err(|err| {
            Error::response_build()
                .with_detail(format!("Failed to read spool file {}", path.display()))
                .with_source(err)
        })?;
        Ok(Bytes::from(data))
    }
}
