use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::spool::SpoolGuard;

/// Creates unique local sinks for downloaded content.
///
/// Each call to [`spool`](SpoolRegistry::spool) writes the data into a
/// fresh subdirectory named by a UUIDv7, never by the remote file name, so
/// concurrent invocations for the same blob cannot collide. The directory
/// is removed when the last [`SpoolGuard`] referencing it is dropped.
#[derive(Debug, Clone)]
pub struct SpoolRegistry {
    base_dir: PathBuf,
}

impl SpoolRegistry {
    /// Creates a registry rooted at `base_dir`.
    ///
    /// The directory does not need to exist yet; it is created lazily on
    /// the first spool.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Writes `data` fully into a fresh sink and returns its guard.
    #[tracing::instrument(name = "spool.write", skip(self, data), fields(size = data.len()))]
    pub async fn spool(&self, data: &[u8]) -> Result<SpoolGuard> {
        let sink_id = Uuid::now_v7();
        let dir = self.base_dir.join(sink_id.to_string());

        tokio::fs::create_dir_all(&dir).await.map_err(|err| {
            Error::response_build()
                .with_detail(format!("Failed to create spool directory {}", dir.display()))
                .with_source(err)
        })?;

        let data_path = dir.join("download.bin");
        tokio::fs::write(&data_path, data).await.map_err(|err| {
            Error::response_build()
                .with_detail(format!("Failed to write spool file {}", data_path.display()))
                .with_source(err)
        })?;

        let runtime_handle = tokio::runtime::Handle::current();

        Ok(SpoolGuard::new(sink_id, dir, runtime_handle))
    }

    /// Returns the base directory path.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
