//! History recorders: JSON Lines on disk, or in memory

use std::{path::PathBuf, sync::Mutex};
use futures::future::BoxFuture;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info, warn};

use super::AttemptRecord;
use crate::error::{QuizError, Result};

/// Append-only store of finished attempts
pub trait HistoryRecorder: Send + Sync {
    /// Durably append one record
    fn append(&self, record: AttemptRecord) -> BoxFuture<'_, Result<()>>;

    /// All records in append order
    fn records(&self) -> BoxFuture<'_, Result<Vec<AttemptRecord>>>;
}

/// One JSON object per line, appended and synced on every write
#[derive(Debug)]
pub struct JsonlHistory {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn io_error(&self, source: std::io::Error) -> QuizError {
        QuizError::HistoryIo {
            path: self.path.clone(),
            source,
        }
    }

    async fn write_line(&self, record: &AttemptRecord) -> Result<()> {
        let mut line = serde_json::to_string(record).map_err(QuizError::HistoryEncode)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.sync_data().await.map_err(|e| self.io_error(e))?;

        info!("Recorded attempt {} in {}", record.id, self.path.display());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<AttemptRecord>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history file at {} yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut records = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping unreadable history line {} in {}: {}",
                    number + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }
}

impl HistoryRecorder for JsonlHistory {
    fn append(&self, record: AttemptRecord) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.write_line(&record).await })
    }

    fn records(&self) -> BoxFuture<'_, Result<Vec<AttemptRecord>>> {
        Box::pin(self.read_all())
    }
}

/// Keeps records for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: Mutex<Vec<AttemptRecord>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<AttemptRecord>>> {
        self.records
            .lock()
            .map_err(|e| QuizError::HistoryUnavailable(format!("Failed to lock history: {}", e)))
    }
}

impl HistoryRecorder for MemoryHistory {
    fn append(&self, record: AttemptRecord) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            debug!("Recorded attempt {} in memory", record.id);
            self.lock()?.push(record);
            Ok(())
        })
    }

    fn records(&self) -> BoxFuture<'_, Result<Vec<AttemptRecord>>> {
        Box::pin(async move { Ok(self.lock()?.clone()) })
    }
}
