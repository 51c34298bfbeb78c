// Where status.dat content comes from: local disk or any async reader

use crate::error::SourceReadError;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::Mutex;

/// Supplies the raw text of a status file.
pub trait StatusSource: Send + Sync {
    /// Human-readable origin, used in logs and errors.
    fn describe(&self) -> String;

    fn read_to_string(&self) -> impl Future<Output = Result<String, SourceReadError>> + Send;
}

/// A status file on local disk. Re-read on every call.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatusSource for FileSource {
    fn describe(&self) -> String {
        format!("file: {}", self.path.display())
    }

    async fn read_to_string(&self) -> Result<String, SourceReadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceReadError {
                origin: self.describe(),
                source,
            })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Reads from an arbitrary async reader (pipe, socket, in-memory buffer).
/// The reader is consumed; a second read returns whatever is left.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: Mutex<R>,
    label: String,
}

impl<R: AsyncRead + Unpin + Send> ReaderSource<R> {
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader: Mutex::new(reader),
            label: label.into(),
        }
    }
}

impl<R: AsyncRead + Unpin + Send> StatusSource for ReaderSource<R> {
    fn describe(&self) -> String {
        format!("stream: {}", self.label)
    }

    async fn read_to_string(&self) -> Result<String, SourceReadError> {
        let mut bytes = Vec::new();
        self.reader
            .lock()
            .await
            .read_to_end(&mut bytes)
            .await
            .map_err(|source| SourceReadError {
                origin: self.describe(),
                source,
            })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
