//! Local filesystem storage for the competitions document.
//!
//! The whole collection is rewritten on every save. Bytes go to a sibling
//! `.tmp` file first and are renamed over the target, so a failed write
//! leaves the previous document intact.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::AggregationState;

/// Indent used for pretty-printed documents.
const INDENT: &[u8] = b"    ";

/// Single-writer store for one JSON document.
#[derive(Debug, Clone)]
pub struct AggregationStore {
    path: PathBuf,
}

impl AggregationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted collection.
    ///
    /// A missing file is `NotFound`; content that is not a record array is
    /// `Corrupt`.
    pub async fn load(&self) -> Result<AggregationState> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| AppError::corrupt(&self.path, e))
    }

    /// Overwrite the document with the full collection, 4-space indented.
    pub async fn save(&self, state: &AggregationState) -> Result<()> {
        self.write_bytes(&to_pretty_json(state)?).await
    }

    /// Overwrite the document with compact JSON.
    pub async fn save_compact<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        self.write_bytes(&serde_json::to_vec(value)?).await
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    Ok(out)
}
