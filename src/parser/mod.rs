// status.dat parsing pipeline: filter -> split -> decode -> dispatch -> aggregate

mod aggregate;
mod decoder;
mod dispatch;
mod filter;
mod splitter;

pub use aggregate::aggregate;
pub use decoder::{DecodedBlock, decode_body};
pub use dispatch::{Record, convert};
pub use filter::filter_lines;
pub use splitter::{BlockKind, RawBlock, split_blocks};

use crate::error::SourceReadError;
use crate::models::StatusSnapshot;
use crate::source::{FileSource, StatusSource};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Where Nagios writes its status file in a default source install.
pub const DEFAULT_STATUS_PATH: &str = "/usr/local/nagios/var/status.dat";

/// Filters and splits raw content into ordered blocks. Sequential.
pub fn split_content(content: &str) -> Vec<RawBlock> {
    split_blocks(filter_lines(content))
}

/// Parses status.dat content held in memory. Never fails; dropped blocks are
/// reported through [`StatusSnapshot::diagnostics`].
#[instrument(skip(content), fields(bytes = content.len()))]
pub async fn parse_str(content: &str) -> StatusSnapshot {
    aggregate(split_content(content)).await
}

/// Reads a status file from a [`StatusSource`] and parses it.
#[derive(Debug, Clone)]
pub struct StatusParser<S> {
    source: S,
}

impl StatusParser<FileSource> {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(path))
    }
}

impl Default for StatusParser<FileSource> {
    fn default() -> Self {
        Self::from_path(DEFAULT_STATUS_PATH)
    }
}

impl<S: StatusSource> StatusParser<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Only a failure to read the source is an error; bad blocks are skipped.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn parse(&self) -> Result<StatusSnapshot, SourceReadError> {
        let content = self.source.read_to_string().await?;
        let snapshot = parse_str(&content).await;
        info!(
            operation = "parse",
            hosts = snapshot.hosts.len(),
            services = snapshot.service_count(),
            dropped_blocks = snapshot.diagnostics().len(),
            "status parsed"
        );
        Ok(snapshot)
    }
}

/// Pretty JSON with four-space indentation.
pub fn to_json(snapshot: &StatusSnapshot) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    snapshot.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}
