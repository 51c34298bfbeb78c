// Recoverable problems found while parsing

use crate::error::BlockDecodeError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A block that did not make it into the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The block body could not be decoded into its record shape.
    SkippedBlock {
        block: usize,
        block_kind: String,
        #[serde(serialize_with = "as_display")]
        reason: BlockDecodeError,
    },
    /// A block still open at end of input (no `\t}` line closed it).
    UnterminatedBlock {
        block: usize,
        block_kind: String,
        lines: usize,
    },
    /// A `servicestatus` block whose host never appears in the file.
    UnresolvedService {
        block: usize,
        host_name: String,
        service_description: String,
    },
}

impl Diagnostic {
    /// 0-based index of the offending block in file order.
    pub fn block(&self) -> usize {
        match self {
            Diagnostic::SkippedBlock { block, .. }
            | Diagnostic::UnterminatedBlock { block, .. }
            | Diagnostic::UnresolvedService { block, .. } => *block,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedBlock {
                block,
                block_kind,
                reason,
            } => write!(f, "block #{block} ({block_kind}) skipped: {reason}"),
            Diagnostic::UnterminatedBlock {
                block,
                block_kind,
                lines,
            } => write!(
                f,
                "block #{block} ({block_kind}) never closed; {lines} line(s) dropped"
            ),
            Diagnostic::UnresolvedService {
                block,
                host_name,
                service_description,
            } => write!(
                f,
                "block #{block}: service {service_description:?} references unknown host {host_name:?}"
            ),
        }
    }
}

fn as_display<S: Serializer>(value: &BlockDecodeError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}
