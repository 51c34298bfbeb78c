// Parsed status.dat: info, program status and the host/service tree

use super::diagnostic::Diagnostic;
use super::record::{FieldMap, HostRecord, ServiceRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `info` block (file creation time, Nagios version, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Info {
    pub fields: FieldMap,
}

/// The `programstatus` block (daemon pid, global switches, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramStatus {
    pub fields: FieldMap,
}

/// Result of parsing one status file.
///
/// Serializes to `{"Info": .., "ProgramStatus": .., "HostStatus": {host: {.., "ServiceStatus": {..}}}}`.
/// Diagnostics are not part of the JSON document; query them with
/// [`StatusSnapshot::diagnostics`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(rename = "Info")]
    pub info: Info,
    #[serde(rename = "ProgramStatus")]
    pub program_status: ProgramStatus,
    #[serde(rename = "HostStatus")]
    pub hosts: BTreeMap<String, HostRecord>,
    #[serde(skip)]
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl StatusSnapshot {
    pub fn host(&self, name: &str) -> Option<&HostRecord> {
        self.hosts.get(name)
    }

    pub fn service(&self, host: &str, description: &str) -> Option<&ServiceRecord> {
        self.hosts.get(host)?.services.get(description)
    }

    pub fn service_count(&self) -> usize {
        self.hosts.values().map(|h| h.services.len()).sum()
    }

    /// Blocks that were dropped, ordered by their position in the file.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// False when at least one block was skipped or left unattached.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
