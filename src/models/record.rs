// Host and service status records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decoded `key=value` pairs of one block, minus the correlation fields.
pub type FieldMap = BTreeMap<String, String>;

/// Read access shared by host and service records.
///
/// Values stay strings as written by Nagios; these helpers interpret the
/// handful of fields the report and HTTP layers care about.
pub trait StatusFields {
    fn fields(&self) -> &FieldMap;

    fn get(&self, key: &str) -> Option<&str> {
        self.fields().get(key).map(String::as_str)
    }

    /// `current_state` as a number (0 = OK/UP). `None` when absent or empty.
    fn current_state(&self) -> Option<i64> {
        self.get("current_state")?.parse().ok()
    }

    fn plugin_output(&self) -> &str {
        self.get("plugin_output").unwrap_or_default()
    }

    /// Nagios enables notifications unless told otherwise.
    fn notifications_enabled(&self) -> bool {
        self.get("notifications_enabled") != Some("0")
    }

    fn is_acknowledged(&self) -> bool {
        self.get("problem_has_been_acknowledged") == Some("1")
    }

    /// True unless `current_state` holds a non-zero code.
    fn is_ok(&self) -> bool {
        self.current_state().is_none_or(|s| s == 0)
    }
}

/// One `hoststatus` block plus the services attached under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    #[serde(flatten)]
    pub fields: FieldMap,
    #[serde(rename = "ServiceStatus", default)]
    pub services: BTreeMap<String, ServiceRecord>,
}

impl HostRecord {
    pub fn new(fields: FieldMap) -> Self {
        Self {
            fields,
            services: BTreeMap::new(),
        }
    }
}

impl StatusFields for HostRecord {
    fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

/// One `servicestatus` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceRecord {
    pub fields: FieldMap,
}

impl StatusFields for ServiceRecord {
    fn fields(&self) -> &FieldMap {
        &self.fields
    }
}
