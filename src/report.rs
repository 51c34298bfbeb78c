// Problem report: hosts and services that are not OK

use crate::models::{StatusFields, StatusSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which problems to show besides the unhandled ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ProblemFilter {
    /// Show problems that have been acknowledged.
    #[serde(default, rename = "ack")]
    pub include_acknowledged: bool,
    /// Show problems whose notifications are disabled.
    #[serde(default, rename = "mute")]
    pub include_muted: bool,
}

impl ProblemFilter {
    fn admits(&self, record: &impl StatusFields) -> bool {
        if record.is_ok() {
            return false;
        }
        if record.is_acknowledged() && !self.include_acknowledged {
            return false;
        }
        if !record.notifications_enabled() && !self.include_muted {
            return false;
        }
        true
    }
}

/// A host or service in a non-OK state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub state: i64,
    pub plugin_output: String,
    pub acknowledged: bool,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.service {
            Some(service) => write!(f, "{} {} {}", self.host, service, self.plugin_output),
            None => write!(f, "{} {}", self.host, self.plugin_output),
        }
    }
}

/// Problems in host order; each host's own problem comes before its services'.
pub fn problems(snapshot: &StatusSnapshot, filter: ProblemFilter) -> Vec<Problem> {
    let mut out = Vec::new();
    for (host_name, host) in &snapshot.hosts {
        if filter.admits(host) {
            out.push(problem(host_name, None, host));
        }
        for (description, service) in &host.services {
            if filter.admits(service) {
                out.push(problem(host_name, Some(description.as_str()), service));
            }
        }
    }
    out
}

fn problem(host: &str, service: Option<&str>, record: &impl StatusFields) -> Problem {
    Problem {
        host: host.to_string(),
        service: service.map(str::to_string),
        state: record.current_state().unwrap_or_default(),
        plugin_output: record.plugin_output().to_string(),
        acknowledged: record.is_acknowledged(),
    }
}
