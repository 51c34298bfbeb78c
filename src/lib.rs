// Nagios status.dat -> typed snapshot -> JSON

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod report;
pub mod routes;
pub mod source;
pub mod worker;

pub use error::{BlockDecodeError, SourceReadError};
pub use models::{Diagnostic, HostRecord, ServiceRecord, StatusFields, StatusSnapshot};
pub use parser::{StatusParser, parse_str, to_json};
