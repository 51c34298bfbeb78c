// Domain models for a parsed Nagios status file

mod diagnostic;
mod record;
mod snapshot;

pub use diagnostic::Diagnostic;
pub use record::{FieldMap, HostRecord, ServiceRecord, StatusFields};
pub use snapshot::{Info, ProgramStatus, StatusSnapshot};
