// Block dispatcher: decoded block -> typed record by block kind
//
// Values are kept as the strings Nagios wrote. The field tables only say
// which known fields must hold a number or a 0/1 flag; unknown fields pass
// through untouched.

use super::decoder::DecodedBlock;
use super::splitter::BlockKind;
use crate::error::BlockDecodeError;
use crate::models::{FieldMap, HostRecord, Info, ProgramStatus, ServiceRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Integer,
    Decimal,
    Flag,
}

use FieldKind::{Decimal, Flag, Integer};

type FieldTable = &'static [(&'static str, FieldKind)];

/// Fields shared by `hoststatus` and `servicestatus`.
const CHECK_STATUS_FIELDS: FieldTable = &[
    ("modified_attributes", Integer),
    ("check_interval", Decimal),
    ("retry_interval", Decimal),
    ("has_been_checked", Flag),
    ("should_be_scheduled", Flag),
    ("check_execution_time", Decimal),
    ("check_latency", Decimal),
    ("check_type", Integer),
    ("current_state", Integer),
    ("last_hard_state", Integer),
    ("last_event_id", Integer),
    ("current_event_id", Integer),
    ("current_problem_id", Integer),
    ("last_problem_id", Integer),
    ("last_check", Integer),
    ("next_check", Integer),
    ("check_options", Integer),
    ("current_attempt", Integer),
    ("max_attempts", Integer),
    ("state_type", Integer),
    ("last_state_change", Integer),
    ("last_hard_state_change", Integer),
    ("last_notification", Integer),
    ("next_notification", Integer),
    ("no_more_notifications", Flag),
    ("current_notification_number", Integer),
    ("current_notification_id", Integer),
    ("notifications_enabled", Flag),
    ("problem_has_been_acknowledged", Flag),
    ("acknowledgement_type", Integer),
    ("active_checks_enabled", Flag),
    ("passive_checks_enabled", Flag),
    ("event_handler_enabled", Flag),
    ("flap_detection_enabled", Flag),
    ("process_performance_data", Flag),
    ("obsess", Flag),
    ("last_update", Integer),
    ("is_flapping", Flag),
    ("percent_state_change", Decimal),
    ("scheduled_downtime_depth", Integer),
];

const HOST_FIELDS: FieldTable = &[
    ("last_time_up", Integer),
    ("last_time_down", Integer),
    ("last_time_unreachable", Integer),
];

const SERVICE_FIELDS: FieldTable = &[
    ("last_time_ok", Integer),
    ("last_time_warning", Integer),
    ("last_time_unknown", Integer),
    ("last_time_critical", Integer),
];

const INFO_FIELDS: FieldTable = &[
    ("created", Integer),
    ("last_update_check", Integer),
    ("update_available", Flag),
];

const PROGRAM_FIELDS: FieldTable = &[
    ("modified_host_attributes", Integer),
    ("modified_service_attributes", Integer),
    ("nagios_pid", Integer),
    ("daemon_mode", Flag),
    ("program_start", Integer),
    ("last_log_rotation", Integer),
    ("enable_notifications", Flag),
    ("active_service_checks_enabled", Flag),
    ("passive_service_checks_enabled", Flag),
    ("active_host_checks_enabled", Flag),
    ("passive_host_checks_enabled", Flag),
    ("enable_event_handlers", Flag),
    ("obsess_over_services", Flag),
    ("obsess_over_hosts", Flag),
    ("check_service_freshness", Flag),
    ("check_host_freshness", Flag),
    ("enable_flap_detection", Flag),
    ("process_performance_data", Flag),
    ("next_comment_id", Integer),
    ("next_downtime_id", Integer),
    ("next_event_id", Integer),
    ("next_problem_id", Integer),
    ("next_notification_id", Integer),
];

/// A decoded block converted to the shape it takes in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Info(Info),
    ProgramStatus(ProgramStatus),
    Host {
        name: String,
        record: HostRecord,
    },
    Service {
        host_name: String,
        description: String,
        record: ServiceRecord,
    },
}

/// Converts a decoded block by kind. `Ok(None)` for kinds the snapshot ignores.
pub fn convert(kind: &BlockKind, block: DecodedBlock) -> Result<Option<Record>, BlockDecodeError> {
    let DecodedBlock {
        fields,
        host_name,
        service_description,
    } = block;

    let record = match kind {
        BlockKind::Info => {
            check_fields(&fields, &[INFO_FIELDS])?;
            Record::Info(Info { fields })
        }
        BlockKind::ProgramStatus => {
            check_fields(&fields, &[PROGRAM_FIELDS])?;
            Record::ProgramStatus(ProgramStatus { fields })
        }
        BlockKind::HostStatus => {
            let name = required(host_name, "host_name")?;
            check_fields(&fields, &[CHECK_STATUS_FIELDS, HOST_FIELDS])?;
            Record::Host {
                name,
                record: HostRecord::new(fields),
            }
        }
        BlockKind::ServiceStatus => {
            let host_name = required(host_name, "host_name")?;
            let description = required(service_description, "service_description")?;
            check_fields(&fields, &[CHECK_STATUS_FIELDS, SERVICE_FIELDS])?;
            Record::Service {
                host_name,
                description,
                record: ServiceRecord { fields },
            }
        }
        BlockKind::Other(_) => return Ok(None),
    };
    Ok(Some(record))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, BlockDecodeError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(BlockDecodeError::MissingField(field))
}

fn check_fields(fields: &FieldMap, tables: &[FieldTable]) -> Result<(), BlockDecodeError> {
    for (name, value) in fields {
        // Empty values are how Nagios writes "not set".
        if value.is_empty() {
            continue;
        }
        let Some(kind) = lookup(tables, name) else {
            continue;
        };
        check_value(kind, name, value)?;
    }
    Ok(())
}

fn lookup(tables: &[FieldTable], name: &str) -> Option<FieldKind> {
    tables
        .iter()
        .flat_map(|t| t.iter())
        .find(|(field, _)| *field == name)
        .map(|(_, kind)| *kind)
}

fn check_value(kind: FieldKind, field: &str, value: &str) -> Result<(), BlockDecodeError> {
    let ok = match kind {
        Integer => value.parse::<i64>().is_ok(),
        Decimal => value.parse::<f64>().is_ok_and(f64::is_finite),
        Flag => matches!(value, "0" | "1"),
    };
    if ok {
        return Ok(());
    }
    let (field, value) = (field.to_string(), value.to_string());
    Err(match kind {
        Integer => BlockDecodeError::InvalidInteger { field, value },
        Decimal => BlockDecodeError::InvalidDecimal { field, value },
        Flag => BlockDecodeError::InvalidFlag { field, value },
    })
}
