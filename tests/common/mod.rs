// Shared test fixtures
#![allow(dead_code)]

use std::path::PathBuf;

/// A small but realistic status.dat.
/// `db1`'s service is written before `db1` itself, `ghost` has no hoststatus,
/// and the contactstatus block is of a kind the snapshot ignores.
pub const STATUS_DAT: &str = "\
########################################
#          NAGIOS STATUS FILE
#
# THIS FILE IS AUTOMATICALLY GENERATED
# BY NAGIOS.  DO NOT MODIFY THIS FILE!
########################################

info {
\tcreated=1700000000
\tversion=4.4.6
\tlast_update_check=0
\tupdate_available=0
\t}

programstatus {
\tmodified_host_attributes=0
\tnagios_pid=1234
\tdaemon_mode=1
\tprogram_start=1699990000
\tenable_notifications=1
\t}

# services can precede their host in the file
servicestatus {
\thost_name=db1
\tservice_description=mysql
\tcurrent_state=2
\tplugin_output=CRITICAL - Can't connect to MySQL server
\tnotifications_enabled=1
\tproblem_has_been_acknowledged=0
\t}

hoststatus {
\thost_name=web1
\tcheck_command=check-host-alive
\tcurrent_state=0
\tplugin_output=PING OK - Packet loss = 0%, RTA = 0.50 ms
\tnotifications_enabled=1
\tproblem_has_been_acknowledged=0
\tpercent_state_change=0.00
\t}

servicestatus {
\thost_name=web1
\tservice_description=ping
\tcurrent_state=0
\tplugin_output=OK: load=0.5,0.3,0.1
\tnotifications_enabled=1
\tproblem_has_been_acknowledged=0
\t}

servicestatus {
\thost_name=web1
\tservice_description=http
\tcurrent_state=2
\tplugin_output=CRITICAL - Socket timeout after 10 seconds
\tnotifications_enabled=1
\tproblem_has_been_acknowledged=0
\t}

servicestatus {
\thost_name=web1
\tservice_description=disk
\tcurrent_state=1
\tplugin_output=DISK WARNING - free space: / 812 MB (9%)
\tnotifications_enabled=1
\tproblem_has_been_acknowledged=1
\t}

hoststatus {
\thost_name=db1
\tcurrent_state=1
\tplugin_output=CRITICAL - Host Unreachable (10.0.0.5)
\tnotifications_enabled=0
\tproblem_has_been_acknowledged=0
\t}

servicestatus {
\thost_name=ghost
\tservice_description=ping
\tcurrent_state=0
\t}

contactstatus {
\tcontact_name=nagiosadmin
\thost_notifications_enabled=1
\t}
";

/// Writes `content` to `status.dat` inside `dir`.
pub fn write_status_file(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("status.dat");
    std::fs::write(&path, content).expect("write status.dat");
    path
}
