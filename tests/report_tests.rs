// Problem report tests: state, acknowledgement and mute filtering

mod common;

use common::STATUS_DAT;
use nagios_status::parse_str;
use nagios_status::report::{ProblemFilter, problems};

fn lines(filter: ProblemFilter, snapshot: &nagios_status::StatusSnapshot) -> Vec<String> {
    problems(snapshot, filter)
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[tokio::test]
async fn test_default_hides_acknowledged_and_muted() {
    let snapshot = parse_str(STATUS_DAT).await;
    assert_eq!(
        lines(ProblemFilter::default(), &snapshot),
        vec![
            "db1 mysql CRITICAL - Can't connect to MySQL server",
            "web1 http CRITICAL - Socket timeout after 10 seconds",
        ]
    );
}

#[tokio::test]
async fn test_ack_includes_acknowledged() {
    let snapshot = parse_str(STATUS_DAT).await;
    let filter = ProblemFilter {
        include_acknowledged: true,
        include_muted: false,
    };
    let found = problems(&snapshot, filter);
    assert_eq!(found.len(), 3);
    let disk = found
        .iter()
        .find(|p| p.service.as_deref() == Some("disk"))
        .expect("disk");
    assert!(disk.acknowledged);
    assert_eq!(disk.state, 1);
}

#[tokio::test]
async fn test_mute_includes_hosts_with_notifications_disabled() {
    let snapshot = parse_str(STATUS_DAT).await;
    let filter = ProblemFilter {
        include_acknowledged: false,
        include_muted: true,
    };
    assert_eq!(
        lines(filter, &snapshot)[0],
        "db1 CRITICAL - Host Unreachable (10.0.0.5)"
    );
}

#[tokio::test]
async fn test_everything_ok_means_no_problems() {
    let snapshot =
        parse_str("hoststatus {\n\thost_name=a\n\tcurrent_state=0\n\t}\n").await;
    let filter = ProblemFilter {
        include_acknowledged: true,
        include_muted: true,
    };
    assert!(problems(&snapshot, filter).is_empty());
}

#[tokio::test]
async fn test_negative_and_large_states_are_problems() {
    let snapshot = parse_str(
        "hoststatus {\n\thost_name=neg\n\tcurrent_state=-1\n\tplugin_output=weird\n\t}\n\
         hoststatus {\n\thost_name=big\n\tcurrent_state=300\n\tplugin_output=weirder\n\t}\n",
    )
    .await;
    assert_eq!(snapshot.hosts.len(), 2);
    let found = problems(&snapshot, ProblemFilter::default());
    let states: Vec<(&str, i64)> = found.iter().map(|p| (p.host.as_str(), p.state)).collect();
    assert_eq!(states, vec![("big", 300), ("neg", -1)]);
}
