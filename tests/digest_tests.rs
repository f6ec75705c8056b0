mod common;
use chrono::{Duration, NaiveDate};
use common::{RecordingNotifier, line_with_roster, utc};
use rattendance::core::{CheckinLogic, CheckinRequest, DigestLogic, TimestampInput};
use rattendance::notify::render::{escape_html, render_csv, render_html};
use rattendance::notify::{DAILY_TITLE, Digest, DigestEntry, NotifyHook, PostCommitHook, ROSTER_COMPLETE_TITLE};
use std::sync::Arc;

fn entry(name: &str) -> DigestEntry {
    DigestEntry {
        operator_name: name.into(),
        employee_id: "E100".into(),
        station: "S1".into(),
        timestamp: "2024-01-10T08:00:00.000Z".into(),
        status: "Present".into(),
    }
}

fn jan10() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

#[test]
fn test_html_escapes_operator_names() {
    let digest = Digest::daily("line1", jan10(), vec![entry("<b>Tom & \"Jerry\"</b>")]);
    let html = render_html(&digest);

    assert!(html.contains("&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"));
    assert!(!html.contains("<b>Tom"));
    assert!(html.contains("<th>Operator Name</th>"));
    assert_eq!(escape_html("a'b"), "a&#39;b");
}

#[test]
fn test_html_for_empty_day() {
    let digest = Digest::daily("line1", jan10(), vec![]);
    assert!(render_html(&digest).contains("No check-ins recorded"));
}

#[test]
fn test_csv_attachment() {
    let digest = Digest::roster_complete("line1", jan10(), vec![entry("Alice"), entry("Bruno")]);
    let csv = String::from_utf8(render_csv(&digest).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "Operator Name,Employee ID,Station,Timestamp,Status");
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("Bruno,"));
    assert_eq!(digest.attachment_name(), "attendance-line1-2024-01-10.csv");
}

#[test]
fn test_subjects() {
    let done = Digest::roster_complete("line1", jan10(), vec![]);
    let daily = Digest::daily("line1", jan10(), vec![]);
    assert_eq!(done.subject(), format!("{ROSTER_COMPLETE_TITLE} - line1 2024-01-10"));
    assert_eq!(daily.subject(), format!("{DAILY_TITLE} - line1 2024-01-10"));
}

#[test]
fn test_digest_send_includes_the_whole_day() {
    let repo = line_with_roster();
    let logic = CheckinLogic::new(Duration::minutes(10));
    for (id, ts) in [("A", "2024-01-10T08:00:00Z"), ("B", "2024-01-10T08:30:00Z"), ("A", "2024-01-11T08:00:00Z")] {
        let req = CheckinRequest {
            operator_id: id.into(),
            timestamp: Some(TimestampInput::Text(ts.into())),
        };
        logic.apply(&repo, &req, utc(2024, 1, 12, 0, 0)).unwrap();
    }

    let notifier = RecordingNotifier::default();
    let count = DigestLogic::send(&repo, &jan10(), &notifier).unwrap();

    assert_eq!(count, 2);
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, DAILY_TITLE);
    assert_eq!(sent[0].entries[0].operator_name, "Alice");
    assert_eq!(sent[0].entries[1].station, "S2");
}

#[test]
fn test_digest_failure_is_returned() {
    let repo = line_with_roster();
    let notifier = RecordingNotifier::failing();

    let err = DigestLogic::send(&repo, &jan10(), &notifier).unwrap_err();
    assert!(err.to_string().contains("smtp unreachable"));
}

#[test]
fn test_notify_hook_swallows_failures() {
    let notifier = Arc::new(RecordingNotifier::failing());
    let hook = NotifyHook::new(notifier.clone());
    let repo = line_with_roster();

    let logic = CheckinLogic::new(Duration::minutes(10));
    let mut completion = None;
    for id in ["A", "B"] {
        let req = CheckinRequest {
            operator_id: id.into(),
            timestamp: Some(TimestampInput::Text("2024-01-10T08:00:00Z".into())),
        };
        completion = logic.apply(&repo, &req, utc(2024, 1, 10, 9, 0)).unwrap().completion;
    }

    // No panic, no error: the failure only reaches the log.
    hook.on_roster_complete(completion.expect("roster complete"));
    assert!(notifier.sent().is_empty());
}

#[test]
fn test_notify_hook_sends_roster_digest() {
    let notifier = Arc::new(RecordingNotifier::default());
    let hook = NotifyHook::new(notifier.clone());

    hook.on_roster_complete(rattendance::core::RosterComplete {
        line: "line1".into(),
        day: jan10(),
        entries: vec![entry("Alice")],
    });

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, ROSTER_COMPLETE_TITLE);
}
