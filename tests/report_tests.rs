mod common;
use chrono::{Duration, NaiveDate};
use common::{line_with_roster, utc};
use rattendance::core::report::ExportRow;
use rattendance::core::{CheckinLogic, CheckinRequest, LineRepository, ReportLogic, TimestampInput};
use rattendance::errors::AppError;
use rattendance::export::parse_range;

fn seed(repo: &LineRepository, rows: &[(&str, &str)]) {
    let logic = CheckinLogic::new(Duration::minutes(10));
    for (id, ts) in rows {
        let req = CheckinRequest {
            operator_id: id.to_string(),
            timestamp: Some(TimestampInput::Text(ts.to_string())),
        };
        logic
            .apply(repo, &req, utc(2024, 2, 1, 0, 0))
            .expect("seed check-in");
    }
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_export_range_is_closed_on_both_ends() {
    let repo = line_with_roster();
    seed(
        &repo,
        &[
            ("A", "2023-12-31T23:59:00Z"),
            ("A", "2024-01-01T00:00:00Z"),
            ("B", "2024-01-02T12:00:00Z"),
            ("B", "2024-01-03T23:59:00Z"),
            ("A", "2024-01-04T00:00:00Z"),
        ],
    );

    let views = ReportLogic::export_range(&repo, &day("2024-01-01"), &day("2024-01-03")).unwrap();
    let dates: Vec<&str> = views.iter().map(|v| v.date.as_str()).collect();
    assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
}

#[test]
fn test_export_rows_use_sentinels_for_missing_operators() {
    let repo = line_with_roster();
    seed(&repo, &[("GHOST", "2024-01-02T08:00:00Z")]);

    let rows = ReportLogic::export_range_str(&repo, Some("2024-01-01"), Some("2024-01-31")).unwrap();
    assert_eq!(
        rows,
        vec![ExportRow {
            date: "2024-01-02T08:00:00.000Z".into(),
            operator_name: "Unknown".into(),
            employee_id: "N/A".into(),
            station: "N/A".into(),
            status: "Present".into(),
        }]
    );
}

#[test]
fn test_export_row_column_names() {
    let row = ExportRow {
        date: "2024-01-02T08:00:00.000Z".into(),
        operator_name: "Alice".into(),
        employee_id: "E100".into(),
        station: "S1".into(),
        status: "Present".into(),
    };
    let json = serde_json::to_value(&row).unwrap();
    for key in ["Date", "Operator Name", "Employee ID", "Station", "Status"] {
        assert!(json.get(key).is_some(), "missing column {key}");
    }
}

#[test]
fn test_export_requires_both_ends() {
    let repo = line_with_roster();
    for (from, to) in [(None, Some("2024-01-01")), (Some("2024-01-01"), None), (None, None)] {
        let err = ReportLogic::export_range_str(&repo, from, to).unwrap_err();
        assert_eq!(err.to_string(), "From and to dates are required");
    }
}

#[test]
fn test_export_rejects_inverted_range() {
    let repo = line_with_roster();
    let err = ReportLogic::export_range(&repo, &day("2024-01-05"), &day("2024-01-01")).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_list_by_date_prefix() {
    let repo = line_with_roster();
    seed(
        &repo,
        &[
            ("A", "2024-01-10T08:00:00Z"),
            ("B", "2024-01-10T08:05:00Z"),
            ("A", "2024-01-11T08:00:00Z"),
            ("A", "2024-02-01T08:00:00Z"),
        ],
    );

    assert_eq!(ReportLogic::list_prefix(&repo, "2024-01-10").unwrap().len(), 2);
    assert_eq!(ReportLogic::list_prefix(&repo, "2024-01").unwrap().len(), 3);
    assert_eq!(ReportLogic::list_prefix(&repo, "2024").unwrap().len(), 4);
    assert!(ReportLogic::list_prefix(&repo, "2023").unwrap().is_empty());
}

#[test]
fn test_list_rejects_malformed_prefix() {
    let repo = line_with_roster();
    for bad in ["2024-1", "abcd", "2024-13", "2024-02-30", "2024%"] {
        let err = ReportLogic::list_prefix(&repo, bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)), "{bad} accepted");
    }
}

#[test]
fn test_parse_range_forms() {
    assert_eq!(parse_range("2024").unwrap(), (day("2024-01-01"), day("2024-12-31")));
    assert_eq!(parse_range("2024-02").unwrap(), (day("2024-02-01"), day("2024-02-29")));
    assert_eq!(
        parse_range("2024-01-01:2024-01-03").unwrap(),
        (day("2024-01-01"), day("2024-01-03"))
    );
    assert_eq!(
        parse_range("2024-01:2024-03").unwrap(),
        (day("2024-01-01"), day("2024-03-31"))
    );
    assert!(parse_range("2024:2024-03").is_err());
    assert!(parse_range("2024-03:2024-01").is_err());
}
