mod common;
use chrono::Duration;
use common::{line_with_roster, utc};
use rattendance::core::{CheckinLogic, CheckinRequest, TimestampInput};
use rattendance::errors::AppError;
use rattendance::models::AttendanceStatus;

fn gate() -> CheckinLogic {
    CheckinLogic::new(Duration::minutes(10))
}

fn at(operator: &str, ts: &str) -> CheckinRequest {
    CheckinRequest {
        operator_id: operator.to_string(),
        timestamp: Some(TimestampInput::Text(ts.to_string())),
    }
}

#[test]
fn test_checkin_within_cooldown_is_rejected() {
    let repo = line_with_roster();
    let now = utc(2024, 1, 10, 12, 0);

    gate().apply(&repo, &at("A", "2024-01-10T08:00:00Z"), now).expect("first");
    let err = gate()
        .apply(&repo, &at("A", "2024-01-10T08:09:00Z"), now)
        .expect_err("9 minutes later must be rejected");

    assert!(matches!(err, AppError::DuplicateCheckIn { minutes: 10 }));
    assert_eq!(
        err.to_string(),
        "Attendance already marked for this operator within the last 10 minutes"
    );
    assert_eq!(repo.records_on(&utc(2024, 1, 10, 0, 0).date_naive()).unwrap().len(), 1);
}

#[test]
fn test_checkin_after_cooldown_is_accepted() {
    let repo = line_with_roster();
    let now = utc(2024, 1, 10, 12, 0);

    gate().apply(&repo, &at("A", "2024-01-10T08:00:00Z"), now).unwrap();
    gate().apply(&repo, &at("A", "2024-01-10T08:11:00Z"), now).unwrap();

    let day = utc(2024, 1, 10, 0, 0).date_naive();
    assert_eq!(repo.records_on(&day).unwrap().len(), 2);
}

#[test]
fn test_checkin_exactly_at_cooldown_is_accepted() {
    let repo = line_with_roster();
    let now = utc(2024, 1, 10, 12, 0);

    gate().apply(&repo, &at("A", "2024-01-10T08:00:00Z"), now).unwrap();
    let second = gate().apply(&repo, &at("A", "2024-01-10T08:10:00Z"), now);
    assert!(second.is_ok());
}

#[test]
fn test_checkin_across_midnight_is_a_new_day() {
    let repo = line_with_roster();
    let now = utc(2024, 1, 11, 12, 0);

    let first = gate().apply(&repo, &at("A", "2024-01-10T23:58:00Z"), now).unwrap();
    let second = gate().apply(&repo, &at("A", "2024-01-11T00:03:00Z"), now).unwrap();

    assert_eq!(first.record.date, "2024-01-10");
    assert_eq!(second.record.date, "2024-01-11");
}

#[test]
fn test_backdated_checkin_is_rejected() {
    let repo = line_with_roster();
    let now = utc(2024, 1, 10, 12, 0);

    gate().apply(&repo, &at("A", "2024-01-10T08:30:00Z"), now).unwrap();
    let err = gate()
        .apply(&repo, &at("A", "2024-01-10T08:00:00Z"), now)
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateCheckIn { .. }));
}

#[test]
fn test_other_operators_are_not_gated() {
    let repo = line_with_roster();
    let now = utc(2024, 1, 10, 12, 0);

    gate().apply(&repo, &at("A", "2024-01-10T08:00:00Z"), now).unwrap();
    assert!(gate().apply(&repo, &at("B", "2024-01-10T08:01:00Z"), now).is_ok());
}

#[test]
fn test_invalid_timestamp_is_rejected() {
    let repo = line_with_roster();
    let err = gate()
        .apply(&repo, &at("A", "yesterday-ish"), utc(2024, 1, 10, 12, 0))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTimestamp(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_empty_operator_id_is_rejected() {
    let repo = line_with_roster();
    let req = CheckinRequest {
        operator_id: "   ".into(),
        timestamp: None,
    };
    let err = gate().apply(&repo, &req, utc(2024, 1, 10, 12, 0)).unwrap_err();
    assert_eq!(err.to_string(), "Operator ID is required");
}

#[test]
fn test_missing_timestamp_uses_receipt_time() {
    let repo = line_with_roster();
    let req = CheckinRequest {
        operator_id: "B".into(),
        timestamp: None,
    };
    let out = gate().apply(&repo, &req, utc(2024, 3, 5, 6, 45)).unwrap();

    assert_eq!(out.record.timestamp, "2024-03-05T06:45:00.000Z");
    assert_eq!(out.record.date, "2024-03-05");
    assert_eq!(out.record.status, AttendanceStatus::Present);
    assert_eq!(out.record.operator_name, "Bruno");
    assert_eq!(out.record.station, "S2");
}

#[test]
fn test_epoch_millis_timestamp() {
    let repo = line_with_roster();
    let ms = utc(2024, 1, 10, 8, 0).timestamp_millis();
    let req = CheckinRequest {
        operator_id: "A".into(),
        timestamp: Some(TimestampInput::Millis(ms)),
    };
    let out = gate().apply(&repo, &req, utc(2024, 1, 10, 12, 0)).unwrap();
    assert_eq!(out.record.timestamp, "2024-01-10T08:00:00.000Z");
}

#[test]
fn test_offset_timestamp_is_normalised_to_utc_day() {
    let repo = line_with_roster();
    let out = gate()
        .apply(&repo, &at("A", "2024-01-11T01:30:00+02:00"), utc(2024, 1, 11, 12, 0))
        .unwrap();
    assert_eq!(out.record.date, "2024-01-10");
    assert_eq!(out.record.timestamp, "2024-01-10T23:30:00.000Z");
}

#[test]
fn test_unknown_operator_is_stored_with_sentinels() {
    let repo = line_with_roster();
    let out = gate()
        .apply(&repo, &at("GHOST", "2024-01-10T08:00:00Z"), utc(2024, 1, 10, 12, 0))
        .unwrap();
    assert_eq!(out.record.operator_name, "Unknown");
    assert_eq!(out.record.employee_id, "N/A");
    assert_eq!(out.record.station, "N/A");
}

#[test]
fn test_configured_cooldown_is_honoured() {
    let repo = line_with_roster();
    let logic = CheckinLogic::new(Duration::minutes(30));
    let now = utc(2024, 1, 10, 12, 0);

    logic.apply(&repo, &at("A", "2024-01-10T08:00:00Z"), now).unwrap();
    let err = logic.apply(&repo, &at("A", "2024-01-10T08:20:00Z"), now).unwrap_err();
    assert!(matches!(err, AppError::DuplicateCheckIn { minutes: 30 }));
}

#[test]
fn test_out_of_range_year_is_rejected_before_writing() {
    let repo = line_with_roster();
    let now = utc(2024, 1, 10, 12, 0);
    let year_10000 = CheckinRequest {
        operator_id: "A".into(),
        timestamp: Some(TimestampInput::Millis(253_402_300_800_000)),
    };

    let err = gate().apply(&repo, &year_10000, now).unwrap_err();
    assert!(matches!(err, AppError::InvalidTimestamp(_)));
    assert!(err.is_client_error());

    let err = gate()
        .apply(&repo, &at("A", "+10000-01-01T00:00:00Z"), now)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTimestamp(_)));

    // Nothing was stored: the ledger still reads back and A can check in.
    assert!(rattendance::core::ReportLogic::list_all(&repo).unwrap().is_empty());
    assert!(gate().apply(&repo, &at("A", "2024-01-10T08:00:00Z"), now).is_ok());
}

#[test]
fn test_last_storable_instant_is_accepted() {
    let repo = line_with_roster();
    let out = gate()
        .apply(&repo, &at("A", "9999-12-31T23:59:59Z"), utc(2024, 1, 10, 12, 0))
        .unwrap();
    assert_eq!(out.record.date, "9999-12-31");
    assert_eq!(rattendance::core::ReportLogic::list_all(&repo).unwrap().len(), 1);
}

#[test]
fn test_fractional_millis_timestamp() {
    let repo = line_with_roster();
    let req = CheckinRequest {
        operator_id: "A".into(),
        timestamp: Some(TimestampInput::FractionalMillis(1_704_873_600_000.0)),
    };
    let out = gate().apply(&repo, &req, utc(2024, 1, 10, 12, 0)).unwrap();
    assert_eq!(out.record.timestamp, "2024-01-10T08:00:00.000Z");

    let nan = TimestampInput::FractionalMillis(f64::NAN);
    assert!(matches!(nan.resolve(), Err(AppError::InvalidTimestamp(_))));
}
