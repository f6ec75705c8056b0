use chrono::{NaiveTime, TimeZone, Utc};
use rattendance::scheduler::next_fire;

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_next_fire_later_today() {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap();
    let next = next_fire(&now, &[hm(7, 2)]).unwrap();
    assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 10, 7, 2, 0).unwrap());
}

#[test]
fn test_next_fire_rolls_to_tomorrow() {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 7, 2, 0).unwrap();
    let next = next_fire(&now, &[hm(7, 2)]).unwrap();
    assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 11, 7, 2, 0).unwrap());
}

#[test]
fn test_next_fire_picks_earliest_of_many() {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    let times = [hm(18, 0), hm(7, 2), hm(13, 30)];
    assert_eq!(
        next_fire(&now, &times).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 10, 13, 30, 0).unwrap()
    );

    let late = Utc.with_ymd_and_hms(2024, 1, 10, 19, 0, 0).unwrap();
    assert_eq!(
        next_fire(&late, &times).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 11, 7, 2, 0).unwrap()
    );
}

#[test]
fn test_next_fire_crosses_month_end() {
    let now = Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap();
    assert_eq!(
        next_fire(&now, &[hm(7, 2)]).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 1, 7, 2, 0).unwrap()
    );
}

#[test]
fn test_next_fire_without_times() {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap();
    assert!(next_fire(&now, &[]).is_none());
}
