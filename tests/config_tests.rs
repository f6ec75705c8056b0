use rattendance::config::Config;
use rattendance::errors::AppError;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.lines, vec!["line1".to_string()]);
    assert_eq!(cfg.cooldown_minutes, 10);
    assert_eq!(cfg.cooldown(), chrono::Duration::minutes(10));
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.digest_times().unwrap().len(), 1);
    assert_eq!(cfg.digest_lines(), vec!["line1".to_string()]);
    assert!(cfg.mail.is_none());
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join("absent.conf")).unwrap();
    assert_eq!(cfg.cooldown_minutes, 10);
}

#[test]
fn test_partial_yaml_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rattendance.conf");
    fs::write(
        &path,
        "lines: [line1, line2]\ncooldown_minutes: 15\ndigest:\n  lines: [line2]\nmail:\n  smtp_host: smtp.example.com\n  username: kiosk\n  from: kiosk@example.com\n  to: [lead@example.com]\n",
    )
    .unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.lines.len(), 2);
    assert_eq!(cfg.cooldown_minutes, 15);
    assert_eq!(cfg.digest_lines(), vec!["line2".to_string()]);
    assert_eq!(cfg.digest.times, vec!["07:02".to_string()]);
    let mail = cfg.mail.unwrap();
    assert_eq!(mail.smtp_port, 587);
    assert!(mail.password.is_none());
}

#[test]
fn test_validation_failures() {
    let dir = tempdir().unwrap();
    let cases = [
        "lines: []\n",
        "lines: [line1, line1]\n",
        "cooldown_minutes: 0\n",
        "cooldown_minutes: 1441\n",
        "cooldown_minutes: 9223372036854775807\n",
        "digest:\n  lines: [line7]\n",
        "digest:\n  times: ['7h']\n",
    ];
    for (i, yaml) in cases.iter().enumerate() {
        let path = dir.path().join(format!("case{i}.conf"));
        fs::write(&path, yaml).unwrap();
        assert!(Config::load_from(&path).is_err(), "accepted: {yaml}");
    }
}

#[test]
fn test_bad_yaml_is_a_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.conf");
    fs::write(&path, "lines: [unterminated\n").unwrap();
    assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
}

#[test]
fn test_cooldown_bounds() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("day.conf");
    fs::write(&path, "cooldown_minutes: 1440\n").unwrap();
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.cooldown(), chrono::Duration::minutes(1440));

    // Built in code without validation: clamped instead of panicking.
    let unchecked = Config {
        cooldown_minutes: i64::MAX,
        ..Config::default()
    };
    assert_eq!(unchecked.cooldown(), chrono::Duration::minutes(1440));
}
