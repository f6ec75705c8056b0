#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use rattendance::core::{LineRegistry, LineRepository, RosterComplete};
use rattendance::db::{AttendanceStore, SqliteStore};
use rattendance::errors::{AppError, AppResult};
use rattendance::models::Operator;
use rattendance::notify::{Digest, Notifier, PostCommitHook};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB through the CLI and register two operators on line1.
pub fn init_db_with_roster(db_path: &str) {
    rat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (id, name, emp, station) in [
        ("OP-A", "Alice", "E100", "S1"),
        ("OP-B", "Bruno", "E200", "S2"),
    ] {
        rat()
            .args([
                "--db",
                db_path,
                "operator",
                "add",
                "line1",
                id,
                "--name",
                name,
                "--employee-id",
                emp,
                "--station",
                station,
            ])
            .assert()
            .success();
    }
}

pub fn store() -> Arc<dyn AttendanceStore> {
    Arc::new(SqliteStore::open_in_memory().expect("in-memory store"))
}

pub fn registry(lines: &[&str]) -> LineRegistry {
    let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    LineRegistry::new(&lines, store())
}

/// A line1 repository with operators A (S1) and B (S2).
pub fn line_with_roster() -> LineRepository {
    let repo = LineRepository::new("line1", store());
    repo.add_operator(&Operator::new("A", "Alice", "E100", "S1"))
        .expect("add A");
    repo.add_operator(&Operator::new("B", "Bruno", "E200", "S2"))
        .expect("add B");
    repo
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid test instant")
}

/// Notifier that keeps every digest it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Digest>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Digest> {
        self.sent.lock().expect("lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, digest: &Digest) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Mail("smtp unreachable".into()));
        }
        self.sent.lock().expect("lock").push(digest.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Hook that records completion events.
#[derive(Default)]
pub struct RecordingHook {
    pub events: Mutex<Vec<RosterComplete>>,
}

impl PostCommitHook for RecordingHook {
    fn on_roster_complete(&self, event: RosterComplete) {
        self.events.lock().expect("lock").push(event);
    }
}
