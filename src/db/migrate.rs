use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};

/// A schema step, recorded in the `log` table once applied.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20240108_0001_create_operators",
        description: "Created operators table (per-line roster)",
        sql: r#"
        CREATE TABLE IF NOT EXISTS operators (
            line         TEXT NOT NULL,
            id           TEXT NOT NULL,
            name         TEXT NOT NULL,
            employee_id  TEXT NOT NULL DEFAULT '',
            station      TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL,
            PRIMARY KEY (line, id)
        );
        "#,
    },
    Migration {
        version: "20240108_0002_create_attendance",
        description: "Created attendance table (append-only ledger)",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            line         TEXT NOT NULL,
            operator_id  TEXT NOT NULL,
            date         TEXT NOT NULL,
            timestamp    TEXT NOT NULL,
            status       TEXT NOT NULL DEFAULT 'Present',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_line_date ON attendance(line, date);
        "#,
    },
    Migration {
        version: "20240322_0003_attendance_operator_lookup",
        description: "Added (line, operator, date, timestamp) lookup index",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_operator_day
            ON attendance(line, operator_id, date, timestamp);
        "#,
    },
];

/// Ensure that the `log` table exists. It also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![chrono::Local::now().to_rfc3339(), m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations, in order.
///
/// Returns the number of migrations applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        tracing::info!(version = m.version, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

/// Versions known to this build, oldest first.
pub fn known_versions() -> Vec<&'static str> {
    MIGRATIONS.iter().map(|m| m.version).collect()
}
