use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, AttendanceStatus, NewRecord, Operator, format_timestamp};
use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const RECORD_COLUMNS: &str = "id, line, operator_id, date, timestamp, status";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_record_row(row: &Row) -> Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let ts_str: String = row.get("timestamp")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(3, AppError::InvalidDate(date_str.clone())))?;

    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(4, AppError::InvalidTimestamp(ts_str.clone())))?;

    let status: String = row.get("status")?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        line: row.get("line")?,
        operator_id: row.get("operator_id")?,
        date,
        timestamp,
        status: AttendanceStatus::from_db_str(&status),
    })
}

pub fn map_operator_row(row: &Row) -> Result<Operator> {
    Ok(Operator {
        id: row.get("id")?,
        name: row.get("name")?,
        employee_id: row.get("employee_id")?,
        station: row.get("station")?,
    })
}

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Operators (roster)
// ---------------------------

pub fn find_operator(conn: &Connection, line: &str, id: &str) -> AppResult<Option<Operator>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, employee_id, station FROM operators
         WHERE line = ?1 AND id = ?2",
    )?;
    Ok(stmt
        .query_row(params![line, id], map_operator_row)
        .optional()?)
}

pub fn list_operators(conn: &Connection, line: &str) -> AppResult<Vec<Operator>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, employee_id, station FROM operators
         WHERE line = ?1
         ORDER BY station ASC, name ASC",
    )?;
    let rows = stmt.query_map([line], map_operator_row)?;
    collect(rows)
}

pub fn insert_operator(conn: &Connection, line: &str, op: &Operator) -> AppResult<()> {
    if find_operator(conn, line, &op.id)?.is_some() {
        return Err(AppError::OperatorExists(op.id.clone()));
    }

    conn.execute(
        "INSERT INTO operators (line, id, name, employee_id, station, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            line,
            op.id,
            op.name,
            op.employee_id,
            op.station,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Remove an operator from a roster. Returns false if it was not there.
/// Attendance rows are left untouched.
pub fn delete_operator(conn: &Connection, line: &str, id: &str) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM operators WHERE line = ?1 AND id = ?2",
        params![line, id],
    )?;
    Ok(n > 0)
}

// ---------------------------
// Attendance ledger
// ---------------------------

/// Most recent record of an operator on a given day.
pub fn latest_for_operator(
    conn: &Connection,
    line: &str,
    operator_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM attendance
         WHERE line = ?1 AND operator_id = ?2 AND date = ?3
         ORDER BY timestamp DESC, id DESC
         LIMIT 1"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt
        .query_row(
            params![line, operator_id, date.format("%Y-%m-%d").to_string()],
            map_record_row,
        )
        .optional()?)
}

pub fn records_on(conn: &Connection, line: &str, date: &NaiveDate) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM attendance
         WHERE line = ?1 AND date = ?2
         ORDER BY timestamp ASC, id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(
        params![line, date.format("%Y-%m-%d").to_string()],
        map_record_row,
    )?;
    collect(rows)
}

/// Records whose `date` starts with `prefix` (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`).
/// The caller validates the prefix.
pub fn records_with_prefix(
    conn: &Connection,
    line: &str,
    prefix: &str,
) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM attendance
         WHERE line = ?1 AND date LIKE ?2 || '%'
         ORDER BY date ASC, timestamp ASC, id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params![line, prefix], map_record_row)?;
    collect(rows)
}

/// Records with `from <= date <= to`.
pub fn records_between(
    conn: &Connection,
    line: &str,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM attendance
         WHERE line = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, timestamp ASC, id ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(
        params![
            line,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_record_row,
    )?;
    collect(rows)
}

pub fn insert_record(conn: &Connection, line: &str, rec: &NewRecord) -> AppResult<AttendanceRecord> {
    conn.execute(
        "INSERT INTO attendance (line, operator_id, date, timestamp, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            line,
            rec.operator_id,
            rec.date.format("%Y-%m-%d").to_string(),
            format_timestamp(&rec.timestamp),
            rec.status.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;

    Ok(AttendanceRecord {
        id: conn.last_insert_rowid(),
        line: line.to_string(),
        operator_id: rec.operator_id.clone(),
        date: rec.date,
        timestamp: rec.timestamp,
        status: rec.status.clone(),
    })
}
