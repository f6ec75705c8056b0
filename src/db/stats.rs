use crate::db::migrate::known_versions;
use crate::db::pool::SqliteStore;
use crate::errors::AppResult;
use ansi_term::Colour::{Cyan, Fixed, Green, Yellow};
use rusqlite::OptionalExtension;
use std::fs;

/// Row counts of one line, for `db --info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStats {
    pub line: String,
    pub operators: i64,
    pub records: i64,
}

pub fn line_stats(store: &SqliteStore) -> AppResult<Vec<LineStats>> {
    store.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT line,
                    SUM(CASE WHEN kind = 'op' THEN 1 ELSE 0 END),
                    SUM(CASE WHEN kind = 'rec' THEN 1 ELSE 0 END)
             FROM (
                 SELECT line, 'op' AS kind FROM operators
                 UNION ALL
                 SELECT line, 'rec' AS kind FROM attendance
             )
             GROUP BY line
             ORDER BY line ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(LineStats {
                line: row.get(0)?,
                operators: row.get(1)?,
                records: row.get(2)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

pub fn print_db_info(store: &SqliteStore) -> AppResult<()> {
    let label = |s: &str| Cyan.paint(format!("• {s}:")).to_string();
    let grey = Fixed(244);

    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(store.path()).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{} {}", label("File"), Yellow.paint(store.path()));
    println!("{} {:.2} MB", label("Size"), file_mb);

    //
    // 2) SCHEMA VERSION
    //
    let latest: Option<String> = store.with_conn(|conn| {
        Ok(conn
            .query_row(
                "SELECT target FROM log
                 WHERE operation = 'migration_applied'
                 ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?)
    })?;
    let expected = known_versions().last().copied().unwrap_or("-");
    println!(
        "{} {} {}",
        label("Schema"),
        latest.as_deref().unwrap_or("none"),
        grey.paint(format!("(latest known: {expected})"))
    );

    //
    // 3) PER-LINE COUNTS
    //
    let stats = line_stats(store)?;
    if stats.is_empty() {
        println!("{} {}", label("Lines"), grey.paint("none"));
    }
    for s in stats {
        println!(
            "{} {} operators, {} check-ins",
            label(&format!("Line {}", s.line)),
            Green.paint(s.operators.to_string()),
            Green.paint(s.records.to_string())
        );
    }

    //
    // 4) DATE RANGE
    //
    let (first, last): (Option<String>, Option<String>) = store.with_conn(|conn| {
        Ok(conn.query_row(
            "SELECT MIN(date), MAX(date) FROM attendance",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?)
    })?;

    match (first, last) {
        (Some(f), Some(l)) => println!("{} {} → {}", label("Range"), f, l),
        _ => println!("{} {}", label("Range"), grey.paint("no check-ins")),
    }

    println!();
    Ok(())
}
