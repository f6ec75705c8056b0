use crate::db::log::{LogEntry, load_log};
use crate::db::pool::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use ansi_term::Colour;

/// Colour of an operation in `log --print`.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "checkin" => Colour::Green,
        "checkin_rejected" => Colour::Yellow,
        "digest" => Colour::Blue,
        "digest_failed" => Colour::Red,
        "operator_add" => Colour::Cyan,
        "operator_del" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
        t.push_str("...");
        t
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &SqliteStore) -> AppResult<()> {
        let entries: Vec<LogEntry> = store.with_conn(load_log)?;

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        header("Internal log");

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let op_w = entries
            .iter()
            .map(|e| e.operation.len())
            .max()
            .unwrap_or(10)
            .min(24);

        for e in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| e.date.clone());

            let op = format!("{:<op_w$}", truncate(&e.operation, op_w));
            let target = if e.target.is_empty() {
                String::new()
            } else {
                format!("[{}] ", truncate(&e.target, 40))
            };

            println!(
                "{:>id_w$}  {}  {}  {}{}",
                e.id,
                date,
                color_for_operation(&e.operation).paint(op),
                target,
                truncate(&e.message, 80)
            );
        }

        Ok(())
    }
}
