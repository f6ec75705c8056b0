use super::open_registry;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{CheckinLogic, CheckinRequest, TimestampInput};
use crate::errors::AppResult;
use crate::notify::{NotifyHook, PostCommitHook, build_notifier};
use crate::ui::messages::{info, success};
use chrono::Utc;

/// Digits only is read as epoch milliseconds.
fn timestamp_arg(raw: &str) -> TimestampInput {
    raw.trim()
        .parse::<i64>()
        .map(TimestampInput::Millis)
        .unwrap_or_else(|_| TimestampInput::Text(raw.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        line,
        operator_id,
        at,
    } = cmd
    {
        let registry = open_registry(cfg)?;
        let repo = registry.get(line)?;
        let logic = CheckinLogic::new(cfg.cooldown());

        let req = CheckinRequest {
            operator_id: operator_id.clone(),
            timestamp: at.as_deref().map(timestamp_arg),
        };

        let outcome = logic.apply(repo, &req, Utc::now())?;
        let rec = &outcome.record;
        success(format!(
            "Check-in recorded: {} ({}) station {} at {}",
            rec.operator_name, rec.operator_id, rec.station, rec.timestamp
        ));

        if let Some(event) = outcome.completion {
            info(format!("All stations of {} marked for {}", event.line, event.day));
            let hook = NotifyHook::new(build_notifier(cfg)?);
            hook.on_roster_complete(event);
        }
    }
    Ok(())
}
