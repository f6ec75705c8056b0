use super::open_registry;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::DigestLogic;
use crate::errors::AppResult;
use crate::notify::build_notifier;
use crate::ui::messages::success;
use crate::utils::date::{parse_date, today_utc};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Digest { line, date } = cmd {
        let day = match date {
            Some(d) => parse_date(d)?,
            None => today_utc(),
        };

        let registry = open_registry(cfg)?;
        let notifier = build_notifier(cfg)?;
        let count = DigestLogic::send(registry.get(line)?, &day, notifier.as_ref())?;

        success(format!(
            "Digest of {} for {} sent via {} ({} entries)",
            line,
            day,
            notifier.name(),
            count
        ));
    }
    Ok(())
}
