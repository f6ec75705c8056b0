use super::open_registry;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { line, date } = cmd {
        let registry = open_registry(cfg)?;
        let views = ReportLogic::list_prefix(registry.get(line)?, date)?;

        if views.is_empty() {
            warning(format!("No check-ins on {} for '{}'", line, date));
            return Ok(());
        }

        header(format!("Attendance of {} for {}", line, date));

        let mut table = Table::new(["Timestamp", "Operator", "Employee ID", "Station", "Status"]);
        for v in &views {
            table.add_row(vec![
                v.timestamp.clone(),
                v.operator_name.clone(),
                v.employee_id.clone(),
                v.station.clone(),
                v.status.to_string(),
            ]);
        }
        print!("{}", table.render());
        println!("\n{} check-in(s)", views.len());
    }
    Ok(())
}
