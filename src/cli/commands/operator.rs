use super::open_registry;
use crate::cli::parser::{Commands, OperatorAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Operator;
use crate::ui::messages::{success, warning};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Operator { action } = cmd else {
        return Ok(());
    };
    let registry = open_registry(cfg)?;

    match action {
        OperatorAction::Add {
            line,
            id,
            name,
            employee_id,
            station,
        } => {
            let id = id.trim();
            if id.is_empty() {
                return Err(AppError::Validation("Operator ID is required".into()));
            }
            let repo = registry.get(line)?;
            repo.add_operator(&Operator::new(id, name, employee_id, station))?;
            repo.audit("operator_add", &format!("{} ({}) at {}", id, name, station));
            success(format!("Operator {} added to {} at station {}", id, line, station));
        }
        OperatorAction::List { line } => {
            let roster = registry.get(line)?.roster()?;
            if roster.is_empty() {
                warning(format!("No operators registered on {}", line));
                return Ok(());
            }
            let mut table = Table::new(["ID", "Name", "Employee ID", "Station"]);
            for op in roster {
                table.add_row(vec![op.id, op.name, op.employee_id, op.station]);
            }
            print!("{}", table.render());
        }
        OperatorAction::Del { line, id } => {
            let repo = registry.get(line)?;
            repo.remove_operator(id)?;
            repo.audit("operator_del", id);
            success(format!("Operator {} removed from {}", id, line));
        }
    }

    Ok(())
}
