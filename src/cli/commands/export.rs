use super::open_registry;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        line,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let registry = open_registry(cfg)?;
        let repo = registry.get(line)?;
        ExportLogic::export(repo, *format, file, range.as_deref(), *force)?;
    }
    Ok(())
}
