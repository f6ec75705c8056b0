// src/export/logic.rs

use crate::core::registry::LineRepository;
use crate::core::report::{ExportRow, ReportLogic};
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::range::parse_range;
use crate::ui::messages::{info, warning};
use std::path::Path;

/// File export of a line's attendance.
pub struct ExportLogic;

impl ExportLogic {
    /// - `format`: csv | json
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period understood by [`parse_range`]
    ///
    /// Returns the number of rows written.
    pub fn export(
        repo: &LineRepository,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let views = match range {
            None => ReportLogic::list_all(repo)?,
            Some(r) if r.eq_ignore_ascii_case("all") => ReportLogic::list_all(repo)?,
            Some(r) => {
                let (from, to) = parse_range(r)?;
                ReportLogic::export_range(repo, &from, &to)?
            }
        };

        if views.is_empty() {
            warning(format!(
                "No check-ins found for line {} in the selected range.",
                repo.line()
            ));
            return Ok(0);
        }

        let rows: Vec<ExportRow> = views.iter().map(ExportRow::from).collect();

        info(format!(
            "Exporting {} rows of line {} to {}: {}",
            rows.len(),
            repo.line(),
            format.as_str().to_uppercase(),
            path.display()
        ));

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
