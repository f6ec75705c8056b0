use super::Digest;
use crate::errors::AppResult;

const COLUMNS: [&str; 5] = ["Operator Name", "Employee ID", "Station", "Timestamp", "Status"];

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inline HTML body: a heading and one table row per entry.
pub fn render_html(digest: &Digest) -> String {
    let mut html = format!(
        "<h3>{}</h3><p>Line {} &middot; {}</p><table border=\"1\"><tr>",
        escape_html(&digest.title),
        escape_html(&digest.line),
        digest.day.format("%Y-%m-%d")
    );
    for c in COLUMNS {
        html.push_str(&format!("<th>{c}</th>"));
    }
    html.push_str("</tr>");

    for e in &digest.entries {
        html.push_str("<tr>");
        for cell in [&e.operator_name, &e.employee_id, &e.station, &e.timestamp, &e.status] {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>");
    }

    if digest.entries.is_empty() {
        html.push_str(&format!(
            "<tr><td colspan=\"{}\">No check-ins recorded</td></tr>",
            COLUMNS.len()
        ));
    }

    html.push_str("</table>");
    html
}

/// Same rows as CSV, for the attachment.
pub fn render_csv(digest: &Digest) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(COLUMNS)?;
    for e in &digest.entries {
        wtr.write_record([&e.operator_name, &e.employee_id, &e.station, &e.timestamp, &e.status])?;
    }
    wtr.into_inner()
        .map_err(|e| crate::errors::AppError::Export(e.to_string()))
}
