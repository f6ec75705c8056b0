use serde::{Deserialize, Serialize};

/// Display fallbacks used when a record points to an operator that is no
/// longer (or never was) on the roster.
pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_FIELD: &str = "N/A";

/// An operator registered on a production line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: String,              // ⇔ operators.id (opaque, unique per line)
    pub name: String,            // ⇔ operators.name
    pub employee_id: String,     // ⇔ operators.employee_id
    pub station: String,         // ⇔ operators.station
}

impl Operator {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        employee_id: impl Into<String>,
        station: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            employee_id: employee_id.into(),
            station: station.into(),
        }
    }
}

/// Denormalised operator fields, with sentinels for a missing join.
pub(crate) fn display_fields(op: Option<&Operator>) -> (String, String, String) {
    match op {
        Some(o) => (o.name.clone(), o.employee_id.clone(), o.station.clone()),
        None => (
            UNKNOWN_NAME.to_string(),
            UNKNOWN_FIELD.to_string(),
            UNKNOWN_FIELD.to_string(),
        ),
    }
}
