use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status of an attendance record.
///
/// The check-in path only ever writes `Present`; any other value found in
/// the database is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Other(String),
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Other(s) => s.as_str(),
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "Present" => AttendanceStatus::Present,
            other => AttendanceStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_db_str())
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AttendanceStatus::from_db_str(&s))
    }
}
