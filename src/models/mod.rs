pub mod attendance;
pub mod operator;
pub mod status;

pub use attendance::{AttendanceRecord, AttendanceView, NewRecord, format_timestamp};
pub use operator::Operator;
pub use status::AttendanceStatus;
